use std::io::Write;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::args::FilterArgs;
use crate::common::{open_file_or_stdout, reference_name};
use crate::errors::*;
use crate::filter::{CandidateGuide, GuideFilter, Mode};
use crate::interval::GenomicInterval;
use crate::reference::FastaReference;
use crate::scanner::Strands;
use crate::snps::PopulationIndex;

fn filter_region(
    args: &FilterArgs,
    index: &PopulationIndex,
    region: &str,
    strands: Strands,
) -> Result<Option<(String, Vec<CandidateGuide>)>> {
    let region = GenomicInterval::parse(region)?;
    let chrom = reference_name(&region.chrom);
    let mut reference = FastaReference::open(&args.fasta)?;

    let guides = GuideFilter::new().with_population(index).filter(
        &mut reference,
        &chrom,
        region.start,
        region.end,
        Mode::Clean,
        strands,
    );

    match guides {
        Ok(guides) => Ok(Some((chrom, guides.collect()))),
        // A missing index only affects regions on that chromosome
        Err(Error(ErrorKind::MissingIndex(_, path), _)) => {
            warn!("skipping {}: no SNP index at {:?}", region, path);
            Ok(None)
        }
        Err(err) => Err(err).chain_err(|| format!("failed to filter guides in {}", region)),
    }
}

pub fn main(args: &FilterArgs) -> Result<()> {
    ::rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .chain_err(|| "failed to build thread pool")?;

    let index = PopulationIndex::new(&args.snps);
    let strands = if args.forward_only {
        Strands::Forward
    } else {
        Strands::Both
    };

    info!("Finding target sites in {} region(s)", args.regions.len());
    let results: Vec<Result<Option<(String, Vec<CandidateGuide>)>>> = args
        .regions
        .par_iter()
        .map(|region| filter_region(args, &index, region, strands))
        .collect();

    let mut out = open_file_or_stdout(&args.output)?;
    writeln!(out, "chrom\tstart\tend\tsequence").chain_err(|| "failed to write output header")?;

    let mut count = 0;
    for result in results {
        if let Some((chrom, guides)) = result? {
            for guide in guides {
                let site = &guide.protospacer;

                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    chrom,
                    site.start,
                    site.end,
                    site.sequence()
                )
                .chain_err(|| "failed to write output row")?;
                count += 1;
            }
        }
    }

    info!("  wrote {} SNP-free target sites", count);

    Ok(())
}
