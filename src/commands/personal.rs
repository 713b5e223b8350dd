use std::io::Write;

use tracing::info;

use crate::args::PersonalArgs;
use crate::common::{open_file_or_stdout, reference_name};
use crate::errors::*;
use crate::filter::{CandidateGuide, GuideFilter, Mode};
use crate::interval::GenomicInterval;
use crate::reference::FastaReference;
use crate::scanner::Strands;
use crate::variants::VariantLookup;

fn format_hits(guide: &CandidateGuide) -> String {
    if guide.has_hits() {
        guide
            .hits()
            .iter()
            .map(|hit| hit.to_string())
            .collect::<Vec<_>>()
            .join(";")
    } else {
        "NA".into()
    }
}

pub fn main(args: &PersonalArgs) -> Result<()> {
    let region = GenomicInterval::parse(&args.region)?;
    let chrom = reference_name(&region.chrom);

    info!("Loading reference {:?}", args.fasta);
    let mut reference = FastaReference::open(&args.fasta)?;
    let variants = VariantLookup::read(&args.variants)?;

    info!("Finding target sites in {}", region);
    let guides = GuideFilter::new().with_personal(&variants).filter(
        &mut reference,
        &chrom,
        region.start,
        region.end,
        Mode::OverlapReport,
        Strands::Both,
    )?;

    let mut out = open_file_or_stdout(&args.output)?;
    writeln!(out, "start\tstrand\tguide\toverlaps").chain_err(|| "failed to write output header")?;

    let mut count = 0;
    for guide in guides {
        // Keep either only the guides hitting personal variants or only those that do not
        if guide.has_hits() == args.overlap_only {
            let site = &guide.protospacer;

            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                site.start,
                site.strand.strand_symbol(),
                site.sequence(),
                format_hits(&guide)
            )
            .chain_err(|| "failed to write output row")?;
            count += 1;
        }
    }

    info!("  wrote {} target sites", count);

    Ok(())
}
