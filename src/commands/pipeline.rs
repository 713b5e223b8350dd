use std::io::Write;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::args::PipelineArgs;
use crate::common::{open_file_or_stdout, reference_name};
use crate::constants::MAX_RANKED_GUIDES;
use crate::donor::{DonorDesigner, DonorResult, EditSpec};
use crate::errors::*;
use crate::filter::{GuideFilter, Mode};
use crate::interval::GenomicInterval;
use crate::reference::{FastaReference, ReferenceProvider};
use crate::scanner::Strands;
use crate::score::{rank, GuideScorer, PlaceholderScorer, RankedGuide};
use crate::snps::PopulationIndex;
use crate::variants::VariantLookup;

#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    pub guides: Vec<RankedGuide>,
    pub ssodn: Option<DonorResult>,
}

/// Designs a donor for the highest ranked guide whose cut site can reach the edit.
pub fn design_best<R: ReferenceProvider + ?Sized>(
    reference: &mut R,
    region: &GenomicInterval,
    ranked: &[RankedGuide],
    edit: &EditSpec,
    designer: &DonorDesigner,
) -> Result<Option<DonorResult>> {
    for candidate in ranked {
        let result = designer.design(
            reference,
            &region.chrom,
            &candidate.guide,
            edit,
            Some((region.start, region.end)),
        );

        match result {
            Ok(donor) => return Ok(Some(donor)),
            Err(Error(ErrorKind::EditOutOfBounds(coord, cut, _), _)) => {
                debug!(
                    guide = %candidate.guide,
                    coord,
                    cut,
                    "edit out of reach of guide"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Ok(None)
}

/// Clean-mode filtering, optional removal of guides hitting personal
/// variants, ranking, and donor design.
pub fn run<R: ReferenceProvider + ?Sized, S: GuideScorer + ?Sized>(
    reference: &mut R,
    index: &PopulationIndex,
    variants: Option<&VariantLookup>,
    scorer: &S,
    region: &GenomicInterval,
    edit: Option<&EditSpec>,
    designer: &DonorDesigner,
) -> Result<PipelineOutput> {
    let candidates = GuideFilter::new().with_population(index).filter(
        reference,
        &region.chrom,
        region.start,
        region.end,
        Mode::Clean,
        Strands::Both,
    )?;

    let mut guides = Vec::new();
    for candidate in candidates {
        let site = &candidate.protospacer;
        if let Some(variants) = variants {
            if !variants.overlaps(&site.chrom, site.start, site.end).is_empty() {
                continue;
            }
        }

        guides.push(site.sequence().into_owned());
    }

    info!("  {} candidate guides after SNP filtering", guides.len());
    let ranked = rank(scorer, &guides, MAX_RANKED_GUIDES);

    let ssodn = match edit {
        Some(edit) if !ranked.is_empty() => {
            let donor = design_best(reference, region, &ranked, edit, designer)?;
            if donor.is_none() {
                warn!(
                    "no ranked guide cuts within {}bp of {}",
                    designer.arm_length(),
                    edit.coord
                );
            }

            donor
        }
        _ => None,
    };

    Ok(PipelineOutput {
        guides: ranked,
        ssodn,
    })
}

pub fn main(args: &PipelineArgs) -> Result<()> {
    ::rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .chain_err(|| "failed to build thread pool")?;

    let mut region = GenomicInterval::parse(&args.region)?;
    region.chrom = reference_name(&region.chrom);

    let mut reference = FastaReference::open(&args.fasta)?;
    let index = PopulationIndex::new(&args.snps);
    let variants = match &args.variants {
        Some(path) => Some(VariantLookup::read(path)?),
        None => None,
    };

    info!("Running pipeline on {}", region);
    let output = run(
        &mut reference,
        &index,
        variants.as_ref(),
        &PlaceholderScorer,
        &region,
        args.edit.as_ref(),
        &DonorDesigner::new(args.arm_length),
    )?;

    let mut out = open_file_or_stdout(&args.output)?;
    serde_json::to_writer_pretty(&mut out, &output)?;
    writeln!(out).chain_err(|| "failed to write output")?;

    Ok(())
}
