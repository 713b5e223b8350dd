use std::io::Write;

use tracing::info;

use crate::args::DonorArgs;
use crate::common::{open_file_or_stdout, reference_name};
use crate::donor::DonorDesigner;
use crate::errors::*;
use crate::reference::FastaReference;

pub fn main(args: &DonorArgs) -> Result<()> {
    let chrom = reference_name(&args.chrom);
    let mut reference = FastaReference::open(&args.fasta)?;

    info!(
        "Designing ssODN for {} on {} with {}bp arms",
        args.guide, chrom, args.arm_length
    );
    let result = DonorDesigner::new(args.arm_length)
        .design(&mut reference, &chrom, &args.guide, &args.edit, args.region)
        .chain_err(|| "failed to design ssODN donor")?;
    info!(
        "  cut site at {}; {}bp left arm; {} silent mutation(s)",
        result.cut_site,
        result.left_arm_len(),
        result.silent_mutations.len()
    );

    let mut out = open_file_or_stdout(&args.output)?;
    serde_json::to_writer_pretty(&mut out, &result)?;
    writeln!(out).chain_err(|| "failed to write output")?;

    Ok(())
}
