use std::fs;
use std::path::Path;

use tracing::info;

use crate::args::SnpIndexArgs;
use crate::common::chrom_key;
use crate::constants::SNP_INDEX_EXTENSION;
use crate::errors::*;
use crate::progress;
use crate::snps::IntervalSet;
use crate::table;

/// Reads 1-based positions, keeping rows whose optional AF column is at least `min_af`.
fn collect_positions(table: &[Vec<String>], min_af: f64) -> Result<Vec<u64>> {
    let progress = progress::default(table.len());
    let mut positions = Vec::with_capacity(table.len());

    for (idx, row) in table.iter().enumerate() {
        let position: u64 = table::column(row, 0, idx + 1)?;
        let common = if row.len() > 1 {
            table::column::<f64>(row, 1, idx + 1)? >= min_af
        } else {
            true
        };

        if common {
            positions.push(position);
        }

        progress.inc(1);
    }

    progress.finish();

    Ok(positions)
}

pub fn main(args: &SnpIndexArgs) -> Result<()> {
    info!("Reading SNP positions from {:?}", args.table);
    let table = table::read(&args.table).chain_err(|| "failed to read table of SNP positions")?;
    info!("  read {} SNPs from table.", table.len());

    let positions = collect_positions(&table, args.min_af)?;
    info!(
        "  {} SNPs with AF >= {} on chromosome {}",
        positions.len(),
        args.min_af,
        args.chrom
    );

    let set = IntervalSet::from_positions(positions);
    info!("  {} merged intervals", set.len());

    fs::create_dir_all(&args.output_dir)
        .chain_err(|| format!("failed to create output directory {:?}", args.output_dir))?;
    let filename = Path::new(&args.output_dir).join(format!(
        "chr{}{}",
        chrom_key(&args.chrom),
        SNP_INDEX_EXTENSION
    ));

    info!("Writing SNP intervals to {:?}", filename);
    set.write(&args.chrom, &filename)
        .chain_err(|| "failed to write SNP index")?;

    Ok(())
}
