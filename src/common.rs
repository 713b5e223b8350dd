use std::fs::File;
use std::io;
use std::io::Write;

use crate::errors::*;

/// Returns true if the sequence consists solely of A, C, G and T.
pub fn is_unambiguous_dna(seq: &[u8]) -> bool {
    seq.iter()
        .all(|nuc| matches!(nuc, b'A' | b'C' | b'G' | b'T'))
}

/// Key used for per-chromosome lookups; drops any leading "chr".
pub fn chrom_key(chrom: &str) -> &str {
    if chrom.len() > 3 && chrom[..3].eq_ignore_ascii_case("chr") {
        &chrom[3..]
    } else {
        chrom
    }
}

/// Name used for reference access; "7" becomes "chr7", "chr7" is left alone.
pub fn reference_name(chrom: &str) -> String {
    if chrom.len() > 3 && chrom[..3].eq_ignore_ascii_case("chr") {
        chrom.to_string()
    } else {
        format!("chr{}", chrom)
    }
}

pub fn open_file_or_stdout(file: &Option<String>) -> Result<Box<dyn Write>> {
    if let Some(path) = file {
        let handle =
            File::create(path).chain_err(|| format!("could not create output file {:?}", path))?;
        let writer = io::BufWriter::new(handle);

        Ok(Box::new(writer))
    } else {
        Ok(Box::new(io::stdout()))
    }
}
