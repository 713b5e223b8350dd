//! Access to reference sequence windows using half-open coordinates.
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;

use bio::io::fasta;
use tracing::debug;

use crate::errors::*;

/// Source of uppercase reference sequence.
pub trait ReferenceProvider {
    fn length(&self, chrom: &str) -> Result<u64>;

    /// Returns `[start, end)` in uppercase; `end` is clamped to the sequence length.
    fn get(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<u8>>;

    fn get_all(&mut self, chrom: &str) -> Result<Vec<u8>> {
        let len = self.length(chrom)?;

        self.get(chrom, 0, len)
    }
}

/// Indexed FASTA file; requires a `.fai` next to the FASTA.
pub struct FastaReference {
    reader: fasta::IndexedReader<File>,
    lengths: HashMap<String, u64>,
}

impl FastaReference {
    pub fn open<P: AsRef<Path> + Debug>(filename: &P) -> Result<FastaReference> {
        // File handles are opened individually for better error reporting
        let fai = fasta::Index::with_fasta_file(filename).map_err(|err| {
            ErrorKind::Msg(format!(
                "failed to open FASTA index file for {:?}: {}",
                filename, err
            ))
        })?;
        let handle = File::open(filename)
            .chain_err(|| format!("failed to open FASTA file {:?}", filename))?;
        let reader = fasta::IndexedReader::with_index(handle, fai);

        let lengths = reader
            .index
            .sequences()
            .into_iter()
            .map(|seq| (seq.name, seq.len))
            .collect();

        Ok(FastaReference { reader, lengths })
    }
}

impl ReferenceProvider for FastaReference {
    fn length(&self, chrom: &str) -> Result<u64> {
        match self.lengths.get(chrom) {
            Some(&len) => Ok(len),
            None => Err(ErrorKind::UnknownSequence(chrom.to_string()).into()),
        }
    }

    fn get(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<u8>> {
        let end = u64::min(end, self.length(chrom)?);
        let mut sequence = Vec::new();
        if start >= end {
            return Ok(sequence);
        }

        debug!(chrom, start, end, "fetching reference window");
        self.reader
            .fetch(chrom, start, end)
            .chain_err(|| format!("failed to fetch {}:{}-{}", chrom, start, end))?;
        self.reader
            .read(&mut sequence)
            .chain_err(|| format!("failed to read {}:{}-{}", chrom, start, end))?;

        sequence.make_ascii_uppercase();
        Ok(sequence)
    }
}

/// Reference held entirely in memory, keyed by sequence name.
#[derive(Clone, Debug, Default)]
pub struct MemoryReference {
    sequences: HashMap<String, Vec<u8>>,
}

impl MemoryReference {
    pub fn new() -> MemoryReference {
        MemoryReference::default()
    }

    pub fn insert(&mut self, chrom: &str, sequence: &[u8]) {
        self.sequences
            .insert(chrom.to_string(), sequence.to_ascii_uppercase());
    }
}

impl ReferenceProvider for MemoryReference {
    fn length(&self, chrom: &str) -> Result<u64> {
        match self.sequences.get(chrom) {
            Some(seq) => Ok(seq.len() as u64),
            None => Err(ErrorKind::UnknownSequence(chrom.to_string()).into()),
        }
    }

    fn get(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<u8>> {
        let sequence = match self.sequences.get(chrom) {
            Some(seq) => seq,
            None => return Err(ErrorKind::UnknownSequence(chrom.to_string()).into()),
        };

        let end = usize::min(end as usize, sequence.len());
        let start = usize::min(start as usize, end);

        Ok(sequence[start..end].to_vec())
    }
}
