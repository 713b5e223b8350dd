//! NGG-anchored protospacer discovery on both strands.
use std::borrow::Cow;

use bio::alphabets::dna;
use bio_types::strand::Strand;

use crate::common::is_unambiguous_dna;
use crate::constants::{GUIDE_LEN, PAM_LEN};
use crate::errors::*;
use crate::interval::GenomicInterval;
use crate::reference::ReferenceProvider;

/// A 20-nt SpCas9 target. `start` and `end` are half-open genomic coordinates
/// of the protospacer itself (PAM excluded); for the reverse strand `sequence`
/// is the reverse complement of the forward strand over that span.
#[derive(Clone, Debug, PartialEq)]
pub struct Protospacer {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub sequence: Vec<u8>,
}

impl Protospacer {
    pub fn sequence(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.sequence)
    }

    pub fn interval(&self) -> GenomicInterval {
        GenomicInterval {
            chrom: self.chrom.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strands {
    Both,
    Forward,
}

/// Lazily yields protospacers in a window, ordered by PAM position; at a
/// given position a forward hit precedes a reverse hit.
#[derive(Clone, Debug)]
pub struct Protospacers {
    chrom: String,
    offset: u64,
    window: Vec<u8>,
    strands: Strands,
    pos: usize,
    pending: Option<Protospacer>,
}

impl Protospacers {
    // PAM NGG at [i, i + 3); protospacer at [i - 20, i)
    fn forward_at(&self, i: usize) -> Option<Protospacer> {
        if i < GUIDE_LEN || &self.window[i + 1..i + PAM_LEN] != b"GG" {
            return None;
        }

        let sequence = &self.window[i - GUIDE_LEN..i];
        if !is_unambiguous_dna(sequence) {
            return None;
        }

        let start = self.offset + (i - GUIDE_LEN) as u64;
        Some(Protospacer {
            chrom: self.chrom.clone(),
            start,
            end: start + GUIDE_LEN as u64,
            strand: Strand::Forward,
            sequence: sequence.to_vec(),
        })
    }

    // PAM CCN at [i, i + 3); protospacer at [i + 3, i + 23)
    fn reverse_at(&self, i: usize) -> Option<Protospacer> {
        let proto_start = i + PAM_LEN;
        let proto_end = proto_start + GUIDE_LEN;
        if proto_end > self.window.len() || &self.window[i..i + 2] != b"CC" {
            return None;
        }

        let sequence = &self.window[proto_start..proto_end];
        if !is_unambiguous_dna(sequence) {
            return None;
        }

        let start = self.offset + proto_start as u64;
        Some(Protospacer {
            chrom: self.chrom.clone(),
            start,
            end: start + GUIDE_LEN as u64,
            strand: Strand::Reverse,
            sequence: dna::revcomp(sequence),
        })
    }
}

impl Iterator for Protospacers {
    type Item = Protospacer;

    fn next(&mut self) -> Option<Protospacer> {
        if let Some(site) = self.pending.take() {
            return Some(site);
        }

        while self.pos + PAM_LEN <= self.window.len() {
            let i = self.pos;
            self.pos += 1;

            let forward = self.forward_at(i);
            let reverse = match self.strands {
                Strands::Both => self.reverse_at(i),
                Strands::Forward => None,
            };

            match (forward, reverse) {
                (Some(site), reverse) => {
                    self.pending = reverse;
                    return Some(site);
                }
                (None, Some(site)) => return Some(site),
                (None, None) => {}
            }
        }

        None
    }
}

/// Scans a sequence window whose first base lies at `offset` on `chrom`.
pub fn scan_sequence(chrom: &str, offset: u64, window: &[u8], strands: Strands) -> Protospacers {
    Protospacers {
        chrom: chrom.to_string(),
        offset,
        window: window.to_ascii_uppercase(),
        strands,
        pos: 0,
        pending: None,
    }
}

/// Scans `[start, end)` of `chrom`; sites that do not fit entirely inside the
/// window, PAM included, are skipped.
pub fn scan<R: ReferenceProvider + ?Sized>(
    reference: &mut R,
    chrom: &str,
    start: u64,
    end: u64,
    strands: Strands,
) -> Result<Protospacers> {
    let region = GenomicInterval::new(chrom, start, end)?;
    let window = reference
        .get(chrom, region.start, region.end)
        .chain_err(|| format!("failed to fetch scan window {}", region))?;

    Ok(scan_sequence(chrom, start, &window, strands))
}
