//! Half-open, 0-based genomic intervals.
use std::fmt;

use serde::Serialize;

use crate::errors::*;

/// A half-open interval `[start, end)` on a chromosome (0-based).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    /// Fails with `InvalidInterval` unless `start < end`.
    pub fn new(chrom: &str, start: u64, end: u64) -> Result<GenomicInterval> {
        if start < end {
            Ok(GenomicInterval {
                chrom: chrom.to_string(),
                start,
                end,
            })
        } else {
            Err(ErrorKind::InvalidInterval(chrom.to_string(), start, end).into())
        }
    }

    /// Parses `chrom:start-end`; thousands separators are accepted.
    pub fn parse(text: &str) -> Result<GenomicInterval> {
        let invalid = || Error::from(ErrorKind::InvalidRegion(text.to_string()));

        let colon = text.rfind(':').ok_or_else(invalid)?;
        let (chrom, coords) = (&text[..colon], &text[colon + 1..]);
        let mut fields = coords.splitn(2, '-');

        let mut parse_coord = || -> Result<u64> {
            let field = fields.next().ok_or_else(invalid)?.replace(',', "");

            field.trim().parse::<u64>().map_err(|_| invalid())
        };

        let start = parse_coord()?;
        let end = parse_coord()?;
        if chrom.is_empty() {
            return Err(invalid());
        }

        GenomicInterval::new(chrom, start, end)
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position < self.end
    }

    pub fn overlaps(&self, other: &GenomicInterval) -> bool {
        self.chrom == other.chrom && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
