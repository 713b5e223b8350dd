//! Personal variants, grouped per chromosome and sorted by position.
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::common::chrom_key;
use crate::errors::*;
use crate::progress;
use crate::table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zygosity {
    Hom,
    Het,
}

impl Zygosity {
    /// Accepts "hom"/"het" or a diploid genotype such as "0/1" or "1|1".
    pub fn parse(value: &str) -> Option<Zygosity> {
        match value.to_ascii_lowercase().as_ref() {
            "hom" => return Some(Zygosity::Hom),
            "het" => return Some(Zygosity::Het),
            _ => {}
        }

        let alleles: Vec<&str> = value.split(|c: char| c == '/' || c == '|').collect();
        match alleles.as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => Some(if a == b {
                Zygosity::Hom
            } else {
                Zygosity::Het
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zygosity::Hom => write!(f, "hom"),
            Zygosity::Het => write!(f, "het"),
        }
    }
}

/// A single personal variant allele; `position` is 1-based as in the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    pub chrom: String,
    pub position: u64,
    pub reference: String,
    pub alt: String,
    pub zygosity: Zygosity,
}

impl VariantRecord {
    /// One record per comma-separated ALT allele, all sharing the same position.
    pub fn expand(
        chrom: &str,
        position: u64,
        reference: &str,
        alts: &str,
        zygosity: Zygosity,
    ) -> Vec<VariantRecord> {
        alts.split(',')
            .filter(|alt| !alt.is_empty())
            .map(|alt| VariantRecord {
                chrom: chrom.to_string(),
                position,
                reference: reference.to_string(),
                alt: alt.to_string(),
                zygosity,
            })
            .collect()
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}>{}({})",
            self.position, self.reference, self.alt, self.zygosity
        )
    }
}

#[derive(Debug, Default)]
pub struct VariantLookup {
    variants: HashMap<String, Vec<VariantRecord>>,
}

impl VariantLookup {
    pub fn new<I: IntoIterator<Item = VariantRecord>>(records: I) -> VariantLookup {
        let mut variants: HashMap<String, Vec<VariantRecord>> = HashMap::new();
        for record in records {
            variants
                .entry(chrom_key(&record.chrom).to_string())
                .or_insert_with(Vec::new)
                .push(record);
        }

        // Stable sort; records at the same position keep their input order
        for records in variants.values_mut() {
            records.sort_by_key(|record| record.position);
        }

        VariantLookup { variants }
    }

    /// Reads `chrom, pos, ref, alt[,alt..], zygosity` rows.
    pub fn read<P: AsRef<Path> + Debug>(path: &P) -> Result<VariantLookup> {
        info!("Loading personal variants from {:?}", path);
        let rows = table::read(path).chain_err(|| "failed to read table of variants")?;

        let progress = progress::counter("variants");
        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let line = idx + 1;
            let position: u64 = table::column(row, 1, line)?;
            let reference: String = table::column(row, 2, line)?;
            let alts: String = table::column(row, 3, line)?;
            let zygosity_str: String = table::column(row, 4, line)?;
            let zygosity = match Zygosity::parse(&zygosity_str) {
                Some(value) => value,
                None => {
                    return Err(format!(
                        "invalid zygosity {:?} in row {}",
                        zygosity_str, line
                    )
                    .into())
                }
            };

            records.extend(VariantRecord::expand(
                &row[0],
                position,
                &reference.to_ascii_uppercase(),
                &alts.to_ascii_uppercase(),
                zygosity,
            ));
            progress.inc(1);
        }

        progress.finish_and_clear();

        let lookup = VariantLookup::new(records);
        info!(
            "  {} variant alleles on {} chromosomes",
            lookup.len(),
            lookup.variants.len()
        );

        Ok(lookup)
    }

    pub fn len(&self) -> usize {
        self.variants.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.values().all(Vec::is_empty)
    }

    /// Variants whose position falls in `[start, end)`, in position order.
    pub fn overlaps(&self, chrom: &str, start: u64, end: u64) -> &[VariantRecord] {
        match self.variants.get(chrom_key(chrom)) {
            Some(records) if start < end => {
                let first = records.partition_point(|record| record.position < start);
                let last = records.partition_point(|record| record.position < end);

                &records[first..last]
            }
            _ => &[],
        }
    }
}
