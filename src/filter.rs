//! Screening of scanned protospacers against population and personal variants.
use std::sync::Arc;

use tracing::debug;

use crate::errors::*;
use crate::reference::ReferenceProvider;
use crate::scanner::{scan, Protospacer, Strands};
use crate::snps::{IntervalSet, PopulationIndex};
use crate::variants::{VariantLookup, VariantRecord};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Only guides whose span misses every common SNP.
    Clean,
    /// Every guide, annotated with the personal variants inside its span.
    OverlapReport,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Screening {
    Clean,
    Overlaps(Vec<VariantRecord>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandidateGuide {
    pub protospacer: Protospacer,
    pub screening: Screening,
}

impl CandidateGuide {
    pub fn hits(&self) -> &[VariantRecord] {
        match &self.screening {
            Screening::Clean => &[],
            Screening::Overlaps(hits) => hits,
        }
    }

    pub fn has_hits(&self) -> bool {
        !self.hits().is_empty()
    }
}

pub type Candidates<'a> = Box<dyn Iterator<Item = CandidateGuide> + 'a>;

/// Combines the protospacer scan with whichever variant sources are available.
#[derive(Clone, Copy, Default)]
pub struct GuideFilter<'a> {
    population: Option<&'a PopulationIndex>,
    personal: Option<&'a VariantLookup>,
}

impl<'a> GuideFilter<'a> {
    pub fn new() -> GuideFilter<'a> {
        GuideFilter::default()
    }

    pub fn with_population(mut self, index: &'a PopulationIndex) -> GuideFilter<'a> {
        self.population = Some(index);
        self
    }

    pub fn with_personal(mut self, variants: &'a VariantLookup) -> GuideFilter<'a> {
        self.personal = Some(variants);
        self
    }

    /// Scans `[start, end)` and screens each protospacer according to `mode`.
    ///
    /// The population index for `chrom` is loaded before scanning, so a
    /// missing index is reported here rather than mid-iteration.
    pub fn filter<R: ReferenceProvider + ?Sized>(
        &self,
        reference: &mut R,
        chrom: &str,
        start: u64,
        end: u64,
        mode: Mode,
        strands: Strands,
    ) -> Result<Candidates<'a>> {
        match mode {
            Mode::Clean => {
                let index = match self.population {
                    Some(index) => index,
                    None => return Err("clean mode requires a population SNP index".into()),
                };

                let snps: Arc<IntervalSet> = index.load(chrom)?;
                let sites = scan(reference, chrom, start, end, strands)?;

                Ok(Box::new(sites.filter_map(move |site| {
                    if snps.has_overlap(site.start, site.end) {
                        debug!(start = site.start, "guide overlaps common SNP");
                        None
                    } else {
                        Some(CandidateGuide {
                            protospacer: site,
                            screening: Screening::Clean,
                        })
                    }
                })))
            }
            Mode::OverlapReport => {
                let variants = match self.personal {
                    Some(variants) => variants,
                    None => return Err("overlap-report mode requires personal variants".into()),
                };

                let sites = scan(reference, chrom, start, end, strands)?;

                Ok(Box::new(sites.map(move |site| {
                    let hits = variants.overlaps(&site.chrom, site.start, site.end).to_vec();

                    CandidateGuide {
                        protospacer: site,
                        screening: Screening::Overlaps(hits),
                    }
                })))
            }
        }
    }
}
