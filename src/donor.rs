//! ssODN donor construction around a SpCas9 cut site.
//!
//! The guide is located in the reference, the blunt cut is placed 3 bp
//! upstream of the PAM, homology arms are taken from either side of the cut,
//! the requested edit is applied, and codons between the PAM and the edit are
//! replaced by synonymous codons so that the repaired allele is not cut again.
//!
//! Genomic coordinates are 0-based and half-open; `SilentMutation::position`
//! and `EditAnnotation::donor_offset` are offsets into the donor sequence.
use std::str::FromStr;

use bio::alphabets::dna;
use bio_types::strand::Strand;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::codon;
use crate::common::is_unambiguous_dna;
use crate::constants::{CUT_OFFSET, DEFAULT_ARM_LENGTH};
use crate::errors::*;
use crate::interval::GenomicInterval;
use crate::reference::ReferenceProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditType {
    Substitution,
    Insertion,
    Deletion,
}

impl FromStr for EditType {
    type Err = Error;

    fn from_str(value: &str) -> Result<EditType> {
        match value.to_ascii_lowercase().as_ref() {
            "substitution" | "sub" => Ok(EditType::Substitution),
            "insertion" | "ins" => Ok(EditType::Insertion),
            "deletion" | "del" => Ok(EditType::Deletion),
            _ => Err(ErrorKind::UnsupportedEditType(value.to_string()).into()),
        }
    }
}

/// The edit to encode. For deletions only the length of `payload` matters.
#[derive(Clone, Debug, PartialEq)]
pub struct EditSpec {
    pub edit_type: EditType,
    pub coord: u64,
    pub payload: String,
}

impl EditSpec {
    pub fn new(edit_type: EditType, coord: u64, payload: &str) -> EditSpec {
        EditSpec {
            edit_type,
            coord,
            payload: payload.to_ascii_uppercase(),
        }
    }

    /// Parses `type:coord:payload`, e.g. `substitution:5512345:T`.
    pub fn parse(text: &str) -> Result<EditSpec> {
        let fields: Vec<&str> = text.splitn(3, ':').collect();
        match fields.as_slice() {
            [edit_type, coord, payload] => {
                let coord = coord
                    .replace(',', "")
                    .parse::<u64>()
                    .chain_err(|| format!("invalid edit coordinate in {:?}", text))?;

                Ok(EditSpec::new(edit_type.parse()?, coord, payload))
            }
            _ => Err(ErrorKind::InvalidEdit(format!(
                "expected type:coord:payload, found {:?}",
                text
            ))
            .into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EditAnnotation {
    #[serde(rename = "type")]
    pub edit_type: EditType,
    pub coord: u64,
    pub donor_offset: usize,
    /// Substituted or inserted bases; for deletions, the payload given by the caller.
    pub sequence: String,
    /// Number of reference bases replaced or removed.
    pub length: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SilentMutation {
    pub position: usize,
    pub from: String,
    pub to: String,
}

fn serialize_strand<S: Serializer>(
    strand: &Strand,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(strand.strand_symbol())
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonorResult {
    pub donor: String,
    #[serde(serialize_with = "serialize_strand")]
    pub strand: Strand,
    pub guide: Span,
    pub cut_site: u64,
    pub left_arm: Span,
    pub right_arm: Span,
    pub edit: EditAnnotation,
    pub silent_mutations: Vec<SilentMutation>,
}

impl DonorResult {
    pub fn left_arm_len(&self) -> usize {
        (self.left_arm.end - self.left_arm.start) as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonorDesigner {
    arm_length: u64,
}

impl Default for DonorDesigner {
    fn default() -> DonorDesigner {
        DonorDesigner {
            arm_length: DEFAULT_ARM_LENGTH,
        }
    }
}

impl DonorDesigner {
    pub fn new(arm_length: u64) -> DonorDesigner {
        DonorDesigner { arm_length }
    }

    pub fn arm_length(&self) -> u64 {
        self.arm_length
    }

    /// Designs a donor for `guide` on `chrom`.
    ///
    /// `search_region` restricts the guide search to `[start, end)`; without
    /// it the whole chromosome is searched. Either the whole design succeeds
    /// or an error is returned.
    pub fn design<R: ReferenceProvider + ?Sized>(
        &self,
        reference: &mut R,
        chrom: &str,
        guide: &str,
        edit: &EditSpec,
        search_region: Option<(u64, u64)>,
    ) -> Result<DonorResult> {
        let arm_length = self.arm_length;
        let guide = guide.to_ascii_uppercase().into_bytes();
        if guide.len() <= CUT_OFFSET || !is_unambiguous_dna(&guide) {
            return Err(format!(
                "invalid guide {:?}; expected more than {} A/C/G/T bases",
                String::from_utf8_lossy(&guide),
                CUT_OFFSET
            )
            .into());
        }

        let (region_start, region) = match search_region {
            Some((start, end)) => {
                let region = GenomicInterval::new(chrom, start, end)?;
                (start, reference.get(chrom, region.start, region.end)?)
            }
            None => (0, reference.get_all(chrom)?),
        };

        let (strand, guide, idx) = match find(&region, &guide) {
            Some(idx) => (Strand::Forward, guide, idx),
            None => {
                let rc = dna::revcomp(&guide);
                match find(&region, &rc) {
                    Some(idx) => (Strand::Reverse, rc, idx),
                    None => {
                        return Err(ErrorKind::GuideNotFound(
                            chrom.to_string(),
                            String::from_utf8_lossy(&guide).into_owned(),
                            region_start,
                            region_start + region.len() as u64,
                        )
                        .into())
                    }
                }
            }
        };

        let guide_start = region_start + idx as u64;
        let cut = guide_start + (guide.len() - CUT_OFFSET) as u64;
        if edit.coord < cut.saturating_sub(arm_length)
            || edit.coord >= cut.saturating_add(arm_length)
        {
            return Err(ErrorKind::EditOutOfBounds(edit.coord, cut, arm_length).into());
        }

        let left_start = cut.saturating_sub(arm_length);
        let left_arm = reference.get(chrom, left_start, cut)?;
        let right_arm = reference.get(chrom, cut, cut.saturating_add(arm_length))?;
        debug!(
            chrom,
            cut,
            left = left_arm.len(),
            right = right_arm.len(),
            "built homology arms"
        );

        let rel = if edit.coord < cut {
            (edit.coord - left_start) as usize
        } else {
            left_arm.len() + (edit.coord - cut) as usize
        };

        let mut donor = left_arm.clone();
        donor.extend_from_slice(&right_arm);
        let annotation = apply_edit(&mut donor, rel, edit)?;

        let pam_rel = left_arm.len() + guide.len() - CUT_OFFSET;
        let silent_mutations = introduce_silent_mutations(&mut donor, pam_rel, rel);

        Ok(DonorResult {
            donor: String::from_utf8_lossy(&donor).into_owned(),
            strand,
            guide: Span {
                start: guide_start,
                end: guide_start + guide.len() as u64,
            },
            cut_site: cut,
            left_arm: Span {
                start: left_start,
                end: cut,
            },
            right_arm: Span {
                start: cut,
                end: cut + right_arm.len() as u64,
            },
            edit: annotation,
            silent_mutations,
        })
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn apply_edit(donor: &mut Vec<u8>, rel: usize, edit: &EditSpec) -> Result<EditAnnotation> {
    let payload = edit.payload.as_bytes();
    if payload.is_empty() {
        return Err(ErrorKind::InvalidEdit("edit payload is empty".into()).into());
    }

    let length = match edit.edit_type {
        EditType::Substitution => 1,
        EditType::Insertion => 0,
        EditType::Deletion => payload.len(),
    };

    if edit.edit_type != EditType::Deletion && !is_unambiguous_dna(payload) {
        return Err(ErrorKind::InvalidEdit(format!(
            "payload {:?} is not an A/C/G/T sequence",
            edit.payload
        ))
        .into());
    } else if rel + length > donor.len() || rel > donor.len() {
        return Err(ErrorKind::InvalidEdit(format!(
            "edit of {} base(s) at donor offset {} runs past donor of length {}",
            length,
            rel,
            donor.len()
        ))
        .into());
    }

    match edit.edit_type {
        EditType::Substitution | EditType::Insertion => {
            donor.splice(rel..rel + length, payload.iter().cloned());
        }
        EditType::Deletion => {
            donor.drain(rel..rel + length);
        }
    }

    Ok(EditAnnotation {
        edit_type: edit.edit_type,
        coord: edit.coord,
        donor_offset: rel,
        sequence: edit.payload.clone(),
        length,
    })
}

/// Replaces every translatable codon from the codon boundary at or before
/// `pam_rel` up to, but excluding, the codon containing `edit_rel` with its
/// first synonym. Stop codons and codons without synonyms are kept.
pub fn introduce_silent_mutations(
    donor: &mut [u8],
    pam_rel: usize,
    edit_rel: usize,
) -> Vec<SilentMutation> {
    let mut mutations = Vec::new();

    let mut pos = pam_rel - pam_rel % 3;
    while pos + 3 <= edit_rel && pos + 3 <= donor.len() {
        let codon = &mut donor[pos..pos + 3];
        if let Some(synonym) = codon::first_synonym(codon) {
            mutations.push(SilentMutation {
                position: pos,
                from: String::from_utf8_lossy(codon).into_owned(),
                to: String::from_utf8_lossy(&synonym).into_owned(),
            });

            codon.copy_from_slice(&synonym);
        }

        pos += 3;
    }

    mutations
}
