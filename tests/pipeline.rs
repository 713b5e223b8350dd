extern crate hdrguide;

use hdrguide::commands::pipeline::run;
use hdrguide::donor::{DonorDesigner, EditSpec, EditType};
use hdrguide::interval::GenomicInterval;
use hdrguide::reference::MemoryReference;
use hdrguide::score::PlaceholderScorer;
use hdrguide::snps::{IntervalSet, PopulationIndex};
use hdrguide::variants::{VariantLookup, VariantRecord, Zygosity};

const FIRST: &[u8] = b"AAACGTTTCAGATCAGTACA";
const SECOND: &[u8] = b"GACTTCAGTAGCATGCTAGA";

// FIRST at [100, 120), cut 117; SECOND at [300, 320), cut 317
fn reference() -> MemoryReference {
    let mut seq = vec![b'T'; 100];
    seq.extend_from_slice(FIRST);
    seq.extend_from_slice(b"TGG");
    seq.extend_from_slice(&[b'T'; 177]);
    seq.extend_from_slice(SECOND);
    seq.extend_from_slice(b"AGG");
    seq.extend_from_slice(&[b'T'; 177]);

    let mut reference = MemoryReference::new();
    reference.insert("chr2", &seq);
    reference
}

fn index() -> PopulationIndex {
    let index = PopulationIndex::in_memory();
    index.insert("chr2", IntervalSet::default());
    index
}

fn region() -> GenomicInterval {
    GenomicInterval::new("chr2", 0, 500).unwrap()
}

#[test]
fn test_pipeline_without_edit() {
    let output = run(
        &mut reference(),
        &index(),
        None,
        &PlaceholderScorer,
        &region(),
        None,
        &DonorDesigner::default(),
    )
    .unwrap();

    let guides: Vec<&str> = output.guides.iter().map(|g| g.guide.as_str()).collect();
    assert_eq!(guides, vec!["AAACGTTTCAGATCAGTACA", "GACTTCAGTAGCATGCTAGA"]);
    assert!(output.ssodn.is_none());
}

#[test]
fn test_pipeline_drops_personal_overlaps() {
    let variants = VariantLookup::new(vec![VariantRecord {
        chrom: "chr2".into(),
        position: 105,
        reference: "G".into(),
        alt: "A".into(),
        zygosity: Zygosity::Hom,
    }]);

    let output = run(
        &mut reference(),
        &index(),
        Some(&variants),
        &PlaceholderScorer,
        &region(),
        None,
        &DonorDesigner::default(),
    )
    .unwrap();

    assert_eq!(output.guides.len(), 1);
    assert_eq!(output.guides[0].guide, "GACTTCAGTAGCATGCTAGA");
}

#[test]
fn test_pipeline_designs_for_reachable_guide() {
    // Only the second guide cuts within 45bp of the edit
    let edit = EditSpec::new(EditType::Substitution, 320, "C");
    let output = run(
        &mut reference(),
        &index(),
        None,
        &PlaceholderScorer,
        &region(),
        Some(&edit),
        &DonorDesigner::default(),
    )
    .unwrap();

    let donor = output.ssodn.unwrap();
    assert_eq!(donor.cut_site, 317);
    assert_eq!(donor.donor.len(), 90);
}

#[test]
fn test_pipeline_edit_out_of_reach() {
    let edit = EditSpec::new(EditType::Substitution, 450, "C");
    let output = run(
        &mut reference(),
        &index(),
        None,
        &PlaceholderScorer,
        &region(),
        Some(&edit),
        &DonorDesigner::default(),
    )
    .unwrap();

    assert_eq!(output.guides.len(), 2);
    assert!(output.ssodn.is_none());
}
