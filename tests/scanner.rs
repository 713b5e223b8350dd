extern crate bio;
extern crate bio_types;
extern crate hdrguide;

use bio::alphabets::dna;
use bio_types::strand::Strand;

use hdrguide::reference::{MemoryReference, ReferenceProvider};
use hdrguide::scanner::*;

// Contains neither GG nor CC on either strand
const PROTOSPACER: &[u8] = b"AAACGTTTCAGATCAGTACA";

fn t(n: usize) -> Vec<u8> {
    vec![b'T'; n]
}

fn chr7() -> MemoryReference {
    let mut seq = t(5020);
    seq.extend_from_slice(&[b'A'; 21]);
    seq.extend_from_slice(b"GG");
    seq.extend(t(100));

    let mut reference = MemoryReference::new();
    reference.insert("chr7", &seq);
    reference
}

#[test]
fn test_forward_protospacer_in_region() {
    let mut reference = chr7();
    let sites: Vec<_> = scan(&mut reference, "chr7", 5000, 5100, Strands::Both)
        .unwrap()
        .collect();

    assert_eq!(
        sites,
        vec![Protospacer {
            chrom: "chr7".into(),
            start: 5020,
            end: 5040,
            strand: Strand::Forward,
            sequence: vec![b'A'; 20],
        }]
    );
}

#[test]
fn test_scan_is_restartable() {
    let mut reference = chr7();
    let first: Vec<_> = scan(&mut reference, "chr7", 5000, 5100, Strands::Both)
        .unwrap()
        .collect();
    let second: Vec<_> = scan(&mut reference, "chr7", 5000, 5100, Strands::Both)
        .unwrap()
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_scan_invalid_region() {
    let mut reference = chr7();

    assert!(scan(&mut reference, "chr7", 5100, 5000, Strands::Both).is_err());
    assert!(scan(&mut reference, "chr8", 0, 100, Strands::Both).is_err());
}

#[test]
fn test_reverse_protospacer() {
    let mut window = t(10);
    window.extend_from_slice(b"CCT");
    window.extend_from_slice(PROTOSPACER);
    window.extend(t(10));

    let sites: Vec<_> = scan_sequence("chr1", 1000, &window, Strands::Both).collect();

    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].start, 1013);
    assert_eq!(sites[0].end, 1033);
    assert_eq!(sites[0].strand, Strand::Reverse);
    assert_eq!(sites[0].sequence(), "TGTACTGATCTGAAACGTTT");
}

#[test]
fn test_reverse_protospacer_reads_back_reference() {
    let mut window = t(10);
    window.extend_from_slice(b"CCT");
    window.extend_from_slice(PROTOSPACER);
    window.extend(t(10));

    let mut reference = MemoryReference::new();
    reference.insert("chr1", &window);

    for site in scan(&mut reference, "chr1", 0, window.len() as u64, Strands::Both).unwrap() {
        let forward = reference.get("chr1", site.start, site.end).unwrap();

        assert_eq!(dna::revcomp(&site.sequence), forward);
        // The PAM (CCN on the forward strand) lies immediately upstream
        let pam = reference.get("chr1", site.start - 3, site.start).unwrap();
        assert_eq!(&pam[..2], b"CC");
    }
}

#[test]
fn test_forward_only_skips_reverse() {
    let mut window = t(10);
    window.extend_from_slice(b"CCT");
    window.extend_from_slice(PROTOSPACER);
    window.extend(t(10));

    assert_eq!(scan_sequence("chr1", 0, &window, Strands::Forward).count(), 0);
}

#[test]
fn test_both_strands_in_pam_order() {
    // Forward PAM CGG after the first copy, reverse PAM CCG before the second
    let mut window = t(3);
    window.extend_from_slice(PROTOSPACER);
    window.extend_from_slice(b"CGG");
    window.extend_from_slice(b"CCG");
    window.extend_from_slice(PROTOSPACER);

    let sites: Vec<_> = scan_sequence("chr2", 0, &window, Strands::Both).collect();

    assert_eq!(sites.len(), 2);
    assert_eq!((sites[0].start, sites[0].strand), (3, Strand::Forward));
    assert_eq!(sites[0].sequence, PROTOSPACER);
    assert_eq!((sites[1].start, sites[1].strand), (29, Strand::Reverse));
    assert_eq!(sites[1].sequence, dna::revcomp(PROTOSPACER));
}

#[test]
fn test_forward_start_before_window_is_skipped() {
    let mut window = PROTOSPACER[1..].to_vec();
    window.extend_from_slice(b"AGG");

    assert_eq!(scan_sequence("chr1", 500, &window, Strands::Both).count(), 0);
}

#[test]
fn test_reverse_end_after_window_is_skipped() {
    let mut window = t(10);
    window.extend_from_slice(b"CCT");
    window.extend_from_slice(&PROTOSPACER[..19]);

    assert_eq!(scan_sequence("chr1", 0, &window, Strands::Both).count(), 0);
}

#[test]
fn test_pam_past_window_is_skipped() {
    let mut window = t(2);
    window.extend_from_slice(PROTOSPACER);
    window.extend_from_slice(b"AG");

    assert_eq!(scan_sequence("chr1", 0, &window, Strands::Both).count(), 0);
}

#[test]
fn test_ambiguous_protospacer_is_skipped() {
    let mut protospacer = PROTOSPACER.to_vec();
    protospacer[7] = b'N';

    let mut window = t(5);
    window.extend_from_slice(&protospacer);
    window.extend_from_slice(b"AGG");

    assert_eq!(scan_sequence("chr1", 0, &window, Strands::Both).count(), 0);
}

#[test]
fn test_lowercase_is_normalized() {
    let mut window = t(5);
    window.extend_from_slice(PROTOSPACER);
    window.extend_from_slice(b"agg");
    let window = window.to_ascii_lowercase();

    let sites: Vec<_> = scan_sequence("chr1", 0, &window, Strands::Both).collect();

    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].sequence, PROTOSPACER);
}

#[test]
fn test_all_sites_are_20nt_without_n() {
    let window = b"NNGGCCATGGACCTTGGGCCCAGGNNAGGCCTAGGCTAGCCGGATCCAGGATTACAGGCCNGGAGGTCGGCCGGTTTAAACCC";

    for strands in &[Strands::Both, Strands::Forward] {
        for site in scan_sequence("chr1", 0, window, *strands) {
            assert_eq!(site.end - site.start, 20);
            assert_eq!(site.sequence.len(), 20);
            assert!(!site.sequence.contains(&b'N'));
            assert!(site.end as usize <= window.len());
        }
    }
}
