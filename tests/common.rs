extern crate hdrguide;

use hdrguide::common::*;

#[test]
fn test_is_unambiguous_dna() {
    assert!(is_unambiguous_dna(b"ACGT"));
    assert!(is_unambiguous_dna(b""));
    assert!(!is_unambiguous_dna(b"ACNT"));
    assert!(!is_unambiguous_dna(b"acgt"));
}

#[test]
fn test_chrom_key() {
    assert_eq!(chrom_key("chr7"), "7");
    assert_eq!(chrom_key("Chr7"), "7");
    assert_eq!(chrom_key("7"), "7");
    assert_eq!(chrom_key("chrX"), "X");
    assert_eq!(chrom_key("chr"), "chr");
}

#[test]
fn test_reference_name() {
    assert_eq!(reference_name("7"), "chr7");
    assert_eq!(reference_name("chr7"), "chr7");
    assert_eq!(reference_name("X"), "chrX");
}
