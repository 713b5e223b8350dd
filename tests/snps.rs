extern crate hdrguide;
extern crate tempfile;

use std::fs;
use std::sync::Arc;
use std::thread;

use hdrguide::errors::ErrorKind;
use hdrguide::snps::*;

#[test]
fn test_from_positions_is_zero_based() {
    let set = IntervalSet::from_positions(vec![10, 20]);

    assert_eq!(set.intervals(), &[(9, 10), (19, 20)]);
}

#[test]
fn test_from_positions_merges_neighbours() {
    let set = IntervalSet::from_positions(vec![12, 10, 11, 11, 30]);

    assert_eq!(set.intervals(), &[(9, 12), (29, 30)]);
}

#[test]
fn test_from_intervals_merges_overlaps() {
    let set = IntervalSet::from_intervals(vec![(5, 10), (0, 3), (8, 15), (20, 21), (7, 7)]);

    assert_eq!(set.intervals(), &[(0, 3), (5, 15), (20, 21)]);
    assert_eq!(set.len(), 3);
}

#[test]
fn test_has_overlap_half_open() {
    let set = IntervalSet::from_intervals(vec![(100, 101)]);

    assert!(!set.has_overlap(80, 100));
    assert!(set.has_overlap(81, 101));
    assert!(set.has_overlap(100, 120));
    assert!(!set.has_overlap(101, 121));
}

#[test]
fn test_has_overlap_empty_query() {
    let set = IntervalSet::from_intervals(vec![(100, 200)]);

    assert!(!set.has_overlap(150, 150));
    assert!(!set.has_overlap(160, 150));
}

#[test]
fn test_has_overlap_empty_set() {
    let set = IntervalSet::default();

    assert!(set.is_empty());
    assert!(!set.has_overlap(0, 1_000_000));
}

#[test]
fn test_overlapping_returns_hits() {
    let set = IntervalSet::from_intervals(vec![(0, 5), (10, 15), (20, 25), (30, 35)]);

    assert_eq!(set.overlapping(12, 31), &[(10, 15), (20, 25), (30, 35)]);
    assert_eq!(set.overlapping(15, 20), &[] as &[(u64, u64)]);
    assert_eq!(set.overlapping(0, 1), &[(0, 5)]);
}

#[test]
fn test_has_overlap_is_repeatable() {
    let set = IntervalSet::from_positions((1..1000).map(|v| v * 7));

    for start in (0..7000).step_by(13) {
        assert_eq!(set.has_overlap(start, start + 5), set.has_overlap(start, start + 5));
        assert_eq!(
            set.has_overlap(start, start + 5),
            (start..start + 5).any(|pos| (pos + 1) % 7 == 0 && pos + 1 < 7000)
        );
    }
}

#[test]
fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let filename = dir.path().join("chr7.snps");
    let set = IntervalSet::from_positions(vec![5, 6, 100, 1_000_000]);

    set.write("chr7", &filename).unwrap();
    let (chrom, copy) = IntervalSet::read(&filename).unwrap();

    assert_eq!(chrom, "7");
    assert_eq!(copy, set);
}

#[test]
fn test_read_invalid_header() {
    let dir = tempfile::tempdir().unwrap();
    let filename = dir.path().join("chr1.snps");
    fs::write(&filename, b"NOT AN INDEX FILE").unwrap();

    let err = IntervalSet::read(&filename).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidIndexFile(..)));
}

#[test]
fn test_population_index_missing_chromosome() {
    let dir = tempfile::tempdir().unwrap();
    let index = PopulationIndex::new(dir.path());

    let err = index.has_overlap("chr7", 0, 20).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MissingIndex(..)));
}

#[test]
fn test_population_index_in_memory_missing() {
    let index = PopulationIndex::in_memory();

    let err = index.load("chr1").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MissingIndex(..)));
}

#[test]
fn test_population_index_loads_lazily_by_key() {
    let dir = tempfile::tempdir().unwrap();
    IntervalSet::from_positions(vec![1001])
        .write("7", &dir.path().join("chr7.snps"))
        .unwrap();

    let index = PopulationIndex::new(dir.path());
    assert_eq!(index.path_for("chr7"), Some(dir.path().join("chr7.snps")));

    assert!(index.has_overlap("chr7", 990, 1010).unwrap());
    assert!(!index.has_overlap("7", 1001, 1021).unwrap());

    // Cached after the first load
    fs::remove_file(dir.path().join("chr7.snps")).unwrap();
    assert!(index.has_overlap("chr7", 1000, 1001).unwrap());
    assert_eq!(index.overlapping("7", 0, 2000).unwrap(), vec![(1000, 1001)]);
}

#[test]
fn test_population_index_concurrent_load_once() {
    let dir = tempfile::tempdir().unwrap();
    IntervalSet::from_positions(vec![10, 20, 30])
        .write("1", &dir.path().join("chr1.snps"))
        .unwrap();

    let index = Arc::new(PopulationIndex::new(dir.path()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.load("chr1").unwrap())
        })
        .collect();
    let sets: Vec<Arc<IntervalSet>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for set in &sets {
        assert!(Arc::ptr_eq(set, &sets[0]));
    }
    assert!(Arc::ptr_eq(&index.load("1").unwrap(), &sets[0]));
    assert_eq!(sets[0].len(), 3);
}

#[test]
fn test_population_index_insert() {
    let index = PopulationIndex::in_memory();
    index.insert("chrX", IntervalSet::from_intervals(vec![(50, 60)]));

    assert!(index.has_overlap("X", 55, 56).unwrap());
    assert!(!index.has_overlap("chrX", 60, 80).unwrap());
}
