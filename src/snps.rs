//! Population SNP index: merged common-variant intervals per chromosome.
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::{debug, info};

use crate::common::chrom_key;
use crate::constants::*;
use crate::errors::*;
use crate::progress;

/// Sorted, non-overlapping half-open intervals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntervalSet {
    intervals: Vec<(u64, u64)>,
}

impl IntervalSet {
    /// Sorts the intervals and merges any that overlap or touch. Empty intervals are dropped.
    pub fn from_intervals<I: IntoIterator<Item = (u64, u64)>>(intervals: I) -> IntervalSet {
        let mut sorted: Vec<(u64, u64)> = intervals.into_iter().filter(|(s, e)| s < e).collect();
        sorted.sort_unstable();

        let mut merged: Vec<(u64, u64)> = Vec::with_capacity(sorted.len());
        for (start, end) in sorted {
            match merged.last_mut() {
                Some(last) if start <= last.1 => last.1 = u64::max(last.1, end),
                _ => merged.push((start, end)),
            }
        }

        IntervalSet { intervals: merged }
    }

    /// Builds the set from 1-based variant positions; position `p` covers `[p - 1, p)`.
    pub fn from_positions<I: IntoIterator<Item = u64>>(positions: I) -> IntervalSet {
        Self::from_intervals(
            positions
                .into_iter()
                .filter(|&pos| pos > 0)
                .map(|pos| (pos - 1, pos)),
        )
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[(u64, u64)] {
        &self.intervals
    }

    /// Stored intervals overlapping `[start, end)`, found by binary search.
    pub fn overlapping(&self, start: u64, end: u64) -> &[(u64, u64)] {
        if start >= end {
            return &[];
        }

        // Merged intervals are sorted by both start and end
        let first = self.intervals.partition_point(|&(_, e)| e <= start);
        let last = self.intervals.partition_point(|&(s, _)| s < end);

        if first < last {
            &self.intervals[first..last]
        } else {
            &[]
        }
    }

    pub fn has_overlap(&self, start: u64, end: u64) -> bool {
        !self.overlapping(start, end).is_empty()
    }

    /// Reads a set written by `write`, returning the chromosome name stored with it.
    pub fn read<P: AsRef<Path> + Debug>(filename: &P) -> Result<(String, IntervalSet)> {
        let file = File::open(filename).chain_err(|| "failed to open SNP index file")?;
        let mut reader = BufReader::new(file);
        let mut buffer = Vec::new();

        reader
            .by_ref()
            .take(SNP_INDEX_HEADER.len() as u64)
            .read_to_end(&mut buffer)
            .chain_err(|| "failed to read SNP index header")?;
        if buffer != SNP_INDEX_HEADER {
            return Err(ErrorKind::InvalidIndexFile(format!("{:?} lacks header", filename)).into());
        }

        let version = reader
            .read_u8()
            .chain_err(|| "failed to read SNP index version number")?;
        if version != SNP_INDEX_VERSION {
            return Err(ErrorKind::InvalidIndexFile(format!(
                "{:?} has version {}, expected {}; please rebuild the index",
                filename, version, SNP_INDEX_VERSION
            ))
            .into());
        }

        let name_len = reader
            .read_u8()
            .chain_err(|| "failed to read length of chromosome name")?;
        let mut name = vec![0; name_len as usize];
        reader
            .read_exact(&mut name)
            .chain_err(|| "failed to read chromosome name")?;
        let chrom = String::from_utf8(name).chain_err(|| "failed to decode chromosome name")?;

        let count = reader
            .read_u64::<LittleEndian>()
            .chain_err(|| "failed to read number of intervals")?;

        let progress = progress::with_prefix(count as usize, &format!("chr{}: ", chrom));
        let mut intervals = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let start = reader
                .read_u64::<LittleEndian>()
                .chain_err(|| "failed to read interval start")?;
            let end = reader
                .read_u64::<LittleEndian>()
                .chain_err(|| "failed to read interval end")?;

            if start >= end {
                return Err(ErrorKind::InvalidIndexFile(format!(
                    "empty interval {}-{} in {:?}",
                    start, end, filename
                ))
                .into());
            }

            intervals.push((start, end));
            progress.inc(1);
        }

        progress.finish_and_clear();

        Ok((chrom, Self::from_intervals(intervals)))
    }

    pub fn write<P: AsRef<Path> + Debug>(&self, chrom: &str, filename: &P) -> Result<()> {
        let file = File::create(filename).chain_err(|| "failed to create SNP index file")?;
        let mut writer = BufWriter::new(file);

        writer
            .write_all(SNP_INDEX_HEADER)
            .chain_err(|| "failed to write SNP index header")?;
        writer
            .write_u8(SNP_INDEX_VERSION)
            .chain_err(|| "failed to write SNP index version")?;

        let name = chrom_key(chrom).as_bytes();
        if name.len() > u8::max_value() as usize {
            return Err(format!("chromosome name {:?} is too long", chrom).into());
        }

        writer
            .write_u8(name.len() as u8)
            .chain_err(|| "failed to write chromosome name length")?;
        writer
            .write_all(name)
            .chain_err(|| "failed to write chromosome name")?;
        writer
            .write_u64::<LittleEndian>(self.intervals.len() as u64)
            .chain_err(|| "failed to write number of intervals")?;

        for &(start, end) in &self.intervals {
            writer
                .write_u64::<LittleEndian>(start)
                .chain_err(|| "failed to write interval start")?;
            writer
                .write_u64::<LittleEndian>(end)
                .chain_err(|| "failed to write interval end")?;
        }

        writer.flush().chain_err(|| "failed to flush SNP index")
    }
}

/// Common-variant intervals for any number of chromosomes.
///
/// Sets are read from `<directory>/chr<key>.snps` the first time a chromosome
/// is queried and kept for the lifetime of the index. Loading happens under a
/// write lock, so each chromosome is read at most once even with concurrent
/// callers; afterwards all queries are read-only.
#[derive(Debug, Default)]
pub struct PopulationIndex {
    directory: Option<PathBuf>,
    sets: RwLock<HashMap<String, Arc<IntervalSet>>>,
}

impl PopulationIndex {
    pub fn new<P: AsRef<Path>>(directory: P) -> PopulationIndex {
        PopulationIndex {
            directory: Some(directory.as_ref().to_path_buf()),
            sets: RwLock::default(),
        }
    }

    /// Index without backing storage; only chromosomes added with `insert` are known.
    pub fn in_memory() -> PopulationIndex {
        PopulationIndex::default()
    }

    pub fn insert(&self, chrom: &str, set: IntervalSet) {
        let mut sets = self.sets.write().unwrap_or_else(|err| err.into_inner());

        sets.insert(chrom_key(chrom).to_string(), Arc::new(set));
    }

    pub fn path_for(&self, chrom: &str) -> Option<PathBuf> {
        self.directory.as_ref().map(|dir| {
            dir.join(format!(
                "chr{}{}",
                chrom_key(chrom),
                SNP_INDEX_EXTENSION
            ))
        })
    }

    /// Returns the interval set for `chrom`, loading it if needed.
    pub fn load(&self, chrom: &str) -> Result<Arc<IntervalSet>> {
        let key = chrom_key(chrom);
        {
            let sets = self.sets.read().unwrap_or_else(|err| err.into_inner());
            if let Some(set) = sets.get(key) {
                return Ok(Arc::clone(set));
            }
        }

        let mut sets = self.sets.write().unwrap_or_else(|err| err.into_inner());
        // Another caller may have loaded it while we waited for the lock
        if let Some(set) = sets.get(key) {
            return Ok(Arc::clone(set));
        }

        let path = match self.path_for(chrom) {
            Some(path) if path.is_file() => path,
            Some(path) => {
                return Err(ErrorKind::MissingIndex(
                    chrom.to_string(),
                    path.display().to_string(),
                )
                .into())
            }
            None => {
                return Err(ErrorKind::MissingIndex(chrom.to_string(), "<memory>".into()).into())
            }
        };

        info!("Loading common SNPs for {} from {:?}", chrom, path);
        let (stored, set) = IntervalSet::read(&path)
            .chain_err(|| format!("failed to read SNP index {:?}", path))?;
        if stored != key {
            debug!(stored = %stored, requested = %key, "chromosome name differs from index file");
        }

        info!("  {} common SNP intervals for {}", set.len(), chrom);
        let set = Arc::new(set);
        sets.insert(key.to_string(), Arc::clone(&set));

        Ok(set)
    }

    pub fn has_overlap(&self, chrom: &str, start: u64, end: u64) -> Result<bool> {
        Ok(self.load(chrom)?.has_overlap(start, end))
    }

    pub fn overlapping(&self, chrom: &str, start: u64, end: u64) -> Result<Vec<(u64, u64)>> {
        Ok(self.load(chrom)?.overlapping(start, end).to_vec())
    }
}
