/// Length of a SpCas9 protospacer, excluding the PAM.
pub const GUIDE_LEN: usize = 20;
pub const PAM_LEN: usize = 3;

// The blunt cut lies this many bases upstream of the PAM
pub const CUT_OFFSET: usize = 3;

pub const DEFAULT_ARM_LENGTH: u64 = 45;

// Minimum allele frequency for a variant to be considered common
pub const COMMON_AF_THRESHOLD: f64 = 0.01;

pub const FINAL_SCORE_RATIO: f64 = 0.3;
pub const FORECAST_RATIO: f64 = 0.7;
pub const MAX_RANKED_GUIDES: usize = 20;

pub const SNP_INDEX_HEADER: &[u8] = b"HDRsnps";
pub const SNP_INDEX_VERSION: u8 = 1;
pub const SNP_INDEX_EXTENSION: &str = ".snps";
