pub mod donor;
pub mod filter;
pub mod personal;
pub mod pipeline;
pub mod snp_index;
