// error_chain macro can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use(lazy_static)]
extern crate lazy_static;

pub mod args;
pub mod codon;
pub mod commands;
pub mod common;
pub mod constants;
pub mod donor;
pub mod errors;
pub mod filter;
pub mod interval;
pub mod progress;
pub mod reference;
pub mod scanner;
pub mod score;
pub mod snps;
pub mod table;
pub mod variants;
