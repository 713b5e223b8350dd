// error_chain macro can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use(lazy_static)]
extern crate lazy_static;

mod args;
mod codon;
mod commands;
mod common;
mod constants;
mod donor;
mod errors;
mod filter;
mod interval;
mod progress;
mod reference;
mod scanner;
mod score;
mod snps;
mod table;
mod variants;

use tracing_subscriber::EnvFilter;

fn print_err(e: &errors::Error) {
    use error_chain::ChainedError;
    use std::io::Write; // trait which holds `display_chain`
    let stderr = &mut ::std::io::stderr();
    let errmsg = "Error writing to stderr";

    writeln!(stderr, "{}", e.display_chain()).expect(errmsg);
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(::std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn inner_main() -> errors::Result<()> {
    match args::parse_args()? {
        args::Args::SnpIndex(args) => commands::snp_index::main(&args),
        args::Args::Filter(args) => commands::filter::main(&args),
        args::Args::Personal(args) => commands::personal::main(&args),
        args::Args::Donor(args) => commands::donor::main(&args),
        args::Args::Pipeline(args) => commands::pipeline::main(&args),
        args::Args::None => Ok(()),
    }
}

fn main() {
    init_logging();

    if let Err(e) = inner_main() {
        print_err(&e);

        ::std::process::exit(1);
    } else {
        ::std::process::exit(0);
    }
}
