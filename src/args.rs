use clap::{App, Arg, ArgMatches, SubCommand};

use crate::constants::{COMMON_AF_THRESHOLD, DEFAULT_ARM_LENGTH};
use crate::donor::{EditSpec, EditType};
use crate::errors::*;

#[derive(Debug)]
pub struct SnpIndexArgs {
    pub table: String,
    pub chrom: String,
    pub output_dir: String,
    pub min_af: f64,
}

#[derive(Debug)]
pub struct FilterArgs {
    pub fasta: String,
    pub snps: String,
    pub regions: Vec<String>,
    pub forward_only: bool,
    pub threads: usize,
    pub output: Option<String>,
}

#[derive(Debug)]
pub struct PersonalArgs {
    pub fasta: String,
    pub variants: String,
    pub region: String,
    pub overlap_only: bool,
    pub output: Option<String>,
}

#[derive(Debug)]
pub struct DonorArgs {
    pub fasta: String,
    pub chrom: String,
    pub guide: String,
    pub edit: EditSpec,
    pub arm_length: u64,
    pub region: Option<(u64, u64)>,
    pub output: Option<String>,
}

#[derive(Debug)]
pub struct PipelineArgs {
    pub fasta: String,
    pub snps: String,
    pub region: String,
    pub variants: Option<String>,
    pub edit: Option<EditSpec>,
    pub arm_length: u64,
    pub threads: usize,
    pub output: Option<String>,
}

pub enum Args {
    SnpIndex(SnpIndexArgs),
    Filter(FilterArgs),
    Personal(PersonalArgs),
    Donor(DonorArgs),
    Pipeline(PipelineArgs),
    None,
}

fn fasta_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("fasta")
        .long("fasta")
        .takes_value(true)
        .required(true)
        .help("Reference genome in FASTA format; must be indexed with 'samtools faidx'.")
}

fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("output")
        .long("output")
        .takes_value(true)
        .help("Write results to this file instead of STDOUT.")
}

fn threads_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("threads")
        .long("threads")
        .takes_value(true)
        .allow_hyphen_values(true)
        .number_of_values(1)
        .default_value("0")
        .help("Number of threads used for computation (0 for automatic).")
}

fn arm_length_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("arm-length")
        .long("arm-length")
        .takes_value(true)
        .help("Length of each homology arm [default: 45].")
}

fn snp_index_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("snp-index")
        .about("Build a common-SNP interval index for one chromosome")
        .arg(
            Arg::with_name("table")
                .help("Table of 1-based SNP positions, optionally followed by allele frequency.")
                .required(true),
        )
        .arg(
            Arg::with_name("chrom")
                .long("chrom")
                .takes_value(true)
                .required(true)
                .help("Chromosome the positions belong to, e.g. 7 or chr7."),
        )
        .arg(
            Arg::with_name("output-dir")
                .long("output-dir")
                .takes_value(true)
                .default_value(".")
                .help("Directory in which chr<N>.snps is written."),
        )
        .arg(
            Arg::with_name("min-af")
                .long("min-af")
                .takes_value(true)
                .help("Minimum allele frequency of SNPs kept [default: 0.01]."),
        )
}

fn filter_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("filter")
        .about("Find gRNA targets that do not overlap common SNPs")
        .arg(fasta_arg())
        .arg(
            Arg::with_name("snps")
                .help("Directory containing chr<N>.snps index files.")
                .required(true),
        )
        .arg(
            Arg::with_name("regions")
                .help("One or more regions, e.g. chr7:5501900-5503000.")
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::with_name("forward-only")
                .long("forward-only")
                .help("Only report targets on the forward strand."),
        )
        .arg(threads_arg())
        .arg(output_arg())
}

fn personal_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("personal")
        .about("Find gRNA targets and screen them against personal variants")
        .arg(fasta_arg())
        .arg(
            Arg::with_name("variants")
                .help("Table of personal variants: chrom, pos, ref, alt, zygosity.")
                .required(true),
        )
        .arg(
            Arg::with_name("region")
                .help("Region to search, e.g. chr7:5501900-5503000.")
                .required(true),
        )
        .arg(
            Arg::with_name("overlap-only")
                .long("overlap-only")
                .help("Only report targets that overlap personal variants."),
        )
        .arg(output_arg())
}

fn donor_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("donor")
        .about("Design an ssODN donor for a gRNA and a desired edit")
        .arg(fasta_arg())
        .arg(Arg::with_name("chrom").help("Chromosome.").required(true))
        .arg(
            Arg::with_name("guide")
                .help("20-nt protospacer sequence.")
                .required(true),
        )
        .arg(
            Arg::with_name("edit-type")
                .help("Either substitution, insertion or deletion.")
                .required(true),
        )
        .arg(
            Arg::with_name("coord")
                .help("0-based coordinate of the edit.")
                .required(true),
        )
        .arg(
            Arg::with_name("payload")
                .help("New base(s), inserted sequence, or deleted sequence.")
                .required(true),
        )
        .arg(arm_length_arg())
        .arg(
            Arg::with_name("region")
                .long("region")
                .takes_value(true)
                .help("Restrict the guide search to start-end instead of the whole chromosome."),
        )
        .arg(output_arg())
}

fn pipeline_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("pipeline")
        .about("Filter, rank, and design a donor for the best gRNA in a region")
        .arg(fasta_arg())
        .arg(
            Arg::with_name("snps")
                .help("Directory containing chr<N>.snps index files.")
                .required(true),
        )
        .arg(
            Arg::with_name("region")
                .help("Target region, e.g. chr7:5501900-5503000.")
                .required(true),
        )
        .arg(
            Arg::with_name("variants")
                .long("variants")
                .takes_value(true)
                .help("Optional table of personal variants; overlapping targets are dropped."),
        )
        .arg(
            Arg::with_name("edit")
                .long("edit")
                .takes_value(true)
                .help("Desired edit as type:coord:payload, e.g. substitution:5502010:T."),
        )
        .arg(arm_length_arg())
        .arg(threads_arg())
        .arg(output_arg())
}

fn get_str<'a>(matches: &'a ArgMatches, key: &str) -> Result<&'a str> {
    match matches.value_of(key) {
        Some(value) => Ok(value),
        None => Err(format!("Required option {:?} not set", key).into()),
    }
}

fn get_string(matches: &ArgMatches, key: &str) -> Result<String> {
    get_str(matches, key).map(|v| v.into())
}

fn get_optional(matches: &ArgMatches, key: &str) -> Option<String> {
    matches.value_of(key).map(|s| s.to_string())
}

fn parse_u64(matches: &ArgMatches, key: &str, default: u64) -> Result<u64> {
    match matches.value_of(key) {
        Some(s) => match s.replace(',', "").parse::<u64>() {
            Ok(v) => Ok(v),
            Err(err) => Err(format!("Invalid --{} ({:?}) value: {}", key, s, err).into()),
        },
        None => Ok(default),
    }
}

fn parse_threads(matches: &ArgMatches) -> Result<usize> {
    let s = get_str(matches, "threads")?;

    match usize::from_str_radix(s, 10) {
        Ok(v) => Ok(v),
        Err(err) => Err(format!("Invalid --threads ({:?}) value: {}", s, err).into()),
    }
}

fn parse_min_af(matches: &ArgMatches) -> Result<f64> {
    match matches.value_of("min-af") {
        Some(s) => match s.parse::<f64>() {
            Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
            _ => Err(format!("Invalid --min-af ({:?}); expected a value in [0, 1]", s).into()),
        },
        None => Ok(COMMON_AF_THRESHOLD),
    }
}

/// Parses `start-end` into a half-open range.
pub fn parse_span(text: &str) -> Result<(u64, u64)> {
    let invalid = || format!("Invalid span {:?}; expected start-end", text);
    let fields: Vec<&str> = text.splitn(2, '-').collect();

    match fields.as_slice() {
        [start, end] => {
            let start = start.replace(',', "").parse::<u64>().map_err(|_| invalid())?;
            let end = end.replace(',', "").parse::<u64>().map_err(|_| invalid())?;

            if start < end {
                Ok((start, end))
            } else {
                Err(invalid().into())
            }
        }
        _ => Err(invalid().into()),
    }
}

pub fn parse_args() -> Result<Args> {
    let matches = App::new("HDRguide")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Mikkel Schubert")
        .about("SNP-aware SpCas9 gRNA selection and ssODN donor design")
        .subcommand(snp_index_command())
        .subcommand(filter_command())
        .subcommand(personal_command())
        .subcommand(donor_command())
        .subcommand(pipeline_command())
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("snp-index") {
        Ok(Args::SnpIndex(SnpIndexArgs {
            table: get_string(matches, "table")?,
            chrom: get_string(matches, "chrom")?,
            output_dir: get_string(matches, "output-dir")?,
            min_af: parse_min_af(matches)?,
        }))
    } else if let Some(matches) = matches.subcommand_matches("filter") {
        let regions = match matches.values_of("regions") {
            Some(values) => values.map(|s| s.to_string()).collect(),
            None => return Err("Required option \"regions\" not set".into()),
        };

        Ok(Args::Filter(FilterArgs {
            fasta: get_string(matches, "fasta")?,
            snps: get_string(matches, "snps")?,
            regions,
            forward_only: matches.is_present("forward-only"),
            threads: parse_threads(matches)?,
            output: get_optional(matches, "output"),
        }))
    } else if let Some(matches) = matches.subcommand_matches("personal") {
        Ok(Args::Personal(PersonalArgs {
            fasta: get_string(matches, "fasta")?,
            variants: get_string(matches, "variants")?,
            region: get_string(matches, "region")?,
            overlap_only: matches.is_present("overlap-only"),
            output: get_optional(matches, "output"),
        }))
    } else if let Some(matches) = matches.subcommand_matches("donor") {
        let edit_type: EditType = get_str(matches, "edit-type")?.parse()?;
        let coord = parse_u64(matches, "coord", 0)?;
        let edit = EditSpec::new(edit_type, coord, get_str(matches, "payload")?);

        let region = match matches.value_of("region") {
            Some(text) => Some(parse_span(text)?),
            None => None,
        };

        Ok(Args::Donor(DonorArgs {
            fasta: get_string(matches, "fasta")?,
            chrom: get_string(matches, "chrom")?,
            guide: get_string(matches, "guide")?,
            edit,
            arm_length: parse_u64(matches, "arm-length", DEFAULT_ARM_LENGTH)?,
            region,
            output: get_optional(matches, "output"),
        }))
    } else if let Some(matches) = matches.subcommand_matches("pipeline") {
        let edit = match matches.value_of("edit") {
            Some(text) => Some(EditSpec::parse(text)?),
            None => None,
        };

        Ok(Args::Pipeline(PipelineArgs {
            fasta: get_string(matches, "fasta")?,
            snps: get_string(matches, "snps")?,
            region: get_string(matches, "region")?,
            variants: get_optional(matches, "variants"),
            edit,
            arm_length: parse_u64(matches, "arm-length", DEFAULT_ARM_LENGTH)?,
            threads: parse_threads(matches)?,
            output: get_optional(matches, "output"),
        }))
    } else {
        eprintln!("{}", matches.usage());

        Ok(Args::None)
    }
}
