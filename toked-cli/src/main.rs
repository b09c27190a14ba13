//! Command-line entry point for the token-aware edit distance engine.
//!
//! Usage:
//!   toked [FLAGS] <a> <b>       compare two strings, print one report line
//!   toked [FLAGS] <file>        compare each tab-separated pair in a file

use clap::Parser;
use thiserror::Error;
use toked_core::{Config, ConfigBuilder, NormType};

/// Recognized flags mirror the original tool's camelCase long names; a few
/// multi-letter short forms (`--dp`, `--sep`, `--spl`) are kept as aliases
/// since clap's `short` is restricted to a single character.
#[derive(Debug, Parser)]
#[command(name = "toked", about = "Weighted, token-aware edit distance")]
struct Args {
    #[arg(short = 'l', long = "editLimit", default_value_t = 2.0)]
    edit_limit: f64,

    #[arg(short = 'p', long = "normEditLimit", default_value_t = 0.0)]
    norm_edit_limit: f64,

    #[arg(long = "disablePerTokenLimit", alias = "dp")]
    disable_per_token_limit: bool,

    #[arg(short = 'n', long = "normType", default_value = "max")]
    norm_type: String,

    #[arg(short = 'd', long = "dupeCost", default_value_t = 0.05)]
    dupe_cost: f64,

    #[arg(short = 'i', long = "insDelCost", default_value_t = 1.0)]
    ins_del_cost: f64,

    #[arg(short = 's', long = "substCost", default_value_t = 1.0)]
    subst_cost: f64,

    #[arg(short = 'w', long = "swapCost", default_value_t = 1.25)]
    swap_cost: f64,

    #[arg(short = 'c', long = "digitChangePenalty", default_value_t = 0.33)]
    digit_change_penalty: f64,

    #[arg(short = 't', long = "tokenInitialPenalty", default_value_t = 0.25)]
    token_initial_penalty: f64,

    #[arg(short = 'T', long = "tokenDeltaPenalty", default_value_t = 0.25)]
    token_delta_penalty: f64,

    #[arg(short = 'S', long = "tokenSepSubstPenalty", default_value_t = 0.50)]
    token_sep_subst_penalty: f64,

    #[arg(short = 'P', long = "spaceOnlyCost", default_value_t = 0.10)]
    space_only_cost: f64,

    #[arg(long = "tokenSep", alias = "sep", default_value = " ")]
    token_sep: String,

    #[arg(long = "tokenSplit", alias = "spl")]
    token_split: Option<String>,

    /// Either two strings to compare, or a single tab-separated pairs file.
    #[arg(num_args = 1..=2)]
    inputs: Vec<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unrecognized normType {0:?}, expected max, min, or first")]
    UnknownNormType(String),
    #[error("tokenSep must be exactly one character, got {0:?}")]
    InvalidTokenSep(String),
    #[error("line {0}: expected exactly two tab-separated columns")]
    MalformedLine(usize),
    #[error("expected two strings or one filename, got {0} positional arguments")]
    UnexpectedArity(usize),
    #[error(transparent)]
    Config(#[from] toked_core::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("toked: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let norm_type = parse_norm_type(&args.norm_type)?;
    let token_sep = parse_token_sep(&args.token_sep)?;

    let mut builder: ConfigBuilder = Config::builder()
        .default_limit(args.edit_limit)
        .default_norm_limit(args.norm_edit_limit)
        .per_token_limit(!args.disable_per_token_limit)
        .norm_type(norm_type)
        .duplicate_cost(args.dupe_cost)
        .ins_del_cost(args.ins_del_cost)
        .subst_cost(args.subst_cost)
        .swap_cost(args.swap_cost)
        .digit_change_penalty(args.digit_change_penalty)
        .token_initial_penalty(args.token_initial_penalty)
        .token_delta_penalty(args.token_delta_penalty)
        .token_sep_subst_penalty(args.token_sep_subst_penalty)
        .space_only_cost(args.space_only_cost)
        .token_sep(token_sep);

    if let Some(pattern) = args.token_split {
        builder = builder.token_split(pattern);
    }

    let config = builder.build()?;

    match args.inputs.as_slice() {
        [a, b] => {
            print_report(&config, a, b);
            Ok(())
        }
        [path] => run_file(&config, path),
        other => Err(CliError::UnexpectedArity(other.len())),
    }
}

fn run_file(config: &Config, path: &str) -> Result<(), CliError> {
    let content = std::fs::read_to_string(path)?;
    for (idx, line) in content.lines().enumerate() {
        let columns: Vec<&str> = line.split('\t').collect();
        let [a, b] = columns.as_slice() else {
            return Err(CliError::MalformedLine(idx + 1));
        };
        print_report(config, a, b);
    }
    Ok(())
}

fn print_report(config: &Config, a: &str, b: &str) {
    let d = config.distance(a, b);
    let formatted = if d.is_infinite() {
        "9999".to_string()
    } else {
        format!("{d:.2}")
    };
    println!("{formatted}\t{a}\t{b}");
}

fn parse_norm_type(s: &str) -> Result<NormType, CliError> {
    match s.to_ascii_lowercase().as_str() {
        "max" => Ok(NormType::Max),
        "min" => Ok(NormType::Min),
        "first" => Ok(NormType::First),
        _ => Err(CliError::UnknownNormType(s.to_string())),
    }
}

fn parse_token_sep(s: &str) -> Result<char, CliError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::InvalidTokenSep(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_type_parses_case_insensitively() {
        assert!(matches!(parse_norm_type("MAX"), Ok(NormType::Max)));
        assert!(matches!(parse_norm_type("min"), Ok(NormType::Min)));
        assert!(matches!(parse_norm_type("First"), Ok(NormType::First)));
        assert!(parse_norm_type("nope").is_err());
    }

    #[test]
    fn token_sep_requires_exactly_one_scalar() {
        assert_eq!(parse_token_sep(" ").unwrap(), ' ');
        assert!(parse_token_sep("").is_err());
        assert!(parse_token_sep("ab").is_err());
    }
}
