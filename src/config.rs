use clap::{Parser, ValueEnum};

use crate::error::{Error, Result};
use crate::models::SimConfig;

/// Multi-class admission and service simulator.
#[derive(Parser, Debug)]
#[command(name = "admission-sim", version, about)]
pub struct Args {
    /// Number of corporate traffic sources
    #[arg(long)]
    pub corporate: usize,
    /// Number of premium traffic sources
    #[arg(long)]
    pub premium: usize,
    /// Number of free traffic sources
    #[arg(long)]
    pub free: usize,
    /// Number of servers in the pool
    #[arg(long)]
    pub servers: usize,
    /// Served requests before the run stops (also caps generated requests)
    #[arg(long)]
    pub requests: u64,
    #[arg(
        long,
        help = "Seed every random stream for a reproducible run; omit to seed from OS entropy"
    )]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    /// Trace every arrival, admission, eviction, dispatch and completion to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|err| Error::Cli(err.to_string()))
}

pub fn build_config(args: &Args) -> Result<SimConfig> {
    let total_sources = args.corporate + args.premium + args.free;
    if total_sources == 0 {
        return Err(Error::NoSources);
    }
    if args.servers == 0 {
        return Err(Error::ServersZero);
    }
    if args.requests == 0 {
        return Err(Error::RequestsZero);
    }

    let mut config = SimConfig::new(
        args.corporate,
        args.premium,
        args.free,
        args.servers,
        args.requests,
    );
    config.seed = args.seed;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> std::result::Result<Args, clap::Error> {
        let mut argv = vec!["admission-sim"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn parses_full_argument_set() {
        let args = parse(&[
            "--corporate",
            "2",
            "--premium",
            "4",
            "--free",
            "6",
            "--servers",
            "5",
            "--requests",
            "5000",
            "--seed",
            "42",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.format, FormatArg::Json);

        let config = build_config(&args).unwrap();
        assert_eq!(config.corporate_sources, 2);
        assert_eq!(config.premium_sources, 4);
        assert_eq!(config.free_sources, 6);
        assert_eq!(config.servers, 5);
        assert_eq!(config.requests, 5000);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn source_counts_are_required() {
        assert!(parse(&["--servers", "1", "--requests", "1"]).is_err());
    }

    #[test]
    fn format_defaults_to_human() {
        let args = parse(&[
            "--corporate",
            "1",
            "--premium",
            "0",
            "--free",
            "0",
            "--servers",
            "1",
            "--requests",
            "1",
        ])
        .unwrap();
        assert_eq!(args.format, FormatArg::Human);
        assert!(!args.verbose);
        assert_eq!(build_config(&args).unwrap().seed, None);
    }

    #[test]
    fn negative_counts_fail_to_parse() {
        assert!(parse(&[
            "--corporate",
            "-1",
            "--premium",
            "0",
            "--free",
            "0",
            "--servers",
            "1",
            "--requests",
            "1",
        ])
        .is_err());
    }

    #[test]
    fn zero_values_are_rejected() {
        let args = parse(&[
            "--corporate",
            "0",
            "--premium",
            "0",
            "--free",
            "0",
            "--servers",
            "1",
            "--requests",
            "1",
        ])
        .unwrap();
        let err = build_config(&args).unwrap_err();
        assert_eq!(err.to_string(), "sources must not be empty");

        let args = parse(&[
            "--corporate",
            "1",
            "--premium",
            "0",
            "--free",
            "0",
            "--servers",
            "0",
            "--requests",
            "1",
        ])
        .unwrap();
        let err = build_config(&args).unwrap_err();
        assert_eq!(err.to_string(), "servers must be greater than 0");
    }
}
