//! Command-line entry point for pwncheck.
//!
//! Wires the validator, fetcher, and renderers together: input text in,
//! breach report out on stdout and/or as a CSV file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use pwncheck_core::{extract_addresses, AppConfig};
use pwncheck_fetcher::BreachFetcher;
use pwncheck_report::{render_json, render_plain, write_csv_file};

#[derive(Parser)]
#[command(version, about = "Check e-mail addresses against a breach-notification API")]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["email", "infile"])
))]
struct Cli {
    /// E-mail address for a single query
    email: Option<String>,

    /// Input file with e-mail addresses, one per line
    #[arg(short, long)]
    infile: Option<PathBuf>,

    /// CSV output file
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Verbose output (JSON)
    #[arg(short, long)]
    verbose: bool,

    /// Print debug messages
    #[arg(short, long)]
    debug: bool,

    /// Seconds to wait before each request
    #[arg(long)]
    delay: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config = AppConfig::load_with_env().context("failed to load configuration")?;
    if let Some(delay) = cli.delay {
        config.fetch.delay_secs = delay;
    }
    config.validate().context("invalid configuration")?;

    let input = gather_input(cli.email.as_deref(), cli.infile.as_deref())?;
    let addresses = extract_addresses(&input);
    tracing::debug!("querying {} unique address(es)", addresses.len());

    let fetcher = BreachFetcher::new(&config)?;
    let report = fetcher.run(&addresses).await?;

    if cli.verbose && !report.is_empty() {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_plain(&report));
    }

    if let Some(outfile) = &cli.outfile {
        if report.is_empty() {
            tracing::debug!("report is empty, skipping CSV export");
        } else {
            write_csv_file(&report, outfile)?;
        }
    }

    Ok(())
}

/// Concatenate the input-file contents and the positional address so the
/// validator sees one text; duplicates across the two paths collapse there.
fn gather_input(email: Option<&str>, infile: Option<&Path>) -> Result<String> {
    let mut input = String::new();

    if let Some(path) = infile {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        input.push_str(&contents);
    }

    if let Some(email) = email {
        input.push('\n');
        input.push_str(email);
    }

    Ok(input)
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_requires_email_or_infile() {
        assert!(Cli::try_parse_from(["pwncheck"]).is_err());
        assert!(Cli::try_parse_from(["pwncheck", "user@example.com"]).is_ok());
        assert!(Cli::try_parse_from(["pwncheck", "-i", "addresses.txt"]).is_ok());
        assert!(Cli::try_parse_from(["pwncheck", "user@example.com", "-i", "addresses.txt"]).is_ok());
    }

    #[test]
    fn test_delay_flag_parses_float() {
        let cli = Cli::try_parse_from(["pwncheck", "user@example.com", "--delay", "0.5"])
            .expect("parse args");
        assert_eq!(cli.delay, Some(0.5));
    }

    #[test]
    fn test_gather_input_unions_both_paths() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "alice@example.com").expect("write temp file");
        writeln!(file, "dup@example.com").expect("write temp file");

        let input = gather_input(Some("dup@example.com"), Some(file.path()))
            .expect("gather input");
        let addresses = extract_addresses(&input);

        // Case-identical duplicate across the two paths collapses.
        let found: Vec<&str> = addresses.iter().map(|a| a.as_str()).collect();
        assert_eq!(found, vec!["alice@example.com", "dup@example.com"]);
    }

    #[test]
    fn test_gather_input_email_only() {
        let input = gather_input(Some("user@example.com"), None).expect("gather input");
        assert_eq!(extract_addresses(&input).len(), 1);
    }
}
