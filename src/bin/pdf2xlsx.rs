use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdf_roster_to_xlsx::{
    ExclusionSet, ExtractError, ExtractOptions, PageSelection, RosterReport,
    extract_roster_to_xlsx,
};
use tracing_subscriber::EnvFilter;

const PAGE_PROMPT: &str = "Enter the pages you want to import (e.g., '1-3' or '1, 3, 5'): ";
const PAGE_RETRY_MESSAGE: &str =
    "Invalid input. Please enter a valid range (e.g., '1-3') or a comma-separated list (e.g., '1, 3, 5').";

#[derive(Debug, Parser)]
#[command(
    name = "pdf2xlsx",
    version,
    about = "Extract a name/email/room roster from PDF pages into a formatted spreadsheet"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract the roster and write the formatted spreadsheet.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output spreadsheet path.
    #[arg(short, long, default_value = "roster.xlsx")]
    output: PathBuf,

    /// Page selection like 1-3,5. Prompts interactively when omitted.
    #[arg(long)]
    pages: Option<String>,

    /// Extra exclusion token on top of the built-in list. Repeatable.
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn prompt_for_pages() -> Result<PageSelection> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{PAGE_PROMPT}");
        io::stdout().flush().context("failed to flush prompt")?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read page selection")?;
        if read == 0 {
            anyhow::bail!("stdin closed before a valid page selection was entered");
        }

        match line.trim().parse::<PageSelection>() {
            Ok(selection) => return Ok(selection),
            Err(_) => println!("{PAGE_RETRY_MESSAGE}"),
        }
    }
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pages = match args.pages.as_deref() {
        Some(spec) => PageSelection::from_str(spec).context("failed to parse --pages")?,
        None => prompt_for_pages()?,
    };

    let mut exclusions = ExclusionSet::default();
    exclusions.extend(args.excludes.iter().cloned());

    Ok(ExtractOptions {
        pages: Some(pages),
        exclusions,
    })
}

fn log_report(report: &RosterReport, verbose: bool) {
    if !report.warnings.is_empty() {
        eprintln!("warning: {} issue(s) detected", report.warnings.len());
        if verbose {
            for warning in &report.warnings {
                eprintln!(
                    "  - {:?} page={:?}: {}",
                    warning.code, warning.page, warning.message
                );
            }
        }
    }

    eprintln!(
        "roster: {} first names, {} last names, {} emails, {} rooms ({} row(s) written)",
        report.first_name_count,
        report.last_name_count,
        report.email_count,
        report.room_count,
        report.row_count
    );
}

fn run_extract(args: &ExtractArgs) -> Result<RosterReport> {
    let options = parse_options(args)?;
    extract_roster_to_xlsx(&args.input, &args.output, &options)
        .with_context(|| format!("failed to extract roster from '{}'", args.input.display()))
}

fn main() -> ExitCode {
    // Third-party PDF library diagnostics stay off unless enabled via RUST_LOG.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_roster_to_xlsx=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                ExitCode::SUCCESS
            }
            Err(error) => {
                if matches!(
                    error.downcast_ref::<ExtractError>(),
                    Some(ExtractError::NoExtractableText)
                ) {
                    eprintln!("Error: No text could be extracted from the selected pages.");
                    ExitCode::from(2)
                } else {
                    eprintln!("error: {error:#}");
                    ExitCode::from(1)
                }
            }
        },
    }
}
