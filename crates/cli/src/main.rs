// donorlink CLI - donor-name matching and pledge deduplication

mod exit_codes;
mod load;
mod names;
mod scan;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "dlink")]
#[command(about = "Match donor names and deduplicate scraped pledges against a ledger")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Log filter when neither DONORLINK_LOG nor RUST_LOG is set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether two donor names denote the same donor
    #[command(after_help = "\
Examples:
  dlink match '刘亦菲女士' '劉亦菲'
  dlink match '東亞' '東亞銀行有限公司' --json

Exit code 0 when the names match, 1 when they do not.")]
    Match {
        /// Name as scraped from a news item
        scraped: String,

        /// Name as recorded in the ledger
        existing: String,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized comparison form of a name
    #[command(after_help = "\
Examples:
  dlink normalize '騰訊控股（0700）'
  dlink normalize 'Jardine Matheson Group (HK) Ltd.'")]
    Normalize {
        name: String,
    },

    /// Split a multi-donor string into core names
    #[command(after_help = "\
Examples:
  dlink cores '藝人張智霖先生 及 袁詠儀小姐一家'
  dlink cores '何猷亨、何猷君及奚夢瑤' --json")]
    Cores {
        name: String,

        /// Print cores as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Report whether a name is too generic to identify a donor
    #[command(after_help = "\
Examples:
  dlink generic '中國'
  dlink generic '東亞'")]
    Generic {
        name: String,
    },

    /// Deduplicate every configured source against the ledger
    #[command(after_help = "\
Examples:
  dlink scan pledges.toml
  dlink scan pledges.toml --json
  dlink scan pledges.toml --output report.json --new-out new.csv
  DONORLINK_LOG=debug dlink scan pledges.toml

Exit code 5 when one or more sources failed.")]
    Scan {
        /// Path to the run config (.toml)
        config: PathBuf,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write unmatched records to a CSV file
        #[arg(long)]
        new_out: Option<PathBuf>,

        /// Stop after the first failing source
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a run config without scanning
    #[command(after_help = "\
Examples:
  dlink validate pledges.toml")]
    Validate {
        /// Path to the run config (.toml)
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(cli);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    telemetry::init(&cli.log_level)?;

    match cli.command {
        None => {
            eprintln!("Usage: dlink <command> [options]");
            eprintln!("       dlink --help for more information");
            Ok(())
        }
        Some(Commands::Match { scraped, existing, json }) => {
            names::cmd_match(&scraped, &existing, json)
        }
        Some(Commands::Normalize { name }) => names::cmd_normalize(&name),
        Some(Commands::Cores { name, json }) => names::cmd_cores(&name, json),
        Some(Commands::Generic { name }) => names::cmd_generic(&name),
        Some(Commands::Scan { config, json, output, new_out, fail_fast }) => {
            scan::cmd_scan(config, json, output, new_out, fail_fast)
        }
        Some(Commands::Validate { config }) => scan::cmd_validate(config),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Exit with `code` without printing anything.
    pub fn silent(code: u8) -> Self {
        Self { code, message: String::new(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<telemetry::TelemetryError> for CliError {
    fn from(err: telemetry::TelemetryError) -> Self {
        Self::new(EXIT_USAGE, err.to_string())
            .with_hint("use a level such as warn, info or debug, or fix DONORLINK_LOG")
    }
}
