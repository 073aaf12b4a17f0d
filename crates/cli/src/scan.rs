//! `dlink scan` / `dlink validate`: config-driven dedup runs.

use std::path::{Path, PathBuf};

use donorlink_matcher::run::ScrapeSource;
use donorlink_matcher::{DedupConfig, MatchEngine, RunOptions, RunReport, SourceStatus};
use tracing::info;

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_PARTIAL, EXIT_RUNTIME};
use crate::load::{write_records_csv, FileLedger, FileSource};
use crate::CliError;

fn scan_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError::new(code, msg)
}

fn load_config(config_path: &Path) -> Result<DedupConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| scan_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    DedupConfig::from_toml(&config_str).map_err(|e| scan_err(EXIT_INVALID_CONFIG, e.to_string()))
}

pub fn cmd_scan(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    new_out: Option<PathBuf>,
    fail_fast: bool,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve file paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let ledger = FileLedger {
        path: base_dir.join(&config.ledger.file),
        entity_column: config.ledger.entity_column.clone(),
    };

    let sources: Vec<Box<dyn ScrapeSource>> = config
        .enabled_sources()
        .map(|s| {
            Box::new(FileSource {
                name: s.name.clone(),
                path: base_dir.join(&s.file),
                entity_column: s.entity_column.clone(),
            }) as Box<dyn ScrapeSource>
        })
        .collect();

    if sources.is_empty() {
        eprintln!("warning: every source in '{}' is disabled", config.name);
    }
    info!("run '{}': {} source(s)", config.name, sources.len());

    let options = RunOptions {
        run_name: config.name.clone(),
        fail_fast: fail_fast || config.fail_fast,
    };

    let report = donorlink_matcher::run(
        &ledger,
        &sources,
        &options,
        &MatchEngine::new(),
    )
    .map_err(|e| {
        scan_err(EXIT_RUNTIME, e.to_string()).with_hint("check [ledger] file and entity_column")
    })?;

    // Output
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| scan_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| scan_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(ref path) = new_out {
        let n = write_records_csv(path, report.new_records())
            .map_err(|e| scan_err(EXIT_RUNTIME, e))?;
        eprintln!("wrote {} new record(s) to {}", n, path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    print_summary(&report);

    let failed = report.summary.failed_sources;
    if failed > 0 {
        return Err(scan_err(EXIT_PARTIAL, format!("{failed} source(s) failed")));
    }

    Ok(())
}

/// Human summary to stderr.
fn print_summary(report: &RunReport) {
    for source in &report.sources {
        match source.status {
            SourceStatus::Ok => eprintln!(
                "  source '{}': {} scraped, {} new, {} matched ({}ms)",
                source.name,
                source.counts.total_scraped,
                source.counts.new_count,
                source.counts.matched_count,
                source.duration_ms,
            ),
            SourceStatus::Error => eprintln!(
                "  source '{}': error: {}",
                source.name,
                source.error.as_deref().unwrap_or("unknown"),
            ),
        }
        if source.skipped > 0 {
            eprintln!("    skipped {} record(s) with no entity", source.skipped);
        }
    }

    let s = &report.summary;
    eprintln!(
        "run '{}': {} source(s), {} scraped, {} new, {} matched against {} ledger entries",
        report.meta.run_name,
        s.sources,
        s.total_scraped,
        s.new_count,
        s.matched_count,
        report.meta.ledger_entries,
    );

    if !s.reason_counts.is_empty() {
        let reasons: Vec<String> = s
            .reason_counts
            .iter()
            .map(|(reason, n)| format!("{reason}={n}"))
            .collect();
        eprintln!("reasons: {}", reasons.join(", "));
    }
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let enabled = config.enabled_sources().count();
    eprintln!(
        "valid: run '{}' with {} source(s) ({} enabled)",
        config.name,
        config.sources.len(),
        enabled,
    );
    Ok(())
}
