//! Run orchestration: one ledger snapshot, sources processed one at a time.

use std::time::Instant;

use log::{info, warn};

use crate::engine::MatchEngine;
use crate::error::DedupError;
use crate::model::{
    Ledger, RunMeta, RunReport, ScrapedRecord, SourceCounts, SourceOutcome, SourceStatus,
};
use crate::scan::partition_with;
use crate::script::ScriptConverter;
use crate::summary::compute_summary;

// ---------------------------------------------------------------------------
// Collaborator seams
// ---------------------------------------------------------------------------

/// A scrape collaborator producing pledge records.
pub trait ScrapeSource {
    fn name(&self) -> &str;
    fn fetch(&self) -> Result<Vec<ScrapedRecord>, DedupError>;
}

/// Supplies the authoritative ledger.
pub trait LedgerSource {
    fn snapshot(&self) -> Result<Ledger, DedupError>;
}

impl LedgerSource for Ledger {
    fn snapshot(&self) -> Result<Ledger, DedupError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub run_name: String,
    /// Stop after the first source that fails to fetch.
    pub fail_fast: bool,
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Deduplicate every source against a single snapshot of the ledger.
///
/// Only a failing snapshot is an error; a failing source is recorded in its
/// outcome and the run moves on (unless `fail_fast`).
pub fn run<C: ScriptConverter>(
    ledger_source: &dyn LedgerSource,
    sources: &[Box<dyn ScrapeSource>],
    options: &RunOptions,
    engine: &MatchEngine<C>,
) -> Result<RunReport, DedupError> {
    let ledger = ledger_source.snapshot()?;
    info!("ledger snapshot: {} entries", ledger.len());

    let mut outcomes: Vec<SourceOutcome> = Vec::with_capacity(sources.len());

    for source in sources {
        let name = source.name().to_string();
        let start = Instant::now();
        let fetched = source.fetch();

        match fetched {
            Ok(records) => {
                let (records, skipped) = prepare(&name, records);
                let mut part = partition_with(engine, records, &ledger);
                let counts = part.totals();
                let duration_ms = start.elapsed().as_millis() as u64;

                info!(
                    "source '{}': {} scraped, {} new, {} matched ({}ms)",
                    name, counts.total_scraped, counts.new_count, counts.matched_count, duration_ms
                );

                outcomes.push(SourceOutcome {
                    name,
                    status: SourceStatus::Ok,
                    error: None,
                    duration_ms,
                    counts,
                    skipped,
                    new: std::mem::take(&mut part.new),
                    matched: std::mem::take(&mut part.matched),
                });
            }
            Err(e) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                warn!("source '{}' failed: {}", name, failure_detail(&e));

                outcomes.push(SourceOutcome {
                    name: name.clone(),
                    status: SourceStatus::Error,
                    error: Some(e.to_string()),
                    duration_ms,
                    counts: SourceCounts::default(),
                    skipped: 0,
                    new: Vec::new(),
                    matched: Vec::new(),
                });

                if options.fail_fast {
                    warn!("fail-fast: stopping after '{}'", name);
                    break;
                }
            }
        }
    }

    let summary = compute_summary(&outcomes);

    Ok(RunReport {
        meta: RunMeta {
            run_name: options.run_name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            ledger_entries: ledger.len(),
        },
        summary,
        sources: outcomes,
    })
}

/// Stamp missing source names and drop records without an entity.
fn prepare(source_name: &str, records: Vec<ScrapedRecord>) -> (Vec<ScrapedRecord>, usize) {
    let mut kept = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for mut record in records {
        if record.entity.trim().is_empty() {
            warn!("source '{}': skipping record with empty entity", source_name);
            skipped += 1;
            continue;
        }
        if record.source.is_empty() {
            record.source = source_name.to_string();
        }
        kept.push(record);
    }

    (kept, skipped)
}

/// Error text without the source-name prefix the caller already logs.
fn failure_detail(e: &DedupError) -> String {
    match e {
        DedupError::Source { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LedgerEntry, MatchReason};

    struct Fixed {
        name: &'static str,
        entities: Vec<&'static str>,
    }

    impl ScrapeSource for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn fetch(&self) -> Result<Vec<ScrapedRecord>, DedupError> {
            Ok(self
                .entities
                .iter()
                .map(|e| ScrapedRecord {
                    entity: e.to_string(),
                    ..ScrapedRecord::default()
                })
                .collect())
        }
    }

    struct Broken(&'static str);

    impl ScrapeSource for Broken {
        fn name(&self) -> &str {
            self.0
        }

        fn fetch(&self) -> Result<Vec<ScrapedRecord>, DedupError> {
            Err(DedupError::source_failed(self.0, "connection reset"))
        }
    }

    struct NoLedger;

    impl LedgerSource for NoLedger {
        fn snapshot(&self) -> Result<Ledger, DedupError> {
            Err(DedupError::Ledger("unreachable".into()))
        }
    }

    fn ledger() -> Ledger {
        ["東亞銀行", "劉亦菲"].into_iter().map(LedgerEntry::new).collect()
    }

    fn options(fail_fast: bool) -> RunOptions {
        RunOptions {
            run_name: "test".into(),
            fail_fast,
        }
    }

    #[test]
    fn failure_detail_drops_source_prefix() {
        let e = DedupError::source_failed("down", "connection reset");
        assert_eq!(failure_detail(&e), "connection reset");
        let e = DedupError::Io("disk full".into());
        assert_eq!(failure_detail(&e), e.to_string());
    }

    #[test]
    fn run_partitions_each_source() {
        let sources: Vec<Box<dyn ScrapeSource>> = vec![
            Box::new(Fixed { name: "a", entities: vec!["東亞銀行（0023）", "古天樂", ""] }),
            Box::new(Fixed { name: "b", entities: vec!["刘亦菲女士"] }),
        ];
        let report = run(&ledger(), &sources, &options(false), &MatchEngine::new()).unwrap();

        assert_eq!(report.meta.run_name, "test");
        assert_eq!(report.meta.ledger_entries, 2);
        assert_eq!(report.sources.len(), 2);

        let a = &report.sources[0];
        assert_eq!(a.status, SourceStatus::Ok);
        assert_eq!(a.skipped, 1);
        assert_eq!(a.counts.total_scraped, 2);
        assert_eq!(a.new[0].entity, "古天樂");
        assert_eq!(a.new[0].source, "a");

        let b = &report.sources[1];
        assert_eq!(b.matched[0].reason, MatchReason::ScriptConvertedForward);

        assert_eq!(report.summary.total_scraped, 3);
        assert_eq!(report.summary.new_count, 1);
        assert_eq!(report.summary.matched_count, 2);
        assert_eq!(report.new_records().count(), 1);
    }

    #[test]
    fn failing_source_is_isolated() {
        let sources: Vec<Box<dyn ScrapeSource>> = vec![
            Box::new(Broken("down")),
            Box::new(Fixed { name: "up", entities: vec!["古天樂"] }),
        ];
        let report = run(&ledger(), &sources, &options(false), &MatchEngine::new()).unwrap();

        assert_eq!(report.sources[0].status, SourceStatus::Error);
        assert!(report.sources[0].error.as_deref().unwrap().contains("connection reset"));
        assert_eq!(report.sources[0].counts, SourceCounts::default());
        assert_eq!(report.sources[1].counts.new_count, 1);
        assert_eq!(report.summary.failed_sources, 1);
    }

    #[test]
    fn fail_fast_stops_after_first_failure() {
        let sources: Vec<Box<dyn ScrapeSource>> = vec![
            Box::new(Broken("down")),
            Box::new(Fixed { name: "up", entities: vec!["古天樂"] }),
        ];
        let report = run(&ledger(), &sources, &options(true), &MatchEngine::new()).unwrap();
        assert_eq!(report.sources.len(), 1);
    }

    #[test]
    fn snapshot_failure_aborts() {
        let sources: Vec<Box<dyn ScrapeSource>> = Vec::new();
        let err = run(&NoLedger, &sources, &options(false), &MatchEngine::new()).unwrap_err();
        assert!(matches!(err, DedupError::Ledger(_)));
    }

    #[test]
    fn explicit_source_field_is_kept() {
        let (records, skipped) = prepare("feed", vec![ScrapedRecord::new("orig", "古天樂")]);
        assert_eq!(skipped, 0);
        assert_eq!(records[0].source, "orig");
    }
}
