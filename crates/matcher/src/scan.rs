//! Ledger scan and batch partition. No I/O.

use log::debug;

use crate::engine::{default_engine, MatchEngine};
use crate::model::{Ledger, MatchReason, MatchedRecord, Partition, ScanResult, ScrapedRecord};
use crate::script::ScriptConverter;

/// First ledger entry (in insertion order) that `scraped` matches.
pub fn find_match(scraped: &str, ledger: &Ledger) -> ScanResult {
    find_match_with(default_engine(), scraped, ledger)
}

pub fn find_match_with<C: ScriptConverter>(
    engine: &MatchEngine<C>,
    scraped: &str,
    ledger: &Ledger,
) -> ScanResult {
    if scraped.trim().is_empty() {
        return ScanResult::miss(MatchReason::Empty);
    }

    for (key, entry) in ledger.iter() {
        let verdict = engine.match_entities(scraped, &entry.entity);
        if verdict.matched {
            return ScanResult {
                matched: true,
                matched_entity: Some(entry.entity.clone()),
                ledger_key: Some(key.to_string()),
                reason: verdict.reason,
            };
        }
    }

    ScanResult::miss(MatchReason::NoMatch)
}

/// Split `records` into new and already-recorded, with per-source counters.
pub fn partition(records: Vec<ScrapedRecord>, ledger: &Ledger) -> Partition {
    partition_with(default_engine(), records, ledger)
}

pub fn partition_with<C: ScriptConverter>(
    engine: &MatchEngine<C>,
    records: Vec<ScrapedRecord>,
    ledger: &Ledger,
) -> Partition {
    let mut out = Partition::default();

    for record in records {
        let counts = out.counts.entry(record.source.clone()).or_default();
        counts.total_scraped += 1;

        let result = find_match_with(engine, &record.entity, ledger);
        match (result.matched_entity, result.ledger_key) {
            (Some(matched_entity), Some(ledger_key)) if result.matched => {
                debug!(
                    "[{}] '{}' matches '{}' ({})",
                    record.source, record.entity, matched_entity, result.reason
                );
                counts.matched_count += 1;
                out.matched.push(MatchedRecord {
                    record,
                    matched_entity,
                    ledger_key,
                    reason: result.reason,
                });
            }
            _ => {
                counts.new_count += 1;
                out.new.push(record);
            }
        }
    }

    out
}
