use std::collections::BTreeMap;

use crate::model::{RunSummary, SourceOutcome, SourceStatus};

/// Compute run totals and the reason histogram from per-source outcomes.
pub fn compute_summary(outcomes: &[SourceOutcome]) -> RunSummary {
    let mut reason_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut failed_sources = 0;
    let mut total_scraped = 0;
    let mut new_count = 0;
    let mut matched_count = 0;

    for outcome in outcomes {
        if outcome.status == SourceStatus::Error {
            failed_sources += 1;
        }
        total_scraped += outcome.counts.total_scraped;
        new_count += outcome.counts.new_count;
        matched_count += outcome.counts.matched_count;

        for m in &outcome.matched {
            *reason_counts.entry(m.reason.to_string()).or_insert(0) += 1;
        }
    }

    RunSummary {
        sources: outcomes.len(),
        failed_sources,
        total_scraped,
        new_count,
        matched_count,
        reason_counts,
    }
}
