use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Which strategy produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    Direct,
    ScriptConvertedForward,
    ScriptConvertedBackward,
    CoreExact,
    CoreSubstring,
    MultiPersonQuorum,
    NoMatch,
    Empty,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::ScriptConvertedForward => "script-converted-forward",
            Self::ScriptConvertedBackward => "script-converted-backward",
            Self::CoreExact => "core-exact",
            Self::CoreSubstring => "core-substring",
            Self::MultiPersonQuorum => "multi-person-quorum",
            Self::NoMatch => "no-match",
            Self::Empty => "empty",
        }
    }

    /// True for reasons only a positive verdict carries.
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch | Self::Empty)
    }
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two strings a positive verdict was decided on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub scraped: String,
    pub existing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub matched: bool,
    pub reason: MatchReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<MatchEvidence>,
}

impl MatchVerdict {
    pub fn hit(reason: MatchReason, scraped: impl Into<String>, existing: impl Into<String>) -> Self {
        Self {
            matched: true,
            reason,
            evidence: Some(MatchEvidence {
                scraped: scraped.into(),
                existing: existing.into(),
            }),
        }
    }

    pub fn no_match() -> Self {
        Self {
            matched: false,
            reason: MatchReason::NoMatch,
            evidence: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            matched: false,
            reason: MatchReason::Empty,
            evidence: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Records + ledger
// ---------------------------------------------------------------------------

/// One pledge as extracted by a scrape collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecord {
    #[serde(default)]
    pub source: String,
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Any other fields, carried through for the writer.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ScrapedRecord {
    pub fn new(source: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entity: entity.into(),
            ..Self::default()
        }
    }
}

/// An existing authoritative record. Only `entity` takes part in matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entity: String,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl LedgerEntry {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// Ordered mapping of normalized key → entry, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<(String, LedgerEntry)>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which an entry is stored: its normalized name, or the trimmed
    /// display name when normalization leaves nothing.
    pub fn key_for(entity: &str) -> String {
        let key = normalize(entity);
        if key.is_empty() {
            entity.trim().to_string()
        } else {
            key
        }
    }

    /// Insert an entry. An existing key keeps its position and gets the new
    /// value; returns `true` when the key was new.
    pub fn insert(&mut self, entry: LedgerEntry) -> bool {
        let key = Self::key_for(&entry.entity);
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 = entry;
            false
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, entry));
            true
        }
    }

    pub fn get(&self, key: &str) -> Option<&LedgerEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LedgerEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<LedgerEntry> for Ledger {
    fn from_iter<I: IntoIterator<Item = LedgerEntry>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        for entry in iter {
            ledger.insert(entry);
        }
        ledger
    }
}

// ---------------------------------------------------------------------------
// Scan + partition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_key: Option<String>,
    pub reason: MatchReason,
}

impl ScanResult {
    pub fn miss(reason: MatchReason) -> Self {
        Self {
            matched: false,
            matched_entity: None,
            ledger_key: None,
            reason,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedRecord {
    pub record: ScrapedRecord,
    pub matched_entity: String,
    pub ledger_key: String,
    pub reason: MatchReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub total_scraped: usize,
    pub new_count: usize,
    pub matched_count: usize,
}

impl SourceCounts {
    pub fn absorb(&mut self, other: &SourceCounts) {
        self.total_scraped += other.total_scraped;
        self.new_count += other.new_count;
        self.matched_count += other.matched_count;
    }
}

/// A batch split into unmatched ("new") and already-recorded records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Partition {
    pub new: Vec<ScrapedRecord>,
    pub matched: Vec<MatchedRecord>,
    pub counts: BTreeMap<String, SourceCounts>,
}

impl Partition {
    /// Counters summed over every source in the batch.
    pub fn totals(&self) -> SourceCounts {
        let mut total = SourceCounts::default();
        for counts in self.counts.values() {
            total.absorb(counts);
        }
        total
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    Error,
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub name: String,
    pub status: SourceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
    pub counts: SourceCounts,
    /// Records dropped for an empty entity.
    pub skipped: usize,
    pub new: Vec<ScrapedRecord>,
    pub matched: Vec<MatchedRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub sources: usize,
    pub failed_sources: usize,
    pub total_scraped: usize,
    pub new_count: usize,
    pub matched_count: usize,
    pub reason_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub run_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub ledger_entries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: RunMeta,
    pub summary: RunSummary,
    pub sources: Vec<SourceOutcome>,
}

impl RunReport {
    /// Every unmatched record across all sources, in source order.
    pub fn new_records(&self) -> impl Iterator<Item = &ScrapedRecord> {
        self.sources.iter().flat_map(|s| s.new.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_serializes_kebab_case() {
        let json = serde_json::to_string(&MatchReason::ScriptConvertedForward).unwrap();
        assert_eq!(json, "\"script-converted-forward\"");
        assert_eq!(MatchReason::MultiPersonQuorum.to_string(), "multi-person-quorum");
        assert!(MatchReason::CoreExact.is_match());
        assert!(!MatchReason::Empty.is_match());
    }

    #[test]
    fn ledger_keeps_insertion_order() {
        let ledger: Ledger = ["東亞銀行", "中國宏橋", "張智霖"]
            .into_iter()
            .map(LedgerEntry::new)
            .collect();
        let keys: Vec<&str> = ledger.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["東亞銀行", "中國宏橋", "張智霖"]);
    }

    #[test]
    fn ledger_replaces_duplicate_key_in_place() {
        let mut ledger = Ledger::new();
        assert!(ledger.insert(LedgerEntry::new("東亞銀行有限公司")));
        assert!(ledger.insert(LedgerEntry::new("張智霖")));
        assert!(!ledger.insert(LedgerEntry::new("東亞銀行")));
        assert_eq!(ledger.len(), 2);
        let (first_key, first) = ledger.iter().next().unwrap();
        assert_eq!(first_key, "東亞銀行");
        assert_eq!(first.entity, "東亞銀行");
    }

    #[test]
    fn ledger_keys_over_stripped_names_by_display_name() {
        let ledger: Ledger = [LedgerEntry::new(" 香港 ")].into_iter().collect();
        assert!(ledger.get("香港").is_some());
    }

    #[test]
    fn scraped_record_keeps_unknown_fields() {
        let json = r#"{"entity":"東亞銀行","amount":"100萬","category":"cash"}"#;
        let rec: ScrapedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.entity, "東亞銀行");
        assert_eq!(rec.amount.as_deref(), Some("100萬"));
        assert_eq!(rec.extra["category"], "cash");
        assert_eq!(rec.source, "");
    }

    #[test]
    fn partition_totals_sum_sources() {
        let mut p = Partition::default();
        p.counts.insert(
            "a".into(),
            SourceCounts { total_scraped: 3, new_count: 1, matched_count: 2 },
        );
        p.counts.insert(
            "b".into(),
            SourceCounts { total_scraped: 2, new_count: 2, matched_count: 0 },
        );
        assert_eq!(
            p.totals(),
            SourceCounts { total_scraped: 5, new_count: 3, matched_count: 2 }
        );
    }
}
