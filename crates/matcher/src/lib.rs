//! `donorlink-matcher` — donor-name matching engine.
//!
//! Pure engine crate: receives scraped records and a ledger snapshot, returns
//! match verdicts and partitions. No CLI or IO dependencies.

pub mod config;
pub mod cores;
pub mod engine;
pub mod error;
pub mod guard;
pub mod model;
pub mod normalize;
pub mod run;
pub mod scan;
pub mod script;
pub mod summary;
pub mod tables;

pub use config::DedupConfig;
pub use cores::extract_cores;
pub use engine::{default_engine, match_entities, MatchEngine};
pub use error::DedupError;
pub use guard::is_too_generic;
pub use model::{
    Ledger, LedgerEntry, MatchEvidence, MatchReason, MatchVerdict, MatchedRecord, Partition,
    RunReport, RunSummary, ScanResult, ScrapedRecord, SourceCounts, SourceOutcome, SourceStatus,
};
pub use normalize::normalize;
pub use run::{run, LedgerSource, RunOptions, ScrapeSource};
pub use scan::{find_match, find_match_with, partition, partition_with};
pub use script::{CharTableConverter, IdentityConverter, ScriptConverter};
