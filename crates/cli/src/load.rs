//! File-backed scrape sources and ledger: CSV with headers, or a JSON array
//! of objects. Format follows the file extension.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use donorlink_matcher::run::{LedgerSource, ScrapeSource};
use donorlink_matcher::{DedupError, Ledger, LedgerEntry, ScrapedRecord};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(format!(
                "{}: unsupported file type (expected .csv or .json)",
                path.display()
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One input row as ordered (column, value) pairs.
type Row = Vec<(String, Value)>;

fn read_rows(path: &Path) -> Result<Vec<Row>, String> {
    let format = InputFormat::from_path(path)?;
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    match format {
        InputFormat::Csv => parse_csv(&data),
        InputFormat::Json => parse_json(&data),
    }
    .map_err(|e| format!("{}: {e}", path.display()))
}

fn parse_csv(data: &str) -> Result<Vec<Row>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), Value::String(v.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn parse_json(data: &str) -> Result<Vec<Row>, String> {
    let items: Vec<Value> = serde_json::from_str(data).map_err(|e| e.to_string())?;
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Err(format!("item {i} is not an object")),
        })
        .collect()
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn to_record(row: Row, entity_column: &str) -> ScrapedRecord {
    let mut record = ScrapedRecord::default();
    for (key, value) in row {
        if key == entity_column {
            record.entity = text(&value);
            continue;
        }
        match key.as_str() {
            "source" => record.source = text(&value),
            "amount" => record.amount = Some(text(&value)).filter(|s| !s.is_empty()),
            "url" => record.url = Some(text(&value)).filter(|s| !s.is_empty()),
            _ => {
                record.extra.insert(key, value);
            }
        }
    }
    record
}

fn to_entry(row: Row, entity_column: &str) -> LedgerEntry {
    let mut entry = LedgerEntry::default();
    for (key, value) in row {
        if key == entity_column {
            entry.entity = text(&value);
        } else {
            entry.extra.insert(key, value);
        }
    }
    entry
}

/// Checked against the first row only; an empty file passes.
fn check_entity_column(rows: &[Row], path: &Path, column: &str) -> Result<(), String> {
    match rows.first() {
        Some(row) if !row.iter().any(|(k, _)| k == column) => {
            Err(format!("{}: no '{column}' column", path.display()))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

pub struct FileSource {
    pub name: String,
    pub path: PathBuf,
    pub entity_column: String,
}

impl ScrapeSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<ScrapedRecord>, DedupError> {
        let rows = read_rows(&self.path).map_err(|e| DedupError::source_failed(&self.name, e))?;
        check_entity_column(&rows, &self.path, &self.entity_column)
            .map_err(|e| DedupError::source_failed(&self.name, e))?;
        debug!("source '{}': read {} rows", self.name, rows.len());
        Ok(rows
            .into_iter()
            .map(|row| to_record(row, &self.entity_column))
            .collect())
    }
}

pub struct FileLedger {
    pub path: PathBuf,
    pub entity_column: String,
}

impl LedgerSource for FileLedger {
    fn snapshot(&self) -> Result<Ledger, DedupError> {
        let rows = read_rows(&self.path).map_err(DedupError::Ledger)?;
        check_entity_column(&rows, &self.path, &self.entity_column).map_err(DedupError::Ledger)?;
        Ok(rows
            .into_iter()
            .map(|row| to_entry(row, &self.entity_column))
            .filter(|entry| !entry.entity.trim().is_empty())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Write records as CSV: `source,entity,amount,url` then every extra column
/// (sorted). Missing values are empty cells.
pub fn write_records_csv<'a, I>(path: &Path, records: I) -> Result<usize, String>
where
    I: IntoIterator<Item = &'a ScrapedRecord>,
{
    let records: Vec<&ScrapedRecord> = records.into_iter().collect();
    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.extra.keys().map(String::as_str))
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    let mut header = vec!["source", "entity", "amount", "url"];
    header.extend(extra_columns.iter().copied());
    writer.write_record(&header).map_err(|e| e.to_string())?;

    for record in &records {
        let mut row: Vec<String> = vec![
            record.source.clone(),
            record.entity.clone(),
            record.amount.clone().unwrap_or_default(),
            record.url.clone().unwrap_or_default(),
        ];
        row.extend(extra_columns.iter().map(|c| cell(&record.extra, c)));
        writer.write_record(&row).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(records.len())
}

fn cell(extra: &BTreeMap<String, Value>, column: &str) -> String {
    extra.get(column).map(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.CSV")), Ok(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("dir/a.json")), Ok(InputFormat::Json));
        assert!(InputFormat::from_path(Path::new("a.xlsx")).is_err());
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn csv_rows_map_known_and_extra_columns() {
        let rows = parse_csv("donor,amount,category\n東亞銀行,100萬,cash\n").unwrap();
        let record = to_record(rows[0].clone(), "donor");
        assert_eq!(record.entity, "東亞銀行");
        assert_eq!(record.amount.as_deref(), Some("100萬"));
        assert_eq!(record.extra["category"], "cash");
        assert_eq!(record.source, "");
    }

    #[test]
    fn json_rows_require_objects() {
        let rows = parse_json(r#"[{"entity":"古天樂","amount":500}]"#).unwrap();
        let record = to_record(rows[0].clone(), "entity");
        assert_eq!(record.entity, "古天樂");
        assert_eq!(record.amount.as_deref(), Some("500"));

        assert!(parse_json(r#"["古天樂"]"#).is_err());
        assert!(parse_json("{").is_err());
    }

    #[test]
    fn missing_entity_column_is_reported() {
        let rows = parse_csv("name\n古天樂\n").unwrap();
        let err = check_entity_column(&rows, Path::new("x.csv"), "entity").unwrap_err();
        assert!(err.contains("no 'entity' column"));
        assert!(check_entity_column(&[], Path::new("x.csv"), "entity").is_ok());
    }

    #[test]
    fn ledger_rows_keep_extra_fields() {
        let rows = parse_csv("entity,pledged_at\n東亞銀行,2020-02-01\n").unwrap();
        let entry = to_entry(rows[0].clone(), "entity");
        assert_eq!(entry.entity, "東亞銀行");
        assert_eq!(entry.extra["pledged_at"], "2020-02-01");
    }

    #[test]
    fn writes_union_of_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.csv");

        let mut a = ScrapedRecord::new("news", "古天樂");
        a.extra.insert("category".into(), Value::String("cash".into()));
        let mut b = ScrapedRecord::new("news", "張柏芝");
        b.amount = Some("50萬".into());
        b.extra.insert("note".into(), Value::String("via agent".into()));

        let n = write_records_csv(&path, [&a, &b]).unwrap();
        assert_eq!(n, 2);

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "source,entity,amount,url,category,note");
        assert_eq!(lines[1], "news,古天樂,,,cash,");
        assert_eq!(lines[2], "news,張柏芝,50萬,,,via agent");
    }
}
