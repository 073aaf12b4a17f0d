use std::collections::HashSet;

use serde::Deserialize;

use crate::error::DedupError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DedupConfig {
    pub name: String,
    #[serde(default)]
    pub fail_fast: bool,
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

// ---------------------------------------------------------------------------
// Ledger + sources
// ---------------------------------------------------------------------------

/// The authoritative ledger file.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub file: String,
    #[serde(default = "default_entity_column")]
    pub entity_column: String,
}

/// One scrape output file. Format is inferred from the extension.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub file: String,
    #[serde(default = "default_entity_column")]
    pub entity_column: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_entity_column() -> String {
    "entity".into()
}

fn default_enabled() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Parsing + validation
// ---------------------------------------------------------------------------

impl DedupConfig {
    pub fn from_toml(input: &str) -> Result<Self, DedupError> {
        let config: DedupConfig =
            toml::from_str(input).map_err(|e| DedupError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DedupError> {
        if self.name.trim().is_empty() {
            return Err(DedupError::ConfigValidation("name must not be empty".into()));
        }

        if self.ledger.file.trim().is_empty() {
            return Err(DedupError::ConfigValidation(
                "ledger.file must not be empty".into(),
            ));
        }

        if self.sources.is_empty() {
            return Err(DedupError::ConfigValidation(
                "at least 1 source is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for (i, source) in self.sources.iter().enumerate() {
            if source.name.trim().is_empty() {
                return Err(DedupError::ConfigValidation(format!(
                    "sources[{i}]: name must not be empty"
                )));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(DedupError::ConfigValidation(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
            if source.file.trim().is_empty() {
                return Err(DedupError::ConfigValidation(format!(
                    "source '{}': file must not be empty",
                    source.name
                )));
            }
        }

        Ok(())
    }

    /// Sources with `enabled = true`, in declaration order.
    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|s| s.enabled)
    }
}
