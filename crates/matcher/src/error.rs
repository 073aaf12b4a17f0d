use std::fmt;

#[derive(Debug)]
pub enum DedupError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (duplicate source, empty path, etc.).
    ConfigValidation(String),
    /// A scrape source failed to produce records.
    Source { source_name: String, message: String },
    /// The ledger snapshot could not be taken.
    Ledger(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl DedupError {
    pub fn source_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            source_name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DedupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Source { source_name, message } => {
                write!(f, "source '{source_name}': {message}")
            }
            Self::Ledger(msg) => write!(f, "ledger error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for DedupError {}
