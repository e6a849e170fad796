//! Suburb directory loaded from the bundled `suburbs.csv` table.
//!
//! The upstream API filters listings by numeric suburb code. Callers speak in
//! suburb names, so the table maps `name.trim().to_lowercase()` to its code.
//!
//! Table format:
//! ```text
//! name, code
//! Mission Bay, 1234
//! Ponsonby, 2040
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the bundled table
pub const SUBURBS_FILE: &str = "suburbs.csv";

#[derive(Debug, Error)]
pub enum SuburbLoadError {
    #[error("Failed to read suburb table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse suburb table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid code {code:?} for suburb '{name}' in {} (line {line})", path.display())]
    InvalidCode {
        path: PathBuf,
        name: String,
        code: String,
        line: u64,
    },
}

#[derive(Debug, Deserialize)]
struct SuburbRow {
    name: String,
    code: String,
}

/// Read-only mapping from normalized suburb name to upstream suburb code
#[derive(Debug, Clone, Default)]
pub struct SuburbDirectory {
    codes: HashMap<String, u32>,
}

impl SuburbDirectory {
    /// Load the directory from a CSV file with a `name, code` header row.
    ///
    /// Duplicate names keep the last row.
    pub fn load(path: &Path) -> Result<Self, SuburbLoadError> {
        let file = std::fs::File::open(path).map_err(|source| SuburbLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Parse a directory from any reader; `origin` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, SuburbLoadError> {
        let csv_error = |source| SuburbLoadError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers().map_err(csv_error)?.clone();

        let mut codes = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let row: SuburbRow = record.deserialize(Some(&headers)).map_err(csv_error)?;
            let code = row
                .code
                .parse::<u32>()
                .map_err(|_| SuburbLoadError::InvalidCode {
                    path: origin.to_path_buf(),
                    name: row.name.clone(),
                    code: row.code.clone(),
                    line: record.position().map_or(0, |pos| pos.line()),
                })?;
            codes.insert(normalize(&row.name), code);
        }

        log::debug!("Loaded {} suburbs from {}", codes.len(), origin.display());
        Ok(Self { codes })
    }

    /// Build a directory from in-memory `(name, code)` pairs
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let codes = entries
            .into_iter()
            .map(|(name, code)| (normalize(name.as_ref()), code))
            .collect();
        Self { codes }
    }

    /// Look up a suburb code, ignoring case and surrounding whitespace.
    ///
    /// An unknown name is a normal outcome, not an error.
    pub fn resolve(&self, raw_name: &str) -> Option<u32> {
        self.codes.get(&normalize(raw_name)).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All entries sorted by name
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self
            .codes
            .iter()
            .map(|(name, code)| (name.as_str(), *code))
            .collect();
        entries.sort_unstable();
        entries
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Default table location: next to the executable, falling back to the working directory
pub fn default_table_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SUBURBS_FILE)))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(SUBURBS_FILE))
}
