use crate::error::{AnalyzerError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Tag reported for records without a lookup entry.
pub const UNTAGGED: &str = "untagged";

const REQUIRED_COLUMNS: [&str; 3] = ["dstport", "protocol", "tag"];

/// A (destination port, protocol) pair, protocol in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub port: String,
    pub protocol: String,
}

impl LookupKey {
    pub fn new(port: impl Into<String>, protocol: impl Into<String>) -> Self {
        LookupKey {
            port: port.into(),
            protocol: protocol.into(),
        }
    }
}

/// What to do when the mapping source repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the tag of the last row for the key.
    #[default]
    LastWins,
    /// Fail the load on the first repeated key.
    Reject,
}

#[derive(Debug, Deserialize)]
struct LookupRow {
    dstport: String,
    protocol: String,
    tag: String,
}

/// Mapping from (port, protocol) to tag. Read-only once loaded.
#[derive(Debug, Default)]
pub struct LookupTable {
    entries: HashMap<LookupKey, String>,
}

/// Trims header names and keeps the first column of each required name.
///
/// Other columns are dropped so that rows missing only optional trailing
/// fields still deserialize.
fn preprocess_headers(headers: &StringRecord) -> (StringRecord, HashSet<usize>) {
    let mut unique_headers = StringRecord::new();
    let mut seen = HashSet::new();
    let mut indices = HashSet::new();

    for (index, header) in headers.iter().enumerate() {
        let trimmed_header = header.trim();
        if REQUIRED_COLUMNS.contains(&trimmed_header) && seen.insert(trimmed_header) {
            unique_headers.push_field(trimmed_header);
            indices.insert(index);
        }
    }

    (unique_headers, indices)
}

fn filter_record(record: &StringRecord, indices: &HashSet<usize>) -> StringRecord {
    record
        .iter()
        .enumerate()
        .filter(|(index, _)| indices.contains(index))
        .map(|(_, field)| field)
        .collect()
}

impl LookupTable {
    /// Opens `path` and loads the table from it.
    pub fn load_path<P: AsRef<Path>>(path: P, policy: DuplicatePolicy) -> Result<Self> {
        let path = path.as_ref();
        let origin = format!("lookup file {}", path.display());
        debug!("Opening the {} ...", origin);

        let file = File::open(path).map_err(|e| AnalyzerError::unreadable(&origin, e))?;
        Self::load(file, &origin, policy)
    }

    /// Builds the table from a CSV source with `dstport`, `protocol` and
    /// `tag` columns.
    ///
    /// ### Arguments
    ///
    /// * `source` - The CSV content, header row first.
    /// * `origin` - Human-readable name of the source, used in errors.
    /// * `policy` - How repeated keys are handled.
    ///
    /// ### Returns
    ///
    /// The populated table, or the first error encountered. Protocols and
    /// tags are stored lowercased, ports exactly as written.
    pub fn load<R: Read>(source: R, origin: &str, policy: DuplicatePolicy) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let headers = rdr
            .headers()
            .map_err(|e| AnalyzerError::from_csv(origin, e))?
            .clone();
        if !headers.as_slice().is_ascii() {
            return Err(AnalyzerError::not_ascii(origin, 1));
        }

        let (unique_headers, indices) = preprocess_headers(&headers);
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !unique_headers.iter().any(|header| header == *column))
            .collect();
        if !missing.is_empty() {
            return Err(AnalyzerError::MalformedLookupSource(format!(
                "{} is missing required column(s): {}",
                origin,
                missing.join(", ")
            )));
        }

        let mut table = LookupTable::default();
        for result in rdr.records() {
            let record = result.map_err(|e| AnalyzerError::from_csv(origin, e))?;
            let line = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or_default();
            if !record.as_slice().is_ascii() {
                return Err(AnalyzerError::not_ascii(origin, line));
            }

            // Rows may be shorter or longer than the header; only the
            // required fields have to be present.
            let row: LookupRow = filter_record(&record, &indices)
                .deserialize(Some(&unique_headers))
                .map_err(|e| {
                    AnalyzerError::MalformedLookupSource(format!(
                        "{} row on line {}: {}",
                        origin, line, e
                    ))
                })?;

            let key = LookupKey::new(row.dstport.trim(), row.protocol.trim().to_lowercase());
            let tag = row.tag.trim().to_lowercase();
            table.insert(key, tag, line, policy)?;
        }

        debug!("Loaded {} lookup entries from {}", table.len(), origin);
        Ok(table)
    }

    fn insert(
        &mut self,
        key: LookupKey,
        tag: String,
        line: usize,
        policy: DuplicatePolicy,
    ) -> Result<()> {
        if let Some(previous) = self.entries.get(&key) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(AnalyzerError::MalformedLookupSource(format!(
                        "duplicate entry for port {} / protocol {} on line {}",
                        key.port, key.protocol, line
                    )));
                }
                DuplicatePolicy::LastWins => warn!(
                    "Lookup entry {}/{} on line {} replaces tag {:?} with {:?}",
                    key.port, key.protocol, line, previous, tag
                ),
            }
        }
        self.entries.insert(key, tag);
        Ok(())
    }

    /// Returns the tag for an exact (port, protocol) match, or `"untagged"`.
    pub fn resolve(&self, port: &str, protocol: &str) -> &str {
        self.entries
            .get(&LookupKey::new(port, protocol))
            .map(String::as_str)
            .unwrap_or(UNTAGGED)
    }

    /// Number of distinct keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
