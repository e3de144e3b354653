//! Error types for flowtag.

use std::io;
use thiserror::Error;

/// Fatal conditions that abort a run.
///
/// Unusable flow-log lines are not represented here: they are skipped
/// silently by the parser and never surface as errors.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The lookup source lacks a required column, a row lacks a required
    /// field, or a key repeats while duplicates are rejected.
    #[error("malformed lookup source: {0}")]
    MalformedLookupSource(String),

    /// A mapping or log source could not be opened or read.
    #[error("cannot read {origin}: {source}")]
    SourceUnreadable {
        origin: String,
        #[source]
        source: io::Error,
    },

    /// The report could not be written to its sink.
    #[error("cannot write report to {target}: {source}")]
    ReportUnwritable {
        target: String,
        #[source]
        source: io::Error,
    },
}

impl AnalyzerError {
    pub fn unreadable(origin: impl Into<String>, source: io::Error) -> Self {
        AnalyzerError::SourceUnreadable {
            origin: origin.into(),
            source,
        }
    }

    pub fn unwritable(target: impl Into<String>, source: io::Error) -> Self {
        AnalyzerError::ReportUnwritable {
            target: target.into(),
            source,
        }
    }

    /// Error for content that is readable but not 7-bit ASCII.
    pub fn not_ascii(origin: impl Into<String>, line: usize) -> Self {
        AnalyzerError::unreadable(
            origin,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non-ASCII content on line {}", line),
            ),
        )
    }

    /// Maps a `csv` failure onto the lookup-source error kinds.
    pub fn from_csv(origin: &str, err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => AnalyzerError::unreadable(origin, e),
            csv::ErrorKind::Utf8 { err, .. } => AnalyzerError::unreadable(
                origin,
                io::Error::new(io::ErrorKind::InvalidData, err),
            ),
            other => AnalyzerError::MalformedLookupSource(format!("{:?}", other)),
        }
    }
}

/// Result type alias for flowtag operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
