use crate::{
    args::ExportMethodType,
    error::{AnalyzerError, Result},
    lookup_table::{LookupKey, UNTAGGED},
};
use log::debug;
use std::{
    collections::HashMap,
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Fixed name of the report artifact when no export path is configured.
pub const DEFAULT_REPORT_PATH: &str = "output_results.txt";

/// Sort key for a port: numeric ports by value, then everything else.
///
/// Numeric values are compared as digit strings with leading zeros removed
/// (shorter is smaller), so ports of any length order correctly.
fn port_order(port: &str) -> (bool, usize, &str) {
    if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
        let digits = port.trim_start_matches('0');
        (false, digits.len(), digits)
    } else {
        (true, 0, "")
    }
}

/// Renders the two counters into the textual report.
///
/// The output depends only on the counter contents, never on hash order.
pub fn render(
    tag_counts: &HashMap<String, u64>,
    port_protocol_counts: &HashMap<LookupKey, u64>,
) -> String {
    let mut tags: Vec<(&String, &u64)> = tag_counts.iter().collect();
    tags.sort_by(|(a, _), (b, _)| {
        (a.as_str() == UNTAGGED, a.as_str()).cmp(&(b.as_str() == UNTAGGED, b.as_str()))
    });

    let mut ports: Vec<(&LookupKey, &u64)> = port_protocol_counts.iter().collect();
    ports.sort_by(|(a, _), (b, _)| {
        (port_order(&a.port), &a.protocol, &a.port).cmp(&(
            port_order(&b.port),
            &b.protocol,
            &b.port,
        ))
    });

    let mut out = String::new();
    out.push_str("Count of matches for each tag\n\n");
    out.push_str("Tag Counts:\n");
    out.push_str("Tag,Count\n");
    for (tag, count) in tags {
        out.push_str(&format!("{},{}\n", tag, count));
    }

    out.push_str("\nCount of matches for each port/protocol combination\n\n");
    out.push_str("Port/Protocol Combination Counts:\n");
    out.push_str("Port,Protocol,Count\n");
    for (key, count) in ports {
        out.push_str(&format!("{},{},{}\n", key.port, key.protocol, count));
    }
    out
}

/// Delivers a rendered report to the configured sink.
pub struct ReportWriter {
    export_type: ExportMethodType,
    file_path: PathBuf,
}

impl ReportWriter {
    pub fn new(export_type: ExportMethodType, file_path: Option<PathBuf>) -> Self {
        ReportWriter {
            export_type,
            file_path: file_path.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
        }
    }

    /// Where the report ends up, for user-facing messages.
    pub fn target(&self) -> String {
        match self.export_type {
            ExportMethodType::File => self.file_path.display().to_string(),
            ExportMethodType::Print => String::from("stdout"),
        }
    }

    /// Writes the complete report to the sink.
    ///
    /// A file is first written next to its destination and then renamed
    /// over it, so a failure never leaves a partial report behind.
    pub fn write(&self, report: &str) -> Result<()> {
        match self.export_type {
            ExportMethodType::Print => {
                let stdout = std::io::stdout();
                write_to(report, stdout.lock())
                    .map_err(|e| AnalyzerError::unwritable(self.target(), e))
            }
            ExportMethodType::File => self.write_file(report),
        }
    }

    fn write_file(&self, report: &str) -> Result<()> {
        let staging = staging_path(&self.file_path);
        debug!("Writing report to {:?}", staging);

        let written = File::create(&staging)
            .and_then(|file| write_to(report, file))
            .and_then(|_| fs::rename(&staging, &self.file_path));

        written.map_err(|e| {
            let _ = fs::remove_file(&staging);
            AnalyzerError::unwritable(self.target(), e)
        })?;
        debug!("Report written to {}", self.target());
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes `report` through a buffered writer and flushes it.
pub fn write_to<W: Write>(report: &str, sink: W) -> std::io::Result<()> {
    let mut writer = BufWriter::new(sink);
    writer.write_all(report.as_bytes())?;
    writer.flush()
}
