use crate::error::{AnalyzerError, Result};
use crate::flow_record::FlowRecord;
use crate::lookup_table::{LookupKey, LookupTable};
use log::{debug, trace};
use std::collections::HashMap;
use std::io::BufRead;

/// Line counts gathered while ingesting a flow log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: u64,
    pub skipped: u64,
}

/// Accumulates per-tag and per-port/protocol counts for one run.
pub struct Aggregator {
    lookup: LookupTable,
    tag_counts: HashMap<String, u64>,
    port_protocol_counts: HashMap<LookupKey, u64>,
    stats: IngestStats,
}

impl Aggregator {
    pub fn new(lookup: LookupTable) -> Self {
        Aggregator {
            lookup,
            tag_counts: HashMap::new(),
            port_protocol_counts: HashMap::new(),
            stats: IngestStats::default(),
        }
    }

    /// Counts one flow log line.
    ///
    /// Returns `false`, leaving every counter untouched, when the line is
    /// not a usable record.
    pub fn ingest(&mut self, line: &str) -> bool {
        let Some(record) = FlowRecord::parse(line) else {
            trace!("Skipping unusable flow log line: {:?}", line);
            self.stats.skipped += 1;
            return false;
        };

        let tag = self
            .lookup
            .resolve(&record.destination_port, &record.protocol)
            .to_string();
        *self.tag_counts.entry(tag).or_insert(0) += 1;

        let key = LookupKey::new(record.destination_port, record.protocol);
        *self.port_protocol_counts.entry(key).or_insert(0) += 1;

        self.stats.accepted += 1;
        true
    }

    /// Ingests every line of `source` in order.
    ///
    /// ### Arguments
    ///
    /// * `source` - The flow log, one record per line.
    /// * `origin` - Human-readable name of the source, used in errors.
    ///
    /// ### Returns
    ///
    /// An error if the source cannot be read or holds non-ASCII content.
    /// Counters may already have been updated when that happens, so the
    /// aggregator should be discarded.
    pub fn ingest_reader<R: BufRead>(&mut self, source: R, origin: &str) -> Result<()> {
        debug!("Reading the {} ...", origin);
        for (index, line) in source.lines().enumerate() {
            let line = line.map_err(|e| AnalyzerError::unreadable(origin, e))?;
            if !line.is_ascii() {
                return Err(AnalyzerError::not_ascii(origin, index + 1));
            }
            self.ingest(&line);
        }
        debug!(
            "Finished {}: {} accepted, {} skipped",
            origin, self.stats.accepted, self.stats.skipped
        );
        Ok(())
    }

    /// Count for `tag`, zero if it was never seen.
    pub fn tag_count(&self, tag: &str) -> u64 {
        self.tag_counts.get(tag).copied().unwrap_or(0)
    }

    /// Count for a (port, protocol) pair, zero if it was never seen.
    pub fn port_protocol_count(&self, port: &str, protocol: &str) -> u64 {
        self.port_protocol_counts
            .get(&LookupKey::new(port, protocol))
            .copied()
            .unwrap_or(0)
    }

    pub fn tag_counts(&self) -> &HashMap<String, u64> {
        &self.tag_counts
    }

    pub fn port_protocol_counts(&self) -> &HashMap<LookupKey, u64> {
        &self.port_protocol_counts
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}
