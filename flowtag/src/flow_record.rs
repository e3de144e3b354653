use crate::protocol::normalize_protocol;

/// Fewest whitespace-separated fields a version 2 flow log line carries.
pub const MIN_FIELD_COUNT: usize = 14;
/// Value of the version field (position 0) for supported records.
pub const SUPPORTED_VERSION: &str = "2";
pub const DESTINATION_PORT_INDEX: usize = 6;
pub const PROTOCOL_INDEX: usize = 7;

/// The part of a flow log record used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    /// Destination port exactly as it appears in the log.
    pub destination_port: String,
    /// Canonical protocol name.
    pub protocol: String,
}

impl FlowRecord {
    /// Extracts a `FlowRecord` from one flow log line.
    ///
    /// Lines with too few fields or an unsupported version yield `None`.
    /// Such lines are ordinary noise in flow logs, so they are not errors.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELD_COUNT || fields[0] != SUPPORTED_VERSION {
            return None;
        }

        Some(FlowRecord {
            destination_port: fields[DESTINATION_PORT_INDEX].to_string(),
            protocol: normalize_protocol(fields[PROTOCOL_INDEX]),
        })
    }
}
