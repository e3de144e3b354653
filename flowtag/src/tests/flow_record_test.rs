#[cfg(test)]
mod tests {
    use crate::{flow_record::FlowRecord, protocol::normalize_protocol};

    #[test]
    fn test_normalize_numeric_protocols() {
        assert_eq!(normalize_protocol("6"), "tcp");
        assert_eq!(normalize_protocol("17"), "udp");
        assert_eq!(normalize_protocol("1"), "icmp");
    }

    #[test]
    fn test_normalize_named_protocols() {
        assert_eq!(normalize_protocol("TCP"), "tcp");
        assert_eq!(normalize_protocol("Udp"), "udp");
        // Unknown numbers pass through unchanged.
        assert_eq!(normalize_protocol("47"), "47");
    }

    #[test]
    fn test_parse_version_2_record() {
        let line = "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 443 49153 6 25 20000 1620140761 1620140821 ACCEPT OK";
        let record = FlowRecord::parse(line).unwrap();

        assert_eq!(record.destination_port, "49153");
        assert_eq!(record.protocol, "tcp");
    }

    #[test]
    fn test_parse_exactly_fourteen_fields() {
        let record = FlowRecord::parse("2 0 0 0 0 0 25 TCP 10.0.0.1 10.0.0.2 1 1 1 1").unwrap();

        assert_eq!(record.destination_port, "25");
        assert_eq!(record.protocol, "tcp");
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let record =
            FlowRecord::parse("   2\t0 0 0 0 0 68 17 10.0.0.1 10.0.0.2 1 1 1 1  \r").unwrap();

        assert_eq!(record.destination_port, "68");
        assert_eq!(record.protocol, "udp");
    }

    #[test]
    fn test_parse_rejects_short_lines() {
        assert_eq!(FlowRecord::parse("2 0 0 0 0 0 25 tcp 10.0.0.1 10.0.0.2 1 1 1"), None);
        assert_eq!(FlowRecord::parse(""), None);
        assert_eq!(FlowRecord::parse("   "), None);
    }

    #[test]
    fn test_parse_rejects_other_versions() {
        assert_eq!(FlowRecord::parse("3 0 0 0 0 0 25 tcp 10.0.0.1 10.0.0.2 1 1 1 1"), None);
        assert_eq!(FlowRecord::parse("02 0 0 0 0 0 25 tcp 10.0.0.1 10.0.0.2 1 1 1 1"), None);
        assert_eq!(
            FlowRecord::parse("version 0 0 0 0 0 25 tcp 10.0.0.1 10.0.0.2 1 1 1 1"),
            None
        );
    }

    #[test]
    fn test_parse_keeps_port_unvalidated() {
        let record = FlowRecord::parse("2 0 0 0 0 0 - tcp 10.0.0.1 10.0.0.2 1 1 1 1").unwrap();

        assert_eq!(record.destination_port, "-");
    }
}
