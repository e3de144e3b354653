/// Maps a raw protocol token to its canonical lowercase name.
///
/// IANA numbers for TCP, UDP and ICMP are translated to their names; every
/// other token is only lowercased.
///
/// ### Arguments
///
/// * `token` - The protocol field as found in a flow log or lookup row.
///
/// ### Returns
///
/// The canonical protocol name.
pub fn normalize_protocol(token: &str) -> String {
    match token {
        "6" => String::from("tcp"),
        "17" => String::from("udp"),
        "1" => String::from("icmp"),
        other => other.to_lowercase(),
    }
}
