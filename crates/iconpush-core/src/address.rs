//! Syntax check for the device address given on the command line.
//!
//! Pure string validation: nothing is resolved or contacted here.

/// Maximum length of a single DNS label.
const LABEL_MAX: usize = 63;

/// Returns true if `address` is a plausible IPv4 address or hostname.
///
/// - `localhost` and `127.0.0.1` are always accepted.
/// - Four dot-separated groups of 1–3 digits are treated as IPv4 and every
///   group must be in 0..=255 (`256.1.1.1` is rejected, not re-checked as a hostname).
/// - Anything else must be one or more dot-separated labels of 1–63 ASCII
///   alphanumerics or hyphens, with no hyphen at either end of a label.
pub fn is_valid_address(address: &str) -> bool {
    if address.is_empty() {
        return false;
    }
    if address == "localhost" || address == "127.0.0.1" {
        return true;
    }
    if looks_like_ipv4(address) {
        return address
            .split('.')
            .all(|octet| octet.parse::<u16>().map_or(false, |n| n <= 255));
    }
    is_valid_hostname(address)
}

fn looks_like_ipv4(address: &str) -> bool {
    let groups: Vec<&str> = address.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()))
}

fn is_valid_hostname(address: &str) -> bool {
    address.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= LABEL_MAX
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}
