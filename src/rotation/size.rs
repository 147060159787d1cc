use crate::error::{Result, RotateError};

/// Accepted unit suffixes and their decimal multipliers
const UNITS: &[(char, u64)] = &[
    ('K', 1_000),
    ('M', 1_000_000),
    ('G', 1_000_000_000),
    ('T', 1_000_000_000_000),
];

/// Parse a size string like "500M", "2G" or "1024" into bytes.
///
/// Units are powers of 1000. Whitespace is allowed between the number and
/// the suffix, nowhere else.
pub fn parse_size(s: &str) -> Result<u64> {
    let invalid = || RotateError::InvalidSizeFormat(s.to_string());

    // Try to parse as raw number first
    if is_decimal(s) {
        return s.parse::<u64>().map_err(|_| invalid());
    }

    let (num_part, suffix) = split_number_suffix(s).ok_or_else(invalid)?;
    let multiplier = UNITS
        .iter()
        .find(|(unit, _)| suffix.len() == 1 && suffix.starts_with(*unit))
        .map(|(_, multiplier)| *multiplier)
        .ok_or_else(invalid)?;

    num_part
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .ok_or_else(invalid)
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Split into leading digits and the suffix after any separating whitespace
fn split_number_suffix(s: &str) -> Option<(&str, &str)> {
    let split_pos = s.find(|ch: char| !ch.is_ascii_digit())?;
    let (num, rest) = s.split_at(split_pos);
    if num.is_empty() {
        return None;
    }

    Some((num, rest.trim_start()))
}

/// Format size in human-readable decimal units
pub fn format_size(bytes: u64) -> String {
    const LABELS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1000.0 && unit_idx < LABELS.len() - 1 {
        size /= 1000.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, LABELS[0])
    } else {
        format!("{:.1} {}", size, LABELS[unit_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("1K").unwrap(), 1_000);
        assert_eq!(parse_size("500M").unwrap(), 500_000_000);
        assert_eq!(parse_size("2G").unwrap(), 2_000_000_000);
        assert_eq!(parse_size("3T").unwrap(), 3_000_000_000_000);
        assert_eq!(parse_size("350 M").unwrap(), 350_000_000);
        assert_eq!(parse_size("7\tK").unwrap(), 7_000);
    }

    #[test]
    fn test_parse_size_rejects_other_input() {
        for input in [
            "",
            "abc",
            "500Q",
            "M",
            " 5M",
            "5M ",
            "5m",
            "5KB",
            "1.5G",
            "-1",
            "5 ",
            "18446744073709551616",
            "20000000T",
        ] {
            let result = parse_size(input);
            assert!(
                matches!(result, Err(RotateError::InvalidSizeFormat(ref s)) if s == input),
                "should reject {input:?}"
            );
        }
    }

    #[test]
    fn test_invalid_size_message_lists_suffixes() {
        let err = parse_size("500Q").unwrap_err();
        assert!(err.to_string().contains("[K, M, G, T]"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1_000), "1.0 KB");
        assert_eq!(format_size(1_500), "1.5 KB");
        assert_eq!(format_size(350_000_000), "350.0 MB");
        assert_eq!(format_size(2_000_000_000), "2.0 GB");
        assert_eq!(format_size(4_000_000_000_000_000), "4000.0 TB");
    }
}
