use regex::Regex;
use std::sync::LazyLock;

/// Leading `<number><ws><unit>` of a size token
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?|\.\d+)\s*([A-Za-z]*)").expect("valid regex")
});

/// A size token embedded in free text. The unit is mandatory here. The number
/// must start a token and short units must end on a word boundary, so neither
/// `5 Kids` nor the `4k` of `~/Videos/4k-exports` is read as kilobytes.
static EMBEDDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\s(:=,])(\d+(?:\.\d+)?)\s*(TB|GB|MB|KB|T|G|M|K|B)\b")
        .expect("valid regex")
});

/// Byte multiplier for a unit suffix (case-insensitive, binary multiples)
fn multiplier(unit: &str) -> u64 {
    match unit.to_ascii_uppercase().as_str() {
        "KB" | "K" => 1 << 10,
        "MB" | "M" => 1 << 20,
        "GB" | "G" => 1 << 30,
        "TB" | "T" => 1 << 40,
        _ => 1,
    }
}

/// Parse a human-readable size such as `2.01GB`, `512 k` or `1024` into bytes.
///
/// Anything without a numeric prefix parses to `0`; callers treat that as
/// "size unknown", not as an empty category.
pub fn parse_size(token: &str) -> u64 {
    let Some(caps) = TOKEN_RE.captures(token) else {
        return 0;
    };
    let value: f64 = match caps[1].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let bytes = value * multiplier(&caps[2]) as f64;
    if bytes.is_finite() && bytes > 0.0 {
        bytes as u64
    } else {
        0
    }
}

/// Locate the first size token in a line of text.
///
/// Returns the matched token and its byte count.
pub fn find_size_token(text: &str) -> Option<(&str, u64)> {
    let caps = EMBEDDED_RE.captures(text)?;
    let token = &text[caps.get(1)?.start()..caps.get(2)?.end()];
    Some((token, parse_size(token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_size("1B"), 1);
        assert_eq!(parse_size("1KB"), 1024);
        assert_eq!(parse_size("1 MB"), 1024 * 1024);
        assert_eq!(parse_size("1GB"), GB);
        assert_eq!(parse_size("1TB"), 1024 * GB);
    }

    #[test]
    fn test_unit_aliases_agree() {
        assert_eq!(parse_size("1GB"), parse_size("1024MB"));
        assert_eq!(parse_size("1GB"), parse_size("1048576KB"));
        assert_eq!(parse_size("3g"), parse_size("3GB"));
        assert_eq!(parse_size("2 k"), parse_size("2kb"));
        assert_eq!(parse_size("7T"), parse_size("7 tb"));
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(parse_size("1.50GB"), GB * 3 / 2);
        assert_eq!(parse_size("0.5 KB"), 512);
        assert_eq!(parse_size("2.01GB"), (2.01 * GB as f64) as u64);
    }

    #[test]
    fn test_unitless_is_bytes() {
        assert_eq!(parse_size("4096"), 4096);
        assert_eq!(parse_size("  12  "), 12);
    }

    #[test]
    fn test_malformed_yields_zero() {
        assert_eq!(parse_size(""), 0);
        assert_eq!(parse_size("GB"), 0);
        assert_eq!(parse_size("about 3GB"), 0);
        assert_eq!(parse_size("--"), 0);
    }

    #[test]
    fn test_monotonic_in_value() {
        let sizes: Vec<u64> = ["0.1GB", "0.5GB", "1GB", "1.25GB", "10GB"]
            .iter()
            .map(|s| parse_size(s))
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_find_embedded_token() {
        let (token, bytes) = find_size_token("  ✓ User app cache  2.01GB").unwrap();
        assert_eq!(token, "2.01GB");
        assert_eq!(bytes, parse_size("2.01GB"));

        let (token, _) = find_size_token("Chrome cache 340 MB, 12 items").unwrap();
        assert_eq!(token, "340 MB");
    }

    #[test]
    fn test_find_requires_unit_and_boundary() {
        assert!(find_size_token("Scanning 42 locations").is_none());
        assert!(find_size_token("5 Kids and 3 Beta builds").is_none());
        assert!(find_size_token("no numbers here").is_none());
        assert_eq!(find_size_token("freed 8K total").map(|(_, b)| b), Some(8192));
    }

    #[test]
    fn test_find_skips_digits_inside_path_segments() {
        let (token, bytes) = find_size_token("  ✓ ~/Videos/4k-exports 2.00GB").unwrap();
        assert_eq!(token, "2.00GB");
        assert_eq!(bytes, 2 * GB);

        let (token, _) = find_size_token("~/Library/Caches/pip/http/3b/a1 (12MB)").unwrap();
        assert_eq!(token, "12MB");

        assert_eq!(find_size_token("~/Videos/4k-exports"), None);
        assert_eq!(find_size_token("3.5GB at line start").map(|(t, _)| t), Some("3.5GB"));
    }
}
