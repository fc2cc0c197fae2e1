//! Numeric text entry.
//!
//! Range fields and estimator fields accept free text but only ever commit
//! sanitized numbers. Nothing here fails: garbage strips down to an empty
//! string, which callers treat as "no value".

/// Keep ASCII digits only and drop leading zeros ("007" -> "7", "000" -> "0").
pub fn sanitize_integer(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Keep ASCII digits and the first decimal point.
pub fn sanitize_decimal(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|c| match c {
            '0'..='9' => true,
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect()
}

/// Parse a non-negative integer out of free text.
///
/// Values too large for `u64` saturate.
pub fn parse_integer(raw: &str) -> Option<u64> {
    let digits = sanitize_integer(raw);
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Parse a non-negative decimal out of free text.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = sanitize_decimal(raw);
    if cleaned.is_empty() || cleaned == "." {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
