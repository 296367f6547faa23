//! Engineering-notation values.
//!
//! Parses values such as `10k`, `100u` or `4.7n` and formats component
//! labels like `1kΩ` or `100μF`.

use crate::error::{RectifierError, Result};

/// Parse a numeric value with an optional SI suffix.
///
/// Supported suffixes: p (1e-12), n (1e-9), u/µ/μ (1e-6), m (1e-3),
/// k/K (1e3), M (1e6), G (1e9).
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' | 'μ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

/// Parse a value, reporting the offending text on failure.
pub fn parse_value_strict(text: &str) -> Result<f64> {
    parse_value(text).ok_or_else(|| RectifierError::InvalidValue {
        text: text.to_string(),
    })
}

/// Parse a capacitance given in farads-with-suffix and return microfarads.
///
/// A bare number is taken to already be in microfarads, matching the
/// control slider units.
pub fn parse_micro_farads(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let has_suffix = trimmed
        .chars()
        .last()
        .map(|c| !c.is_ascii_digit() && c != '.')
        .unwrap_or(false);
    let value = parse_value_strict(trimmed)?;
    Ok(if has_suffix { value * 1e6 } else { value })
}

/// Format a value with the largest SI prefix that keeps it at or above one.
fn format_si(value: f64, unit: &str) -> String {
    const PREFIXES: [(f64, &str); 7] = [
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "k"),
        (1.0, ""),
        (1e-3, "m"),
        (1e-6, "μ"),
        (1e-9, "n"),
    ];

    if value == 0.0 {
        return format!("0{}", unit);
    }

    let magnitude = value.abs();
    let (scale, prefix) = PREFIXES
        .iter()
        .copied()
        .find(|(scale, _)| magnitude >= *scale)
        .unwrap_or((1e-12, "p"));

    let scaled = value / scale;
    let text = if (scaled - scaled.round()).abs() < 1e-9 {
        format!("{}", scaled.round())
    } else {
        format!("{:.1}", scaled)
    };
    format!("{}{}{}", text, prefix, unit)
}

/// Format a resistance label, e.g. `1kΩ`.
pub fn format_ohms(ohms: f64) -> String {
    format_si(ohms, "Ω")
}

/// Format a capacitance given in microfarads, e.g. `100μF`.
pub fn format_micro_farads(micro_farads: f64) -> String {
    format_si(micro_farads * 1e-6, "F")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("2.2M").unwrap(), 2.2e6);
        assert_relative_eq!(parse_value("6").unwrap(), 6.0);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn test_parse_value_strict_reports_text() {
        let err = parse_value_strict("1x").unwrap_err();
        assert!(err.to_string().contains("'1x'"));
    }

    #[test]
    fn test_parse_micro_farads() {
        assert_relative_eq!(parse_micro_farads("100").unwrap(), 100.0);
        assert_relative_eq!(parse_micro_farads("100u").unwrap(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(parse_micro_farads("1m").unwrap(), 1000.0, max_relative = 1e-12);
        assert!(parse_micro_farads("lots").is_err());
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_ohms(1000.0), "1kΩ");
        assert_eq!(format_ohms(470.0), "470Ω");
        assert_eq!(format_ohms(4700.0), "4.7kΩ");
        assert_eq!(format_micro_farads(100.0), "100μF");
        assert_eq!(format_micro_farads(2200.0), "2.2mF");
    }

    #[test]
    fn test_format_zero_has_no_prefix() {
        assert_eq!(format_ohms(0.0), "0Ω");
        assert_eq!(format_micro_farads(0.0), "0F");
    }
}
