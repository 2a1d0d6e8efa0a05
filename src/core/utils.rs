use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".farm_ledger";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.farm_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FARM_LEDGER_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Rewrites free-form amount text into the `1234.5` form `f64::from_str` accepts.
///
/// Whitespace, apostrophes and underscores are dropped. When both `,` and `.`
/// appear, the rightmost one is the decimal separator and the other is
/// grouping. A separator that appears exactly once on its own is decimal;
/// one that repeats is grouping.
pub fn normalize_decimal_input(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '\'' | '_'))
        .collect();

    let last_comma = compact.rfind(',');
    let last_dot = compact.rfind('.');
    let decimal_at = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => Some(comma.max(dot)),
        (Some(comma), None) if compact.matches(',').count() == 1 => Some(comma),
        (None, Some(dot)) if compact.matches('.').count() == 1 => Some(dot),
        _ => None,
    };

    compact
        .char_indices()
        .filter_map(|(index, ch)| match ch {
            ',' | '.' if Some(index) == decimal_at => Some('.'),
            ',' | '.' => None,
            other => Some(other),
        })
        .collect()
}

/// Parses amount text written with either decimal separator.
///
/// Returns `None` for empty, malformed, or non-finite input.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = normalize_decimal_input(raw);
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_and_period_are_both_decimal_separators() {
        assert_eq!(normalize_decimal_input("12,75"), "12.75");
        assert_eq!(normalize_decimal_input(" 12.75 "), "12.75");
    }

    #[test]
    fn rightmost_separator_wins_when_both_appear() {
        assert_eq!(normalize_decimal_input("1.234,56"), "1234.56");
        assert_eq!(normalize_decimal_input("1,234.56"), "1234.56");
        assert_eq!(normalize_decimal_input("1 234 567,8"), "1234567.8");
    }

    #[test]
    fn repeated_separator_is_grouping() {
        assert_eq!(normalize_decimal_input("1.234.567"), "1234567");
        assert_eq!(normalize_decimal_input("1,234,567"), "1234567");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_decimal("-3,5"), Some(-3.5));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("  "), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("--5"), None);
        assert_eq!(parse_decimal("1e400"), None);
    }
}
