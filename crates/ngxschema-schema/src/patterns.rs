//! # Placeholder Pattern Library
//!
//! Maps value-placeholder names used in the module documentation (`size`,
//! `time`, `port`, ...) to the regular expression a configured value must
//! match. Placeholders listed in [`NUMERIC_VALUES`] are additionally accepted
//! as bare JSON numbers, since YAML/JSON authors write `worker_connections: 512`
//! rather than `"512"`.
//!
//! Every pattern is anchored with `^` and `$`; [`pattern_body`] strips the
//! anchors for embedding into composite patterns.

/// Unsigned integer.
pub const INTEGER_PATTERN: &str = "^[0-9]+$";

/// Size with an optional `k`/`m`/`g` unit suffix (either case).
pub const SIZE_PATTERN: &str = "^[0-9]+[kKmMgG]?$";

/// Duration with an optional unit, space-separated parts allowed (`1h 30m`).
pub const TIME_PATTERN: &str = r"^[0-9]+([smhdwMy]|ms)?(\s+[0-9]+([smhdwMy]|ms)?)*$";

/// Placeholder name → pattern.
pub const VALUE_PATTERNS: &[(&str, &str)] = &[
    ("code", INTEGER_PATTERN),
    ("connections", SIZE_PATTERN),
    ("digit", "^[0-9]$"),
    ("factor", r"^[0-9]+(\.[0-9]+)?$"),
    ("field", "^[^ ]+$"),
    ("header_timeout", TIME_PATTERN),
    ("interval", TIME_PATTERN),
    ("length", SIZE_PATTERN),
    ("letter", "^[a-zA-Z]$"),
    ("levels", "^[0-9]$"),
    ("N", INTEGER_PATTERN),
    ("number", INTEGER_PATTERN),
    ("offset", SIZE_PATTERN),
    ("permissions", "^[rwx]+$"),
    ("port", INTEGER_PATTERN),
    ("rate", SIZE_PATTERN),
    ("response", "^[0-9]{3}$"),
    ("size", SIZE_PATTERN),
    ("time", TIME_PATTERN),
    ("timeout", TIME_PATTERN),
];

/// Placeholders that also accept a plain number.
pub const NUMERIC_VALUES: &[&str] = &[
    "code",
    "connections",
    "digit",
    "factor",
    "header_timeout",
    "interval",
    "length",
    "levels",
    "N",
    "number",
    "offset",
    "port",
    "response",
    "size",
    "time",
    "timeout",
];

/// Pattern for the placeholder `name`, if one is known.
pub fn value_pattern(name: &str) -> Option<&'static str> {
    VALUE_PATTERNS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, pattern)| *pattern)
}

/// Whether the placeholder `name` may be given as a number.
pub fn is_numeric_value(name: &str) -> bool {
    NUMERIC_VALUES.contains(&name)
}

/// `pattern` without its leading `^` and trailing `$`.
pub fn pattern_body(pattern: &str) -> &str {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    body.strip_suffix('$').unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn every_pattern_is_anchored_and_compiles() {
        for (name, pattern) in VALUE_PATTERNS {
            assert!(pattern.starts_with('^') && pattern.ends_with('$'), "{name}");
            Regex::new(pattern).unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }

    #[test]
    fn numeric_values_all_have_patterns() {
        for name in NUMERIC_VALUES {
            assert!(value_pattern(name).is_some(), "{name} has no pattern");
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(value_pattern("size"), Some(SIZE_PATTERN));
        assert_eq!(value_pattern("N"), Some(INTEGER_PATTERN));
        assert_eq!(value_pattern("n"), None);
        assert_eq!(value_pattern("uri"), None);
    }

    #[test]
    fn field_and_permissions_are_not_numeric() {
        assert!(!is_numeric_value("field"));
        assert!(!is_numeric_value("permissions"));
        assert!(!is_numeric_value("letter"));
        assert!(is_numeric_value("timeout"));
    }

    #[test]
    fn size_pattern_accepts_units() {
        let re = Regex::new(SIZE_PATTERN).unwrap();
        for ok in ["0", "512", "4k", "8K", "1m", "2G"] {
            assert!(re.is_match(ok), "{ok}");
        }
        for bad in ["", "k", "4kb", "1.5m", "-1"] {
            assert!(!re.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn time_pattern_accepts_compound_durations() {
        let re = Regex::new(TIME_PATTERN).unwrap();
        for ok in ["30", "30s", "500ms", "1h 30m", "1y", "2M"] {
            assert!(re.is_match(ok), "{ok}");
        }
        for bad in ["s", "1x", "1h30", "1 h"] {
            assert!(!re.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn factor_requires_digits_around_the_dot() {
        let re = Regex::new(value_pattern("factor").unwrap()).unwrap();
        assert!(re.is_match("0.5"));
        assert!(re.is_match("2"));
        assert!(!re.is_match("0x5"));
    }

    #[test]
    fn body_strips_anchors() {
        assert_eq!(pattern_body("^[0-9]+$"), "[0-9]+");
        assert_eq!(pattern_body("abc"), "abc");
    }
}
