//! The `/limit` chat command grammar.
//!
//! ```text
//! /limit <num>          set a custom limit for the current map
//! /limit default <num>  set the server-wide default limit
//! /limit remove         drop the current map's custom limit
//! /limit removeall      drop every custom limit
//! ```
//!
//! Parameters are split on single spaces and dispatched on the first token.
//! Extra trailing tokens are ignored.  Anything that does not match one of the
//! forms above parses to [`LimitCommand::Invalid`] so the caller can reply with
//! usage help instead of failing.

pub mod notice;

use crate::domain::config::is_valid_limit;

/// A parsed `/limit` invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitCommand {
    /// `/limit <num>`
    Set { minutes: f64 },
    /// `/limit default <num>`
    SetDefault { minutes: f64 },
    /// `/limit remove`
    Remove,
    /// `/limit removeall`
    RemoveAll,
    /// Unrecognised input.
    Invalid,
}

impl LimitCommand {
    /// Parses the parameter string that follows `/limit`.
    pub fn parse(params: &str) -> Self {
        let mut args = params.split(' ');
        let first = args.next().unwrap_or("");

        match first {
            "remove" => LimitCommand::Remove,
            "removeall" => LimitCommand::RemoveAll,
            "default" => match args.next().and_then(parse_minutes) {
                Some(minutes) => LimitCommand::SetDefault { minutes },
                None => LimitCommand::Invalid,
            },
            other => match parse_minutes(other) {
                Some(minutes) => LimitCommand::Set { minutes },
                None => LimitCommand::Invalid,
            },
        }
    }
}

/// Parses a limit token in minutes.
///
/// Accepts decimal and scientific notation (`3`, `3.5`, `.5`, `1e1`).
/// Returns `None` for anything that is not a finite, non-negative number,
/// including `inf` and `NaN` spellings.
pub fn parse_minutes(token: &str) -> Option<f64> {
    let token = token.trim();
    // `f64::from_str` accepts "inf"/"nan"; only digits, sign, dot and exponent
    // are valid here.
    if token.is_empty()
        || !token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    token.parse::<f64>().ok().filter(|m| is_valid_limit(*m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_sets_limit() {
        assert_eq!(LimitCommand::parse("3.5"), LimitCommand::Set { minutes: 3.5 });
        assert_eq!(LimitCommand::parse("10"), LimitCommand::Set { minutes: 10.0 });
    }

    #[test]
    fn test_parse_default_with_number() {
        assert_eq!(
            LimitCommand::parse("default 10"),
            LimitCommand::SetDefault { minutes: 10.0 }
        );
    }

    #[test]
    fn test_parse_default_without_number_is_invalid() {
        assert_eq!(LimitCommand::parse("default"), LimitCommand::Invalid);
        assert_eq!(LimitCommand::parse("default abc"), LimitCommand::Invalid);
    }

    #[test]
    fn test_parse_remove_variants() {
        assert_eq!(LimitCommand::parse("remove"), LimitCommand::Remove);
        assert_eq!(LimitCommand::parse("removeall"), LimitCommand::RemoveAll);
    }

    #[test]
    fn test_parse_keywords_are_case_sensitive() {
        assert_eq!(LimitCommand::parse("Remove"), LimitCommand::Invalid);
    }

    #[test]
    fn test_parse_ignores_trailing_tokens() {
        assert_eq!(LimitCommand::parse("remove now"), LimitCommand::Remove);
        assert_eq!(LimitCommand::parse("4 please"), LimitCommand::Set { minutes: 4.0 });
    }

    #[test]
    fn test_parse_empty_is_invalid() {
        assert_eq!(LimitCommand::parse(""), LimitCommand::Invalid);
        // A leading space yields an empty first token.
        assert_eq!(LimitCommand::parse(" 5"), LimitCommand::Invalid);
    }

    #[test]
    fn test_parse_minutes_accepts_scientific_notation() {
        assert_eq!(parse_minutes("1e1"), Some(10.0));
        assert_eq!(parse_minutes(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_minutes_rejects_negative_and_non_finite() {
        assert_eq!(parse_minutes("-2"), None);
        assert_eq!(parse_minutes("inf"), None);
        assert_eq!(parse_minutes("NaN"), None);
        assert_eq!(parse_minutes("1e400"), None);
    }

    #[test]
    fn test_parse_minutes_rejects_garbage() {
        assert_eq!(parse_minutes("five"), None);
        assert_eq!(parse_minutes("3.5min"), None);
        assert_eq!(parse_minutes(""), None);
    }
}
