//! Chat messages sent back to players.
//!
//! Hosts decide how to decorate a notice (colour prefixes, localisation); the
//! `Display` impl gives the plain English text.

use std::fmt;

use crate::domain::limit::format_minutes;

/// A message produced by the `/limit` command.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A map's custom limit was set or updated.  Broadcast.
    LimitSet { minutes: f64, map_name: String },
    /// A map's custom limit was removed.  Broadcast.
    LimitRemoved { map_name: String },
    /// Every custom limit was removed.  Broadcast.
    AllLimitsRemoved,
    /// The server default changed.  Broadcast.
    DefaultSet { minutes: f64 },
    /// The command was not understood.  Issuer only.
    Usage,
    /// The issuer may not use the command.  Issuer only.
    PermissionDenied,
}

impl Notice {
    /// Returns `true` for notices that only the issuing player should see.
    pub fn is_private(&self) -> bool {
        matches!(self, Notice::Usage | Notice::PermissionDenied)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LimitSet { minutes, map_name } => write!(
                f,
                "Custom time limit of {}min set for {map_name}",
                format_minutes(*minutes)
            ),
            Notice::LimitRemoved { map_name } => {
                write!(f, "{map_name} time limit reverted to default")
            }
            Notice::AllLimitsRemoved => f.write_str("Time limit for all maps reverted to default"),
            Notice::DefaultSet { minutes } => write!(
                f,
                "Server default time limit of {}min set",
                format_minutes(*minutes)
            ),
            Notice::Usage => f.write_str(
                "Usage: /limit <num>, /limit remove, /limit removeall, /limit default <num>",
            ),
            Notice::PermissionDenied => f.write_str("You must be an admin to set a time limit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_set_text() {
        let n = Notice::LimitSet {
            minutes: 3.5,
            map_name: "Canyon A01".to_string(),
        };
        assert_eq!(n.to_string(), "Custom time limit of 3.5min set for Canyon A01");
    }

    #[test]
    fn test_default_set_text_drops_trailing_zero() {
        let n = Notice::DefaultSet { minutes: 10.0 };
        assert_eq!(n.to_string(), "Server default time limit of 10min set");
    }

    #[test]
    fn test_only_errors_are_private() {
        assert!(Notice::Usage.is_private());
        assert!(Notice::PermissionDenied.is_private());
        assert!(!Notice::AllLimitsRemoved.is_private());
        assert!(!Notice::DefaultSet { minutes: 1.0 }.is_private());
    }
}
