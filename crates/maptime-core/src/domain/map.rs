//! Map identity and display names.
//!
//! A map has two names.  The *file name* (e.g. `Campaign/A01.Map.Gbx`) is the
//! stable key overrides are stored under.  The *display name* is what players
//! see and may contain style codes such as `$o$f00Red$z Map`.

/// What the server reports about a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInfo {
    /// Path of the map file relative to the server's map directory.
    pub file_name: String,
    /// Display name, possibly with style codes.
    pub name: String,
}

impl MapInfo {
    pub fn new(file_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            name: name.into(),
        }
    }

    /// Display name with style codes removed.
    pub fn plain_name(&self) -> String {
        strip_styles(&self.name)
    }
}

/// Removes game text style codes from `text`.
///
/// Handles colour codes (`$f00`), formatting toggles (`$o`, `$i`, `$z`, ...),
/// link markers with optional targets (`$l[http://..]text$l`), and the `$$`
/// escape for a literal dollar sign.
pub fn strip_styles(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let Some(code) = chars.next() else {
            break;
        };
        match code {
            '$' => out.push('$'),
            c if c.is_ascii_hexdigit() => {
                // Colour codes are up to three hex digits.
                for _ in 0..2 {
                    if chars.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        chars.next();
                    }
                }
            }
            'l' | 'L' | 'h' | 'H' | 'p' | 'P' => {
                if chars.peek() == Some(&'[') {
                    for c in chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                    }
                }
            }
            _ => {}
        }
    }
    out
}
