//! Line-oriented console that stands in for a server controller.
//!
//! Each stdin line is one event:
//!
//! ```text
//! alice /limit 3.5      chat command from `alice`
//! alice limit remove    same, without the slash
//! endmap                the current map ends
//! status                print the server state
//! shutdown              the server stops (also on end of input)
//! # comment             ignored, as are blank lines
//! ```

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown console input: {0}")]
    Unrecognized(String),
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// `params` is everything after the command word, trimmed.
    Chat { login: String, params: String },
    EndMap,
    Shutdown,
    Status,
    Ignore,
}

/// Parses one console line.
///
/// # Errors
///
/// Returns [`ConsoleError::Unrecognized`] for lines that are neither a
/// control word nor a `/limit` chat command.
pub fn parse_line(line: &str) -> Result<ConsoleEvent, ConsoleError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(ConsoleEvent::Ignore);
    }

    match line {
        "endmap" => return Ok(ConsoleEvent::EndMap),
        "shutdown" => return Ok(ConsoleEvent::Shutdown),
        "status" => return Ok(ConsoleEvent::Status),
        _ => {}
    }

    let unrecognized = || ConsoleError::Unrecognized(line.to_string());
    let (login, rest) = line.split_once(char::is_whitespace).ok_or_else(unrecognized)?;
    let rest = rest.trim_start();
    let (command, params) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let command = command.strip_prefix('/').unwrap_or(command);

    if command != crate::MaptimePlugin::COMMAND {
        return Err(unrecognized());
    }
    Ok(ConsoleEvent::Chat {
        login: login.to_string(),
        params: params.trim().to_string(),
    })
}
