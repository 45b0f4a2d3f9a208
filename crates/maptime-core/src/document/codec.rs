//! XML codec for the override store.
//!
//! Document format:
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <maptime>
//!     <!-- Default round timer, in minutes -->
//!     <default>5</default>
//!     <!-- Permissions to set time limits -->
//!     <allow_admins>true</allow_admins>
//!     <allow_operators>false</allow_operators>
//!     <maplist>
//!         <map>
//!             <filename>Campaign%2FA01.Map.Gbx</filename>
//!             <limit>3.5</limit>
//!         </map>
//!     </maplist>
//! </maptime>
//! ```
//!
//! Map file names are percent-encoded (RFC 3986 unreserved characters are kept
//! as-is) so that any identifier survives hand editing and XML tooling.
//!
//! Operators edit this file by hand.  Only a document that is not XML at all,
//! or that lacks one of the three scalar settings, is rejected; everything
//! else is repaired and each repair is listed in the returned [`DecodeReport`].

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::config::{is_valid_limit, Config, DEFAULT_LIMIT_MINUTES};
use crate::domain::limit::format_minutes;

/// Characters escaped in map file names: everything except `A-Z a-z 0-9 - _ . ~`.
const FILENAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Errors that make a document unusable.
#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    /// The text is not a well-formed XML document.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A required setting is absent.
    #[error("missing required element <{0}>")]
    MissingField(&'static str),

    /// The XML writer failed.
    #[error("failed to write document: {0}")]
    Write(String),
}

/// Repairs applied while decoding a document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DecodeReport {
    /// One human-readable line per repair.
    pub repairs: Vec<String>,
}

impl DecodeReport {
    /// Returns `true` if the document decoded without any repair.
    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }

    fn note(&mut self, repair: impl Into<String>) {
        self.repairs.push(repair.into());
    }
}

// ── Raw document shape ────────────────────────────────────────────────────────
//
// Values are read as strings so that bad numbers or flags can be coerced
// instead of failing the whole document.  The map list is read in a second
// pass so that a broken list does not hide valid settings.

#[derive(Debug, Deserialize)]
struct RawSettings {
    default: Option<String>,
    allow_admins: Option<String>,
    allow_operators: Option<String>,
    /// Older name of `allow_operators`.
    allow_ops: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMapSection {
    maplist: Option<RawMapList>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMapList {
    #[serde(default, rename = "map")]
    maps: Vec<RawMap>,
}

#[derive(Debug, Deserialize)]
struct RawMap {
    filename: Option<String>,
    limit: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes a store document.
///
/// # Errors
///
/// Returns [`DocumentError::Malformed`] if `xml` is not well-formed, and
/// [`DocumentError::MissingField`] if `default`, `allow_admins` or
/// `allow_operators` is absent.
///
/// # Examples
///
/// ```rust
/// use maptime_core::{decode_document, encode_document, Config};
///
/// let mut cfg = Config::default();
/// cfg.upsert_override("Campaign/A01.Map.Gbx", 3.5);
/// let xml = encode_document(&cfg).unwrap();
/// let (decoded, report) = decode_document(&xml).unwrap();
/// assert_eq!(decoded, cfg);
/// assert!(report.is_clean());
/// ```
pub fn decode_document(xml: &str) -> Result<(Config, DecodeReport), DocumentError> {
    let settings: RawSettings =
        quick_xml::de::from_str(xml).map_err(|e| DocumentError::Malformed(e.to_string()))?;

    let default = settings.default.ok_or(DocumentError::MissingField("default"))?;
    let allow_admins = settings
        .allow_admins
        .ok_or(DocumentError::MissingField("allow_admins"))?;
    let mut report = DecodeReport::default();

    let allow_operators = match (settings.allow_operators, settings.allow_ops) {
        (Some(current), Some(_)) => {
            report.note("both allow_operators and allow_ops present, ignoring allow_ops");
            current
        }
        (Some(current), None) => current,
        (None, Some(legacy)) => legacy,
        (None, None) => return Err(DocumentError::MissingField("allow_operators")),
    };

    let default_limit_minutes = match parse_limit(&default) {
        Some(minutes) => minutes,
        None => {
            report.note(format!(
                "default limit {default:?} is not a valid limit, using {DEFAULT_LIMIT_MINUTES}"
            ));
            DEFAULT_LIMIT_MINUTES
        }
    };

    let mut config = Config::new(
        default_limit_minutes,
        parse_flag("allow_admins", &allow_admins, &mut report),
        parse_flag("allow_operators", &allow_operators, &mut report),
    );

    let maps = match quick_xml::de::from_str::<RawMapSection>(xml) {
        Ok(section) => section.maplist.unwrap_or_default().maps,
        Err(e) => {
            report.note(format!("map list is malformed ({e}), treating it as empty"));
            Vec::new()
        }
    };

    for (index, raw) in maps.into_iter().enumerate() {
        let Some(encoded) = raw.filename.filter(|f| !f.trim().is_empty()) else {
            report.note(format!("map entry #{index} has no filename, skipped"));
            continue;
        };
        let map_identifier = percent_decode_str(encoded.trim())
            .decode_utf8_lossy()
            .into_owned();

        let Some(limit_minutes) = raw.limit.as_deref().and_then(parse_limit) else {
            report.note(format!(
                "map entry {map_identifier:?} has no valid limit, skipped"
            ));
            continue;
        };

        if config.find_override(&map_identifier).is_some() {
            report.note(format!(
                "duplicate map entry {map_identifier:?}, keeping the first one"
            ));
            continue;
        }
        config.upsert_override(&map_identifier, limit_minutes);
    }

    tracing::debug!(
        overrides = config.overrides().len(),
        repairs = report.repairs.len(),
        "decoded maptime document"
    );

    Ok((config, report))
}

/// Encodes `config` as a store document.
///
/// The output is deterministic: the same `Config` always produces the same
/// bytes.
///
/// # Errors
///
/// Returns [`DocumentError::Write`] if the XML writer fails.
pub fn encode_document(config: &Config) -> Result<String, DocumentError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("maptime")))
        .map_err(write_error)?;

    writer
        .write_event(Event::Comment(BytesText::new(
            " Default round timer, in minutes ",
        )))
        .map_err(write_error)?;
    writer
        .create_element("default")
        .write_text_content(BytesText::new(&format_minutes(
            config.default_limit_minutes,
        )))
        .map_err(write_error)?;

    writer
        .write_event(Event::Comment(BytesText::new(
            " Permissions to set time limits ",
        )))
        .map_err(write_error)?;
    writer
        .create_element("allow_admins")
        .write_text_content(BytesText::new(flag_text(config.allow_admins)))
        .map_err(write_error)?;
    writer
        .create_element("allow_operators")
        .write_text_content(BytesText::new(flag_text(config.allow_operators)))
        .map_err(write_error)?;

    writer
        .write_event(Event::Start(BytesStart::new("maplist")))
        .map_err(write_error)?;
    for entry in config.overrides() {
        let filename = encode_filename(&entry.map_identifier);
        writer
            .write_event(Event::Start(BytesStart::new("map")))
            .map_err(write_error)?;
        writer
            .create_element("filename")
            .write_text_content(BytesText::new(&filename))
            .map_err(write_error)?;
        writer
            .create_element("limit")
            .write_text_content(BytesText::new(&format_minutes(entry.limit_minutes)))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("map")))
            .map_err(write_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("maplist")))
        .map_err(write_error)?;

    writer
        .write_event(Event::End(BytesEnd::new("maptime")))
        .map_err(write_error)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(write_error)
}

/// Percent-encodes a map identifier the way it appears in the document.
pub fn encode_filename(map_identifier: &str) -> String {
    utf8_percent_encode(map_identifier, FILENAME_ESCAPE).to_string()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Write(e.to_string())
}

fn flag_text(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

fn parse_limit(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|m| is_valid_limit(*m))
}

fn parse_flag(name: &str, text: &str, report: &mut DecodeReport) -> bool {
    let value = text.trim();
    if value.eq_ignore_ascii_case("true") {
        true
    } else {
        if !value.eq_ignore_ascii_case("false") {
            report.note(format!("{name} value {value:?} is not true/false, using false"));
        }
        false
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
