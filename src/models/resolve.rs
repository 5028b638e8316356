//! Lenient resolution of user-typed tokens into states and signifiers.
//!
//! Three entry points with different strictness:
//! - [`parse_choice`] accepts either family plus the `none`/`all`
//!   sentinels and falls back to prefix matching (list filters, `mark`).
//! - [`parse_status`] and [`parse_signifier`] are single-family and
//!   symbol/full-value only (`add`).

use crate::models::{Signifier, Status};
use crate::{Error, Result};

/// Sentinel meaning "no value" / "clear".
pub const NONE_TOKEN: &str = "none";

/// Sentinel meaning "no filter".
pub const ALL_TOKEN: &str = "all";

/// Minimum token length for prefix matching. Shorter tokens are too
/// ambiguous ("i" is both a symbol and a prefix of three states).
const PREFIX_MIN: usize = 3;

/// A token resolved to one of the two taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Status(Status),
    Signifier(Signifier),
}

fn normalize(token: &str) -> String {
    token.trim().to_lowercase().replace('\n', " ")
}

fn single_symbol(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Every token `parse_choice` accepts, for error messages.
fn choice_options() -> String {
    let mut options: Vec<String> = Vec::new();
    options.extend(Status::all().iter().map(|s| s.symbol().to_string()));
    options.extend(Signifier::all().iter().map(|s| s.symbol().to_string()));
    options.extend(Status::all().iter().map(|s| s.value().to_string()));
    options.extend(Signifier::all().iter().map(|s| s.value().to_string()));
    options.push(NONE_TOKEN.to_string());
    options.push(ALL_TOKEN.to_string());
    options.join(", ")
}

/// One "symbol: value" line per member, for single-family error messages.
fn family_options<T: Copy>(
    members: &[T],
    symbol: impl Fn(T) -> char,
    value: impl Fn(T) -> &'static str,
) -> String {
    members
        .iter()
        .map(|&m| format!("\n  {}: {}", symbol(m), value(m)))
        .collect()
}

/// Resolve a free-form token to a status, a signifier, or `None` for the
/// `none`/`all` sentinels.
///
/// Match order: symbol, exact full value (states before signifiers), then
/// prefix of a full value for tokens of at least three characters.
pub fn parse_choice(token: &str) -> Result<Option<Choice>> {
    let token = normalize(token);
    if token == NONE_TOKEN || token == ALL_TOKEN {
        return Ok(None);
    }

    if let Some(symbol) = single_symbol(&token) {
        if let Some(status) = Status::from_symbol(symbol) {
            return Ok(Some(Choice::Status(status)));
        }
        if let Some(signifier) = Signifier::from_symbol(symbol) {
            return Ok(Some(Choice::Signifier(signifier)));
        }
    }

    for status in Status::all() {
        if token == status.value() {
            return Ok(Some(Choice::Status(*status)));
        }
    }
    for signifier in Signifier::all() {
        if token == signifier.value() {
            return Ok(Some(Choice::Signifier(*signifier)));
        }
    }

    if token.len() >= PREFIX_MIN {
        for status in Status::all() {
            if status.value().starts_with(&token) {
                return Ok(Some(Choice::Status(*status)));
            }
        }
        for signifier in Signifier::all() {
            if signifier.value().starts_with(&token) {
                return Ok(Some(Choice::Signifier(*signifier)));
            }
        }
    }

    Err(Error::InvalidChoice(format!(
        "invalid choice '{}': options are {}",
        token,
        choice_options()
    )))
}

/// Resolve a token to a status. Symbols and full values only.
pub fn parse_status(token: &str) -> Result<Status> {
    let token = normalize(token);
    if let Some(symbol) = single_symbol(&token) {
        if let Some(status) = Status::from_symbol(symbol) {
            return Ok(status);
        }
    }
    for status in Status::all() {
        if token == status.value() {
            return Ok(*status);
        }
    }
    Err(Error::InvalidChoice(format!(
        "invalid state '{}': options are{}",
        token,
        family_options(Status::all(), |s| s.symbol(), |s| s.value())
    )))
}

/// Resolve a token to a signifier, or `None` for the `none` sentinel.
/// Symbols and full values only.
pub fn parse_signifier(token: &str) -> Result<Option<Signifier>> {
    let token = normalize(token);
    if token == NONE_TOKEN {
        return Ok(None);
    }
    if let Some(symbol) = single_symbol(&token) {
        if let Some(signifier) = Signifier::from_symbol(symbol) {
            return Ok(Some(signifier));
        }
    }
    for signifier in Signifier::all() {
        if token == signifier.value() {
            return Ok(Some(*signifier));
        }
    }
    Err(Error::InvalidChoice(format!(
        "invalid signifier '{}': options are{}",
        token,
        family_options(Signifier::all(), |s| s.symbol(), |s| s.value())
    )))
}
