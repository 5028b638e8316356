//! Data models for bujo entities.
//!
//! This module defines the core data structures:
//! - `Status` - the primary lifecycle state of an item
//! - `Signifier` - an optional secondary marker (priority/inspiration)
//! - `Item` - a single journal entry/task/event/note
//! - `Record` - the flat export/import representation of an item

pub mod resolve;

use chrono::{Local, NaiveDateTime};
use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Primary lifecycle state of an item. Every item has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Incomplete,
    Complete,
    Migrated,
    Scheduled,
    Irrelevant,
    Note,
    Event,
}

impl Status {
    /// All states in declared order. Prefix resolution depends on this order.
    pub fn all() -> &'static [Status] {
        &[
            Status::Incomplete,
            Status::Complete,
            Status::Migrated,
            Status::Scheduled,
            Status::Irrelevant,
            Status::Note,
            Status::Event,
        ]
    }

    /// Single-character annotation symbol.
    pub fn symbol(&self) -> char {
        match self {
            Status::Incomplete => '.',
            Status::Complete => 'x',
            Status::Migrated => '<',
            Status::Scheduled => '>',
            Status::Irrelevant => 'i',
            Status::Note => '-',
            Status::Event => 'o',
        }
    }

    /// Full lowercase value string, as stored and exported.
    pub fn value(&self) -> &'static str {
        match self {
            Status::Incomplete => "incomplete",
            Status::Complete => "complete",
            Status::Migrated => "migrated",
            Status::Scheduled => "scheduled",
            Status::Irrelevant => "irrelevant",
            Status::Note => "note",
            Status::Event => "event",
        }
    }

    /// Terminal color used when rendering descriptions in this state.
    pub fn color(&self) -> Color {
        match self {
            Status::Incomplete => Color::Red,
            Status::Complete => Color::Green,
            Status::Migrated => Color::Blue,
            Status::Scheduled => Color::Cyan,
            Status::Irrelevant => Color::White,
            Status::Note => Color::Magenta,
            Status::Event => Color::Yellow,
        }
    }

    /// Look up a state by its annotation symbol.
    pub fn from_symbol(symbol: char) -> Option<Status> {
        Status::all().iter().copied().find(|s| s.symbol() == symbol)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Status::all()
            .iter()
            .copied()
            .find(|v| v.value() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown status: {s}")))
    }
}

/// Optional secondary marker on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signifier {
    Priority,
    Inspiration,
}

impl Signifier {
    /// All signifiers in declared order.
    pub fn all() -> &'static [Signifier] {
        &[Signifier::Priority, Signifier::Inspiration]
    }

    /// Single-character annotation symbol.
    pub fn symbol(&self) -> char {
        match self {
            Signifier::Priority => '*',
            Signifier::Inspiration => '!',
        }
    }

    /// Full lowercase value string, as stored and exported.
    pub fn value(&self) -> &'static str {
        match self {
            Signifier::Priority => "priority",
            Signifier::Inspiration => "inspiration",
        }
    }

    /// Look up a signifier by its annotation symbol.
    pub fn from_symbol(symbol: char) -> Option<Signifier> {
        Signifier::all()
            .iter()
            .copied()
            .find(|s| s.symbol() == symbol)
    }
}

impl fmt::Display for Signifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for Signifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Signifier::all()
            .iter()
            .copied()
            .find(|v| v.value() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown signifier: {s}")))
    }
}

/// Human-readable time format, e.g. "Friday, June 9, 2023 at 2:05 PM".
/// Used both for rendering and for export records.
pub const TIME_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p";

/// Format a timestamp with [`TIME_FORMAT`].
pub fn format_time(time: NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a [`TIME_FORMAT`] string back into a timestamp.
pub fn parse_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("unparseable time '{s}': {e}")))
}

/// Current wall-clock time. Journal timestamps are naive local time;
/// the display format carries no zone.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// A single journal entry/task/event/note.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Assigned by the store on insert; `None` for transient items.
    pub id: Option<i64>,

    /// Non-empty description text.
    pub description: String,

    /// Current state.
    pub status: Status,

    /// Optional marker. Meaningful only on the item itself, never
    /// inherited by children.
    pub signifier: Option<Signifier>,

    /// Optional scheduled time.
    pub scheduled_time: Option<NaiveDateTime>,

    /// Creation timestamp, set once.
    pub created_at: NaiveDateTime,

    /// Last update timestamp, refreshed on every mutation.
    pub updated_at: NaiveDateTime,

    /// Parent item id. Items form a tree; deleting a parent deletes
    /// its whole subtree.
    pub parent_id: Option<i64>,
}

impl Item {
    /// Create a new transient item with the given description and status.
    ///
    /// Fails if the description is empty.
    pub fn new(description: impl Into<String>, status: Status) -> Result<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }
        let now = now();
        Ok(Self {
            id: None,
            description,
            status,
            signifier: None,
            scheduled_time: None,
            created_at: now,
            updated_at: now,
            parent_id: None,
        })
    }

    /// Convert to a flat export record. Absent fields are omitted, not
    /// emitted as nulls.
    pub fn to_record(&self) -> Record {
        Record {
            id: self.id,
            description: self.description.clone(),
            status: self.status.value().to_string(),
            signifier: self.signifier.map(|s| s.value().to_string()),
            scheduled_time: self.scheduled_time.map(format_time),
            created_at: Some(format_time(self.created_at)),
            updated_at: Some(format_time(self.updated_at)),
            parent_id: self.parent_id,
        }
    }

    /// Rebuild an item from an export record.
    ///
    /// `id`, `description`, and `status` are required; `status` must be a
    /// full value string. Everything else stays absent when missing.
    pub fn from_record(record: &Record) -> Result<Self> {
        let id = record
            .id
            .ok_or_else(|| Error::InvalidInput("record is missing an id".to_string()))?;
        if record.description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }
        let status: Status = record.status.parse()?;
        let signifier = match &record.signifier {
            Some(s) => Some(s.parse::<Signifier>()?),
            None => None,
        };
        let scheduled_time = match &record.scheduled_time {
            Some(s) => Some(parse_time(s)?),
            None => None,
        };
        let created_at = match &record.created_at {
            Some(s) => parse_time(s)?,
            None => now(),
        };
        let updated_at = match &record.updated_at {
            Some(s) => parse_time(s)?,
            None => created_at,
        };
        Ok(Self {
            id: Some(id),
            description: record.description.clone(),
            status,
            signifier,
            scheduled_time,
            created_at,
            updated_at,
            parent_id: record.parent_id,
        })
    }
}

/// Flat export/import representation of an item. All optional fields are
/// omitted from the JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub description: String,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signifier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn minute(
        y: i32,
        mo: u32,
        d: u32,
        h: u32,
        mi: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_status_symbols_and_values() {
        assert_eq!(Status::Incomplete.symbol(), '.');
        assert_eq!(Status::Complete.symbol(), 'x');
        assert_eq!(Status::Migrated.symbol(), '<');
        assert_eq!(Status::Scheduled.symbol(), '>');
        assert_eq!(Status::Irrelevant.symbol(), 'i');
        assert_eq!(Status::Note.symbol(), '-');
        assert_eq!(Status::Event.symbol(), 'o');
        assert_eq!(Status::Incomplete.value(), "incomplete");
        assert_eq!(Status::Event.to_string(), "event");
    }

    #[test]
    fn test_status_from_symbol() {
        assert_eq!(Status::from_symbol('x'), Some(Status::Complete));
        assert_eq!(Status::from_symbol('?'), None);
    }

    #[test]
    fn test_status_from_str_strict() {
        assert_eq!("migrated".parse::<Status>().unwrap(), Status::Migrated);
        assert!("Migrated".parse::<Status>().is_err());
        assert!("mig".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&Status::Incomplete).unwrap();
        assert_eq!(json, r#""incomplete""#);
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::Incomplete);
    }

    #[test]
    fn test_signifier_symbols_and_values() {
        assert_eq!(Signifier::Priority.symbol(), '*');
        assert_eq!(Signifier::Inspiration.symbol(), '!');
        assert_eq!(Signifier::Priority.value(), "priority");
        assert_eq!(Signifier::from_symbol('!'), Some(Signifier::Inspiration));
        assert_eq!(Signifier::from_symbol('x'), None);
    }

    #[test]
    fn test_format_time() {
        let t = minute(2023, 6, 9, 14, 5);
        assert_eq!(format_time(t), "Friday, June 9, 2023 at 2:05 PM");
    }

    #[test]
    fn test_format_time_morning_single_digits() {
        let t = minute(2024, 1, 2, 9, 7);
        assert_eq!(format_time(t), "Tuesday, January 2, 2024 at 9:07 AM");
    }

    #[test]
    fn test_parse_time_round_trip() {
        let t = minute(2023, 6, 9, 14, 5);
        assert_eq!(parse_time(&format_time(t)).unwrap(), t);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("next tuesday").is_err());
    }

    #[test]
    fn test_item_new_rejects_empty_description() {
        assert!(Item::new("", Status::Incomplete).is_err());
        assert!(Item::new("   ", Status::Incomplete).is_err());
    }

    #[test]
    fn test_record_round_trip_all_fields() {
        let mut item = Item::new("Buy milk", Status::Incomplete).unwrap();
        item.id = Some(3);
        item.signifier = Some(Signifier::Priority);
        item.scheduled_time = Some(minute(2023, 6, 9, 14, 5));
        item.created_at = minute(2023, 6, 1, 8, 30);
        item.updated_at = minute(2023, 6, 2, 8, 30);
        item.parent_id = Some(1);

        let back = Item::from_record(&item.to_record()).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_record_round_trip_absent_fields_stay_absent() {
        let mut item = Item::new("Water plants", Status::Note).unwrap();
        item.id = Some(7);
        item.created_at = minute(2024, 3, 4, 10, 0);
        item.updated_at = minute(2024, 3, 4, 10, 0);

        let record = item.to_record();
        assert!(record.signifier.is_none());
        assert!(record.scheduled_time.is_none());
        assert!(record.parent_id.is_none());

        let back = Item::from_record(&record).unwrap();
        assert_eq!(back, item);
        assert!(back.signifier.is_none());
        assert!(back.scheduled_time.is_none());
        assert!(back.parent_id.is_none());
    }

    #[test]
    fn test_record_json_omits_absent_fields() {
        let mut item = Item::new("Water plants", Status::Note).unwrap();
        item.id = Some(7);
        let json = serde_json::to_string(&item.to_record()).unwrap();
        assert!(!json.contains("signifier"));
        assert!(!json.contains("scheduled_time"));
        assert!(!json.contains("parent_id"));
    }

    #[test]
    fn test_from_record_requires_id() {
        let item = Item::new("Transient", Status::Incomplete).unwrap();
        assert!(Item::from_record(&item.to_record()).is_err());
    }

    #[test]
    fn test_from_record_rejects_loose_status_spelling() {
        let mut record = Item::new("Buy milk", Status::Incomplete)
            .unwrap()
            .to_record();
        record.id = Some(1);
        record.status = "inc".to_string();
        assert!(Item::from_record(&record).is_err());
        record.status = "x".to_string();
        assert!(Item::from_record(&record).is_err());
    }
}
