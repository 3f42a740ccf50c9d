//! The fixed weekly slot catalog.
//!
//! Five weekdays, twelve one-hour slots per day from 09:00 to 21:00. Slots are
//! addressed by their position in [`SLOT_LABELS`]; labels are only used at the
//! edges (input markers, rendered tables).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type SlotIndex = usize;

pub const SLOTS_PER_DAY: usize = 12;

pub const SLOT_LABELS: [&str; SLOTS_PER_DAY] = [
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
    "17:00-18:00",
    "18:00-19:00",
    "19:00-20:00",
    "20:00-21:00",
];

/// A teaching day. Ordering follows the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown weekday {:?}", s))
    }
}

/// A boundary marker that could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("marker {0:?} is not a HH:MM time")]
    NotATime(String),
    #[error("marker {0:?} is out of range")]
    OutOfRange(String),
}

/// Parses a `HH:MM` boundary marker to minutes since midnight.
pub fn parse_marker(marker: &str) -> Result<u32, MarkerError> {
    let trimmed = marker.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| MarkerError::NotATime(trimmed.to_string()))?;
    let hours: u32 = hours
        .trim()
        .parse()
        .map_err(|_| MarkerError::NotATime(trimmed.to_string()))?;
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| MarkerError::NotATime(trimmed.to_string()))?;
    if hours >= 24 || minutes >= 60 {
        return Err(MarkerError::OutOfRange(trimmed.to_string()));
    }
    Ok(hours * 60 + minutes)
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Expands a comma separated list of boundary markers into one-hour labels.
///
/// Each consecutive marker pair `(a, b)` contributes the hours `a..b`, so
/// `"10:00, 12:00"` becomes `["10:00-11:00", "11:00-12:00"]`. A pair whose end
/// is not after its start contributes nothing. Any unreadable marker fails the
/// whole list.
pub fn expand_markers(raw: &str) -> Result<Vec<String>, MarkerError> {
    let markers = raw
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(parse_marker)
        .collect::<Result<Vec<u32>, MarkerError>>()?;

    let mut labels = Vec::new();
    for pair in markers.windows(2) {
        let (mut start, end) = (pair[0], pair[1]);
        while start < end {
            let next = start + 60;
            labels.push(format!(
                "{}-{}",
                format_minutes(start),
                format_minutes(next % (24 * 60))
            ));
            start = next;
        }
    }
    Ok(labels)
}

/// Same as [`expand_markers`], keeping only catalog slots, ascending and unique.
pub fn expand_to_slots(raw: &str) -> Result<Vec<SlotIndex>, MarkerError> {
    let mut slots: Vec<SlotIndex> = expand_markers(raw)?
        .iter()
        .filter_map(|label| slot_index(label))
        .collect();
    slots.sort_unstable();
    slots.dedup();
    Ok(slots)
}

pub fn slot_index(label: &str) -> Option<SlotIndex> {
    let label = label.trim();
    SLOT_LABELS.iter().position(|l| *l == label)
}

pub fn slot_label(slot: SlotIndex) -> &'static str {
    SLOT_LABELS[slot]
}
