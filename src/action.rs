//! Typed menu actions.
//!
//! Callback data arriving from inline keyboards is decoded into an [`Action`]
//! exactly once at the transport boundary; everything downstream matches on
//! variants instead of comparing string prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("Empty callback data")]
    Empty,
    #[error("Unknown action tag: {0}")]
    UnknownTag(String),
    #[error("Malformed action payload: {0}")]
    Malformed(String),
}

/// What the staff member wants to do with a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationActionKind {
    Clean,
    Report,
}

/// Type of cleaning performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CleaningKind {
    Current,
    Checkout,
    General,
}

impl CleaningKind {
    pub const ALL: [CleaningKind; 3] = [Self::Current, Self::Checkout, Self::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Checkout => "checkout",
            Self::General => "general",
        }
    }
}

impl FromStr for CleaningKind {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "checkout" => Ok(Self::Checkout),
            "general" => Ok(Self::General),
            other => Err(ActionParseError::Malformed(other.to_string())),
        }
    }
}

/// Part of the unit where a problem was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubLocation {
    Entryway,
    Room,
    Wc,
}

impl SubLocation {
    pub const ALL: [SubLocation; 3] = [Self::Entryway, Self::Room, Self::Wc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entryway => "entry",
            Self::Room => "room",
            Self::Wc => "wc",
        }
    }
}

impl FromStr for SubLocation {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(Self::Entryway),
            "room" => Ok(Self::Room),
            "wc" => Ok(Self::Wc),
            other => Err(ActionParseError::Malformed(other.to_string())),
        }
    }
}

/// A menu selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    SelectRoom(String),
    OpenHostel,
    SelectHostelZone(u8),
    SelectBed(String),
    SelectCommonZone(String),
    LocationAction(LocationActionKind, String),
    CleaningType(CleaningKind, String),
    SubLocation(SubLocation),
    GoBack,
    /// "To rooms" under a completion message
    ToRooms,
    NoOp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectRoom(id) => write!(f, "room:{id}"),
            Action::OpenHostel => write!(f, "hostel"),
            Action::SelectHostelZone(n) => write!(f, "zone:{n}"),
            Action::SelectBed(id) => write!(f, "bed:{id}"),
            Action::SelectCommonZone(id) => write!(f, "common:{id}"),
            Action::LocationAction(LocationActionKind::Clean, id) => write!(f, "clean:{id}"),
            Action::LocationAction(LocationActionKind::Report, id) => write!(f, "report:{id}"),
            Action::CleaningType(kind, id) => write!(f, "type:{}:{id}", kind.as_str()),
            Action::SubLocation(sub) => write!(f, "sub:{}", sub.as_str()),
            Action::GoBack => write!(f, "back"),
            Action::ToRooms => write!(f, "rooms"),
            Action::NoOp => write!(f, "noop"),
        }
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        if data.is_empty() {
            return Err(ActionParseError::Empty);
        }

        let (tag, rest) = match data.split_once(':') {
            Some((tag, rest)) => (tag, Some(rest)),
            None => (data, None),
        };

        let target = |rest: Option<&str>| -> Result<String, ActionParseError> {
            match rest {
                Some(id) if !id.is_empty() && !id.contains(':') => Ok(id.to_string()),
                _ => Err(ActionParseError::Malformed(data.to_string())),
            }
        };

        match tag {
            "room" => Ok(Action::SelectRoom(target(rest)?)),
            "hostel" if rest.is_none() => Ok(Action::OpenHostel),
            "zone" => rest
                .and_then(|n| n.parse().ok())
                .map(Action::SelectHostelZone)
                .ok_or_else(|| ActionParseError::Malformed(data.to_string())),
            "bed" => Ok(Action::SelectBed(target(rest)?)),
            "common" => Ok(Action::SelectCommonZone(target(rest)?)),
            "clean" => Ok(Action::LocationAction(LocationActionKind::Clean, target(rest)?)),
            "report" => Ok(Action::LocationAction(LocationActionKind::Report, target(rest)?)),
            "type" => {
                let (kind, id) = rest
                    .and_then(|r| r.split_once(':'))
                    .ok_or_else(|| ActionParseError::Malformed(data.to_string()))?;
                Ok(Action::CleaningType(kind.parse()?, target(Some(id))?))
            }
            "sub" => rest
                .ok_or_else(|| ActionParseError::Malformed(data.to_string()))?
                .parse()
                .map(Action::SubLocation),
            "back" if rest.is_none() => Ok(Action::GoBack),
            "rooms" if rest.is_none() => Ok(Action::ToRooms),
            "noop" if rest.is_none() => Ok(Action::NoOp),
            "hostel" | "back" | "rooms" | "noop" => Err(ActionParseError::Malformed(data.to_string())),
            other => Err(ActionParseError::UnknownTag(other.to_string())),
        }
    }
}
