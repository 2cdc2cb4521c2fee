//! Records produced by the bot: completed problem reports and cleaning logs.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::action::{CleaningKind, SubLocation};

/// Timestamp format used in messages and spreadsheet rows
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Who pressed the button
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub full_name: String,
    pub username: Option<String>,
}

impl Reporter {
    /// `@username`, or an empty string for users without one
    pub fn handle(&self) -> String {
        self.username
            .as_deref()
            .map(|u| format!("@{u}"))
            .unwrap_or_default()
    }

    pub fn display(&self) -> String {
        match &self.username {
            Some(username) => format!("{} (@{})", self.full_name, username),
            None => self.full_name.clone(),
        }
    }
}

/// Photo-or-text payload of the last report step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    Photo { file_id: String },
    Text(String),
    NoPhoto,
}

impl Attachment {
    /// Spreadsheet cell value
    pub fn cell(&self) -> String {
        match self {
            Attachment::Photo { file_id } => format!("photo:{file_id}"),
            Attachment::Text(text) => text.clone(),
            Attachment::NoPhoto => "no".to_string(),
        }
    }
}

/// A completed problem report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub timestamp: DateTime<Local>,
    pub reporter: Reporter,
    pub location: String,
    pub sub_location: SubLocation,
    pub description: String,
    pub attachment: Attachment,
}

impl ReportRecord {
    /// Row layout: timestamp, name, handle, location, sub-location, description, photo-or-text
    pub fn row(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.timestamp),
            self.reporter.full_name.clone(),
            self.reporter.handle(),
            self.location.clone(),
            self.sub_location.as_str().to_string(),
            self.description.clone(),
            self.attachment.cell(),
        ]
    }
}

/// A finished cleaning, logged when the cleaning type is picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningRecord {
    pub timestamp: DateTime<Local>,
    pub reporter: Reporter,
    pub location: String,
    pub kind: CleaningKind,
}
