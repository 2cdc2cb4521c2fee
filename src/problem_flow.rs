//! # Problem Report Flow
//!
//! Three-step form collecting a maintenance report:
//! description, then the part of the unit, then a photo or a short text.
//! Each step carries exactly the data gathered before it, so a step can only
//! be reached through its predecessors.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::action::SubLocation;
use crate::report::{Attachment, ReportRecord, Reporter};

/// Longest accepted problem description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Replies meaning "no photo"
const NEGATIVE_ACKS: [&str; 6] = ["no", "n", "-", "нет", "no photo", "без фото"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemStep {
    AwaitingDescription,
    AwaitingSubLocation {
        description: String,
    },
    AwaitingPhotoOrText {
        description: String,
        sub_location: SubLocation,
    },
}

/// Input relevant to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepInput<'a> {
    Text(&'a str),
    Photo(&'a str),
    SubLocation(SubLocation),
}

/// Why an input was not accepted at the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepromptReason {
    EmptyDescription,
    DescriptionTooLong,
    ExpectedSubLocation,
    ExpectedDescription,
    ExpectedPhotoOrText,
    EmptyText,
}

/// All fields of a finished form, before the record is stamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub description: String,
    pub sub_location: SubLocation,
    pub attachment: Attachment,
}

impl ReportDraft {
    pub fn into_record(
        self,
        location: &str,
        reporter: &Reporter,
        timestamp: DateTime<Local>,
    ) -> ReportRecord {
        ReportRecord {
            timestamp,
            reporter: reporter.clone(),
            location: location.to_string(),
            sub_location: self.sub_location,
            description: self.description,
            attachment: self.attachment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advance(ProblemStep),
    Complete(ReportDraft),
    Reprompt(RepromptReason),
}

/// Validates a problem description
pub fn validate_description(text: &str) -> Result<String, RepromptReason> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(RepromptReason::EmptyDescription);
    }

    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(RepromptReason::DescriptionTooLong);
    }

    Ok(trimmed.to_string())
}

/// Interprets the answer to the photo-or-text step
pub fn parse_attachment(text: &str) -> Result<Attachment, RepromptReason> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RepromptReason::EmptyText);
    }

    let lowered = trimmed.to_lowercase();
    if NEGATIVE_ACKS.contains(&lowered.as_str()) {
        Ok(Attachment::NoPhoto)
    } else {
        Ok(Attachment::Text(trimmed.to_string()))
    }
}

/// Feed one input into the form
pub fn advance(step: &ProblemStep, input: StepInput<'_>) -> StepOutcome {
    match (step, input) {
        (ProblemStep::AwaitingDescription, StepInput::Text(text)) => {
            match validate_description(text) {
                Ok(description) => {
                    StepOutcome::Advance(ProblemStep::AwaitingSubLocation { description })
                }
                Err(reason) => StepOutcome::Reprompt(reason),
            }
        }
        (ProblemStep::AwaitingDescription, _) => {
            StepOutcome::Reprompt(RepromptReason::ExpectedDescription)
        }

        (ProblemStep::AwaitingSubLocation { description }, StepInput::SubLocation(sub_location)) => {
            StepOutcome::Advance(ProblemStep::AwaitingPhotoOrText {
                description: description.clone(),
                sub_location,
            })
        }
        (ProblemStep::AwaitingSubLocation { .. }, _) => {
            StepOutcome::Reprompt(RepromptReason::ExpectedSubLocation)
        }

        (
            ProblemStep::AwaitingPhotoOrText {
                description,
                sub_location,
            },
            StepInput::Photo(file_id),
        ) => StepOutcome::Complete(ReportDraft {
            description: description.clone(),
            sub_location: *sub_location,
            attachment: Attachment::Photo {
                file_id: file_id.to_string(),
            },
        }),
        (
            ProblemStep::AwaitingPhotoOrText {
                description,
                sub_location,
            },
            StepInput::Text(text),
        ) => match parse_attachment(text) {
            Ok(attachment) => StepOutcome::Complete(ReportDraft {
                description: description.clone(),
                sub_location: *sub_location,
                attachment,
            }),
            Err(reason) => StepOutcome::Reprompt(reason),
        },
        (ProblemStep::AwaitingPhotoOrText { .. }, StepInput::SubLocation(_)) => {
            StepOutcome::Reprompt(RepromptReason::ExpectedPhotoOrText)
        }
    }
}
