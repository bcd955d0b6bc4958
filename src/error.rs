// src/error.rs
use thiserror::Error;

use crate::session::notifier::Severity;

/// Everything that can abort a session operation.
///
/// None of these are fatal to the session: the controller reports them as a
/// notification, reverts its state and stays usable.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("no resume file chosen")]
    NoFileChosen,

    #[error("no text selected on the page")]
    NoSelection,

    #[error("selection too short: {length} characters, need at least {minimum}")]
    SelectionTooShort { length: usize, minimum: usize },

    #[error("no resume saved")]
    NoResumeSaved,

    #[error("another operation is in progress")]
    Busy,

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("failed to read resume file: {0}")]
    FileRead(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("request to analysis service failed: {0}")]
    Transport(String),

    #[error("Server error: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Analysis error: {0}")]
    ServiceReported(String),

    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl MatchError {
    /// Input problems the user fixes by retrying are warnings, the rest are errors.
    pub fn severity(&self) -> Severity {
        match self {
            MatchError::NoFileChosen
            | MatchError::NoSelection
            | MatchError::SelectionTooShort { .. }
            | MatchError::NoResumeSaved
            | MatchError::Busy
            | MatchError::InvalidTransition { .. } => Severity::Warning,
            MatchError::FileRead(_)
            | MatchError::Storage(_)
            | MatchError::Transport(_)
            | MatchError::HttpStatus { .. }
            | MatchError::ServiceReported(_)
            | MatchError::MalformedResponse(_) => Severity::Error,
        }
    }

    /// Text shown in the notification area.
    pub fn user_message(&self) -> String {
        match self {
            MatchError::NoFileChosen => "Please select a file first".to_string(),
            MatchError::NoSelection => "No text selected. Please go to a job page, select the job description text (e.g., Ctrl+A or highlight it), then try again.".to_string(),
            MatchError::SelectionTooShort { minimum, .. } => format!(
                "Selected text is too short. Please select more of the job description (at least {} characters).",
                minimum
            ),
            MatchError::NoResumeSaved => {
                "No resume saved. Please upload and save your resume first.".to_string()
            }
            MatchError::Busy => "Another operation is in progress. Please wait.".to_string(),
            MatchError::ServiceReported(_) => self.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

impl From<anyhow::Error> for MatchError {
    fn from(err: anyhow::Error) -> Self {
        MatchError::Storage(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_errors_are_warnings() {
        assert_eq!(MatchError::NoSelection.severity(), Severity::Warning);
        assert_eq!(MatchError::NoResumeSaved.severity(), Severity::Warning);
        assert_eq!(
            MatchError::SelectionTooShort {
                length: 10,
                minimum: 50
            }
            .severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_service_errors_are_errors() {
        let err = MatchError::HttpStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(
            err.user_message(),
            "Error: Server error: 500 - Internal Server Error"
        );
        assert_eq!(
            MatchError::ServiceReported("quota".to_string()).user_message(),
            "Analysis error: quota"
        );
    }

    #[test]
    fn test_short_selection_message_names_minimum() {
        let msg = MatchError::SelectionTooShort {
            length: 12,
            minimum: 50,
        }
        .user_message();
        assert!(msg.contains("at least 50 characters"));
    }
}
