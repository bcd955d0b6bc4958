// src/session/state.rs
//! Display states of the session and the transitions between them.

use serde::Serialize;
use std::path::PathBuf;

use crate::error::MatchError;
use crate::session::view::ResultTab;
use crate::types::ResultReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UiState {
    NoResumeUploaded,
    /// A file is chosen but not saved yet.
    ResumeStaged,
    /// Ready to match.
    ResumeSaved,
    Analyzing,
    ResultsShown,
}

/// User actions and async completions that move the session between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    FileChosen,
    FileRemoved,
    ResumeStored,
    ResumeDiscarded,
    MatchStarted,
    MatchSucceeded,
    MatchFailed,
    NewAnalysis,
}

impl Event {
    fn action(self) -> &'static str {
        match self {
            Event::FileChosen => "choose a file",
            Event::FileRemoved => "remove the chosen file",
            Event::ResumeStored => "save the resume",
            Event::ResumeDiscarded => "discard the resume",
            Event::MatchStarted => "start a match",
            Event::MatchSucceeded => "show results",
            Event::MatchFailed => "abort the match",
            Event::NewAnalysis => "start a new analysis",
        }
    }
}

impl UiState {
    pub fn name(self) -> &'static str {
        match self {
            UiState::NoResumeUploaded => "no resume is uploaded",
            UiState::ResumeStaged => "a resume file is staged",
            UiState::ResumeSaved => "a resume is saved",
            UiState::Analyzing => "analyzing",
            UiState::ResultsShown => "showing results",
        }
    }

    /// The complete transition table. Anything not listed is rejected.
    pub fn on(self, event: Event) -> Result<UiState, MatchError> {
        use Event::*;
        use UiState::*;

        let next = match (self, event) {
            (NoResumeUploaded | ResumeStaged, FileChosen) => ResumeStaged,
            (ResumeStaged, FileRemoved) => NoResumeUploaded,
            (ResumeStaged, ResumeStored) => ResumeSaved,
            (NoResumeUploaded | ResumeStaged | ResumeSaved | ResultsShown, ResumeDiscarded) => {
                NoResumeUploaded
            }
            (ResumeSaved, MatchStarted) => Analyzing,
            (Analyzing, MatchSucceeded) => ResultsShown,
            (Analyzing, MatchFailed) => ResumeSaved,
            (ResultsShown, NewAnalysis) => ResumeSaved,
            (state, event) => {
                return Err(MatchError::InvalidTransition {
                    action: event.action(),
                    state: state.name(),
                })
            }
        };

        Ok(next)
    }
}

/// Everything the view is rendered from.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: UiState,
    pub staged_file: Option<PathBuf>,
    pub report: Option<ResultReport>,
    pub active_tab: ResultTab,
    pub loading: bool,
}

impl Session {
    pub fn new(resume_saved: bool) -> Self {
        Self {
            state: if resume_saved {
                UiState::ResumeSaved
            } else {
                UiState::NoResumeUploaded
            },
            staged_file: None,
            report: None,
            active_tab: ResultTab::default(),
            loading: false,
        }
    }
}
