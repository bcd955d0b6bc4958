// src/session/view.rs
//! Declarative description of what the popup shows.

use serde::Serialize;

use crate::session::notifier::Notification;
use crate::session::state::{Session, UiState};
use crate::types::ResultReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
pub enum ResultTab {
    #[default]
    Strengths,
    Keywords,
    Gaps,
    Suggestions,
    Verdict,
}

impl ResultTab {
    pub const ALL: [ResultTab; 5] = [
        ResultTab::Strengths,
        ResultTab::Keywords,
        ResultTab::Gaps,
        ResultTab::Suggestions,
        ResultTab::Verdict,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ResultTab::Strengths => "Strengths",
            ResultTab::Keywords => "Keywords",
            ResultTab::Gaps => "Gaps & Weaknesses",
            ResultTab::Suggestions => "Suggestions",
            ResultTab::Verdict => "Verdict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: ResultTab,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Panel {
    Upload { staged_file: Option<String> },
    Match,
    Results {
        report: ResultReport,
        tabs: Vec<TabView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub panel: Panel,
    pub loading: bool,
    pub notification: Option<Notification>,
}

impl View {
    pub fn active_tab(&self) -> Option<ResultTab> {
        match &self.panel {
            Panel::Results { tabs, .. } => tabs.iter().find(|t| t.active).map(|t| t.tab),
            _ => None,
        }
    }
}

/// Exactly one panel is visible for any session.
pub fn render(session: &Session, notification: Option<Notification>) -> View {
    let panel = match (session.state, &session.report) {
        (UiState::NoResumeUploaded, _) => Panel::Upload { staged_file: None },
        (UiState::ResumeStaged, _) => Panel::Upload {
            staged_file: session
                .staged_file
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned()),
        },
        (UiState::ResultsShown, Some(report)) => Panel::Results {
            report: report.clone(),
            tabs: ResultTab::ALL
                .iter()
                .map(|&tab| TabView {
                    tab,
                    active: tab == session.active_tab,
                })
                .collect(),
        },
        (UiState::ResumeSaved | UiState::Analyzing | UiState::ResultsShown, _) => Panel::Match,
    };

    View {
        panel,
        loading: session.loading,
        notification,
    }
}
