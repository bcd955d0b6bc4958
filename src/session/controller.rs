// src/session/controller.rs
//! Drives the popup session: upload, match and results.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::capture::SelectionCapture;
use crate::core::{AnalysisService, FsOps, ResumeStore};
use crate::error::MatchError;
use crate::session::notifier::{Notification, Notifier, Severity};
use crate::session::state::{Event, Session, UiState};
use crate::session::view::{self, ResultTab, View};
use crate::types::request::MIN_JOB_DESCRIPTION_CHARS;
use crate::types::{AnalysisRequest, JobDescription, ResultReport};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub min_selection_chars: usize,
    pub notification_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_selection_chars: MIN_JOB_DESCRIPTION_CHARS,
            notification_ttl: Duration::from_millis(3000),
        }
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held for the duration of one storage or match operation. Dropping it
/// clears the loading indicator and the busy flag on every exit path.
struct InFlight<'a> {
    busy: &'a AtomicBool,
    session: &'a Mutex<Session>,
}

impl<'a> InFlight<'a> {
    fn acquire(busy: &'a AtomicBool, session: &'a Mutex<Session>) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { busy, session })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.session).loading = false;
        self.busy.store(false, Ordering::Release);
    }
}

pub struct SessionController<S, C, A> {
    store: S,
    capture: C,
    service: A,
    settings: SessionSettings,
    session: Mutex<Session>,
    busy: AtomicBool,
    notifier: Notifier,
}

impl<S, C, A> SessionController<S, C, A>
where
    S: ResumeStore,
    C: SelectionCapture,
    A: AnalysisService,
{
    /// Open a session. Whether a resume is already stored decides the first panel.
    pub async fn open(
        store: S,
        capture: C,
        service: A,
        settings: SessionSettings,
    ) -> Result<Self, MatchError> {
        let resume_saved = store.load().await?.is_some_and(|r| !r.is_empty());
        info!("Session opened (resume saved: {})", resume_saved);

        Ok(Self {
            store,
            capture,
            service,
            notifier: Notifier::new(settings.notification_ttl),
            settings,
            session: Mutex::new(Session::new(resume_saved)),
            busy: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> UiState {
        lock(&self.session).state
    }

    pub fn report(&self) -> Option<ResultReport> {
        lock(&self.session).report.clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn view(&self) -> View {
        let session = lock(&self.session).clone();
        view::render(&session, self.notifier.current())
    }

    fn apply(&self, event: Event) -> Result<UiState, MatchError> {
        let mut session = lock(&self.session);
        let next = session.state.on(event)?;
        debug!("{:?}: {:?} -> {:?}", event, session.state, next);
        session.state = next;
        Ok(next)
    }

    fn fail<T>(&self, err: MatchError) -> Result<T, MatchError> {
        self.notifier.notify(err.severity(), err.user_message());
        Err(err)
    }

    fn ensure_idle(&self) -> Result<(), MatchError> {
        if self.busy.load(Ordering::Acquire) {
            return self.fail(MatchError::Busy);
        }
        Ok(())
    }

    pub fn on_file_chosen(&self, file: impl Into<PathBuf>) -> Result<(), MatchError> {
        self.ensure_idle()?;
        let file = file.into();
        if let Err(e) = self.apply(Event::FileChosen) {
            return self.fail(e);
        }
        info!("Resume file chosen: {}", file.display());
        lock(&self.session).staged_file = Some(file);
        Ok(())
    }

    pub async fn on_save_resume(&self) -> Result<(), MatchError> {
        let Some(_in_flight) = InFlight::acquire(&self.busy, &self.session) else {
            return self.fail(MatchError::Busy);
        };

        let staged = lock(&self.session).staged_file.clone();
        let Some(path) = staged else {
            return self.fail(MatchError::NoFileChosen);
        };

        let text = match FsOps::read_text_lossy(&path).await {
            Ok(text) => text,
            Err(e) => return self.fail(MatchError::FileRead(format!("{:#}", e))),
        };

        if let Err(e) = self.store.save(&text).await {
            return self.fail(e.into());
        }

        if let Err(e) = self.apply(Event::ResumeStored) {
            return self.fail(e);
        }
        lock(&self.session).staged_file = None;
        self.notifier
            .notify(Severity::Success, "Resume saved successfully!");
        Ok(())
    }

    pub fn on_remove_staged_file(&self) -> Result<(), MatchError> {
        self.ensure_idle()?;
        if let Err(e) = self.apply(Event::FileRemoved) {
            return self.fail(e);
        }
        lock(&self.session).staged_file = None;
        Ok(())
    }

    pub async fn on_discard_resume(&self) -> Result<(), MatchError> {
        // no match may start while the slot is being cleared
        let Some(_in_flight) = InFlight::acquire(&self.busy, &self.session) else {
            return self.fail(MatchError::Busy);
        };
        let current = self.state();
        if let Err(e) = current.on(Event::ResumeDiscarded) {
            return self.fail(e);
        }

        if let Err(e) = self.store.clear().await {
            return self.fail(e.into());
        }

        if let Err(e) = self.apply(Event::ResumeDiscarded) {
            return self.fail(e);
        }
        {
            let mut session = lock(&self.session);
            session.staged_file = None;
            session.report = None;
            session.active_tab = ResultTab::default();
        }
        self.notifier.notify(
            Severity::Success,
            "Previous resume removed. Please upload a new resume.",
        );
        Ok(())
    }

    /// Capture the job description, send it with the stored resume to the
    /// analysis service and show the report. Only one attempt runs at a time.
    pub async fn on_match(&self) -> Result<ResultReport, MatchError> {
        let Some(_in_flight) = InFlight::acquire(&self.busy, &self.session) else {
            return self.fail(MatchError::Busy);
        };

        if let Err(e) = self.apply(Event::MatchStarted) {
            return self.fail(e);
        }
        lock(&self.session).loading = true;

        let attempt = Uuid::new_v4();
        let outcome = self
            .run_match()
            .instrument(info_span!("match_attempt", %attempt))
            .await;

        match outcome {
            Ok(report) => {
                self.apply(Event::MatchSucceeded)?;
                {
                    let mut session = lock(&self.session);
                    session.report = Some(report.clone());
                    session.active_tab = ResultTab::default();
                }
                info!(%attempt, "Analysis complete, score {}", report.score);
                self.notifier.notify(
                    Severity::Success,
                    "Analysis complete! Check the results below.",
                );
                Ok(report)
            }
            Err(e) => {
                warn!(%attempt, "Match failed: {}", e);
                self.apply(Event::MatchFailed)?;
                self.fail(e)
            }
        }
    }

    async fn run_match(&self) -> Result<ResultReport, MatchError> {
        let selection = self
            .capture
            .capture_selection()
            .await
            .ok_or(MatchError::NoSelection)?;
        debug!("Captured selection ({} chars)", selection.chars().count());

        let job_description =
            JobDescription::from_selection(&selection, self.settings.min_selection_chars)?;

        let resume = self
            .store
            .load()
            .await?
            .filter(|r| !r.is_empty())
            .ok_or(MatchError::NoResumeSaved)?;

        let request = AnalysisRequest::new(resume, job_description);
        self.service.analyze(&request).await
    }

    pub fn on_new_analysis(&self) -> Result<(), MatchError> {
        if let Err(e) = self.apply(Event::NewAnalysis) {
            return self.fail(e);
        }
        let mut session = lock(&self.session);
        session.report = None;
        session.active_tab = ResultTab::default();
        Ok(())
    }

    /// Make `tab` the only active results tab.
    pub fn on_select_tab(&self, tab: ResultTab) -> Result<(), MatchError> {
        let mut session = lock(&self.session);
        if session.state != UiState::ResultsShown {
            let err = MatchError::InvalidTransition {
                action: "select a results tab",
                state: session.state.name(),
            };
            drop(session);
            return self.fail(err);
        }
        session.active_tab = tab;
        Ok(())
    }
}
