// src/session/notifier.rs
//! Transient on-screen notifications with timed dismissal.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    next_id: u64,
    timer: Option<JoinHandle<()>>,
}

/// Holds at most one visible notification.
///
/// Each notification owns its dismissal timer. Raising a new one aborts the
/// previous timer, so a stale timer can never clear a newer message.
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    display_for: Duration,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Notifier {
    pub fn new(display_for: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            display_for,
        }
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) -> u64 {
        let message = message.into();
        match severity {
            Severity::Success => info!("Notification: {}", message),
            Severity::Warning => warn!("Notification: {}", message),
            Severity::Error => error!("Notification: {}", message),
        }

        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.next_id += 1;
        let id = slot.next_id;
        slot.current = Some(Notification {
            id,
            severity,
            message,
        });

        // outside a runtime the notification simply stays until replaced
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let shared = Arc::clone(&self.slot);
            let delay = self.display_for;
            slot.timer = Some(handle.spawn(async move {
                tokio::time::sleep(delay).await;
                let mut slot = lock(&shared);
                if slot.current.as_ref().map(|n| n.id) == Some(id) {
                    slot.current = None;
                    slot.timer = None;
                }
            }));
        }

        id
    }

    pub fn current(&self) -> Option<Notification> {
        lock(&self.slot).current.clone()
    }

    pub fn dismiss(&self) {
        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.current = None;
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.slot).timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notification_dismissed_after_delay() {
        let notifier = Notifier::new(Duration::from_millis(3000));
        notifier.notify(Severity::Success, "Resume saved successfully!");

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(
            notifier.current().map(|n| n.message),
            Some("Resume saved successfully!".to_string())
        );

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notification_supersedes_and_keeps_full_delay() {
        let notifier = Notifier::new(Duration::from_millis(3000));
        notifier.notify(Severity::Warning, "Selected text is too short.");

        tokio::time::sleep(Duration::from_millis(2000)).await;
        let id = notifier.notify(Severity::Error, "Error: Server error: 500");

        // the first timer would have fired here
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        let shown = notifier.current().unwrap();
        assert_eq!(shown.id, id);
        assert_eq!(shown.severity, Severity::Error);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        tokio::task::yield_now().await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test]
    async fn test_dismiss_clears_immediately() {
        let notifier = Notifier::new(Duration::from_secs(60));
        notifier.notify(Severity::Warning, "Please select a file first");
        notifier.dismiss();
        assert_eq!(notifier.current(), None);
    }

    #[test]
    fn test_without_runtime_notification_persists() {
        let notifier = Notifier::new(Duration::from_millis(1));
        notifier.notify(Severity::Success, "saved");
        std::thread::sleep(Duration::from_millis(5));
        assert!(notifier.current().is_some());
    }
}
