// src/session/mod.rs
pub mod controller;
pub mod notifier;
pub mod state;
pub mod view;

pub use controller::{SessionController, SessionSettings};
pub use notifier::{Notification, Notifier, Severity};
pub use state::{Event, Session, UiState};
pub use view::{render, Panel, ResultTab, TabView, View};
