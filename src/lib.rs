//! Resume-to-job matching session: store a resume, capture a job description,
//! ask the analysis service for a verdict and present the report.

pub mod capture;
pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::MatchError;
pub use session::{SessionController, SessionSettings, UiState};
pub use types::ResultReport;
