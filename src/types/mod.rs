// src/types/mod.rs
pub mod report;
pub mod request;
pub mod response;

pub use report::ResultReport;
pub use request::{AnalysisRequest, JobDescription};
