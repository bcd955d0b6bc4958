// src/core/mod.rs
//! Host-facing services: resume storage, the analysis client and file helpers

pub mod fs_ops;
pub mod resume_store;
pub mod service_client;

pub use fs_ops::FsOps;
pub use resume_store::{MemoryResumeStore, ResumeStore, SqliteResumeStore};
pub use service_client::{AnalysisClient, AnalysisService};
