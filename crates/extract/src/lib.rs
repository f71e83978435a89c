//! Download orchestration against the external extractor tool.
//!
//! The extractor is isolated behind the [`Extractor`] trait so the
//! surrounding scheduling model can run multiple workers, and so the
//! pipeline can be tested against a fake.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub mod error;
pub mod ytdlp;

pub use {
    error::{Error, Result},
    ytdlp::YtDlp,
};

/// Result of one download attempt. Failures carry a human-readable reason
/// suitable for a user-facing notice; nothing escapes this boundary uncaught.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success(PathBuf),
    Failure(String),
}

/// A tool that resolves a video URL to a local file.
///
/// One attempt per call, blocking the caller until the tool completes.
/// Transient failures are surfaced as [`DownloadOutcome::Failure`] rather
/// than retried — the triggering message can simply be resubmitted.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn fetch(&self, url: &str, output: &Path) -> DownloadOutcome;
}
