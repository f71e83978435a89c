use thiserror::Error;

/// Errors raised while preparing the extractor, before any download runs.
///
/// Setup problems are startup-fatal and deliberately distinct from
/// per-download failures, which travel as `DownloadOutcome::Failure`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("extractor unavailable: {message}")]
    Setup { message: String },
}

impl Error {
    #[must_use]
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
