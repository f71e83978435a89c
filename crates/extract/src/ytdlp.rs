//! yt-dlp invocation: binary discovery, argument construction, and
//! completion classification.

use std::path::{Path, PathBuf};

use {
    async_trait::async_trait,
    tokio::process::Command,
    tracing::{debug, warn},
};

use crate::{DownloadOutcome, Error, Extractor, Result};

/// Longest failure reason forwarded to the user notice.
const MAX_REASON_LEN: usize = 300;

/// Extractor backed by the `yt-dlp` command-line tool.
#[derive(Debug)]
pub struct YtDlp {
    bin: PathBuf,
    ffmpeg_location: Option<PathBuf>,
    cookie_file: Option<PathBuf>,
}

impl YtDlp {
    /// Locate the `yt-dlp` binary: an explicit override path if configured,
    /// otherwise `$PATH`. Failure here is a setup error — the process should
    /// not start without a working extractor.
    pub fn locate(override_path: Option<&Path>, ffmpeg_path: Option<&Path>) -> Result<Self> {
        let bin = match override_path {
            Some(path) => {
                if path.is_file() {
                    path.to_path_buf()
                } else {
                    return Err(Error::setup(format!(
                        "configured yt-dlp path does not exist: {}",
                        path.display()
                    )));
                }
            },
            None => which::which("yt-dlp")
                .map_err(|e| Error::setup(format!("yt-dlp not found on PATH: {e}")))?,
        };

        // ffmpeg is only needed when yt-dlp has to merge streams; its absence
        // is not fatal.
        let ffmpeg_location = match ffmpeg_path {
            Some(path) => Some(path.to_path_buf()),
            None => which::which("ffmpeg").ok(),
        };

        Ok(Self {
            bin,
            ffmpeg_location,
            cookie_file: None,
        })
    }

    /// Attach a cookie/session file for authenticated sources. The file is
    /// only passed to yt-dlp when it exists on disk at invocation time.
    #[must_use]
    pub fn with_cookie_file(mut self, cookie_file: Option<PathBuf>) -> Self {
        self.cookie_file = cookie_file;
        self
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.bin
    }

    fn build_args(&self, url: &str, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            "best[ext=mp4]/best".to_string(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--no-check-certificates".to_string(),
            "-o".to_string(),
            output_template(output),
        ];
        if let Some(cookies) = self.cookie_file.as_ref().filter(|p| p.is_file()) {
            args.push("--cookies".to_string());
            args.push(cookies.display().to_string());
        }
        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(ffmpeg.display().to_string());
        }
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl Extractor for YtDlp {
    async fn fetch(&self, url: &str, output: &Path) -> DownloadOutcome {
        let args = self.build_args(url, output);
        debug!(bin = %self.bin.display(), url, "invoking yt-dlp");

        let run = Command::new(&self.bin).args(&args).output().await;
        let completed = match run {
            Ok(completed) => completed,
            Err(e) => {
                return DownloadOutcome::Failure(format!(
                    "failed to launch {}: {e}",
                    self.bin.display()
                ));
            },
        };

        if !completed.status.success() {
            return DownloadOutcome::Failure(failure_reason(&completed.stderr));
        }

        match finalize_output(output).await {
            Some(path) => DownloadOutcome::Success(path),
            None => {
                DownloadOutcome::Failure("extractor completed but produced no file".to_string())
            },
        }
    }
}

/// Output template pinning the filename while letting yt-dlp negotiate the
/// extension; the realized file is renamed to the fixed `.mp4` path after.
fn output_template(output: &Path) -> String {
    format!("{}.%(ext)s", output.with_extension("").display())
}

/// Condense stderr into a single human-readable line.
fn failure_reason(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let line = text
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("extractor failed with no output");
    let line = line.strip_prefix("ERROR:").unwrap_or(line).trim();
    let mut reason = line.to_string();
    if reason.len() > MAX_REASON_LEN {
        reason.truncate(MAX_REASON_LEN);
        reason.push('…');
    }
    reason
}

/// Ensure the download ended up at the pinned path. When yt-dlp negotiated a
/// different container, rename the sibling file sharing the stem.
async fn finalize_output(output: &Path) -> Option<PathBuf> {
    if tokio::fs::try_exists(output).await.unwrap_or(false) {
        return Some(output.to_path_buf());
    }

    let stem = output.file_stem()?.to_os_string();
    let dir = output.parent()?;
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let candidate = entry.path();
        if candidate.file_stem().is_some_and(|s| s == stem) && candidate != output {
            debug!(from = %candidate.display(), to = %output.display(), "normalizing extension");
            if let Err(e) = tokio::fs::rename(&candidate, output).await {
                warn!(error = %e, "failed to rename download to pinned path");
                return None;
            }
            return Some(output.to_path_buf());
        }
    }
    None
}
