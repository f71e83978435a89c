//! Deterministic artifact-path derivation.
//!
//! The derived path doubles as the idempotency key for a download: the
//! orchestrator and the delivery step both compute it independently, before
//! and after the extractor runs, and must land on the same file.

use std::path::{Path, PathBuf};

use {
    once_cell::sync::Lazy,
    regex::Regex,
    sha2::{Digest, Sha256},
};

use reelay_common::Context as _;

use crate::classify::{normalize, platform_of_host};

/// Local path a downloaded video is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath {
    pub directory: PathBuf,
    /// Sanitized video id plus the fixed `.mp4` extension.
    pub filename: String,
}

impl ArtifactPath {
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

#[allow(clippy::expect_used)]
fn compile(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

/// Ordered id-extraction patterns; the first capture that matches wins.
static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"/reel/([^/?&#]+)"),
        compile(r"/reels/([^/?&#]+)"),
        compile(r"/watch/\?v=([^&#]+)"),
        compile(r"/share/[rv]/([^/?&#]+)"),
        compile(r"/videos/([0-9]+)"),
    ]
});

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

/// Derive the video id for a cleaned URL: structural extraction first,
/// platform-tagged content hash as the fallback.
fn derive_id(clean_url: &str) -> String {
    for re in ID_PATTERNS.iter() {
        if let Some(captures) = re.captures(clean_url) {
            if let Some(id) = captures.get(1) {
                return id.as_str().to_string();
            }
        }
    }
    format!(
        "{}_{}",
        platform_of_host(clean_url).tag(),
        short_hash(clean_url)
    )
}

/// Resolve the deterministic local path for a URL's download.
///
/// Creates `download_dir` if absent. Calling this twice with the same
/// arguments, even across process restarts, yields the same path.
pub fn resolve_path(url: &str, download_dir: &Path) -> reelay_common::Result<ArtifactPath> {
    let clean = normalize(url).unwrap_or_else(|| url.trim().to_string());
    let id = sanitize(&derive_id(&clean));
    std::fs::create_dir_all(download_dir)
        .with_context(|| format!("creating download directory {}", download_dir.display()))?;
    Ok(ArtifactPath {
        directory: download_dir.to_path_buf(),
        filename: format!("{id}.mp4"),
    })
}
