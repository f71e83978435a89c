//! Link recognition and artifact naming: scan free-form text for video URLs,
//! classify them per platform, and derive the deterministic local path a
//! download for that URL lands at.

pub mod artifact;
pub mod classify;

pub use {
    artifact::{ArtifactPath, resolve_path},
    classify::{Platform, VideoLink, classify, find_candidate_links, normalize},
};
