//! Platform-agnostic message shapes exchanged between the pipeline and the
//! chat transport. Keeping these free of SDK types lets the pipeline be
//! driven (and tested) without a live gateway connection.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Minimal structural view of an inbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Channel the message was posted in.
    pub channel_id: u64,
    /// Platform message id, used for trigger-message deletion.
    pub message_id: u64,
    pub author_id: u64,
    /// Display name used for attribution on the repost.
    pub author_name: String,
    /// Bots (including this one) are never processed.
    pub author_is_bot: bool,
    pub content: String,
}

/// Handle to a message the pipeline has posted and may later delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Metadata card attached to a delivered video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoCard {
    /// Original message text with the video URL removed.
    pub caption: String,
    /// Display name of the person who shared the link.
    pub shared_by: String,
    pub shared_at: DateTime<Utc>,
    /// Back-link to the post the video was extracted from.
    pub source_url: String,
}

/// Terminal outcome of one link's trip through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkOutcome {
    Delivered,
    DownloadFailed { reason: String },
    DeliveryFailed { reason: String },
}

/// Per-link processing record returned by the pipeline entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub url: String,
    pub outcome: LinkOutcome,
}

impl ProcessingResult {
    #[must_use]
    pub fn delivered(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: LinkOutcome::Delivered,
        }
    }

    #[must_use]
    pub fn download_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: LinkOutcome::DownloadFailed {
                reason: reason.into(),
            },
        }
    }

    #[must_use]
    pub fn delivery_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: LinkOutcome::DeliveryFailed {
                reason: reason.into(),
            },
        }
    }
}
