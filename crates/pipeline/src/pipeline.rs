//! Per-link processing: Detected → Announced → Downloading →
//! {Downloaded, DownloadFailed} → {Delivered, DeliveryFailed} → CleanedUp.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    chrono::Utc,
    tracing::{debug, info, warn},
};

use {
    reelay_common::types::{InboundMessage, LinkOutcome, MessageRef, ProcessingResult, VideoCard},
    reelay_extract::{DownloadOutcome, Extractor},
    reelay_links::{VideoLink, classify, find_candidate_links, resolve_path},
};

use crate::transport::ChatTransport;

/// The download-and-repost pipeline for one configured channel.
pub struct Pipeline {
    channel_id: u64,
    download_dir: PathBuf,
    delete_trigger: bool,
    extractor: Arc<dyn Extractor>,
    transport: Arc<dyn ChatTransport>,
}

impl Pipeline {
    pub fn new(
        channel_id: u64,
        download_dir: impl Into<PathBuf>,
        extractor: Arc<dyn Extractor>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            channel_id,
            download_dir: download_dir.into(),
            delete_trigger: true,
            extractor,
            transport,
        }
    }

    /// Whether the original trigger message is deleted after a successful
    /// repost (default: true).
    #[must_use]
    pub fn with_delete_trigger(mut self, delete_trigger: bool) -> Self {
        self.delete_trigger = delete_trigger;
        self
    }

    /// Process one inbound message: classify its links and run each accepted
    /// link through the pipeline, strictly in order of appearance.
    ///
    /// Messages from bots or outside the configured channel produce no side
    /// effects and an empty result. One link's failure never prevents the
    /// next link from being attempted.
    pub async fn handle_message(&self, msg: &InboundMessage) -> Vec<ProcessingResult> {
        if msg.author_is_bot {
            return Vec::new();
        }
        if msg.channel_id != self.channel_id {
            debug!(
                channel_id = msg.channel_id,
                "message outside target channel, ignoring"
            );
            return Vec::new();
        }

        let mut results = Vec::new();
        for candidate in find_candidate_links(&msg.content) {
            let Some(link) = classify(candidate) else {
                continue;
            };
            info!(url = %link.raw_url, platform = ?link.platform, "processing video link");
            results.push(self.process_link(msg, &link).await);
        }
        results
    }

    async fn process_link(&self, msg: &InboundMessage, link: &VideoLink) -> ProcessingResult {
        // Announce. A failed notice is logged and processing continues.
        let notice = match self
            .transport
            .send_notice(msg.channel_id, &format!("⏳ Processing {}…", link.raw_url))
            .await
        {
            Ok(posted) => Some(posted),
            Err(e) => {
                warn!(error = %e, "failed to post status notice");
                None
            },
        };

        let result = self.download_and_deliver(msg, link).await;

        match &result.outcome {
            LinkOutcome::Delivered => {},
            LinkOutcome::DownloadFailed { reason } => {
                warn!(url = %link.raw_url, reason, "download failed");
                self.notify_failure(
                    msg.channel_id,
                    &format!(
                        "❌ Could not download the video ({reason}). \
                         The link might be invalid or the video might be private."
                    ),
                )
                .await;
            },
            LinkOutcome::DeliveryFailed { reason } => {
                warn!(url = %link.raw_url, reason, "delivery failed");
                self.notify_failure(
                    msg.channel_id,
                    &format!("❌ An error occurred while reposting the video: {reason}"),
                )
                .await;
            },
        }

        // Terminal cleanup, on every path. The artifact delete is idempotent;
        // a partial file left by a failed download is swept up here too.
        if let Ok(artifact) = resolve_path(&link.normalized_url, &self.download_dir) {
            remove_artifact(&artifact.path()).await;
        }
        if let Some(posted) = notice {
            if let Err(e) = self.transport.delete_message(posted).await {
                warn!(error = %e, "failed to delete status notice");
            }
        }
        if matches!(result.outcome, LinkOutcome::Delivered) && self.delete_trigger {
            let original = MessageRef {
                channel_id: msg.channel_id,
                message_id: msg.message_id,
            };
            if let Err(e) = self.transport.delete_message(original).await {
                // Delete permission may be missing; tolerated.
                warn!(error = %e, "failed to delete trigger message");
            }
        }

        result
    }

    async fn download_and_deliver(
        &self,
        msg: &InboundMessage,
        link: &VideoLink,
    ) -> ProcessingResult {
        let artifact = match resolve_path(&link.normalized_url, &self.download_dir) {
            Ok(artifact) => artifact,
            Err(e) => {
                return ProcessingResult::download_failed(
                    &link.raw_url,
                    format!("could not prepare download directory: {e}"),
                );
            },
        };
        let path = artifact.path();

        info!(url = %link.normalized_url, path = %path.display(), "downloading");
        match self.extractor.fetch(&link.normalized_url, &path).await {
            DownloadOutcome::Success(_) => {},
            DownloadOutcome::Failure(reason) => {
                return ProcessingResult::download_failed(&link.raw_url, reason);
            },
        }
        if !path.is_file() {
            return ProcessingResult::download_failed(
                &link.raw_url,
                "no file at the expected download path",
            );
        }

        let card = build_card(msg, link);
        match self.transport.send_video(msg.channel_id, &path, &card).await {
            Ok(()) => {
                info!(url = %link.raw_url, "video reposted");
                ProcessingResult::delivered(&link.raw_url)
            },
            Err(e) => ProcessingResult::delivery_failed(&link.raw_url, e.to_string()),
        }
    }

    async fn notify_failure(&self, channel_id: u64, text: &str) {
        if let Err(e) = self.transport.send_notice(channel_id, text).await {
            warn!(error = %e, "failed to post failure notice");
        }
    }
}

/// Caption for the repost: the original text with the link removed.
fn strip_link(content: &str, url: &str) -> String {
    content.replace(url, "").trim().to_string()
}

fn build_card(msg: &InboundMessage, link: &VideoLink) -> VideoCard {
    VideoCard {
        caption: strip_link(&msg.content, &link.raw_url),
        shared_by: msg.author_name.clone(),
        shared_at: Utc::now(),
        source_url: link.raw_url.clone(),
    }
}

/// Delete-if-exists. Failures are logged, never surfaced — cleanup must not
/// abort the pipeline.
async fn remove_artifact(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "artifact removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove artifact"),
    }
}
