use std::path::Path;

use {anyhow::Result, async_trait::async_trait};

use reelay_common::types::{MessageRef, VideoCard};

/// Chat-platform send/delete primitives the pipeline drives.
///
/// The concrete implementation is constructed by the embedding binary and
/// injected; the pipeline never touches a client singleton.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post a transient text notice, returning a handle for later deletion.
    async fn send_notice(&self, channel_id: u64, text: &str) -> Result<MessageRef>;

    /// Deliver a video file together with its metadata card as one post.
    async fn send_video(&self, channel_id: u64, video: &Path, card: &VideoCard) -> Result<()>;

    /// Delete a previously posted message.
    async fn delete_message(&self, target: MessageRef) -> Result<()>;
}
