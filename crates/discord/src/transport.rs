//! Outbound message primitives over the Discord REST API.

use std::{path::Path, sync::Arc};

use {
    anyhow::Result,
    async_trait::async_trait,
    serenity::all::{
        ChannelId, CreateAttachment, CreateEmbed, CreateEmbedFooter, CreateMessage, Http,
        MessageId,
    },
    tracing::debug,
};

use {
    reelay_common::types::{MessageRef, VideoCard},
    reelay_pipeline::ChatTransport,
};

const EMBED_COLOUR: u32 = 0x1DA1F2;

/// [`ChatTransport`] implementation backed by a serenity HTTP client.
pub struct DiscordTransport {
    http: Arc<Http>,
}

impl DiscordTransport {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn build_embed(card: &VideoCard) -> CreateEmbed {
    let description = if card.caption.is_empty() {
        "Check out this video!".to_string()
    } else {
        card.caption.clone()
    };
    CreateEmbed::new()
        .title("🎥 Video Shared")
        .description(description)
        .colour(EMBED_COLOUR)
        .field("👤 Shared by", card.shared_by.clone(), true)
        .field(
            "📅 Shared at",
            card.shared_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            true,
        )
        .field(
            "🔗 Original URL",
            format!("[Open source post]({})", card.source_url),
            false,
        )
        .footer(CreateEmbedFooter::new("reelay"))
}

#[async_trait]
impl ChatTransport for DiscordTransport {
    async fn send_notice(&self, channel_id: u64, text: &str) -> Result<MessageRef> {
        let posted = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(text))
            .await?;
        Ok(MessageRef {
            channel_id,
            message_id: posted.id.get(),
        })
    }

    async fn send_video(&self, channel_id: u64, video: &Path, card: &VideoCard) -> Result<()> {
        let attachment = CreateAttachment::path(video).await?;
        debug!(path = %video.display(), "uploading video attachment");
        let message = CreateMessage::new()
            .content("📢 New video shared!")
            .embed(build_embed(card))
            .add_file(attachment);
        ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, target: MessageRef) -> Result<()> {
        ChannelId::new(target.channel_id)
            .delete_message(&self.http, MessageId::new(target.message_id))
            .await?;
        Ok(())
    }
}
