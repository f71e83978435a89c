//! Discord event handler for serenity.

use std::sync::Arc;

use {
    serenity::{
        all::{Context, EventHandler, GatewayIntents, Message, Ready},
        async_trait,
    },
    tracing::{debug, info},
};

use {reelay_common::types::InboundMessage, reelay_pipeline::Pipeline};

/// Handler for Discord gateway events.
pub struct ReelayHandler {
    pipeline: Arc<Pipeline>,
}

impl ReelayHandler {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }
}

/// Reduce a serenity message to the structural shape the pipeline consumes.
fn to_inbound(msg: &Message) -> InboundMessage {
    InboundMessage {
        channel_id: msg.channel_id.get(),
        message_id: msg.id.get(),
        author_id: msg.author.id.get(),
        author_name: msg
            .author
            .global_name
            .clone()
            .unwrap_or_else(|| msg.author.name.clone()),
        author_is_bot: msg.author.bot,
        content: msg.content.clone(),
    }
}

#[async_trait]
impl EventHandler for ReelayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "discord bot ready"
        );
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        // Skip bot messages (including our own reposts) to prevent loops.
        if msg.author.bot {
            return;
        }

        let inbound = to_inbound(&msg);
        let results = self.pipeline.handle_message(&inbound).await;
        if results.is_empty() {
            debug!(channel_id = inbound.channel_id, "no supported links");
        } else {
            let outcomes: Vec<_> = results.iter().map(|r| &r.outcome).collect();
            info!(
                channel_id = inbound.channel_id,
                links = results.len(),
                ?outcomes,
                "message processed"
            );
        }
    }
}
