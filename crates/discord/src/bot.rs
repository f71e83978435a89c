use std::sync::Arc;

use {
    anyhow::Context as _,
    secrecy::ExposeSecret,
    serenity::all::{Client, Http},
    tracing::info,
};

use {
    reelay_config::ReelayConfig,
    reelay_extract::Extractor,
    reelay_pipeline::{ChatTransport, Pipeline},
};

use crate::{handler::ReelayHandler, transport::DiscordTransport};

/// Assemble the pipeline and run the gateway client until it stops.
///
/// The extractor is located by the caller so that a missing tool fails the
/// process before any connection is made.
pub async fn run(config: &ReelayConfig, extractor: Arc<dyn Extractor>) -> anyhow::Result<()> {
    let channel_id = config
        .discord
        .channel_id
        .context("discord.channel_id is not configured")?;
    let token = config.discord.token.expose_secret().to_string();

    let http = Arc::new(Http::new(&token));
    let transport: Arc<dyn ChatTransport> = Arc::new(DiscordTransport::new(http));
    let pipeline = Arc::new(
        Pipeline::new(
            channel_id,
            config.download.dir.clone(),
            extractor,
            transport,
        )
        .with_delete_trigger(config.discord.delete_trigger),
    );

    let mut client = Client::builder(&token, ReelayHandler::intents())
        .event_handler(ReelayHandler::new(pipeline))
        .await
        .context("failed to build discord client")?;

    info!(channel_id, "starting discord gateway");
    client.start().await.context("discord gateway stopped")?;
    Ok(())
}
