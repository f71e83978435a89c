use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelayConfig {
    pub discord: DiscordConfig,
    pub download: DownloadConfig,
}

impl ReelayConfig {
    /// Startup validation. A missing token or channel id means the pipeline
    /// can never run; both are fatal before any message is handled.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.discord.token.expose_secret().trim().is_empty() {
            anyhow::bail!("discord.token is required (or set DISCORD_TOKEN)");
        }
        if self.discord.channel_id.is_none() {
            anyhow::bail!("discord.channel_id is required (or set CHANNEL_ID)");
        }
        Ok(())
    }
}

/// Discord connection and channel settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token from the Discord developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// The only channel whose messages are processed.
    pub channel_id: Option<u64>,

    /// Delete the triggering message after a successful repost.
    pub delete_trigger: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            channel_id: None,
            delete_trigger: true,
        }
    }
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[REDACTED]")
            .field("channel_id", &self.channel_id)
            .field("delete_trigger", &self.delete_trigger)
            .finish()
    }
}

/// Download directory and extractor tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Where artifacts are written between download and delivery.
    pub dir: PathBuf,

    /// Cookie/session file passed to the extractor when it exists on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_file: Option<PathBuf>,

    /// Explicit yt-dlp binary path; `$PATH` lookup otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytdlp_path: Option<PathBuf>,

    /// Explicit ffmpeg location handed to yt-dlp; `$PATH` lookup otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("downloads"),
            cookie_file: None,
            ytdlp_path: None,
            ffmpeg_path: None,
        }
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
