use std::{path::PathBuf, sync::Arc};

use {
    clap::Parser,
    secrecy::Secret,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use reelay_extract::YtDlp;

#[derive(Parser)]
#[command(
    name = "reelay",
    about = "Reposts shared social-media videos as native Discord attachments"
)]
struct Cli {
    /// Path to the config file (default: ./reelay.toml, then ~/.config/reelay/).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Bot token (overrides config value).
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Target channel id (overrides config value).
    #[arg(long, env = "CHANNEL_ID")]
    channel_id: Option<u64>,

    /// Download directory (overrides config value).
    #[arg(long, env = "DOWNLOAD_DIR")]
    download_dir: Option<PathBuf>,

    /// Cookie file for authenticated sources (overrides config value).
    #[arg(long, env = "COOKIE_FILE")]
    cookie_file: Option<PathBuf>,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "reelay starting");

    let mut config = match &cli.config {
        Some(path) => reelay_config::load_config(path)?,
        None => reelay_config::discover_and_load(),
    };

    // Flags and environment override file values.
    if let Some(token) = cli.token {
        config.discord.token = Secret::new(token);
    }
    if let Some(channel_id) = cli.channel_id {
        config.discord.channel_id = Some(channel_id);
    }
    if let Some(dir) = cli.download_dir {
        config.download.dir = dir;
    }
    if let Some(cookies) = cli.cookie_file {
        config.download.cookie_file = Some(cookies);
    }
    config.validate()?;

    // A missing extractor is fatal before any connection is made.
    let extractor = YtDlp::locate(
        config.download.ytdlp_path.as_deref(),
        config.download.ffmpeg_path.as_deref(),
    )?
    .with_cookie_file(config.download.cookie_file.clone());
    info!(bin = %extractor.binary().display(), "extractor located");

    reelay_discord::run(&config, Arc::new(extractor)).await
}
