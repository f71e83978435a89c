//! Configuration schema, file discovery, and env substitution.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{discover_and_load, load_config},
    schema::{DiscordConfig, DownloadConfig, ReelayConfig},
};
