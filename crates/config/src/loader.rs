use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::ReelayConfig};

/// Standard config file name.
const CONFIG_FILENAME: &str = "reelay.toml";

/// Load config from an explicit path.
pub fn load_config(path: &Path) -> anyhow::Result<ReelayConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./reelay.toml` (project-local)
/// 2. `~/.config/reelay/reelay.toml` (user-global)
///
/// Returns `ReelayConfig::default()` if no config file is found; callers
/// still validate the result, so a missing file only works when the required
/// values arrive through flags or the environment.
pub fn discover_and_load() -> ReelayConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    ReelayConfig::default()
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "reelay") {
        let global = dirs.config_dir().join(CONFIG_FILENAME);
        if global.exists() {
            return Some(global);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_toml_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reelay.toml");
        std::fs::write(&path, "[discord]\ntoken = \"tok-789\"\nchannel_id = 5\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.discord.channel_id, Some(5));
    }

    #[test]
    fn unresolved_placeholder_survives_to_parse() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reelay.toml");
        std::fs::write(
            &path,
            "[discord]\ntoken = \"${REELAY_UNSET_VAR_FOR_TEST}\"\nchannel_id = 5\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(
            secrecy::ExposeSecret::expose_secret(&cfg.discord.token),
            "${REELAY_UNSET_VAR_FOR_TEST}"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/definitely/not/here.toml")).is_err());
    }
}
