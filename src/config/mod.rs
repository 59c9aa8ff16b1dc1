//! Configuration loading
//!
//! Layers, lowest precedence first: built-in defaults, a config file, then
//! `CODEBASE_CONTEXT_*` environment variables. CLI flags are applied on top
//! by [`merge_cli_with_config`].

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::Config;
use crate::error::Result;

/// Environment variable prefix for configuration keys
pub const ENV_PREFIX: &str = "CODEBASE_CONTEXT_";

/// Config file names looked up in the scan root, in order
pub const CONFIG_FILE_NAMES: &[&str] =
    &["codebase-context.toml", ".codebase-context.yml", ".codebase-context.yaml"];

/// Load configuration for a scan rooted at `root`.
///
/// An explicit `config_path` must exist; otherwise the first discovered
/// config file in `root` is used, if any.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let file = match config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file '{}' not found",
                    path.display()
                ))
                .into());
            }
            Some(path.to_path_buf())
        }
        None => discover_config(root),
    };

    if let Some(path) = file {
        tracing::debug!(path = %path.display(), "loading config file");
        figment = if is_yaml(&path) {
            figment.merge(Yaml::file(&path))
        } else {
            figment.merge(Toml::file(&path))
        };
    }

    let config: Config = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
    Ok(config)
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    if !root.is_dir() {
        return None;
    }
    CONFIG_FILE_NAMES.iter().map(|name| root.join(name)).find(|p| p.is_file())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("yml" | "yaml")
    )
}
