//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Processors to run, in order.
    #[serde(default = "default_processors")]
    pub processors: Vec<String>,

    /// Raw option tables keyed by processor name (e.g. `[autotune]`).
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_json::Value>,
}

fn default_processors() -> Vec<String> {
    vec!["autotune".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processors: default_processors(),
            options: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (AUTOTUNE_*, nested keys split on `__`)
        figment = figment.merge(Env::prefixed("AUTOTUNE_").split("__"));

        figment.extract()
    }

    /// The option table for `processor`, if any.
    pub fn options_for(&self, processor: &str) -> Option<&serde_json::Value> {
        self.options.get(processor)
    }
}

/// Returns the platform-specific config directory for autotune.
///
/// On Linux: `~/.config/autotune`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("autotune"))
}
