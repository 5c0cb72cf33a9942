//! Configuration loading and environment layering.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::profile::FeedProfile;

/// Source that produced the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// Built-in profiles for the four known aggregator feeds.
    #[default]
    Builtin,
    /// A TOML file named by `$FEEDEX_CONFIG_PATH`.
    EnvPath(PathBuf),
    /// A TOML file passed explicitly.
    File(PathBuf),
}

/// Top-level configuration: a set of feed profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedexConfig {
    #[serde(default)]
    pub profiles: Vec<FeedProfile>,
}

impl FeedexConfig {
    /// Load profiles from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read config from {}", path.display())
        })?;
        let config: Self = toml::from_str(&contents).with_context(|| {
            format!("invalid config {}", path.display())
        })?;
        Ok(config)
    }

    /// Load configuration using environment variables. Evaluation order:
    /// 1) `$FEEDEX_CONFIG_PATH` (TOML file),
    /// 2) the built-in profiles if it is not set.
    ///
    /// A `.env` file is honored when present.
    pub fn load_from_env() -> Result<(Self, ConfigSource)> {
        // .env is optional; ignore a missing file.
        let _ = dotenvy::dotenv();

        if let Ok(path_str) = env::var("FEEDEX_CONFIG_PATH")
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load(&path)?;
            info!(path = %path.display(), "loaded feed profiles from file");
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        Ok((
            Self {
                profiles: FeedProfile::builtins(),
            },
            ConfigSource::Builtin,
        ))
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&FeedProfile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }
}
