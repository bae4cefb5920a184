// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingConfig {
    /// Extra junk patterns appended after the built-in table. Each must
    /// contain a `junk` capture group; validated when the cleaner is built.
    pub extra_junk_patterns: Vec<String>,
    /// When false, path-derived album/artist names are left in the title.
    pub strip_album_artist: bool,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            extra_junk_patterns: Vec::new(),
            strip_album_artist: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsConfig {
    pub from_video_title: bool,
    pub from_dirname: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            from_video_title: true,
            from_dirname: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub tagging: TaggingConfig,
    pub plugins: PluginsConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: TUBETAG_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TUBETAG_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
