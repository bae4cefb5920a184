// SPDX-License-Identifier: GPL-3.0-or-later
use tubetag_config::AppConfig;
pub mod events;
pub mod path_metadata;
pub mod plugins;
pub mod title_cleaning;

pub use events::{EventPublisher, InMemoryEventBus};
pub use path_metadata::{PathMetadataError, PathMetadataResult, PathParts};
pub use plugins::{
    FromDirnamePlugin, FromVideoTitlePlugin, PluginError, PluginRegistry, PluginResult,
    TaggingPlugin,
};
pub use title_cleaning::{CleanerError, CleanerResult, TitleCleaner};

use tracing::info;

/// Long-lived application wiring: the loaded configuration plus the
/// plugin registry built from it.
pub struct AppState {
    pub config: AppConfig,
    registry: PluginRegistry,
}

impl AppState {
    pub fn new(config: AppConfig) -> CleanerResult<Self> {
        let registry = PluginRegistry::from_config(&config)?;
        Ok(Self { config, registry })
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn on_start(&self) {
        info!(
            target: "application",
            plugins = self.registry.plugin_count(),
            "application state initialized"
        );
    }
}
