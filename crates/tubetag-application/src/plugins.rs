// SPDX-License-Identifier: GPL-3.0-or-later

//! Tagging plugins and the registry the host drives them through.
//!
//! The host application invokes the registry once per library item at
//! import time, before persistence; nothing here assumes anything else
//! about when or how often that happens. Plugins only fill fields the
//! host reports as empty and never overwrite existing tags.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};
use tubetag_config::AppConfig;
use tubetag_domain::{DomainEvent, ImportItem, ItemRetaggedPayload, Validate};

use crate::events::{EventPublisher, InMemoryEventBus};
use crate::path_metadata::{PathMetadataError, PathParts};
use crate::title_cleaning::{CleanerError, TitleCleaner};

/// Errors a plugin can report for a single item.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    PathMetadata(#[from] PathMetadataError),
}

/// Result type for per-item plugin work.
pub type PluginResult<T> = Result<T, PluginError>;

/// Host-defined extension point: one callback per library item.
///
/// Returns whether the item was modified. A failing plugin must leave the
/// item untouched.
pub trait TaggingPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_import_item(&self, item: &mut ImportItem) -> PluginResult<bool>;
}

/// Fills an empty title from the filename stem, with junk phrases and
/// path-derived album/artist names stripped.
pub struct FromVideoTitlePlugin {
    cleaner: TitleCleaner,
}

impl FromVideoTitlePlugin {
    pub fn new(cleaner: TitleCleaner) -> Self {
        Self { cleaner }
    }
}

impl TaggingPlugin for FromVideoTitlePlugin {
    fn name(&self) -> &'static str {
        "from_video_title"
    }

    fn on_import_item(&self, item: &mut ImportItem) -> PluginResult<bool> {
        if !item.needs_title() {
            return Ok(false);
        }

        let parts = PathParts::from_path(Path::new(&item.path))?;
        let title = self.cleaner.clean(&parts.stem, &parts.album, &parts.artist);
        if title.is_empty() {
            return Ok(false);
        }

        debug!(
            target: "plugins",
            stem = %parts.stem,
            title = %title,
            "derived title from filename stem"
        );
        item.title = title;
        Ok(true)
    }
}

/// Fills an empty album from the parent directory name and an empty
/// artist from the grandparent directory name.
pub struct FromDirnamePlugin;

impl TaggingPlugin for FromDirnamePlugin {
    fn name(&self) -> &'static str {
        "from_dirname"
    }

    fn on_import_item(&self, item: &mut ImportItem) -> PluginResult<bool> {
        if !item.needs_album() && !item.needs_artist() {
            return Ok(false);
        }

        let parts = PathParts::from_path(Path::new(&item.path))?;
        let mut changed = false;

        if item.needs_album() && !parts.album.is_empty() {
            item.album = parts.album.clone();
            changed = true;
        }
        if item.needs_artist() && !parts.artist.is_empty() {
            item.artist = parts.artist.clone();
            changed = true;
        }

        if changed {
            debug!(
                target: "plugins",
                album = %item.album,
                artist = %item.artist,
                "derived album/artist from directory names"
            );
        }
        Ok(changed)
    }
}

/// Ordered plugin collection driven once per item.
pub struct PluginRegistry {
    plugins: Vec<Box<dyn TaggingPlugin>>,
    events: InMemoryEventBus,
}

impl PluginRegistry {
    pub fn new(plugins: Vec<Box<dyn TaggingPlugin>>, events: InMemoryEventBus) -> Self {
        Self { plugins, events }
    }

    /// Build the registry with the plugins the configuration enables.
    pub fn from_config(config: &AppConfig) -> Result<Self, CleanerError> {
        let mut plugins: Vec<Box<dyn TaggingPlugin>> = Vec::new();
        if config.plugins.from_video_title {
            let cleaner = TitleCleaner::from_config(&config.tagging)?;
            plugins.push(Box::new(FromVideoTitlePlugin::new(cleaner)));
        }
        if config.plugins.from_dirname {
            plugins.push(Box::new(FromDirnamePlugin));
        }
        Ok(Self::new(plugins, InMemoryEventBus::new()))
    }

    pub fn events(&self) -> &InMemoryEventBus {
        &self.events
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Run every plugin over one item, in registration order.
    ///
    /// A plugin failure is logged and skipped; it never aborts the item or
    /// the surrounding batch. Publishes one `item.retagged` event when any
    /// plugin changed the item. Returns whether anything changed.
    pub fn apply(&self, item: &mut ImportItem) -> bool {
        if let Err(errors) = item.validate() {
            for error in &errors {
                warn!(
                    target: "plugins",
                    field = error.field,
                    message = %error.message,
                    "invalid item skipped"
                );
            }
            return false;
        }

        let mut changed = false;
        for plugin in &self.plugins {
            match plugin.on_import_item(item) {
                Ok(true) => changed = true,
                Ok(false) => {}
                Err(error) => {
                    warn!(
                        target: "plugins",
                        plugin = plugin.name(),
                        path = %item.path,
                        error = %error,
                        "plugin failed for item"
                    );
                }
            }
        }

        if changed {
            let payload = ItemRetaggedPayload {
                item_id: item.id,
                path: item.path.clone(),
                title: item.title.clone(),
                album: item.album.clone(),
                artist: item.artist.clone(),
            };
            self.events.publish(DomainEvent::new("item.retagged", payload));
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PluginRegistry {
        PluginRegistry::from_config(&AppConfig::default()).expect("registry builds")
    }

    #[test]
    fn fills_all_tags_from_path() {
        let mut item = ImportItem::new("library/Artist/Album/Artist - Song [2019].mp3");
        assert!(registry().apply(&mut item));
        assert_eq!(item.title, "Song");
        assert_eq!(item.album, "Album");
        assert_eq!(item.artist, "Artist");
    }

    #[test]
    fn existing_tags_are_never_overwritten() {
        let mut item = ImportItem::new("library/Artist/Album/Song (Official Video).mp3");
        item.title = "Kept Title".into();
        item.artist = "Kept Artist".into();

        assert!(registry().apply(&mut item));
        assert_eq!(item.title, "Kept Title");
        assert_eq!(item.artist, "Kept Artist");
        // Only the missing field was filled.
        assert_eq!(item.album, "Album");
    }

    #[test]
    fn fully_tagged_item_is_untouched_and_unreported() {
        let registry = registry();
        let mut item = ImportItem::new("library/Artist/Album/Song.mp3");
        item.title = "T".into();
        item.album = "A".into();
        item.artist = "R".into();

        assert!(!registry.apply(&mut item));
        assert!(registry.events().is_empty());
    }

    #[test]
    fn invalid_item_is_skipped_without_events() {
        let registry = registry();
        let mut item = ImportItem::new("   ");
        assert!(!registry.apply(&mut item));
        assert!(registry.events().is_empty());
    }

    #[test]
    fn shallow_path_failure_does_not_abort_the_batch() {
        let registry = registry();

        let mut shallow = ImportItem::new("Song (Official Video).mp3");
        assert!(!registry.apply(&mut shallow));
        assert!(shallow.needs_title());

        // The next item still processes normally.
        let mut deep = ImportItem::new("library/Artist/Album/Song (Official Video).mp3");
        assert!(registry.apply(&mut deep));
        assert_eq!(deep.title, "Song");
    }

    #[test]
    fn retagged_event_published_per_changed_item() {
        let registry = registry();
        let mut item = ImportItem::new("library/Artist/Album/Song (Official Video).mp3");
        registry.apply(&mut item);

        let drained = registry.events().drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].name, "item.retagged");
        assert_eq!(drained[0].payload.title, "Song");
        assert_eq!(drained[0].payload.artist, "Artist");
    }

    #[test]
    fn disabled_plugins_are_not_registered() {
        let mut config = AppConfig::default();
        config.plugins.from_video_title = false;
        let registry = PluginRegistry::from_config(&config).expect("registry builds");

        let mut item = ImportItem::new("library/Artist/Album/Song (Official Video).mp3");
        assert!(registry.apply(&mut item));
        assert!(item.needs_title());
        assert_eq!(item.album, "Album");
        assert_eq!(item.artist, "Artist");
    }

    #[test]
    fn title_plugin_strips_path_derived_names() {
        let plugin = FromVideoTitlePlugin::new(TitleCleaner::default());
        let mut item = ImportItem::new("library/Artist/Album/Artist - Song (Album).mp3");
        assert!(plugin.on_import_item(&mut item).expect("plugin runs"));
        assert_eq!(item.title, "Song");
    }

    #[test]
    fn title_plugin_surfaces_depth_error() {
        let plugin = FromVideoTitlePlugin::new(TitleCleaner::default());
        let mut item = ImportItem::new("Song.mp3");
        let err = plugin.on_import_item(&mut item).unwrap_err();
        assert!(matches!(
            err,
            PluginError::PathMetadata(PathMetadataError::InsufficientDepth { .. })
        ));
    }
}
