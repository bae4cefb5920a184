// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch CLI over the tagging plugins.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubetag_application::{AppState, TitleCleaner};
use tubetag_config::{load as load_config, TelemetryConfig};
use tubetag_domain::ImportItem;

/// Top-level CLI for the tubetag tagger.
#[derive(Debug, Parser)]
#[command(name = "tubetag")]
#[command(about = "Infer missing music tags from video-site download paths", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fill missing tags for files laid out as Artist/Album/Track and
    /// print each item as a JSON line.
    Tag {
        /// Audio file paths to process.
        #[arg(required = true)]
        paths: Vec<String>,

        /// Existing title; only valid with a single path and never
        /// overwritten.
        #[arg(long, default_value = "")]
        title: String,

        /// Existing album; a non-empty value is never overwritten.
        #[arg(long, default_value = "")]
        album: String,

        /// Existing artist; a non-empty value is never overwritten.
        #[arg(long, default_value = "")]
        artist: String,
    },

    /// Clean a raw filename stem and print the resulting title.
    Clean {
        /// Filename stem (no extension).
        stem: String,

        /// Album name to strip from the stem.
        #[arg(long, default_value = "")]
        album: String,

        /// Artist name to strip from the stem.
        #[arg(long, default_value = "")]
        artist: String,
    },
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry);

    let state = AppState::new(config)?;
    state.on_start();

    match cli.command {
        CliCommand::Tag {
            paths,
            title,
            album,
            artist,
        } => {
            let items = run_tag(&state, &paths, &title, &album, &artist)?;
            for item in &items {
                println!("{}", serde_json::to_string(item)?);
            }
        }
        CliCommand::Clean {
            stem,
            album,
            artist,
        } => {
            let cleaner = TitleCleaner::from_config(&state.config.tagging)?;
            println!("{}", cleaner.clean(&stem, &album, &artist));
        }
    }

    Ok(())
}

/// Build one item per path, seed it with any host-supplied tags, and run
/// the plugin registry over each. Per-item plugin failures are logged by
/// the registry and never abort the batch.
///
/// A title seed is per-track data, so it is refused for multi-path
/// batches; album/artist seeds legitimately apply to every path.
fn run_tag(
    state: &AppState,
    paths: &[String],
    title: &str,
    album: &str,
    artist: &str,
) -> Result<Vec<ImportItem>> {
    if paths.len() > 1 && !title.is_empty() {
        bail!(
            "--title applies to a single path, but {} paths were given",
            paths.len()
        );
    }

    let registry = state.registry();
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let mut item = ImportItem::new(path.clone());
        item.title = title.to_string();
        item.album = album.to_string();
        item.artist = artist.to_string();
        registry.apply(&mut item);
        items.push(item);
    }

    let retagged = registry.events().drain().len();
    info!(
        target: "cli",
        total = items.len(),
        retagged,
        "tagging complete"
    );
    Ok(items)
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let fmt_layer = fmt::layer().with_target(true).with_level(true);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(telemetry.log_level.clone()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tubetag_config::AppConfig;

    fn state() -> AppState {
        AppState::new(AppConfig::default()).expect("state builds")
    }

    #[test]
    fn verify_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_clean_subcommand() {
        let cli = Cli::try_parse_from([
            "tubetag",
            "clean",
            "Song (Official Video)",
            "--artist",
            "Artist",
        ])
        .expect("args parse");
        match cli.command {
            CliCommand::Clean { stem, album, artist } => {
                assert_eq!(stem, "Song (Official Video)");
                assert_eq!(album, "");
                assert_eq!(artist, "Artist");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn tag_requires_at_least_one_path() {
        assert!(Cli::try_parse_from(["tubetag", "tag"]).is_err());
    }

    #[test]
    fn run_tag_fills_items_from_a_real_tree() {
        let root = tempfile::tempdir().expect("temp dir");
        let album_dir = root.path().join("Daft Punk").join("Discovery");
        fs::create_dir_all(&album_dir).expect("create tree");
        let file = album_dir.join("One More Time (Official Video).mp3");
        fs::write(&file, b"").expect("create file");

        let paths = vec![file.display().to_string()];
        let items = run_tag(&state(), &paths, "", "", "").expect("batch runs");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "One More Time");
        assert_eq!(items[0].album, "Discovery");
        assert_eq!(items[0].artist, "Daft Punk");
    }

    #[test]
    fn run_tag_keeps_seeded_tags() {
        let paths = vec!["library/Artist/Album/Song (Official Video).mp3".to_string()];
        let items = run_tag(&state(), &paths, "Seeded", "", "").expect("batch runs");

        assert_eq!(items[0].title, "Seeded");
        assert_eq!(items[0].album, "Album");
        assert_eq!(items[0].artist, "Artist");
    }

    #[test]
    fn run_tag_survives_shallow_paths() {
        let paths = vec![
            "Song.mp3".to_string(),
            "library/Artist/Album/Other Song [2019].mp3".to_string(),
        ];
        let items = run_tag(&state(), &paths, "", "", "").expect("batch runs");

        assert_eq!(items.len(), 2);
        assert!(items[0].needs_title());
        assert_eq!(items[1].title, "Other Song");
    }

    #[test]
    fn run_tag_rejects_shared_title_for_multiple_paths() {
        let paths = vec![
            "library/Artist/Album/One.mp3".to_string(),
            "library/Artist/Album/Two.mp3".to_string(),
        ];
        let err = run_tag(&state(), &paths, "Same Title", "", "").unwrap_err();
        assert!(err.to_string().contains("--title applies to a single path"));

        // Album/artist seeds still apply across the batch.
        let items = run_tag(&state(), &paths, "", "Seeded Album", "").expect("batch runs");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.album == "Seeded Album"));
    }
}
