// SPDX-License-Identifier: GPL-3.0-or-later

//! Path-derived metadata under the Artist/Album/Track folder convention.
//!
//! The parent directory of a file names its album and the grandparent
//! names its artist. Decomposition is pure string work over the path; no
//! filesystem access happens here.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while decomposing a file path
#[derive(Debug, Error)]
pub enum PathMetadataError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Insufficient path depth for '{path}': missing {missing}")]
    InsufficientDepth { path: String, missing: &'static str },
}

/// Result type for path metadata operations
pub type PathMetadataResult<T> = Result<T, PathMetadataError>;

/// Metadata derived from a file's location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Filename without its extension; the raw video title.
    pub stem: String,
    /// Parent directory name.
    pub album: String,
    /// Grandparent directory name.
    pub artist: String,
}

impl PathParts {
    /// Decompose a path into stem, album, and artist.
    ///
    /// A path with fewer than two named ancestor directories is reported
    /// as an error rather than defaulting to empty names.
    pub fn from_path(path: impl AsRef<Path>) -> PathMetadataResult<Self> {
        let path = path.as_ref();

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PathMetadataError::InvalidFilename(path.display().to_string()))?;

        let album = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|s| s.to_str());
        let artist = path
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|s| s.to_str());

        let missing = match (album, artist) {
            (Some(_), Some(_)) => None,
            (Some(_), None) => Some("artist directory"),
            (None, _) => Some("artist and album directories"),
        };
        if let Some(missing) = missing {
            return Err(PathMetadataError::InsufficientDepth {
                path: path.display().to_string(),
                missing,
            });
        }

        Ok(Self {
            stem: stem.to_string(),
            album: album.unwrap_or_default().to_string(),
            artist: artist.unwrap_or_default().to_string(),
        })
    }
}
