// SPDX-License-Identifier: GPL-3.0-or-later

//! Title cleaning for filenames downloaded from video-sharing sites.
//!
//! Raw video titles carry annotations that have nothing to do with the
//! song name: "(Official Video)", "{Audio}", "[ New 2019 ]", and often
//! the album or artist name the uploader prepended. Cleaning runs as an
//! ordered reduction over the stem:
//! 1. Junk-phrase removal (fixed pattern table, first match per pattern).
//! 2. Separator trim.
//! 3. Album/artist substring removal (names supplied by path inspection).
//! 4. Separator trim.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tubetag_config::TaggingConfig;

/// Errors raised while building a [`TitleCleaner`] from configured patterns.
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("Invalid junk pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Junk pattern '{0}' has no `junk` capture group")]
    MissingJunkGroup(String),
}

/// Result type for cleaner construction.
pub type CleanerResult<T> = Result<T, CleanerError>;

lazy_static! {
    // Ordered most-specific-first so a bare year never claims text that a
    // bracketed qualifier should own. Each pattern names its removable span
    // with a `junk` group because a match may include surrounding context.
    static ref BUILTIN_JUNK_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?P<junk>[\(\[\{]\s*(?:Official\s)?(?:Music\s)?Video\s*[\)\]\}])")
            .expect("valid video junk regex"),
        Regex::new(r"(?i)(?P<junk>[\(\[\{]\s*(?:Official\s)?Audio\s*[\)\]\}])")
            .expect("valid audio junk regex"),
        Regex::new(r"(?i)(?P<junk>[\(\[\{]\s*(?:Official\s)?Lyrics?(?:\sVideo)?\s*[\)\]\}])")
            .expect("valid lyrics junk regex"),
        Regex::new(r"(?i)(?P<junk>[\(\[\{]\s*Full\sAlbum(?:\sStream)\s*[\)\]\}])")
            .expect("valid full album junk regex"),
        Regex::new(r"(?i)(?P<junk>[\(\[\{]\s*(?:New\s)?\d{4}\s*[\)\]\}])")
            .expect("valid year junk regex"),
    ];

    // Leading/trailing dash, underscore, or pipe left over after junk
    // removal, with at most one whitespace character on either side.
    static ref LEADING_SEPARATOR: Regex =
        Regex::new(r"^\s?[-_|]\s?(?P<title>.+)$").expect("valid leading separator regex");
    static ref TRAILING_SEPARATOR: Regex =
        Regex::new(r"^(?P<title>.+)\s?[-_|]\s?$").expect("valid trailing separator regex");
}

/// Pattern-driven title cleaner.
///
/// Holds an immutable, ordered junk-pattern list fixed at construction
/// time; there is no hidden global table.
#[derive(Debug, Clone)]
pub struct TitleCleaner {
    patterns: Vec<Regex>,
    strip_album_artist: bool,
}

impl Default for TitleCleaner {
    fn default() -> Self {
        Self {
            patterns: BUILTIN_JUNK_PATTERNS.clone(),
            strip_album_artist: true,
        }
    }
}

impl TitleCleaner {
    /// Build a cleaner from the built-in table plus any configured extras.
    ///
    /// Extra patterns are appended after the built-ins so the built-in
    /// ordering guarantees still hold. A pattern that does not compile or
    /// lacks a `junk` capture group is a construction error, not a skip.
    pub fn from_config(config: &TaggingConfig) -> CleanerResult<Self> {
        let mut patterns = BUILTIN_JUNK_PATTERNS.clone();
        for raw in &config.extra_junk_patterns {
            patterns.push(compile_junk_pattern(raw)?);
        }
        Ok(Self {
            patterns,
            strip_album_artist: config.strip_album_artist,
        })
    }

    /// Build a cleaner from an explicit pattern list.
    pub fn with_patterns(patterns: Vec<Regex>, strip_album_artist: bool) -> CleanerResult<Self> {
        for pattern in &patterns {
            if !has_junk_group(pattern) {
                return Err(CleanerError::MissingJunkGroup(pattern.as_str().to_string()));
            }
        }
        Ok(Self {
            patterns,
            strip_album_artist,
        })
    }

    /// Clean a filename stem into a track title. Never fails: with no
    /// matching pattern and no album/artist occurrence the result is the
    /// input with separators and whitespace trimmed.
    ///
    /// `album` and `artist` come from path inspection and may be empty,
    /// in which case their removal is a no-op.
    pub fn clean(&self, stem: &str, album: &str, artist: &str) -> String {
        let title = self.remove_junk(stem);
        if self.strip_album_artist {
            remove_album_artist(&title, album, artist)
        } else {
            title
        }
    }

    /// Remove the first match of each junk pattern, in table order. Later
    /// patterns scan the already-updated string. Single pass per pattern;
    /// a second occurrence of the same junk phrase survives.
    fn remove_junk(&self, stem: &str) -> String {
        let mut title = stem.to_string();
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(&title) {
                if let Some(junk) = caps.name("junk") {
                    title.replace_range(junk.range(), "");
                }
            }
        }
        strip_separators(&title)
    }
}

/// Remove album/artist occurrences: parenthesized forms first, then bare
/// substrings, each removed everywhere it appears. Matching is literal and
/// case-sensitive; empty names are skipped.
fn remove_album_artist(title: &str, album: &str, artist: &str) -> String {
    let mut needles = Vec::with_capacity(4);
    if !album.is_empty() {
        needles.push(format!("({album})"));
    }
    if !artist.is_empty() {
        needles.push(format!("({artist})"));
    }
    if !album.is_empty() {
        needles.push(album.to_string());
    }
    if !artist.is_empty() {
        needles.push(artist.to_string());
    }

    let mut result = title.to_string();
    for needle in &needles {
        result = result.replace(needle.as_str(), "");
    }
    strip_separators(&result)
}

/// Strip one leading and one trailing separator, then surrounding
/// whitespace. One application per side, never a fixed-point loop:
/// "--Song--" comes out as "-Song-".
fn strip_separators(input: &str) -> String {
    let mut stripped = input.to_string();
    for pattern in [&*LEADING_SEPARATOR, &*TRAILING_SEPARATOR] {
        if let Some(caps) = pattern.captures(&stripped) {
            if let Some(title) = caps.name("title") {
                stripped = title.as_str().to_string();
            }
        }
    }
    stripped.trim().to_string()
}

fn compile_junk_pattern(raw: &str) -> CleanerResult<Regex> {
    let pattern = Regex::new(raw).map_err(|source| CleanerError::InvalidPattern {
        pattern: raw.to_string(),
        source,
    })?;
    if !has_junk_group(&pattern) {
        return Err(CleanerError::MissingJunkGroup(raw.to_string()));
    }
    Ok(pattern)
}

fn has_junk_group(pattern: &Regex) -> bool {
    pattern.capture_names().flatten().any(|name| name == "junk")
}
