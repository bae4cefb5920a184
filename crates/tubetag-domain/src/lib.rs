// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Value Objects & IDs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Entities
// ============================================================================

/// One library item as seen by the host during an import task.
///
/// Tag fields use the host's convention: an empty string means the field
/// has no value yet and may be filled by a tagging plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportItem {
    pub id: ItemId,
    pub path: String,
    pub title: String,
    pub album: String,
    pub artist: String,
}

impl ImportItem {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            path: path.into(),
            title: String::new(),
            album: String::new(),
            artist: String::new(),
        }
    }

    pub fn needs_title(&self) -> bool {
        self.title.is_empty()
    }

    pub fn needs_album(&self) -> bool {
        self.album.is_empty()
    }

    pub fn needs_artist(&self) -> bool {
        self.artist.is_empty()
    }
}

// ============================================================================
// Domain Validation
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

impl Validate for ImportItem {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.path.trim().is_empty() {
            errors.push(ValidationError {
                field: "path",
                message: "path cannot be empty".into(),
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Domain Events (lightweight scaffolding)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent<TPayload> {
    pub name: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub payload: TPayload,
}

impl<TPayload> DomainEvent<TPayload> {
    pub fn new(name: &'static str, payload: TPayload) -> Self {
        Self {
            name,
            occurred_at: Utc::now(),
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRetaggedPayload {
    pub item_id: ItemId,
    pub path: String,
    pub title: String,
    pub album: String,
    pub artist: String,
}

pub type ItemRetagged = DomainEvent<ItemRetaggedPayload>;

// ============================================================================
// Tests
// ============================================================================
