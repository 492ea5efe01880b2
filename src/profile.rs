// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Persistent Profile

//! Player profile and the persistence port it is saved through.
//!
//! The stored blob is JSON: `{currency, bestDistance, bestHeight,
//! upgradeLevels}`. Saves written by the first browser release used `money`
//! and `upgrades`; both are accepted as aliases. Missing fields default to
//! zero and a blob that cannot be decoded is treated as no save at all.

use serde::{Deserialize, Serialize};

use crate::types::UpgradeLevels;

pub const SAVE_KEY: &str = "starship_save";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("profile could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("saved profile is corrupt: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Storage(String),
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "money")]
    pub currency: u64,
    pub best_distance: f64,
    pub best_height: f64,
    #[serde(alias = "upgrades")]
    pub upgrade_levels: UpgradeLevels,
}

impl Profile {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::Encode)
    }

    pub fn from_json(blob: &str) -> Result<Self, PersistenceError> {
        let mut profile: Profile = serde_json::from_str(blob).map_err(PersistenceError::Decode)?;
        profile.best_distance = sanitize_record(profile.best_distance);
        profile.best_height = sanitize_record(profile.best_height);
        Ok(profile)
    }

    /// Load from `store`, falling back to a fresh profile when nothing usable
    /// is stored.
    pub fn restore<S: ProfileStore + ?Sized>(store: &S) -> Self {
        match store.load() {
            Ok(Some(blob)) => Self::from_json(&blob).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable save");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "profile storage unavailable, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save<S: ProfileStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistenceError> {
        let blob = self.to_json()?;
        store.save(&blob)
    }
}

fn sanitize_record(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Persistence port
// ---------------------------------------------------------------------------

/// Opaque blob storage for the profile. Writes are synchronous.
pub trait ProfileStore {
    fn load(&self) -> Result<Option<String>, PersistenceError>;
    fn save(&mut self, blob: &str) -> Result<(), PersistenceError>;
}

/// In-process store, used natively and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self { blob: Some(blob.into()), writes: 0 }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
