//! Profile persistence: the JSON codec for [`ProfileRecord`], the store that
//! owns the `PROFILE` key, and the settings-screen session that keeps an
//! in-memory copy written through to it.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::ProfileRecord;
use crate::settings::{AVATARS, BACKGROUNDS};
use crate::store::{self, SharedStore, StoreError};

pub const PROFILE_KEY: &str = "PROFILE";

/// Longest accepted one-time verification code.
pub const OTP_MAX_LEN: usize = 6;

/// Serialize a record to the stored JSON shape.
pub fn encode(record: &ProfileRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

/// Parse a stored value. Corrupt input decodes to `None`, never an error.
pub fn decode(raw: &str) -> Option<ProfileRecord> {
    match serde_json::from_str::<ProfileRecord>(raw) {
        Ok(mut record) => {
            if !index_in_range(record.avatar_index, AVATARS.len()) {
                record.avatar_index = -1;
            }
            if !index_in_range(record.background_index, BACKGROUNDS.len()) {
                record.background_index = -1;
            }
            Some(record)
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored profile is malformed, using defaults");
            None
        }
    }
}

fn index_in_range(index: i32, len: usize) -> bool {
    index == -1 || usize::try_from(index).is_ok_and(|i| i < len)
}

/// Owner of the `PROFILE` key.
#[derive(Clone)]
pub struct ProfileStore {
    store: SharedStore,
}

impl ProfileStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored profile, or the default record when absent, unreadable or corrupt.
    pub fn load(&self) -> ProfileRecord {
        store::read_or_absent(self.store.as_ref(), PROFILE_KEY)
            .and_then(|raw| decode(&raw))
            .unwrap_or_default()
    }

    /// Overwrite the stored profile with every field of `record`.
    pub fn save(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let raw = encode(record).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        self.store.set(PROFILE_KEY, &raw)
    }

    /// Drop the stored profile and hand back the defaults.
    pub fn reset(&self) -> ProfileRecord {
        store::remove_or_log(self.store.as_ref(), PROFILE_KEY);
        ProfileRecord::default()
    }
}

/// When field edits reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePolicy {
    /// Every setter writes the whole record.
    #[default]
    Immediate,
    /// Setters only mark the session dirty; [`ProfileSession::commit`] writes.
    OnCommit,
}

/// Settings-screen model: a write-through cache of the stored profile.
pub struct ProfileSession {
    store: ProfileStore,
    record: ProfileRecord,
    policy: SavePolicy,
    dirty: bool,
}

impl ProfileSession {
    pub fn mount(store: ProfileStore, policy: SavePolicy) -> Self {
        let record = store.load();
        tracing::info!(verified = record.verified, "profile loaded");
        Self {
            store,
            record,
            policy,
            dirty: false,
        }
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_username(&mut self, username: &str) {
        self.record.username = username.to_string();
        self.changed();
    }

    /// Verification is bound to the exact contact value, so it is dropped.
    pub fn set_email(&mut self, email: &str) {
        self.record.email = email.to_string();
        self.record.verified = false;
        self.changed();
    }

    pub fn set_mobile(&mut self, mobile: &str) {
        self.record.mobile = mobile.to_string();
        self.record.verified = false;
        self.changed();
    }

    pub fn set_avatar(&mut self, index: i32) -> Result<(), ModelError> {
        if !index_in_range(index, AVATARS.len()) {
            return Err(ModelError::Validation(format!("No avatar at index {}", index)));
        }
        self.record.avatar_index = index;
        self.changed();
        Ok(())
    }

    pub fn set_background(&mut self, index: i32) -> Result<(), ModelError> {
        if !index_in_range(index, BACKGROUNDS.len()) {
            return Err(ModelError::Validation(format!("No background at index {}", index)));
        }
        self.record.background_index = index;
        self.changed();
        Ok(())
    }

    /// Accept a one-time code and mark the current contact details verified.
    pub fn confirm_otp(&mut self, code: &str) -> Result<(), ModelError> {
        let code = code.trim();
        if code.is_empty() || code.len() > OTP_MAX_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ModelError::Validation(format!(
                "Verification code must be 1-{} digits",
                OTP_MAX_LEN
            )));
        }
        self.record.verified = true;
        self.changed();
        Ok(())
    }

    /// Write pending edits. A no-op when nothing changed since the last write.
    pub fn commit(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        self.flush()
    }

    /// Purge the stored profile and fall back to defaults.
    pub fn logout(&mut self) {
        self.record = self.store.reset();
        self.dirty = false;
        tracing::info!("profile reset on logout");
    }

    fn changed(&mut self) {
        self.dirty = true;
        if self.policy == SavePolicy::Immediate {
            self.flush();
        }
    }

    fn flush(&mut self) -> bool {
        match self.store.save(&self.record) {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(e) => {
                // Left dirty: the next edit re-sends the full record.
                tracing::warn!(error = %e, "profile save failed");
                false
            }
        }
    }
}
