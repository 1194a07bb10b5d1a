//! Deployment settings for a store stack.
//!
//! Reserved field names are a deployment convention: every process sharing a
//! backend must agree on them. [`StoreSettings`] collects them in one
//! serde-loadable place, defaulting to the names in [`crate::constants`].
//!
//! ```json
//! {
//!   "identifier_field": "_uuid",
//!   "fingerprint_field": "_olockHash",
//!   "version_field": "_version",
//!   "extra_ignored_fields": ["lastModified"]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::{Result, constants};

/// Reserved field names and fingerprint exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Field whose UUID value makes a map referable
    pub identifier_field: String,
    /// Field carrying the optimistic-lock fingerprint
    pub fingerprint_field: String,
    /// Optional version counter, never fingerprinted
    pub version_field: Option<String>,
    /// Additional fields never included in fingerprints
    pub extra_ignored_fields: BTreeSet<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            identifier_field: constants::IDENTIFIER_FIELD.to_string(),
            fingerprint_field: constants::FINGERPRINT_FIELD.to_string(),
            version_field: Some(constants::VERSION_FIELD.to_string()),
            extra_ignored_fields: BTreeSet::new(),
        }
    }
}

impl StoreSettings {
    /// Loads settings from a JSON file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Every field excluded from fingerprint computation.
    ///
    /// Always contains the fingerprint field itself.
    pub fn ignored_fields(&self) -> BTreeSet<String> {
        let mut ignored = self.extra_ignored_fields.clone();
        ignored.insert(self.fingerprint_field.clone());
        if let Some(version) = &self.version_field {
            ignored.insert(version.clone());
        }
        ignored
    }
}
