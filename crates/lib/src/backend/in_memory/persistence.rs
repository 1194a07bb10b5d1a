//! Persistence operations for the InMemory store
//!
//! This module handles serialization and file I/O for saving/loading
//! the in-memory document to/from JSON files.

use std::{path::Path, sync::RwLock};

use serde::{Deserialize, Deserializer, Serialize};

use super::InMemory;
use crate::{Error, Result, backend::errors::ConfigError, tree::ConfigNode};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// On-disk layout of an InMemory store
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    root: ConfigNode,
}

/// Saves the whole document to a specified file as JSON.
pub(crate) fn save_to_file<P: AsRef<Path>>(store: &InMemory, path: P) -> Result<()> {
    let serializable = SerializableStore {
        version: PERSISTENCE_VERSION,
        root: store.snapshot(),
    };

    let json = serde_json::to_string_pretty(&serializable)
        .map_err(|e| -> Error { ConfigError::SerializationFailed { source: e }.into() })?;
    std::fs::write(path, json).map_err(|e| -> Error { ConfigError::FileIo { source: e }.into() })
}

/// Loads a document from a specified JSON file.
///
/// If the file does not exist, a new, empty `InMemory` store is returned.
pub(crate) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemory> {
    match std::fs::read_to_string(path) {
        Ok(json) => {
            let serializable: SerializableStore = serde_json::from_str(&json)
                .map_err(|e| -> Error { ConfigError::SerializationFailed { source: e }.into() })?;
            if !matches!(serializable.root, ConfigNode::Map(_)) {
                return Err(ConfigError::Backend {
                    reason: format!(
                        "stored document root is a {}, expected a map",
                        serializable.root.type_name()
                    ),
                }
                .into());
            }
            Ok(InMemory {
                root: RwLock::new(serializable.root),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InMemory::new()),
        Err(e) => Err(ConfigError::FileIo { source: e }.into()),
    }
}
