//! Ownership manifest: what steering wrote on earlier runs.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use steering_core::errors::ExecuteError;
use steering_core::Vendor;
use xxhash_rust::xxh3::xxh3_64;

use super::types::OperationKind;
use crate::adapters::paths::to_slash;

const MANIFEST_VERSION: u32 = 1;

/// One generated file or symlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub vendor: Vendor,
    pub kind: OperationKind,
    /// xxh3 of the file content, or of the symlink target string.
    pub hash: String,
}

/// Entries keyed by `/`-separated output path, so serialization is sorted.
/// No timestamps: an unchanged run serializes identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Hex xxh3 digest, as used for incremental change detection.
pub fn hash_content(bytes: &[u8]) -> String {
    format!("{:016x}", xxh3_64(bytes))
}

impl Manifest {
    /// Load from `path`; a missing file is an empty manifest.
    pub fn load(path: &Path) -> Result<Self, ExecuteError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ExecuteError::io(path, e)),
        };
        serde_json::from_str(&text).map_err(|e| ExecuteError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn get(&self, path: &Path) -> Option<&ManifestEntry> {
        self.entries.get(&to_slash(path))
    }

    /// A path is managed when an earlier run recorded the same operation
    /// signature: path, vendor and kind.
    pub fn is_managed(&self, path: &Path, vendor: Vendor, kind: OperationKind) -> bool {
        self.get(path)
            .is_some_and(|entry| entry.vendor == vendor && entry.kind == kind)
    }

    pub fn record(&mut self, path: &Path, entry: ManifestEntry) {
        self.entries.insert(to_slash(path), entry);
    }

    pub fn to_json(&self) -> Result<String, ExecuteError> {
        serde_json::to_string_pretty(self)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ExecuteError::Manifest {
                path: Path::new("<manifest>").to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Write to `path` unless the file already holds identical content.
    /// Returns whether anything was written.
    pub fn save_if_changed(&self, path: &Path) -> Result<bool, ExecuteError> {
        let json = self.to_json()?;
        if fs::read_to_string(path).is_ok_and(|existing| existing == json) {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExecuteError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| ExecuteError::io(path, e))?;
        Ok(true)
    }
}
