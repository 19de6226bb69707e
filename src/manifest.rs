//! Version-metadata store backed by a package manifest file.
//!
//! Reads and writes the `version` field of a JSON manifest, preserving key
//! order and the 2-space indent style so the rest of the file survives a
//! round trip untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::FilesConfig;
use crate::error::{AutoVersionError, Result};

pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(root: &Path, files: &FilesConfig) -> Self {
        ManifestStore {
            path: root.join(&files.manifest),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current version string, `0.0.0` when the manifest has no version
    /// field. Missing or malformed manifests abort before any mutation.
    pub fn read_version(&self) -> Result<String> {
        let value = self.read()?;
        Ok(value
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or("0.0.0")
            .to_string())
    }

    /// Write the bumped version back, leaving every other field in place.
    pub fn write_version(&self, version: &str) -> Result<()> {
        let mut value = self.read()?;
        let object = value.as_object_mut().ok_or_else(|| {
            AutoVersionError::manifest(format!(
                "{} is not a JSON object",
                self.path.display()
            ))
        })?;
        object.insert(
            "version".to_string(),
            Value::String(version.to_string()),
        );

        let content = serde_json::to_string_pretty(&value).map_err(|e| {
            AutoVersionError::manifest(format!("cannot serialize manifest: {}", e))
        })?;
        fs::write(&self.path, content + "\n")?;
        Ok(())
    }

    fn read(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AutoVersionError::manifest(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AutoVersionError::manifest(format!("cannot parse {}: {}", self.path.display(), e))
        })
    }
}

/// Write an auxiliary version file; content format follows the extension.
pub fn write_version_file(path: &Path, version: &str) -> Result<()> {
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let value = serde_json::json!({ "version": version });
            serde_json::to_string_pretty(&value).map_err(|e| {
                AutoVersionError::manifest(format!("cannot serialize version file: {}", e))
            })? + "\n"
        }
        _ => format!("{}\n", version),
    };
    fs::write(path, content)?;
    Ok(())
}
