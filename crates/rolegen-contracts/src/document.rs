//! Document formats accepted for restriction and snapshot files.
//!
//! The format is picked from the file extension, so `restrictions.yaml`,
//! `restrictions.json` and `restrictions.toml` all load the same schema.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{RolegenError, RolegenResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from `path`'s extension (case-insensitive).
    ///
    /// Returns `ConfigFileError` for a missing or unsupported extension.
    pub fn from_path(path: &Path) -> RolegenResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(RolegenError::ConfigFileError {
                path: path.display().to_string(),
                reason: format!(
                    "unsupported file extension {:?}; expected yaml, yml, json or toml",
                    other.unwrap_or("")
                ),
            }),
        }
    }

    /// Deserialize `contents` in this format.
    ///
    /// `origin` names the source in the error message.
    pub fn parse<T: DeserializeOwned>(self, contents: &str, origin: &str) -> RolegenResult<T> {
        let parsed = match self {
            Self::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| RolegenError::ConfigFileError {
            path: origin.to_string(),
            reason: format!("failed to parse {self} document: {reason}"),
        })
    }

    /// Read and deserialize the file at `path`, choosing the format from its
    /// extension.
    pub fn load<T: DeserializeOwned>(path: &Path) -> RolegenResult<T> {
        let format = Self::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|e| RolegenError::ConfigFileError {
            path: path.display().to_string(),
            reason: if e.kind() == std::io::ErrorKind::NotFound {
                "file not found".to_string()
            } else {
                format!("failed to read file: {}", e)
            },
        })?;
        format.parse(&contents, &path.display().to_string())
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        };
        f.write_str(name)
    }
}
