//! Configuration for the box office.
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use boxoffice_core::EXPORT_TIMESTAMP_FORMAT;

use crate::error::{BoxOfficeError, Result};

/// Configuration for the box office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOfficeConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Seed file imported when the events table is empty.
    pub seed_path: Option<PathBuf>,
    /// Built-in administrator account.
    pub admin: AdminConfig,
    /// Reject bookings for weekdays earlier than today.
    pub enforce_booking_days: bool,
    /// chrono format string for timestamps in exported reports.
    pub timestamp_format: String,
}

impl Default for BoxOfficeConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("application.db"),
            seed_path: None,
            admin: AdminConfig::default(),
            enforce_booking_days: true,
            timestamp_format: EXPORT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl BoxOfficeConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoxOfficeError::Config(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| BoxOfficeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}

/// Credentials of the built-in administrator.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "Admin321".to_string(),
        }
    }
}

impl AdminConfig {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
