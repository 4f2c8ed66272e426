use crate::domain::campaign;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings read from `config.json`. Every key is optional.
///
/// ```json
/// {
///   "recipient": "nh170260-1@nonghyup.com",
///   "launch_mail_client": true,
///   "copy_to_clipboard": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Mailbox the application is addressed to.
    pub recipient: String,
    /// Printable form opened from the landing screen.
    pub form_download_url: String,
    /// Start the system mail client with the composed message.
    pub launch_mail_client: bool,
    /// Also place the message body on the clipboard.
    pub copy_to_clipboard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recipient: campaign::RECIPIENT.to_string(),
            form_download_url: campaign::FORM_DOWNLOAD_URL.to_string(),
            launch_mail_client: true,
            copy_to_clipboard: false,
        }
    }
}

impl AppConfig {
    /// `<config dir>/loan-intake/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("loan-intake").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, otherwise the default file if it exists.
    ///
    /// A missing default file yields the built-in defaults. An explicit path
    /// must exist and parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}
