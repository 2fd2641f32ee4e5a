//! Client configuration.
//!
//! Defaults point at a backend on `localhost:8000` and keep the token under
//! the OS data directory. The binary overrides these from flags and the
//! `STOCKDESK_*` environment variables.

use std::path::PathBuf;

use stockdesk_api::DEFAULT_API_URL;
use stockdesk_observability::LogFormat;

use crate::session::{FileTokenStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    /// Directory holding the persisted token. `None` means the OS default.
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    pub fn token_store(&self) -> Result<FileTokenStore, StoreError> {
        match &self.data_dir {
            Some(dir) => Ok(FileTokenStore::new(dir)),
            None => FileTokenStore::in_default_dir(),
        }
    }
}
