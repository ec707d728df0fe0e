use std::{env, path::PathBuf};

use crate::constants::{
    DEFAULT_CALL_GAS, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE_NAME, DEFAULT_LOG_DIR,
    DEFAULT_LOG_LEVEL, DEFAULT_LOG_MODE, LOG_FILE_NAME,
};

/// Settings taken from the environment (and a `.env` file, when the caller
/// loads one first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub config_dir: String,
    pub config_file_name: String,
    pub log_mode: String,
    pub log_level: String,
    pub log_file_path: String,
    /// Gas available to a relayed call
    pub call_gas: u64,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self {
            config_dir: env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()),
            config_file_name: env::var("CONFIG_FILE_NAME")
                .unwrap_or_else(|_| DEFAULT_CONFIG_FILE_NAME.to_string()),
            log_mode: env::var("LOG_MODE").unwrap_or_else(|_| DEFAULT_LOG_MODE.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            log_file_path: env::var("LOG_FILE_PATH")
                .unwrap_or_else(|_| format!("{}/{}", DEFAULT_LOG_DIR, LOG_FILE_NAME)),
            call_gas: env::var("DEFAULT_CALL_GAS")
                .ok()
                .and_then(|gas| gas.parse().ok())
                .unwrap_or(DEFAULT_CALL_GAS),
        }
    }

    pub fn config_file_path(&self) -> PathBuf {
        PathBuf::from(&self.config_dir).join(&self.config_file_name)
    }
}
