use crate::bin_path::DEFAULT_BIN_DIR;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "gtesh> ";

/// Startup settings for a session.
#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    pub search_path: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: String::from(DEFAULT_PROMPT),
            search_path: vec![PathBuf::from(DEFAULT_BIN_DIR)],
        }
    }
}
