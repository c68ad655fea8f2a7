//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;

use crate::ai::gemini;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to listen on. `PORT`, default 5000.
    pub port: u16,
    /// Path of the JSON data file. `DATA_FILE`, default `data/models.json`.
    pub data_file: PathBuf,
    /// Key for the generative model API. `GEMINI_API_KEY`; without it the
    /// AI endpoints serve fallback content.
    pub gemini_api_key: Option<String>,
    /// Model name. `GEMINI_MODEL`, defaults to the production model.
    pub gemini_model: String,
    /// Directory of prebuilt client assets to serve. `STATIC_DIR`;
    /// nothing is served when unset.
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(5000),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/models.json")),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        }
    }
}
