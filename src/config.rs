//! Configuration for the Mekon toolkit
//!
//! Settings are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, `$MEKON_CONFIG`, or `~/.mekon/config.toml`)
//! 3. Environment variables (`MEKON_LLM_API_KEY`, `MEKONG_CLI_PATH`, ...)
//!
//! The resulting [`MekonConfig`] is passed explicitly to whatever needs it;
//! there is no process-wide instance.

use crate::error::Result;
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4";
pub const DEFAULT_ENGINE_PATH: &str = "../mekong-cli";
pub const DEFAULT_DATA_DIR: &str = "~/.mekon";

/// Config keys and the environment variables that override them
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("llm_api_url", "MEKON_LLM_API_URL"),
    ("llm_api_key", "MEKON_LLM_API_KEY"),
    ("llm_model", "MEKON_LLM_MODEL"),
    ("engine_path", "MEKONG_CLI_PATH"),
    ("vercel_token", "VERCEL_TOKEN"),
    ("cloudflare_token", "CLOUDFLARE_TOKEN"),
    ("data_dir", "MEKON_DATA_DIR"),
];

/// Resolved toolkit configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MekonConfig {
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    /// Location of the mekong-cli orchestration engine checkout
    pub engine_path: String,
    pub vercel_token: String,
    pub cloudflare_token: String,
    pub data_dir: String,
}

impl MekonConfig {
    /// Load from the given file (or the default location) and the process environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let lookup = |key: &str| env::var(key).ok();
        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_config_file(&lookup));
        Self::from_sources(Some(&path), lookup)
    }

    /// Build from an optional TOML file and an injectable environment lookup
    pub fn from_sources<F>(file: Option<&Path>, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .set_default("llm_api_url", DEFAULT_LLM_API_URL)?
            .set_default("llm_api_key", "")?
            .set_default("llm_model", DEFAULT_LLM_MODEL)?
            .set_default("engine_path", DEFAULT_ENGINE_PATH)?
            .set_default("vercel_token", "")?
            .set_default("cloudflare_token", "")?
            .set_default("data_dir", DEFAULT_DATA_DIR)?;

        if let Some(path) = file {
            debug!("Reading config file: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        for (key, var) in ENV_OVERRIDES {
            let value = env_lookup(var).filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Data directory with `~` expanded
    pub fn data_path(&self) -> PathBuf {
        expand_home(&self.data_dir)
    }

    /// Engine checkout location, made absolute against the working directory
    pub fn engine_location(&self) -> PathBuf {
        let path = expand_home(&self.engine_path);
        if path.is_absolute() {
            path
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(&path))
                .unwrap_or(path)
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_path().join("revenue").join("ledger.json")
    }

    pub fn activity_log_path(&self) -> PathBuf {
        self.data_path().join("logs").join("activity.jsonl")
    }

    /// Log file used while the dashboard owns the terminal
    pub fn dash_log_path(&self) -> PathBuf {
        self.data_path().join("logs").join("dash.log")
    }

    pub fn has_llm_key(&self) -> bool {
        !self.llm_api_key.is_empty()
    }

    /// API key reduced to its last four characters, if one is set
    pub fn masked_api_key(&self) -> Option<String> {
        if !self.has_llm_key() {
            return None;
        }
        let tail: String = {
            let chars: Vec<char> = self.llm_api_key.chars().collect();
            chars[chars.len().saturating_sub(4)..].iter().collect()
        };
        Some(format!("***{}", tail))
    }

    /// Create the data directory if missing
    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let path = self.data_path();
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }
}

impl Default for MekonConfig {
    fn default() -> Self {
        Self {
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_api_key: String::new(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            engine_path: DEFAULT_ENGINE_PATH.to_string(),
            vercel_token: String::new(),
            cloudflare_token: String::new(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

fn default_config_file<F: Fn(&str) -> Option<String>>(env_lookup: &F) -> PathBuf {
    env_lookup("MEKON_CONFIG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| expand_home(DEFAULT_DATA_DIR).join("config.toml"))
}

fn expand_home(raw: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if raw == "~" {
        home()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home().join(rest)
    } else {
        PathBuf::from(raw)
    }
}
