//! Configuration management for Usul

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::gemini::GeminiModel;
use crate::theme::Theme;

/// Largest quiz the generator is asked for
pub const MAX_QUIZ_QUESTIONS: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Gemini model identifier
    pub model: String,

    /// API base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Questions per quiz
    pub quiz_questions: usize,

    /// Below this terminal width the sidebar becomes an overlay
    pub narrow_width: u16,

    /// Per-request timeout for the generation service
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Emerald".to_string(),
            custom_theme: None,
            model: GeminiModel::default().model_id().to_string(),
            endpoint: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            quiz_questions: 3,
            narrow_width: 100,
            request_timeout_secs: 120,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path, writing defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Write configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "usul").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "usul").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Log file written while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("usul.log"))
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        self.custom_theme.clone().unwrap_or_else(Theme::emerald)
    }

    /// Parsed model selection
    pub fn gemini_model(&self) -> Result<GeminiModel> {
        self.model.parse().map_err(|e: String| anyhow!(e))
    }

    /// Quiz size kept within 1..=10
    pub fn quiz_size(&self) -> usize {
        self.quiz_questions.clamp(1, MAX_QUIZ_QUESTIONS)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
