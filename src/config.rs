//! # Configuration
//!
//! Values the frame loop and its collaborators are built from, stored as TOML in
//! `<config dir>/handtrigger/config.toml`. A missing file is created with the
//! defaults; a missing section or key falls back to its default.
//!
//! ```toml
//! [detection]
//! max_hands = 1
//! detection_confidence = 0.7
//! tracking_confidence = 0.5
//! mirror_input = false
//!
//! [trigger]
//! arming_delay_ms = 3000
//! release_policy = "commit"
//!
//! [action]
//! dry_run = false
//! ```

use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::trigger::{ReleasePolicy, DEFAULT_ARMING_DELAY};

const CONFIG_DIR: &str = "handtrigger";
const CONFIG_FILE: &str = "config.toml";

/// Settings forwarded to the hand landmark collaborator
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Hands tracked at once; only a single hand is supported
    pub max_hands: usize,
    /// Minimum score for a hand to count as detected
    pub detection_confidence: f32,
    /// Minimum score to keep tracking a detected hand between frames
    pub tracking_confidence: f32,
    /// Mirror incoming landmarks horizontally (`x -> 1 - x`)
    pub mirror_input: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            detection_confidence: 0.7,
            tracking_confidence: 0.5,
            mirror_input: false,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    /// Continuous hold required before the action commits
    pub arming_delay_ms: u64,
    pub release_policy: ReleasePolicy,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            arming_delay_ms: DEFAULT_ARMING_DELAY.as_millis() as u64,
            release_policy: ReleasePolicy::Commit,
        }
    }
}

impl TriggerConfig {
    pub fn arming_delay(&self) -> Duration {
        Duration::from_millis(self.arming_delay_ms)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct ActionConfig {
    /// Log committed actions instead of running them
    pub dry_run: bool,
    /// Replaces the platform shutdown command, program first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub trigger: TriggerConfig,
    pub action: ActionConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| eyre!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| eyre!("Failed to serialize config: {}", e))
    }

    pub fn validate(&self) -> Result<()> {
        let detection = &self.detection;
        if detection.max_hands != 1 {
            return Err(eyre!(
                "max_hands must be 1, got {}",
                detection.max_hands
            ));
        }
        for (name, value) in [
            ("detection_confidence", detection.detection_confidence),
            ("tracking_confidence", detection.tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(eyre!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if self.trigger.arming_delay_ms == 0 {
            return Err(eyre!("arming_delay_ms must be greater than 0"));
        }
        if let Some(command) = &self.action.command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(eyre!("action.command must name a program"));
            }
        }
        Ok(())
    }

    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("Could not determine config directory, using current directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        path
    }

    /// Load the config at `path`, writing the defaults there first if it is missing
    pub async fn load_or_create(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
        {
            info!("No config at {}, writing defaults", path.display());
            let config = AppConfig::default();
            config.save(path).await?;
            return Ok(config);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }
        let content = self.to_toml_string()?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write config file {}: {}", path.display(), e))?;
        Ok(())
    }
}
