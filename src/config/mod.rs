//! Configuration management for padnav
//!
//! Handles loading, parsing, and hot-reloading of YAML configuration files.
//! Every section and field is optional; missing values take the defaults at
//! the bottom of this file.

pub mod watcher;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::host::AndroidTvMode;
use crate::nav::ScrollBehavior;

pub use watcher::{ConfigReload, ConfigWatcher};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PadnavConfig {
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_pad: Option<VirtualPadConfig>,
}

/// Frame polling configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Stop self-rescheduling; an external driver calls `force_poll`
    #[serde(default)]
    pub manual: bool,
    /// Frame tick interval used by hosts without a display refresh
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

/// Directional navigation configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub scroll_behavior: ScrollBehavior,
}

/// TV remote / keyboard configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Drop every event from the remote pad
    #[serde(default)]
    pub ignore_keyboard: bool,
    #[serde(default)]
    pub android_tv: AndroidTvMode,
}

/// On-screen touch pad configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VirtualPadConfig {
    #[serde(default = "default_true")]
    pub left_stick: bool,
    #[serde(default = "default_true")]
    pub right_stick: bool,
    #[serde(default = "default_touchstick_radius")]
    pub touchstick_radius: f32,
    /// Compute layout but skip drawing
    #[serde(default)]
    pub no_render: bool,
    #[serde(default)]
    pub buttons: Vec<TouchButtonConfig>,
}

/// One circular touch button, anchored to the pad's corners
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TouchButtonConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// Icon code point, `&#xE768;` or `fluent.&#xE768;`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_color: Option<String>,
    /// Standard button index reported on press
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<u32>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            manual: false,
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl Default for VirtualPadConfig {
    fn default() -> Self {
        Self {
            left_stick: true,
            right_stick: true,
            touchstick_radius: default_touchstick_radius(),
            no_render: false,
            buttons: Vec::new(),
        }
    }
}

impl PadnavConfig {
    /// Load configuration from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config file: {}", path))?;

        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document is a valid, all-defaults config
        let config: PadnavConfig = if contents.trim().is_empty() {
            PadnavConfig::default()
        } else {
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?
        };

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.polling.frame_interval_ms == 0 {
            anyhow::bail!("polling.frame_interval_ms must be greater than 0");
        }

        if let Some(pad) = &self.virtual_pad {
            if pad.touchstick_radius.is_nan() || pad.touchstick_radius <= 0.0 {
                anyhow::bail!(
                    "virtual_pad.touchstick_radius must be positive (got {})",
                    pad.touchstick_radius
                );
            }

            for (idx, button) in pad.buttons.iter().enumerate() {
                if let Some(radius) = button.radius {
                    if radius.is_nan() || radius <= 0.0 {
                        anyhow::bail!("virtual_pad button {} radius must be positive (got {})", idx, radius);
                    }
                }
                if let Some(index) = button.button {
                    if index > 16 {
                        anyhow::bail!(
                            "virtual_pad button {} has invalid standard index {} (must be 0-16)",
                            idx, index
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_frame_interval() -> u64 { 16 }
fn default_touchstick_radius() -> f32 { 80.0 }
