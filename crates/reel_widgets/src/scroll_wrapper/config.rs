//! Scroll wrapper configuration
//!
//! Every option has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! speed = 0.5
//! direction = "rl"
//! pause_on_hover = false
//!
//! [presentation]
//! class_name = "ticker"
//!
//! [presentation.style]
//! height = "24px"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::error::{ConfigError, Result};

/// Options for a [`ScrollWrapper`](super::ScrollWrapper)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollWrapperConfig {
    /// Pixels advanced per animation frame; a negative speed reverses travel
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub direction: Direction,
    /// Start scrolling on mount when the content overflows
    #[serde(default = "default_true")]
    pub auto_scroll: bool,
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    /// Ignore wheel input (auto-scroll is unaffected)
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub presentation: Presentation,
}

fn default_speed() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for ScrollWrapperConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            direction: Direction::default(),
            auto_scroll: true,
            pause_on_hover: true,
            disabled: false,
            presentation: Presentation::default(),
        }
    }
}

/// Container class and inline style, passed to the host untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
}

impl ScrollWrapperConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScrollWrapperConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded scroll wrapper config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the speed is usable
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}
