//! Campaign configuration: the starting conditions of a new game.
//!
//! Configuration is read from TOML. Every section carries `#[serde(default)]`,
//! so a file only needs to name the values it overrides:
//!
//! ```toml
//! [starting]
//! military_power = 120
//!
//! [starting.territories]
//! communist = ["jiangxi", "fujian", "shaanxi"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::powers::Powers;
use crate::territory::TerritoryMap;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML content.
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level campaign configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Values a fresh game (or a reset) starts from.
    #[serde(default)]
    pub starting: StartingConditions,
}

impl CampaignConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded campaign config");
        Ok(config)
    }
}

/// Starting powers and territorial split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingConditions {
    pub military_power: i64,
    pub political_power: i64,
    pub economic_power: i64,
    pub territories: TerritoryMap,
}

impl StartingConditions {
    /// Starting power levels.
    pub fn powers(&self) -> Powers {
        Powers::new(self.military_power, self.political_power, self.economic_power)
    }
}

impl Default for StartingConditions {
    fn default() -> Self {
        let powers = Powers::default();
        Self {
            military_power: powers.military_power,
            political_power: powers.political_power,
            economic_power: powers.economic_power,
            territories: default_territories(),
        }
    }
}

/// The 1930 territorial split.
pub fn default_territories() -> TerritoryMap {
    TerritoryMap::new()
        .with_grant(
            "central_government",
            ["jiangsu", "zhejiang", "anhui", "jiangxi", "hubei", "hunan", "sichuan"],
        )
        .with_grant("communist", ["jiangxi", "fujian"])
        .with_grant("japanese", Vec::<String>::new())
}
