//! Threshold scheme configuration.

use std::path::Path;

use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Environment prefix for overrides, e.g. `THRESHOLD_BLS_THRESHOLD=4`.
pub const ENV_PREFIX: &str = "THRESHOLD_BLS_";

/// Parameters of a (t, n) threshold deployment.
///
/// # Example TOML
///
/// ```toml
/// threshold = 3
/// participants = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Number of shares needed to sign or recover (t).
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    /// Number of shares dealt (n).
    #[serde(default = "default_participants")]
    pub participants: usize,
}

fn default_threshold() -> usize {
    3
}

fn default_participants() -> usize {
    5
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            participants: default_participants(),
        }
    }
}

impl ThresholdConfig {
    pub fn new(threshold: usize, participants: usize) -> Self {
        Self {
            threshold,
            participants,
        }
    }

    /// Checks `1 <= threshold <= participants`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.threshold == 0 || self.threshold > self.participants {
            return Err(Error::InvalidThreshold {
                threshold: self.threshold,
                participants: self.participants,
            });
        }
        Ok(())
    }

    /// Load configuration from a file path.
    ///
    /// Supports TOML (.toml) and YAML (.yaml, .yml) formats. Missing fields
    /// fall back to defaults, and environment variables with the
    /// `THRESHOLD_BLS_` prefix override file values.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = ThresholdConfig::from_path("threshold.toml")?;
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        // Detect file format based on extension
        figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            other => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {:?}. Use .toml, .yaml, or .yml",
                    other
                ));
            }
        };

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: ThresholdConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from defaults and environment variables only.
    pub fn from_env() -> Result<Self> {
        let config: ThresholdConfig = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        config.validate()?;
        Ok(config)
    }
}
