//! Validation toggles owned by a [`Grid`](crate::Grid).

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

pub const ENV_VALIDATE_RES: &str = "HEXREGION_VALIDATE_RES";
pub const ENV_VALIDATE_INDEX: &str = "HEXREGION_VALIDATE_INDEX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Reject resolutions outside 0..=15 before calling the provider.
    /// Default: true
    pub validate_resolution: bool,

    /// Run the structural validity predicate when constructing indexes
    /// from raw values or text. Default: false
    pub validate_index: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            validate_resolution: true,
            validate_index: false,
        }
    }
}

impl GridConfig {
    pub fn with_validate_resolution(mut self, on: bool) -> Self {
        self.validate_resolution = on;
        self
    }

    pub fn with_validate_index(mut self, on: bool) -> Self {
        self.validate_index = on;
        self
    }

    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| GridError::Argument(format!("config: {}", e)))
    }

    /// Defaults overridden by `HEXREGION_VALIDATE_RES` / `HEXREGION_VALIDATE_INDEX`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_VALIDATE_RES) {
            cfg.validate_resolution = parse_flag(ENV_VALIDATE_RES, &v)?;
        }
        if let Some(v) = lookup(ENV_VALIDATE_INDEX) {
            cfg.validate_index = parse_flag(ENV_VALIDATE_INDEX, &v)?;
        }
        Ok(cfg)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(GridError::Argument(format!(
            "{}: expected a boolean flag, got '{}'",
            key, other
        ))),
    }
}
