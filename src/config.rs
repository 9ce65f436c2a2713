//! Audit configuration. Everything the engine needs arrives through
//! [`AuditConfig`]; nothing is read from the process environment here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuditError, Result};
use crate::types::TargetLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Level the scan-time gate enforces.
    pub target: TargetLevel,

    /// Also drop elements whose bounding box has no area.
    pub skip_zero_area: bool,

    /// Characters of element text shown in report tables.
    pub display_text_limit: usize,

    pub advisory: AdvisoryConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            target: TargetLevel::Aa,
            skip_zero_area: false,
            display_text_limit: 30,
            advisory: AdvisoryConfig::default(),
        }
    }
}

/// Settings for the optional language-model explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub enabled: bool,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "gemini-1.5-pro".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AuditConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: AuditConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading audit config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_text_limit == 0 {
            return Err(AuditError::Config("display_text_limit must be at least 1".into()));
        }
        if self.advisory.enabled {
            if self.advisory.model.trim().is_empty() {
                return Err(AuditError::Config("advisory.model must not be empty".into()));
            }
            if self.advisory.api_key_env.trim().is_empty() {
                return Err(AuditError::Config("advisory.api_key_env must not be empty".into()));
            }
            if self.advisory.timeout_secs == 0 {
                return Err(AuditError::Config("advisory.timeout_secs must be positive".into()));
            }
        }
        Ok(())
    }
}
