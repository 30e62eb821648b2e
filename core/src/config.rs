use crate::classifier::campaign::CampaignPrecedence;
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classifier settings, read from a JSON file such as
/// `{"campaign_precedence": "SPECIFIC_FIRST"}`. Missing keys take defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub campaign_precedence: CampaignPrecedence,
}

impl ClassifierConfig {
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            precedence = ?config.campaign_precedence,
            "loaded classifier config"
        );
        Ok(config)
    }
}
