use crate::classifier::Classifier;
use crate::error::{CoreError, CoreResult};
use crate::normalize::normalize_attribution;
use crate::taxonomy::model::{RawAttribution, UNKNOWN};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";

/// Record handed over by the upstream step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputRecord {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

impl InputRecord {
    pub fn to_attribution(&self) -> RawAttribution {
        RawAttribution {
            source: self.utm_source.clone(),
            medium: self.utm_medium.clone(),
            campaign: self.utm_campaign.clone(),
        }
    }
}

/// Record handed to the downstream step. `raw_*` carry the normalized inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputRecord {
    pub channel: String,
    pub subchannel: String,
    pub campaign_type: String,
    pub validation_flag: String,
    pub raw_source: String,
    pub raw_medium: String,
    pub raw_campaign: String,
}

impl OutputRecord {
    /// True when a channel rule matched.
    pub fn is_classified(&self) -> bool {
        self.channel != UNKNOWN
    }
}

/// Parse one JSON input record.
pub fn parse_input_record(json_str: &str) -> CoreResult<InputRecord> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::InvalidInput(format!("Failed to parse record: {}", e)))?;
    input_record_from_value(&raw)
}

/// Build an input record from an already-parsed JSON value.
///
/// Absent or null fields are None. Numbers and booleans are kept as their JSON
/// text. Other keys are ignored.
pub fn input_record_from_value(raw: &Value) -> CoreResult<InputRecord> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::InvalidInput("record must be a JSON object".to_string()))?;

    Ok(InputRecord {
        utm_source: text_field(obj.get(UTM_SOURCE), UTM_SOURCE)?,
        utm_medium: text_field(obj.get(UTM_MEDIUM), UTM_MEDIUM)?,
        utm_campaign: text_field(obj.get(UTM_CAMPAIGN), UTM_CAMPAIGN)?,
    })
}

fn text_field(value: Option<&Value>, key: &str) -> CoreResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(CoreError::InvalidInput(format!(
            "{} must be text, got a nested value",
            key
        ))),
    }
}

pub fn normalize_record(classifier: &Classifier, input: &InputRecord) -> OutputRecord {
    let normalized = normalize_attribution(&input.to_attribution());
    let result = classifier.classify_normalized(&normalized);
    OutputRecord {
        channel: result.channel,
        subchannel: result.subchannel,
        campaign_type: result.campaign_type.to_string(),
        validation_flag: result.validation_flag.to_string(),
        raw_source: normalized.source,
        raw_medium: normalized.medium,
        raw_campaign: normalized.campaign,
    }
}
