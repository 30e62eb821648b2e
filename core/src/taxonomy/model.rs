use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const UNKNOWN: &str = "Unknown";
pub const MISSING_UTMS: &str = "MISSING_UTMS";
pub const NON_STANDARD_UTM: &str = "NON_STANDARD_UTM";

/// UTM values as received. Any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawAttribution {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
}

impl RawAttribution {
    pub fn new(source: &str, medium: &str, campaign: &str) -> Self {
        RawAttribution {
            source: Some(source.to_string()),
            medium: Some(medium.to_string()),
            campaign: Some(campaign.to_string()),
        }
    }
}

/// Lower-cased, trimmed UTM values. These are the lookup keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedAttribution {
    pub source: String,
    pub medium: String,
    pub campaign: String,
}

/// One row of the channel table. Aliases are normalized (lower-case, trimmed) keys.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ChannelRule {
    pub sources: &'static [&'static str],
    pub mediums: &'static [&'static str],
    pub channel: &'static str,
    pub subchannel: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CampaignType {
    Brand,
    #[serde(rename = "Non-Brand")]
    NonBrand,
    Retargeting,
    Other,
    Unknown,
}

impl CampaignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Brand => "Brand",
            CampaignType::NonBrand => "Non-Brand",
            CampaignType::Retargeting => "Retargeting",
            CampaignType::Other => "Other",
            CampaignType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Soft failure signal attached to a classification. Renders to the
/// downstream `validation_flag` text; `None` renders as "".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationFlag {
    #[default]
    None,
    MissingUtms,
    NonStandardUtm { source: String, medium: String },
}

impl ValidationFlag {
    pub fn is_none(&self) -> bool {
        matches!(self, ValidationFlag::None)
    }
}

impl fmt::Display for ValidationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFlag::None => Ok(()),
            ValidationFlag::MissingUtms => f.write_str(MISSING_UTMS),
            ValidationFlag::NonStandardUtm { source, medium } => write!(
                f,
                "{}: source={}, medium={}",
                NON_STANDARD_UTM, source, medium
            ),
        }
    }
}

impl Serialize for ValidationFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub channel: String,
    pub subchannel: String,
    pub campaign_type: CampaignType,
    pub validation_flag: ValidationFlag,
}

impl ClassificationResult {
    pub fn missing_utms() -> Self {
        ClassificationResult {
            channel: UNKNOWN.to_string(),
            subchannel: UNKNOWN.to_string(),
            campaign_type: CampaignType::Unknown,
            validation_flag: ValidationFlag::MissingUtms,
        }
    }
}
