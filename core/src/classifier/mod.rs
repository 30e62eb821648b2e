pub mod campaign;

use crate::config::ClassifierConfig;
use crate::normalize::{normalize_attribution, normalize_key};
use crate::taxonomy::model::{
    CampaignType, ChannelRule, ClassificationResult, NormalizedAttribution, RawAttribution,
    ValidationFlag, UNKNOWN,
};
use crate::taxonomy::rules::CHANNEL_RULES;
use campaign::{classify_campaign, CampaignPrecedence};

/// Maps UTM source/medium/campaign onto channel, subchannel and campaign type.
///
/// Holds only a reference to a static rule table, so a single instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rules: &'static [ChannelRule],
    precedence: CampaignPrecedence,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Classifier {
            rules: CHANNEL_RULES,
            precedence: CampaignPrecedence::default(),
        }
    }

    pub fn with_config(config: &ClassifierConfig) -> Self {
        Classifier {
            rules: CHANNEL_RULES,
            precedence: config.campaign_precedence,
        }
    }

    pub fn with_rules(rules: &'static [ChannelRule], precedence: CampaignPrecedence) -> Self {
        Classifier { rules, precedence }
    }

    pub fn rules(&self) -> &'static [ChannelRule] {
        self.rules
    }

    pub fn precedence(&self) -> CampaignPrecedence {
        self.precedence
    }

    pub fn classify(
        &self,
        source: Option<&str>,
        medium: Option<&str>,
        campaign: Option<&str>,
    ) -> ClassificationResult {
        let normalized = NormalizedAttribution {
            source: normalize_key(source),
            medium: normalize_key(medium),
            campaign: normalize_key(campaign),
        };
        self.classify_normalized(&normalized)
    }

    pub fn classify_attribution(&self, raw: &RawAttribution) -> ClassificationResult {
        self.classify_normalized(&normalize_attribution(raw))
    }

    /// Classifies values that have already been through `normalize_key`.
    pub fn classify_normalized(&self, input: &NormalizedAttribution) -> ClassificationResult {
        if input.source.is_empty() && input.medium.is_empty() {
            tracing::debug!("missing utm_source and utm_medium");
            return ClassificationResult::missing_utms();
        }

        let campaign_type: CampaignType = classify_campaign(&input.campaign, self.precedence);

        match self.resolve_channel(&input.source, &input.medium) {
            Some(rule) => {
                tracing::debug!(
                    source = %input.source,
                    medium = %input.medium,
                    channel = rule.channel,
                    subchannel = rule.subchannel,
                    campaign_type = %campaign_type,
                    "classified"
                );
                ClassificationResult {
                    channel: rule.channel.to_string(),
                    subchannel: rule.subchannel.to_string(),
                    campaign_type,
                    validation_flag: ValidationFlag::None,
                }
            }
            None => {
                tracing::debug!(
                    source = %input.source,
                    medium = %input.medium,
                    "no channel rule matched"
                );
                ClassificationResult {
                    channel: UNKNOWN.to_string(),
                    subchannel: UNKNOWN.to_string(),
                    campaign_type,
                    validation_flag: ValidationFlag::NonStandardUtm {
                        source: input.source.clone(),
                        medium: input.medium.clone(),
                    },
                }
            }
        }
    }

    /// First rule in declaration order whose source and medium aliases both match.
    pub fn resolve_channel(&self, source: &str, medium: &str) -> Option<&'static ChannelRule> {
        self.rules.iter().find(|r| {
            r.sources.iter().any(|s| *s == source) && r.mediums.iter().any(|m| *m == medium)
        })
    }
}
