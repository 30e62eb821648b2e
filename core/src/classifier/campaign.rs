use crate::taxonomy::model::CampaignType;
use serde::{Deserialize, Serialize};

const BRAND_KEYWORDS: &[&str] = &["brand"];
const NON_BRAND_KEYWORDS: &[&str] = &["nonbrand", "non-brand"];
const RETARGETING_KEYWORDS: &[&str] = &["retargeting", "remarketing"];

/// Order in which campaign keyword groups are tested.
///
/// LEGACY tests "brand" first, so "nonbrand" and "non-brand" campaigns come out
/// as Brand and Non-Brand is unreachable. SPECIFIC_FIRST tests the longer terms
/// before "brand".
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignPrecedence {
    #[default]
    LEGACY,
    SPECIFIC_FIRST,
}

impl CampaignPrecedence {
    fn order(&self) -> [(CampaignType, &'static [&'static str]); 3] {
        match self {
            CampaignPrecedence::LEGACY => [
                (CampaignType::Brand, BRAND_KEYWORDS),
                (CampaignType::NonBrand, NON_BRAND_KEYWORDS),
                (CampaignType::Retargeting, RETARGETING_KEYWORDS),
            ],
            CampaignPrecedence::SPECIFIC_FIRST => [
                (CampaignType::NonBrand, NON_BRAND_KEYWORDS),
                (CampaignType::Retargeting, RETARGETING_KEYWORDS),
                (CampaignType::Brand, BRAND_KEYWORDS),
            ],
        }
    }
}

/// Coarse intent of a normalized campaign name. Empty or unmatched text is Other.
pub fn classify_campaign(campaign: &str, precedence: CampaignPrecedence) -> CampaignType {
    for (campaign_type, keywords) in precedence.order() {
        if keywords.iter().any(|k| campaign.contains(*k)) {
            return campaign_type;
        }
    }
    CampaignType::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_groups() {
        let p = CampaignPrecedence::LEGACY;
        assert_eq!(classify_campaign("brand-search-q1", p), CampaignType::Brand);
        assert_eq!(classify_campaign("q4-retargeting-push", p), CampaignType::Retargeting);
        assert_eq!(classify_campaign("remarketing_cart", p), CampaignType::Retargeting);
        assert_eq!(classify_campaign("generic-promo", p), CampaignType::Other);
        assert_eq!(classify_campaign("", p), CampaignType::Other);
    }

    // "nonbrand" contains "brand"; the legacy ordering reports Brand.
    #[test]
    fn test_legacy_nonbrand_reads_as_brand() {
        let p = CampaignPrecedence::LEGACY;
        assert_eq!(classify_campaign("nonbrand_fall_2024", p), CampaignType::Brand);
        assert_eq!(classify_campaign("non-brand-q4", p), CampaignType::Brand);
    }

    #[test]
    fn test_specific_first_reaches_non_brand() {
        let p = CampaignPrecedence::SPECIFIC_FIRST;
        assert_eq!(classify_campaign("nonbrand_fall_2024", p), CampaignType::NonBrand);
        assert_eq!(classify_campaign("non-brand-q4", p), CampaignType::NonBrand);
        assert_eq!(classify_campaign("brand-search", p), CampaignType::Brand);
        assert_eq!(classify_campaign("generic", p), CampaignType::Other);
    }

    #[test]
    fn test_brand_plus_retargeting_depends_on_order() {
        let text = "brand-retargeting";
        assert_eq!(
            classify_campaign(text, CampaignPrecedence::LEGACY),
            CampaignType::Brand
        );
        assert_eq!(
            classify_campaign(text, CampaignPrecedence::SPECIFIC_FIRST),
            CampaignType::Retargeting
        );
    }

    #[test]
    fn test_precedence_serde_names() {
        let p: CampaignPrecedence = serde_json::from_str("\"SPECIFIC_FIRST\"").unwrap();
        assert_eq!(p, CampaignPrecedence::SPECIFIC_FIRST);
        assert_eq!(CampaignPrecedence::default(), CampaignPrecedence::LEGACY);
    }
}
