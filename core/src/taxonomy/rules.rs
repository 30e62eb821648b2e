use crate::taxonomy::model::ChannelRule;

const FACEBOOK_SOURCES: &[&str] = &["facebook", "fb", "meta"];
const LINKEDIN_SOURCES: &[&str] = &["linkedin", "li"];

const PAID_SOCIAL_MEDIUMS: &[&str] = &["cpc", "paid", "paid-social"];
const ORGANIC_SOCIAL_MEDIUMS: &[&str] = &["social", "organic", "post"];
const PAID_SEARCH_MEDIUMS: &[&str] = &["cpc", "paid", "ppc"];

/// Standard channel table. Iterated in declaration order; the first rule whose
/// source and medium aliases both contain the input wins.
///
/// Facebook and LinkedIn appear twice (paid, then organic). The two rows differ
/// only by medium, so neither shadows the other.
pub static CHANNEL_RULES: &[ChannelRule] = &[
    // Social Paid
    ChannelRule {
        sources: FACEBOOK_SOURCES,
        mediums: PAID_SOCIAL_MEDIUMS,
        channel: "Social Paid",
        subchannel: "Facebook",
    },
    ChannelRule {
        sources: LINKEDIN_SOURCES,
        mediums: PAID_SOCIAL_MEDIUMS,
        channel: "Social Paid",
        subchannel: "LinkedIn",
    },
    // Social Organic
    ChannelRule {
        sources: FACEBOOK_SOURCES,
        mediums: ORGANIC_SOCIAL_MEDIUMS,
        channel: "Social Organic",
        subchannel: "Facebook",
    },
    ChannelRule {
        sources: LINKEDIN_SOURCES,
        mediums: ORGANIC_SOCIAL_MEDIUMS,
        channel: "Social Organic",
        subchannel: "LinkedIn",
    },
    // Paid Search
    ChannelRule {
        sources: &["google"],
        mediums: PAID_SEARCH_MEDIUMS,
        channel: "Paid Search",
        subchannel: "Google Ads",
    },
    ChannelRule {
        sources: &["bing"],
        mediums: PAID_SEARCH_MEDIUMS,
        channel: "Paid Search",
        subchannel: "Bing Ads",
    },
    // Email
    ChannelRule {
        sources: &["email", "newsletter", "marketo", "iterable"],
        mediums: &["email"],
        channel: "Email",
        subchannel: "Marketing Email",
    },
    // Direct
    ChannelRule {
        sources: &["direct", "(direct)"],
        mediums: &["(none)", "none", "direct"],
        channel: "Direct",
        subchannel: "Direct",
    },
];
