use crate::taxonomy::model::{NormalizedAttribution, RawAttribution};

/// Lower-cases and trims a raw UTM value. Absent values become the empty string.
///
/// U+FEFF is trimmed along with Unicode whitespace, the same set ECMAScript
/// `String.prototype.trim` removes.
pub fn normalize_key(raw: Option<&str>) -> String {
    match raw {
        Some(v) => v.trim_matches(is_trimmed).to_lowercase(),
        None => String::new(),
    }
}

fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn normalize_attribution(raw: &RawAttribution) -> NormalizedAttribution {
    NormalizedAttribution {
        source: normalize_key(raw.source.as_deref()),
        medium: normalize_key(raw.medium.as_deref()),
        campaign: normalize_key(raw.campaign.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(normalize_key(None), "");
    }

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_key(Some("  Google\t")), "google");
        assert_eq!(normalize_key(Some("\n(Direct) ")), "(direct)");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(normalize_key(Some("   ")), "");
    }

    #[test]
    fn test_byte_order_mark_trimmed() {
        assert_eq!(normalize_key(Some("\u{feff}Google")), "google");
        assert_eq!(normalize_key(Some(" cpc\u{feff} ")), "cpc");
        assert_eq!(normalize_key(Some("\u{feff}")), "");
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        assert_eq!(normalize_key(Some(" Paid Social ")), "paid social");
    }

    #[test]
    fn test_normalize_attribution_fields() {
        let raw = RawAttribution {
            source: Some(" FB ".to_string()),
            medium: None,
            campaign: Some("Brand-Q1".to_string()),
        };
        let n = normalize_attribution(&raw);
        assert_eq!(n.source, "fb");
        assert_eq!(n.medium, "");
        assert_eq!(n.campaign, "brand-q1");
    }
}
