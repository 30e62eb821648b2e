use crate::taxonomy::model::ChannelRule;
use serde::Serialize;

/// Two rules whose (source x medium) key spaces intersect. The earlier rule wins
/// for every key in the intersection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RuleOverlap {
    pub earlier_index: usize,
    pub later_index: usize,
    pub earlier_label: String,
    pub later_label: String,
    pub shared_sources: Vec<&'static str>,
    pub shared_mediums: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RuleAudit {
    pub rule_count: usize,
    pub overlaps: Vec<RuleOverlap>,
    /// Rules that can never match because earlier rules cover all of their keys.
    pub shadowed_rules: Vec<usize>,
}

impl RuleAudit {
    pub fn is_clean(&self) -> bool {
        self.overlaps.is_empty()
    }
}

pub fn rule_label(rule: &ChannelRule) -> String {
    format!("{} / {}", rule.channel, rule.subchannel)
}

pub fn audit_rules(rules: &[ChannelRule]) -> RuleAudit {
    let mut overlaps = Vec::new();
    let mut shadowed_rules = Vec::new();

    for (later_index, later) in rules.iter().enumerate() {
        for (earlier_index, earlier) in rules[..later_index].iter().enumerate() {
            let shared_sources = intersect(earlier.sources, later.sources);
            let shared_mediums = intersect(earlier.mediums, later.mediums);
            if shared_sources.is_empty() || shared_mediums.is_empty() {
                continue;
            }
            overlaps.push(RuleOverlap {
                earlier_index,
                later_index,
                earlier_label: rule_label(earlier),
                later_label: rule_label(later),
                shared_sources,
                shared_mediums,
            });
        }

        let earlier_rules = &rules[..later_index];
        let fully_covered = later.sources.iter().all(|s| {
            later.mediums.iter().all(|m| {
                earlier_rules
                    .iter()
                    .any(|r| r.sources.contains(s) && r.mediums.contains(m))
            })
        });
        // An empty alias list never matches anything; do not report it as shadowed.
        if fully_covered && !later.sources.is_empty() && !later.mediums.is_empty() {
            shadowed_rules.push(later_index);
        }
    }

    RuleAudit {
        rule_count: rules.len(),
        overlaps,
        shadowed_rules,
    }
}

fn intersect(a: &[&'static str], b: &[&'static str]) -> Vec<&'static str> {
    a.iter().filter(|x| b.contains(*x)).copied().collect()
}
