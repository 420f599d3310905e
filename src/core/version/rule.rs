// ─── Compatibility Rules ───
// Allow/disallow directives evaluated against platform facts.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::os::{OperatingSystem, PlatformContext};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

/// Platform conditions of a rule. Every present field must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsRestriction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<OperatingSystem>,
    /// Regular expression matched against the whole OS version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl OsRestriction {
    pub fn for_os(os: OperatingSystem) -> Self {
        Self {
            name: Some(os),
            ..Self::default()
        }
    }

    pub fn matches(&self, ctx: &PlatformContext) -> bool {
        if let Some(name) = self.name {
            if name != ctx.os {
                return false;
            }
        }

        if let Some(pattern) = &self.version {
            match Regex::new(&format!("^(?:{})$", pattern)) {
                Ok(re) => {
                    if !re.is_match(&ctx.os_version) {
                        return false;
                    }
                }
                Err(e) => {
                    warn!("Ignoring rule with invalid OS version pattern {:?}: {}", pattern, e);
                    return false;
                }
            }
        }

        if let Some(arch) = &self.arch {
            let arch_matches =
                arch == &ctx.arch || (arch == "x86" && ctx.arch_bits() == "32");
            if !arch_matches {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompatibilityRule {
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsRestriction>,
}

impl CompatibilityRule {
    pub fn new(action: RuleAction, os: Option<OsRestriction>) -> Self {
        Self { action, os }
    }

    pub fn allow() -> Self {
        Self::new(RuleAction::Allow, None)
    }

    pub fn disallow() -> Self {
        Self::new(RuleAction::Disallow, None)
    }

    pub fn allow_on(os: OperatingSystem) -> Self {
        Self::new(RuleAction::Allow, Some(OsRestriction::for_os(os)))
    }

    pub fn disallow_on(os: OperatingSystem) -> Self {
        Self::new(RuleAction::Disallow, Some(OsRestriction::for_os(os)))
    }

    /// The action this rule contributes under `ctx`, or `None` when its
    /// conditions do not match.
    pub fn applied_action(&self, ctx: &PlatformContext) -> Option<RuleAction> {
        match &self.os {
            None => Some(self.action),
            Some(os) if os.matches(ctx) => Some(self.action),
            Some(_) => None,
        }
    }
}

/// Evaluate an ordered rule list.
///
/// - No rules → allowed.
/// - Otherwise start from "disallowed" and let every matching rule overwrite
///   the running result; the last match wins.
pub fn evaluate(rules: &[CompatibilityRule], ctx: &PlatformContext) -> RuleAction {
    if rules.is_empty() {
        return RuleAction::Allow;
    }

    rules
        .iter()
        .filter_map(|rule| rule.applied_action(ctx))
        .last()
        .unwrap_or(RuleAction::Disallow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_ctx() -> PlatformContext {
        PlatformContext::new(OperatingSystem::Linux, "6.1.0", "x86_64")
    }

    #[test]
    fn empty_rule_list_allows() {
        assert_eq!(evaluate(&[], &linux_ctx()), RuleAction::Allow);
    }

    #[test]
    fn unmatched_rules_leave_default_disallow() {
        let rules = vec![CompatibilityRule::allow_on(OperatingSystem::Windows)];
        assert_eq!(evaluate(&rules, &linux_ctx()), RuleAction::Disallow);
    }

    #[test]
    fn last_matching_rule_wins() {
        let rules = vec![
            CompatibilityRule::allow(),
            CompatibilityRule::disallow_on(OperatingSystem::Linux),
        ];
        assert_eq!(evaluate(&rules, &linux_ctx()), RuleAction::Disallow);

        let rules = vec![
            CompatibilityRule::disallow_on(OperatingSystem::Linux),
            CompatibilityRule::allow(),
        ];
        assert_eq!(evaluate(&rules, &linux_ctx()), RuleAction::Allow);
    }

    #[test]
    fn non_matching_rule_does_not_reset_result() {
        let rules = vec![
            CompatibilityRule::allow(),
            CompatibilityRule::disallow_on(OperatingSystem::Osx),
        ];
        assert_eq!(evaluate(&rules, &linux_ctx()), RuleAction::Allow);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let rules = vec![
            CompatibilityRule::allow(),
            CompatibilityRule::disallow_on(OperatingSystem::Osx),
        ];
        let ctx = linux_ctx();
        assert_eq!(evaluate(&rules, &ctx), evaluate(&rules, &ctx));
    }

    #[test]
    fn version_pattern_must_match_whole_string() {
        let ctx = PlatformContext::new(OperatingSystem::Osx, "10.5.8", "x86_64");
        let rule = CompatibilityRule::new(
            RuleAction::Disallow,
            Some(OsRestriction {
                name: Some(OperatingSystem::Osx),
                version: Some(r"^10\.5\.\d$".into()),
                arch: None,
            }),
        );
        assert_eq!(rule.applied_action(&ctx), Some(RuleAction::Disallow));

        let partial = CompatibilityRule::new(
            RuleAction::Disallow,
            Some(OsRestriction {
                name: None,
                version: Some(r"10\.5".into()),
                arch: None,
            }),
        );
        assert_eq!(partial.applied_action(&ctx), None);
    }

    #[test]
    fn invalid_version_pattern_never_matches() {
        let rule = CompatibilityRule::new(
            RuleAction::Allow,
            Some(OsRestriction {
                name: None,
                version: Some("(".into()),
                arch: None,
            }),
        );
        assert_eq!(rule.applied_action(&linux_ctx()), None);
    }

    #[test]
    fn x86_arch_matches_32_bit_platforms() {
        let rule = CompatibilityRule::new(
            RuleAction::Allow,
            Some(OsRestriction {
                name: None,
                version: None,
                arch: Some("x86".into()),
            }),
        );
        let ctx32 = PlatformContext::new(OperatingSystem::Windows, "10.0", "x86");
        let ctx_arm32 = PlatformContext::new(OperatingSystem::Linux, "5.10", "arm");
        assert_eq!(rule.applied_action(&ctx32), Some(RuleAction::Allow));
        assert_eq!(rule.applied_action(&ctx_arm32), Some(RuleAction::Allow));
        assert_eq!(rule.applied_action(&linux_ctx()), None);
    }

    #[test]
    fn rules_parse_from_mojang_json() {
        let rules: Vec<CompatibilityRule> = serde_json::from_value(serde_json::json!([
            {"action": "allow"},
            {"action": "disallow", "os": {"name": "osx", "version": "^10\\.5\\.\\d$"}}
        ]))
        .unwrap();
        assert_eq!(rules[0], CompatibilityRule::allow());
        assert_eq!(rules[1].os.as_ref().unwrap().name, Some(OperatingSystem::Osx));
    }
}
