/*
 * Responsibility
 * - Generic rule-set evaluation shared by the username and password checkers
 * - Strength classification from required/optional pass counts
 */
use serde::Serialize;

/// One acceptance rule. `required: false` marks a bonus condition that only
/// influences the strength tier, never validity.
pub struct Rule {
    pub label: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub predicate: fn(&str) -> bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub label: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub passed: bool,
}

// Ord follows declaration order, so tiers compare Weak < Medium < Strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

/// Result of evaluating a rule set against one input. Computed fresh on each
/// call; cheap enough to run per keystroke.
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    pub strength: Strength,
    pub rules: Vec<RuleOutcome>,
    /// First failing required rule, for direct display.
    pub message: Option<String>,
}

/// Evaluate `rules` over `input`.
///
/// Validity requires every required rule to pass. The tier is a plain count
/// comparison: failing a required rule is Weak, passing required rules plus
/// at least one bonus is Strong, passing exactly the required set is Medium.
pub fn evaluate_rules(rules: &[Rule], input: &str) -> Validation {
    let outcomes: Vec<RuleOutcome> = rules
        .iter()
        .map(|rule| RuleOutcome {
            label: rule.label,
            description: rule.description,
            required: rule.required,
            passed: (rule.predicate)(input),
        })
        .collect();

    let required_total = outcomes.iter().filter(|o| o.required).count();
    let required_passed = outcomes.iter().filter(|o| o.required && o.passed).count();
    let total_passed = outcomes.iter().filter(|o| o.passed).count();

    let is_valid = required_passed == required_total;
    let strength = if !is_valid {
        Strength::Weak
    } else if total_passed > required_total {
        Strength::Strong
    } else {
        Strength::Medium
    };

    let message = outcomes
        .iter()
        .find(|o| o.required && !o.passed)
        .map(|o| o.description.to_string());

    Validation {
        is_valid,
        strength,
        rules: outcomes,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_empty(s: &str) -> bool {
        !s.is_empty()
    }
    fn min_four(s: &str) -> bool {
        s.chars().count() >= 4
    }
    fn has_digit(s: &str) -> bool {
        s.chars().any(|c| c.is_ascii_digit())
    }

    const RULES: &[Rule] = &[
        Rule {
            label: "non-empty",
            description: "must not be empty",
            required: true,
            predicate: non_empty,
        },
        Rule {
            label: "min-length",
            description: "at least 4 characters",
            required: true,
            predicate: min_four,
        },
        Rule {
            label: "digit",
            description: "contains a digit",
            required: false,
            predicate: has_digit,
        },
    ];

    #[test]
    fn failing_a_required_rule_is_weak_and_invalid() {
        let v = evaluate_rules(RULES, "ab");
        assert!(!v.is_valid);
        assert_eq!(v.strength, Strength::Weak);
        assert_eq!(v.message.as_deref(), Some("at least 4 characters"));
    }

    #[test]
    fn exactly_the_required_set_is_medium() {
        let v = evaluate_rules(RULES, "abcd");
        assert!(v.is_valid);
        assert_eq!(v.strength, Strength::Medium);
        assert!(v.message.is_none());
    }

    #[test]
    fn a_bonus_pass_upgrades_to_strong() {
        let v = evaluate_rules(RULES, "abc4");
        assert!(v.is_valid);
        assert_eq!(v.strength, Strength::Strong);
    }

    #[test]
    fn strength_never_drops_when_a_bonus_rule_passes() {
        // Same required outcome, extra bonus pass: tier must not decrease.
        let base = evaluate_rules(RULES, "abcd");
        let extra = evaluate_rules(RULES, "abc4");
        assert!(extra.strength >= base.strength);
    }
}
