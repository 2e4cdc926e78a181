/*
 * Responsibility
 * - Password acceptance rules (account creation / password change)
 */
use crate::services::validation::rules::{Rule, Validation, evaluate_rules};

fn min_length(s: &str) -> bool {
    s.chars().count() >= 8
}

fn has_uppercase(s: &str) -> bool {
    s.chars().any(|c| c.is_uppercase())
}

fn has_lowercase(s: &str) -> bool {
    s.chars().any(|c| c.is_lowercase())
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn has_special(s: &str) -> bool {
    s.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

fn no_whitespace(s: &str) -> bool {
    !s.chars().any(char::is_whitespace)
}

fn comfortable_length(s: &str) -> bool {
    s.chars().count() >= 16
}

/// Six required rules plus one bonus length rule that only lifts the tier.
pub const PASSWORD_RULES: &[Rule] = &[
    Rule {
        label: "min-length",
        description: "at least 8 characters",
        required: true,
        predicate: min_length,
    },
    Rule {
        label: "uppercase",
        description: "at least one uppercase letter",
        required: true,
        predicate: has_uppercase,
    },
    Rule {
        label: "lowercase",
        description: "at least one lowercase letter",
        required: true,
        predicate: has_lowercase,
    },
    Rule {
        label: "digit",
        description: "at least one digit",
        required: true,
        predicate: has_digit,
    },
    Rule {
        label: "special",
        description: "at least one special character",
        required: true,
        predicate: has_special,
    },
    Rule {
        label: "no-whitespace",
        description: "no spaces or tabs",
        required: true,
        predicate: no_whitespace,
    },
    Rule {
        label: "long",
        description: "16 characters or more",
        required: false,
        predicate: comfortable_length,
    },
];

pub fn validate_password(input: &str) -> Validation {
    evaluate_rules(PASSWORD_RULES, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::rules::Strength;

    #[test]
    fn all_required_rules_pass_without_the_bonus_is_medium() {
        let v = validate_password("Password123!");
        assert!(v.is_valid);
        // Six required passed, bonus (16+) failed: exactly the required
        // count, so the tier stays Medium.
        assert_eq!(v.strength, Strength::Medium);
        assert!(v.rules.iter().filter(|r| r.required).all(|r| r.passed));
    }

    #[test]
    fn the_bonus_length_rule_lifts_to_strong() {
        let v = validate_password("Password123!Pass");
        assert!(v.is_valid);
        assert_eq!(v.strength, Strength::Strong);
    }

    #[test]
    fn each_required_rule_fails_alone() {
        for (input, label) in [
            ("Pa1!", "min-length"),
            ("password123!", "uppercase"),
            ("PASSWORD123!", "lowercase"),
            ("Password!!!!", "digit"),
            ("Password1234", "special"),
            ("Password 123!", "no-whitespace"),
        ] {
            let v = validate_password(input);
            assert!(!v.is_valid, "{input} should be invalid");
            assert_eq!(v.strength, Strength::Weak);
            let failed = v.rules.iter().find(|r| r.required && !r.passed).unwrap();
            assert_eq!(failed.label, label, "wrong failing rule for {input}");
        }
    }

    #[test]
    fn empty_input_is_handled_without_panicking() {
        let v = validate_password("");
        assert!(!v.is_valid);
        assert_eq!(v.message.as_deref(), Some("at least 8 characters"));
    }
}
