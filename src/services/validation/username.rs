/*
 * Responsibility
 * - Username acceptance rules and the blur-time formatting suggestion
 */
use crate::services::validation::rules::{Rule, Validation, evaluate_rules};

fn min_length(s: &str) -> bool {
    s.chars().count() >= 3
}

fn max_length(s: &str) -> bool {
    s.chars().count() <= 30
}

fn alphabetic_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

fn capitalized(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

pub const USERNAME_RULES: &[Rule] = &[
    Rule {
        label: "min-length",
        description: "at least 3 characters",
        required: true,
        predicate: min_length,
    },
    Rule {
        label: "max-length",
        description: "at most 30 characters",
        required: true,
        predicate: max_length,
    },
    Rule {
        label: "alphabetic",
        description: "letters only",
        required: true,
        predicate: alphabetic_only,
    },
    Rule {
        label: "capitalized",
        description: "starts with a capital letter",
        required: false,
        predicate: capitalized,
    },
];

pub fn validate_username(input: &str) -> Validation {
    evaluate_rules(USERNAME_RULES, input)
}

/// Normalization suggestion offered on field blur: keep letters only,
/// lowercase them, then capitalize the first letter.
///
/// Never auto-applied; the caller decides whether to accept it. Idempotent:
/// capitalization is restricted to ASCII because Unicode uppercase mappings
/// can expand to several characters and would break re-application.
pub fn format_username(input: &str) -> String {
    let letters: String = input
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    let mut chars = letters.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if first.is_ascii() => {
            let mut out = String::with_capacity(letters.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        Some(_) => letters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::rules::Strength;

    #[test]
    fn two_letters_fail_with_a_minimum_length_message() {
        let v = validate_username("ab");
        assert!(!v.is_valid);
        assert_eq!(v.message.as_deref(), Some("at least 3 characters"));
    }

    #[test]
    fn digits_and_symbols_are_rejected() {
        for input in ["abc1", "a b c", "ab_c", "abc!"] {
            let v = validate_username(input);
            assert!(!v.is_valid, "{input} should be invalid");
        }
    }

    #[test]
    fn capitalization_is_a_bonus_not_a_requirement() {
        let plain = validate_username("ramesh");
        assert!(plain.is_valid);
        assert_eq!(plain.strength, Strength::Medium);

        let capped = validate_username("Ramesh");
        assert!(capped.is_valid);
        assert_eq!(capped.strength, Strength::Strong);
    }

    #[test]
    fn formatting_strips_and_capitalizes() {
        assert_eq!(format_username("ab"), "Ab");
        assert_eq!(format_username("  ramesh 42 "), "Ramesh");
        assert_eq!(format_username("o'neill"), "Oneill");
        assert_eq!(format_username("ANITA"), "Anita");
        assert_eq!(format_username("123"), "");
    }

    #[test]
    fn formatting_is_idempotent() {
        for input in ["ab", "AB", "a1b2c3", "  Mixed Case  ", "élan", ""] {
            let once = format_username(input);
            assert_eq!(format_username(&once), once, "not idempotent for {input:?}");
        }
    }
}
