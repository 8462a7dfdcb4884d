//! Live password checklist.
//!
//! [`PasswordCriteria`] evaluates every rule at once for progress feedback.
//! The predicates are shared with [`crate::validation::validate_password`].

use crate::validation::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};

/// Characters accepted by the special-character rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Independent pass/fail flags for each password rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordCriteria {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special_char: bool,
}

impl PasswordCriteria {
    /// Evaluates all rules against `password`. Never short-circuits.
    pub fn evaluate(password: &str) -> Self {
        Self {
            length: has_valid_length(password),
            uppercase: has_uppercase(password),
            lowercase: has_lowercase(password),
            number: has_number(password),
            special_char: has_special_char(password),
        }
    }

    /// True when every rule passes.
    pub fn all_met(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.number && self.special_char
    }

    /// Number of rules currently met (0..=5).
    pub fn met_count(&self) -> usize {
        self.items().iter().filter(|(_, met)| *met).count()
    }

    /// Checklist rows in display order.
    pub fn items(&self) -> [(&'static str, bool); 5] {
        [
            ("8-12 characters", self.length),
            ("One uppercase letter", self.uppercase),
            ("One lowercase letter", self.lowercase),
            ("One number", self.number),
            ("One special character", self.special_char),
        ]
    }
}

pub(crate) fn has_valid_length(password: &str) -> bool {
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.chars().count())
}

pub(crate) fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub(crate) fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub(crate) fn has_number(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn has_special_char(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARS.contains(c))
}
