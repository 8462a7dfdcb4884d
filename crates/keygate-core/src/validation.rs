//! Field validators.
//!
//! Each validator maps raw input to `Ok(())` or the first rule it breaks.
//! Checks run in a fixed order and stop at the first failure, so a single
//! input only ever reports one message.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::criteria;

/// Password length bounds (inclusive, counted in characters).
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 12;

/// Minimum username length (characters).
pub const USERNAME_MIN_LEN: usize = 3;

/// One `@`, at least one `.` after it, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A failed field check, one variant per user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmailRequired,
    EmailInvalid,
    UsernameRequired,
    UsernameTooShort,
    UsernameCharset,
    PasswordRequired,
    PasswordLength,
    PasswordUppercase,
    PasswordLowercase,
    PasswordNumber,
    PasswordSpecialChar,
}

impl ValidationError {
    /// The exact message shown next to the field.
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::EmailRequired => "Email is required.",
            ValidationError::EmailInvalid => "Please enter a valid email address.",
            ValidationError::UsernameRequired => "Username is required.",
            ValidationError::UsernameTooShort => "Username must be at least 3 characters long.",
            ValidationError::UsernameCharset => {
                "Username can only contain letters, numbers, and underscores."
            }
            ValidationError::PasswordRequired => "Password is required.",
            ValidationError::PasswordLength => "Password must be between 8 and 12 characters.",
            ValidationError::PasswordUppercase => {
                "Password must contain at least one uppercase letter."
            }
            ValidationError::PasswordLowercase => {
                "Password must contain at least one lowercase letter."
            }
            ValidationError::PasswordNumber => "Password must contain at least one number.",
            ValidationError::PasswordSpecialChar => {
                "Password must contain at least one special character."
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of a single field check.
pub type FieldResult = Result<(), ValidationError>;

/// Validates an email address.
///
/// # Errors
/// Returns the first failing rule: required, then format.
pub fn validate_email(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Validates a username.
///
/// # Errors
/// Returns the first failing rule: required, minimum length, charset.
pub fn validate_username(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(ValidationError::UsernameRequired);
    }
    if value.chars().count() < USERNAME_MIN_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::UsernameCharset);
    }
    Ok(())
}

/// Validates a password.
///
/// Uses the same predicates as [`criteria::PasswordCriteria`] so the live
/// checklist and the submit gate never disagree.
///
/// # Errors
/// Returns the first failing rule: required, length, uppercase, lowercase,
/// digit, special character.
pub fn validate_password(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if !criteria::has_valid_length(value) {
        return Err(ValidationError::PasswordLength);
    }
    if !criteria::has_uppercase(value) {
        return Err(ValidationError::PasswordUppercase);
    }
    if !criteria::has_lowercase(value) {
        return Err(ValidationError::PasswordLowercase);
    }
    if !criteria::has_number(value) {
        return Err(ValidationError::PasswordNumber);
    }
    if !criteria::has_special_char(value) {
        return Err(ValidationError::PasswordSpecialChar);
    }
    Ok(())
}
