//! Signup and login input rules.
//!
//! Signup checks run in this order and stop at the first failure:
//! name length, email format, email uniqueness, password strength.
//! Uniqueness needs the credential store, so it is not a [`Rule`] here; the
//! API layer runs [`IDENTITY_RULES`], then the store lookup, then
//! [`PASSWORD_RULES`].

use serde::Deserialize;
use validator::ValidateEmail;

use crate::validation::{has_min_chars, Reason, Rule, MIN_TEXT_LENGTH};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw signup input as submitted by the client. Missing fields are empty
/// and fail their rule like any other bad value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Rules evaluated before the uniqueness lookup.
pub const IDENTITY_RULES: &[Rule<SignupForm>] = &[name_rule, email_rule];

/// Rules evaluated after the uniqueness lookup.
pub const PASSWORD_RULES: &[Rule<SignupForm>] = &[password_rule];

fn name_rule(form: &SignupForm) -> Result<(), Reason> {
    if has_min_chars(form.name.trim(), MIN_TEXT_LENGTH) {
        Ok(())
    } else {
        Err(Reason::NameTooShort)
    }
}

fn email_rule(form: &SignupForm) -> Result<(), Reason> {
    if is_valid_email(&form.email) {
        Ok(())
    } else {
        Err(Reason::InvalidEmail)
    }
}

fn password_rule(form: &SignupForm) -> Result<(), Reason> {
    if is_strong_password(&form.password) {
        Ok(())
    } else {
        Err(Reason::WeakPassword)
    }
}

/// Syntactic email check on the trimmed input.
pub fn is_valid_email(email: &str) -> bool {
    email.trim().validate_email()
}

/// Canonical form used for storage and lookup: trimmed and lowercased, so
/// uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// At least [`MIN_PASSWORD_LENGTH`] characters with one lowercase letter,
/// one uppercase letter, one digit, and one symbol.
pub fn is_strong_password(password: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;
    for c in password.chars() {
        if c.is_lowercase() {
            lower = true;
        } else if c.is_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if !c.is_alphanumeric() {
            symbol = true;
        }
    }
    has_min_chars(password, MIN_PASSWORD_LENGTH) && lower && upper && digit && symbol
}
