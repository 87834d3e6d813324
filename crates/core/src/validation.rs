//! Ordered, short-circuiting input rules.
//!
//! A rule is a plain function from an input to `Result<(), Reason>`. Rules
//! for one input are declared as a slice and evaluated front to back; the
//! first failure wins and later rules never run.

use std::fmt;

use crate::error::CoreError;

/// Why an input was rejected. [`Reason::message`] is the client-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    NameTooShort,
    InvalidEmail,
    EmailTaken,
    WeakPassword,
    TitleTooShort,
    DescriptionTooShort,
    TagTooShort,
    TagNotString,
    InvalidTags,
    EmptyUpdate,
}

impl Reason {
    pub fn message(self) -> &'static str {
        match self {
            Reason::NameTooShort => "Username must be at least 3 characters",
            Reason::InvalidEmail => "Please enter a valid email",
            Reason::EmailTaken => "A user with this email address already exists.",
            Reason::WeakPassword => {
                "Password must have at least 8 characters and include uppercase, \
                 lowercase, number, and symbol"
            }
            Reason::TitleTooShort => "Title must be a string at least 3 characters long",
            Reason::DescriptionTooShort => {
                "Description must be a string at least 3 characters long"
            }
            Reason::TagTooShort => "Each tag must be at least 3 characters long",
            Reason::TagNotString => "Each tag must be a string",
            Reason::InvalidTags => "Please enter a valid set of space separated tags",
            Reason::EmptyUpdate => "No valid fields provided for update.",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<Reason> for CoreError {
    fn from(reason: Reason) -> Self {
        CoreError::validation(reason.message())
    }
}

/// A single validation rule over `T`.
pub type Rule<T> = fn(&T) -> Result<(), Reason>;

/// Run `rules` in order against `input`, stopping at the first failure.
pub fn first_failure<T>(input: &T, rules: &[Rule<T>]) -> Result<(), Reason> {
    rules.iter().try_for_each(|rule| rule(input))
}

/// Minimum length shared by names, titles, descriptions, and tags.
pub const MIN_TEXT_LENGTH: usize = 3;

/// True when `s` has at least `min` characters (not bytes).
pub fn has_min_chars(s: &str, min: usize) -> bool {
    s.chars().count() >= min
}
