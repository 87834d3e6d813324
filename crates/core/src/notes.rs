//! Note field rules and tag handling.
//!
//! Fields arrive as raw JSON values so that a wrongly typed field fails its
//! own rule instead of the body parser. Tags arrive either as one
//! space-separated string or as a list of strings and are always stored as
//! a list.

use serde_json::Value;

use crate::validation::{has_min_chars, Reason, MIN_TEXT_LENGTH};

/// Tag assigned when a note is created without one.
pub const DEFAULT_TAG: &str = "General";

/// Split on single spaces, dropping empty segments.
///
/// Only the space character separates tags; tabs and other whitespace stay
/// part of the tag.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Trimmed title, if it is a string of at least three characters.
pub fn check_title(title: &Value) -> Result<String, Reason> {
    min_text(title).ok_or(Reason::TitleTooShort)
}

/// Trimmed description, if it is a string of at least three characters.
pub fn check_description(description: &Value) -> Result<String, Reason> {
    min_text(description).ok_or(Reason::DescriptionTooShort)
}

fn min_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| has_min_chars(text, MIN_TEXT_LENGTH))
        .map(str::to_owned)
}

/// Normalize tag input into the stored list form.
///
/// A string is split on spaces; a list is taken element by element and the
/// first bad element decides the error. Any other JSON type is rejected.
pub fn parse_tags(tag: &Value) -> Result<Vec<String>, Reason> {
    match tag {
        Value::String(text) => {
            let tags = split_tags(text);
            if tags.iter().all(|t| has_min_chars(t, MIN_TEXT_LENGTH)) {
                Ok(tags)
            } else {
                Err(Reason::TagTooShort)
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item.as_str() {
                None => Err(Reason::TagNotString),
                Some(t) if !has_min_chars(t, MIN_TEXT_LENGTH) => Err(Reason::TagTooShort),
                Some(t) => Ok(t.to_owned()),
            })
            .collect(),
        _ => Err(Reason::InvalidTags),
    }
}

/// Validated fields for a new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub tag: Vec<String>,
}

/// Validated partial update. `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tag: Option<Vec<String>>,
}

/// Validate create input: title, then description, then tags. A missing
/// title or description fails like a short one; a missing tag defaults to
/// [`DEFAULT_TAG`].
pub fn draft_note(
    title: Option<&Value>,
    description: Option<&Value>,
    tag: Option<&Value>,
) -> Result<NoteDraft, Reason> {
    let title = check_title(title.unwrap_or(&Value::Null))?;
    let description = check_description(description.unwrap_or(&Value::Null))?;
    let tag = match tag {
        Some(tag) => parse_tags(tag)?,
        None => vec![DEFAULT_TAG.to_owned()],
    };
    Ok(NoteDraft {
        title,
        description,
        tag,
    })
}

/// Validate update input. Present fields follow the create rules; a patch
/// with no fields at all is rejected.
pub fn patch_note(
    title: Option<&Value>,
    description: Option<&Value>,
    tag: Option<&Value>,
) -> Result<NotePatch, Reason> {
    let patch = NotePatch {
        title: title.map(check_title).transpose()?,
        description: description.map(check_description).transpose()?,
        tag: tag.map(parse_tags).transpose()?,
    };
    if patch == NotePatch::default() {
        return Err(Reason::EmptyUpdate);
    }
    Ok(patch)
}
