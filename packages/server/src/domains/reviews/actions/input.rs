//! Validation of raw request values into typed action input.

use crate::common::Id;
use crate::domains::reviews::error::{ReviewError, ReviewResult};
use crate::domains::reviews::machines::ReactionAction;

/// Parse an id that must be present; `message` is returned on any failure
pub fn require_id<T>(raw: Option<&str>, message: &str) -> ReviewResult<Id<T>> {
    raw.and_then(|value| Id::parse(value).ok())
        .ok_or_else(|| ReviewError::invalid(message))
}

/// Non-blank text, returned as given
pub fn require_text<'a>(raw: Option<&'a str>, message: &str) -> ReviewResult<&'a str> {
    match raw {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ReviewError::invalid(message)),
    }
}

pub fn require_action(raw: Option<&str>) -> ReviewResult<ReactionAction> {
    let raw = raw.ok_or_else(|| ReviewError::invalid("Action is required."))?;
    Ok(raw.parse::<ReactionAction>()?)
}

/// Counters set by an administrator must stay non-negative
pub fn optional_count(raw: Option<i64>, field: &str) -> ReviewResult<Option<i32>> {
    raw.map(|value| {
        i32::try_from(value)
            .ok()
            .filter(|count| *count >= 0)
            .ok_or_else(|| ReviewError::invalid(format!("{field} must be a non-negative integer.")))
    })
    .transpose()
}
