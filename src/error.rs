//! Error types for the leveling and task-lifecycle engine.
//!
//! Every fallible operation in the crate returns `ProgressError`. All
//! errors are raised synchronously to the caller; nothing is retried or
//! recovered internally, and the presentation layer owns the translation
//! into user-facing messages.

use crate::key::{StatKey, TaskKey};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while validating or mutating engine entities.
///
/// # Examples
///
/// ```rust
/// use questlog::{ProgressError, Stat};
///
/// let err = Stat::new("A").unwrap_err();
/// assert!(matches!(err, ProgressError::TextTooShort { .. }));
/// println!("{}", err); // "stat display name is too short (1 < 3)"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProgressError {
    /// A text field is shorter than its minimum length.
    #[error("{field} is too short ({actual} < {min})")]
    TextTooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    /// A text field is longer than its maximum length.
    #[error("{field} is too long ({actual} > {max})")]
    TextTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// A text field does not contain enough alphanumeric characters.
    #[error("{field} needs at least {min} alphanumeric characters: {value:?}")]
    TextNotAlphanumeric {
        field: &'static str,
        min: usize,
        value: String,
    },

    /// A numeric field is outside its declared bounds.
    ///
    /// Raised by validated setters and constructors; values are never
    /// silently clamped or coerced.
    #[error("{field} is outside the bounds [{min}, {max}]: {value}")]
    OutOfBounds {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// A due date was set earlier than the task's creation time.
    #[error("due date {due_date} is earlier than creation time {creation_time}")]
    DueDateBeforeCreation {
        due_date: DateTime<Utc>,
        creation_time: DateTime<Utc>,
    },

    /// A tip bank was constructed with `max_level` below `min_level`.
    #[error("tip level bounds are inverted ({max_level} < {min_level})")]
    InvertedLevelBounds { min_level: i32, max_level: i32 },

    /// A requested level is outside a tip bank's configured range.
    #[error("level {level} exceeds tip level bounds [{min_level}, {max_level}]")]
    LevelOutOfRange {
        level: i32,
        min_level: i32,
        max_level: i32,
    },

    /// No tip exists for the requested level or its fallback levels.
    #[error("no tips available for level {0}")]
    NoTipAvailable(i32),

    /// The task has already reached a completed status.
    #[error("task {0:?} has already been completed")]
    AlreadyCompleted(String),

    /// A due-date check was requested on a task without a due date.
    #[error("task {0:?} does not have a due date to check")]
    MissingDueDate(String),

    /// The stat is not tracked by the profile.
    #[error("stat {0} is not tracked in this profile")]
    UnknownStat(StatKey),

    /// The task is not present in the profile.
    #[error("task {0} is not in this profile")]
    UnknownTask(TaskKey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = ProgressError::OutOfBounds {
            field: "task difficulty modifier",
            min: 0.0,
            max: 100.0,
            value: 101.0,
        };
        let display = err.to_string();
        assert!(display.contains("task difficulty modifier"));
        assert!(display.contains("[0, 100]"));
        assert!(display.contains("101"));
    }

    #[test]
    fn test_too_short_display() {
        let err = ProgressError::TextTooShort {
            field: "stat display name",
            min: 3,
            actual: 1,
        };
        assert_eq!(err.to_string(), "stat display name is too short (1 < 3)");
    }

    #[test]
    fn test_no_tip_display() {
        let err = ProgressError::NoTipAvailable(7);
        assert!(err.to_string().contains("level 7"));
    }
}
