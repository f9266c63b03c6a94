//! Task entities and the completion state machine.
//!
//! A `Task` is a user-created unit of work tied to a stat. Completing it
//! computes an exp reward from the base reward and the difficulty/time
//! modifiers, with a penalty when the due date was missed. The engine
//! only returns the reward; applying it to the profile's exp totals is
//! the caller's job.

use crate::error::ProgressError;
use crate::key::{StatKey, TaskKey};
use crate::validate::{check_f64, check_i64, check_text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rewards are rounded to this grid.
pub const EXP_ROUND_TO: i64 = 2;

/// Fixed fraction removed from every reward before rounding.
pub const TIME_MODIFIER_PENALTY: f64 = 0.2;

/// Default reward fraction lost when completing past the due date.
pub const DEFAULT_DUE_DATE_PENALTY: f64 = 0.25;

const DEFAULT_DESCRIPTION: &str = "Add more info about your task";
const DEFAULT_MODIFIER: f64 = 1.0;
const DEFAULT_BASE_EXP_REWARD: i64 = 10;

const DISPLAY_NAME_FIELD: &str = "task display name";
const MIN_DISPLAY_NAME_LEN: usize = 3;
const MAX_DISPLAY_NAME_LEN: usize = 128;

const DESCRIPTION_FIELD: &str = "task description";
const MIN_DESCRIPTION_LEN: usize = 3;
const MAX_DESCRIPTION_LEN: usize = 32_768;

const MODIFIER_BOUNDS: (f64, f64) = (0.0, 100.0);
const BASE_EXP_REWARD_BOUNDS: (i64, i64) = (0, 99_999);
const DUE_DATE_PENALTY_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Lifecycle status of a task.
///
/// `InProgress` is the initial state. `Completed` and
/// `CompletedAfterDueDate` are terminal and produced by
/// [`Task::complete`]. `PastDue` is transient and produced by the
/// due-date sweep. `Failed` and `Abandoned` are terminal and only ever
/// set by the external layer via [`Task::set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Completed after Due Date")]
    CompletedAfterDueDate,
    #[serde(rename = "Past Due")]
    PastDue,
    #[serde(rename = "Failed")]
    Failed,
    #[serde(rename = "Abandoned")]
    Abandoned,
}

impl TaskStatus {
    /// Whether the task has reached a completed status.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed | Self::CompletedAfterDueDate)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::CompletedAfterDueDate => "Completed after Due Date",
            Self::PastDue => "Past Due",
            Self::Failed => "Failed",
            Self::Abandoned => "Abandoned",
        };
        f.write_str(text)
    }
}

/// A unit of user work tied to a stat, yielding exp on completion.
///
/// All mutable fields go through validated setters; out-of-bounds values
/// error instead of clamping. The creation time is set once at
/// construction and a due date, once set, can never precede it.
///
/// # Examples
///
/// ```rust
/// use questlog::{Stat, Task};
///
/// let stat = Stat::new("Focus").unwrap();
/// let mut task = Task::new("Read a chapter", stat.key()).unwrap();
///
/// // round(10 · 1 · 1 · 0.8 / 2) · 2 = 8
/// let reward = task.complete().unwrap();
/// assert_eq!(reward, 8);
/// assert!(task.status().is_completed());
/// assert!(task.complete().is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    key: TaskKey,
    display_name: String,
    description: String,
    difficulty_modifier: f64,
    time_modifier: f64,
    base_exp_reward: i64,
    due_date: Option<DateTime<Utc>>,
    due_date_penalty: f64,
    creation_time: DateTime<Utc>,
    status: TaskStatus,
    associated_stat: StatKey,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Task {}

impl Task {
    /// Create a task with default modifiers, reward and description.
    ///
    /// The display name is validated (3 to 128 characters, at least 3 of
    /// them alphanumeric). The task starts `InProgress` with no due
    /// date; `creation_time` is set to now and never changes.
    pub fn new(display_name: &str, associated_stat: StatKey) -> Result<Self, ProgressError> {
        check_text(
            DISPLAY_NAME_FIELD,
            display_name,
            MIN_DISPLAY_NAME_LEN,
            MAX_DISPLAY_NAME_LEN,
        )?;
        Ok(Self {
            key: TaskKey::new(),
            display_name: display_name.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            difficulty_modifier: DEFAULT_MODIFIER,
            time_modifier: DEFAULT_MODIFIER,
            base_exp_reward: DEFAULT_BASE_EXP_REWARD,
            due_date: None,
            due_date_penalty: DEFAULT_DUE_DATE_PENALTY,
            creation_time: Utc::now(),
            status: TaskStatus::InProgress,
            associated_stat,
        })
    }

    /// This task's identity key.
    pub fn key(&self) -> TaskKey {
        self.key
    }

    /// The user-facing name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The difficulty exp modifier.
    pub fn difficulty_modifier(&self) -> f64 {
        self.difficulty_modifier
    }

    /// The time-consumption exp modifier.
    pub fn time_modifier(&self) -> f64 {
        self.time_modifier
    }

    /// The base exp reward before modifiers.
    pub fn base_exp_reward(&self) -> i64 {
        self.base_exp_reward
    }

    /// The due date, if one is set.
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// The reward fraction lost when completing past the due date.
    pub fn due_date_penalty(&self) -> f64 {
        self.due_date_penalty
    }

    /// When the task was created. Immutable.
    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// The current lifecycle status.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// The stat this task feeds exp into.
    pub fn associated_stat(&self) -> StatKey {
        self.associated_stat
    }

    /// Rename the task (3 to 128 characters, ≥3 alphanumeric).
    pub fn set_display_name(&mut self, value: &str) -> Result<(), ProgressError> {
        check_text(
            DISPLAY_NAME_FIELD,
            value,
            MIN_DISPLAY_NAME_LEN,
            MAX_DISPLAY_NAME_LEN,
        )?;
        self.display_name = value.to_string();
        Ok(())
    }

    /// Set the description (3 to 32768 characters, ≥3 alphanumeric).
    pub fn set_description(&mut self, value: &str) -> Result<(), ProgressError> {
        check_text(
            DESCRIPTION_FIELD,
            value,
            MIN_DESCRIPTION_LEN,
            MAX_DESCRIPTION_LEN,
        )?;
        self.description = value.to_string();
        Ok(())
    }

    /// Set the difficulty modifier (bounds `[0, 100]`).
    pub fn set_difficulty_modifier(&mut self, value: f64) -> Result<(), ProgressError> {
        check_f64(
            "task difficulty modifier",
            value,
            MODIFIER_BOUNDS.0,
            MODIFIER_BOUNDS.1,
        )?;
        self.difficulty_modifier = value;
        Ok(())
    }

    /// Set the time modifier (bounds `[0, 100]`).
    pub fn set_time_modifier(&mut self, value: f64) -> Result<(), ProgressError> {
        check_f64(
            "task time modifier",
            value,
            MODIFIER_BOUNDS.0,
            MODIFIER_BOUNDS.1,
        )?;
        self.time_modifier = value;
        Ok(())
    }

    /// Set the base exp reward (bounds `[0, 99999]`).
    pub fn set_base_exp_reward(&mut self, value: i64) -> Result<(), ProgressError> {
        check_i64(
            "task base exp reward",
            value,
            BASE_EXP_REWARD_BOUNDS.0,
            BASE_EXP_REWARD_BOUNDS.1,
        )?;
        self.base_exp_reward = value;
        Ok(())
    }

    /// Set the due date.
    ///
    /// # Errors
    ///
    /// [`ProgressError::DueDateBeforeCreation`] if the date precedes the
    /// task's creation time. A due date can never be moved before it.
    pub fn set_due_date(&mut self, value: DateTime<Utc>) -> Result<(), ProgressError> {
        if value < self.creation_time {
            return Err(ProgressError::DueDateBeforeCreation {
                due_date: value,
                creation_time: self.creation_time,
            });
        }
        self.due_date = Some(value);
        Ok(())
    }

    /// Set the past-due reward penalty (bounds `[0, 1]`).
    pub fn set_due_date_penalty(&mut self, value: f64) -> Result<(), ProgressError> {
        check_f64(
            "task due date penalty",
            value,
            DUE_DATE_PENALTY_BOUNDS.0,
            DUE_DATE_PENALTY_BOUNDS.1,
        )?;
        self.due_date_penalty = value;
        Ok(())
    }

    /// Force a status. Hook for the external layer, which owns the
    /// `Failed` and `Abandoned` transitions; no validation is applied.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Check the due date against the current time.
    ///
    /// See [`check_due_date_at`](Self::check_due_date_at).
    pub fn check_due_date(&mut self) -> Result<(), ProgressError> {
        self.check_due_date_at(Utc::now())
    }

    /// Check the due date against `now`, as the periodic sweep does.
    ///
    /// Transitions `InProgress` to `PastDue` when the due date has
    /// elapsed; idempotent on an already past-due task. Terminal and
    /// externally driven statuses are left untouched.
    ///
    /// # Errors
    ///
    /// [`ProgressError::MissingDueDate`] if no due date is set.
    pub fn check_due_date_at(&mut self, now: DateTime<Utc>) -> Result<(), ProgressError> {
        let due_date = self
            .due_date
            .ok_or_else(|| ProgressError::MissingDueDate(self.display_name.clone()))?;
        if due_date < now
            && matches!(self.status, TaskStatus::InProgress | TaskStatus::PastDue)
        {
            self.status = TaskStatus::PastDue;
        }
        Ok(())
    }

    /// Complete the task now and return the exp reward.
    ///
    /// See [`complete_at`](Self::complete_at).
    pub fn complete(&mut self) -> Result<i64, ProgressError> {
        self.complete_at(Utc::now())
    }

    /// Complete the task as of `now` and return the exp reward.
    ///
    /// The reward is
    /// `round(base · difficulty · time · (1 − 0.2) / 2) · 2`. When a due
    /// date is set the due-date check runs first; completing a past-due
    /// task multiplies the reward by `1 − due_date_penalty` (rounded)
    /// and ends in `CompletedAfterDueDate`, otherwise in `Completed`.
    ///
    /// The returned reward is the exp delta the caller applies to the
    /// associated stat's total; the task never mutates profile state.
    ///
    /// # Errors
    ///
    /// [`ProgressError::AlreadyCompleted`] when the task is already in a
    /// completed status.
    pub fn complete_at(&mut self, now: DateTime<Utc>) -> Result<i64, ProgressError> {
        if self.status.is_completed() {
            return Err(ProgressError::AlreadyCompleted(self.display_name.clone()));
        }

        let raw = self.base_exp_reward as f64
            * self.difficulty_modifier
            * self.time_modifier
            * (1.0 - TIME_MODIFIER_PENALTY);
        let mut reward = (raw / EXP_ROUND_TO as f64).round() as i64 * EXP_ROUND_TO;

        if self.due_date.is_some() {
            self.check_due_date_at(now)?;
        }
        if self.status == TaskStatus::PastDue {
            reward = ((1.0 - self.due_date_penalty) * reward as f64).round() as i64;
            self.status = TaskStatus::CompletedAfterDueDate;
        } else {
            self.status = TaskStatus::Completed;
        }
        Ok(reward)
    }
}
