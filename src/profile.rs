//! Per-user aggregate of stat exp totals and active tasks.

use crate::error::ProgressError;
use crate::key::{StatKey, TaskKey};
use crate::task::Task;
use crate::validate::check_i64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive bounds for a stat's accumulated exp total.
pub const STAT_EXP_BOUNDS: (i64, i64) = (0, 999_999_999);

/// A user profile: exp totals per stat plus the active task list.
///
/// Mutation follows merge semantics: writing exp upserts entries and
/// preserves everything not mentioned, and adding tasks silently drops
/// ones already present (by [`TaskKey`] identity). Removals of absent
/// entries are errors.
///
/// # Examples
///
/// ```rust
/// use questlog::{Stat, Task, UserProfile};
/// use std::collections::HashMap;
///
/// let stat = Stat::new("Focus").unwrap();
/// let mut task = Task::new("Read a chapter", stat.key()).unwrap();
/// let mut profile = UserProfile::default();
///
/// let reward = task.complete().unwrap();
/// let total = profile.stat_exp().get(&stat.key()).copied().unwrap_or(0);
/// profile
///     .merge_stat_exp(HashMap::from([(stat.key(), total + reward)]))
///     .unwrap();
///
/// assert_eq!(profile.stat_exp()[&stat.key()], 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    stat_exp: HashMap<StatKey, i64>,
    tasks: Vec<Task>,
}

impl UserProfile {
    /// Create a profile from initial exp totals and tasks.
    ///
    /// Exp values are validated against [`STAT_EXP_BOUNDS`]; duplicate
    /// tasks in the input are dropped, keeping the first occurrence.
    pub fn new(
        stat_exp: HashMap<StatKey, i64>,
        tasks: Vec<Task>,
    ) -> Result<Self, ProgressError> {
        let mut profile = Self::default();
        profile.merge_stat_exp(stat_exp)?;
        profile.add_tasks(tasks);
        Ok(profile)
    }

    /// The exp total per stat.
    pub fn stat_exp(&self) -> &HashMap<StatKey, i64> {
        &self.stat_exp
    }

    /// The task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable access to the tasks, for sweeps and completion.
    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// Upsert exp totals.
    ///
    /// Entries already present and not mentioned in `updates` are
    /// preserved. Validation happens entry by entry; an out-of-bounds
    /// value errors without touching the remaining entries.
    pub fn merge_stat_exp(
        &mut self,
        updates: HashMap<StatKey, i64>,
    ) -> Result<(), ProgressError> {
        for (stat, exp) in updates {
            check_i64("stat experience", exp, STAT_EXP_BOUNDS.0, STAT_EXP_BOUNDS.1)?;
            self.stat_exp.insert(stat, exp);
        }
        Ok(())
    }

    /// Append tasks not already present; duplicates are silently dropped.
    pub fn add_tasks(&mut self, tasks: Vec<Task>) {
        for task in tasks {
            if !self.tasks.iter().any(|existing| existing.key() == task.key()) {
                self.tasks.push(task);
            }
        }
    }

    /// Drop a stat's exp entry, returning the removed total.
    ///
    /// # Errors
    ///
    /// [`ProgressError::UnknownStat`] if the stat is not tracked.
    pub fn remove_stat_exp(&mut self, stat: &StatKey) -> Result<i64, ProgressError> {
        self.stat_exp
            .remove(stat)
            .ok_or(ProgressError::UnknownStat(*stat))
    }

    /// Drop a task from the list, returning it.
    ///
    /// # Errors
    ///
    /// [`ProgressError::UnknownTask`] if the task is not present.
    pub fn remove_task(&mut self, task: &TaskKey) -> Result<Task, ProgressError> {
        let index = self
            .tasks
            .iter()
            .position(|existing| existing.key() == *task)
            .ok_or(ProgressError::UnknownTask(*task))?;
        Ok(self.tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::Stat;

    fn sample_profile() -> (Stat, Task, UserProfile) {
        let stat = Stat::new("Sample Stat").unwrap();
        let task = Task::new("Sample Task", stat.key()).unwrap();
        let profile =
            UserProfile::new(HashMap::from([(stat.key(), 100)]), vec![task.clone()]).unwrap();
        (stat, task, profile)
    }

    #[test]
    fn test_initialization() {
        let (stat, _, profile) = sample_profile();
        assert_eq!(profile.stat_exp()[&stat.key()], 100);
        assert_eq!(profile.tasks().len(), 1);
    }

    #[test]
    fn test_exp_bounds_enforced() {
        let (stat, _, mut profile) = sample_profile();
        assert!(profile
            .merge_stat_exp(HashMap::from([(stat.key(), -10)]))
            .is_err());
        assert!(profile
            .merge_stat_exp(HashMap::from([(stat.key(), 1_000_000_000)]))
            .is_err());
        // The original entry is untouched by the failed merge.
        assert_eq!(profile.stat_exp()[&stat.key()], 100);
    }

    #[test]
    fn test_merge_preserves_other_entries() {
        let (stat, _, mut profile) = sample_profile();
        let other = Stat::new("Other Stat").unwrap();
        profile
            .merge_stat_exp(HashMap::from([(other.key(), 50)]))
            .unwrap();
        assert_eq!(profile.stat_exp()[&stat.key()], 100);
        assert_eq!(profile.stat_exp()[&other.key()], 50);

        profile
            .merge_stat_exp(HashMap::from([(stat.key(), 108)]))
            .unwrap();
        assert_eq!(profile.stat_exp()[&stat.key()], 108);
        assert_eq!(profile.stat_exp()[&other.key()], 50);
    }

    #[test]
    fn test_duplicate_tasks_dropped() {
        let (_, task, mut profile) = sample_profile();
        profile.add_tasks(vec![task.clone(), task.clone()]);
        assert_eq!(profile.tasks().len(), 1);

        // A distinct task with identical fields is still a new task.
        let twin = Task::new("Sample Task", task.associated_stat()).unwrap();
        profile.add_tasks(vec![twin]);
        assert_eq!(profile.tasks().len(), 2);
    }

    #[test]
    fn test_remove_stat_exp() {
        let (stat, _, mut profile) = sample_profile();
        let absent = Stat::new("Nonexistent Stat").unwrap();
        assert!(matches!(
            profile.remove_stat_exp(&absent.key()),
            Err(ProgressError::UnknownStat(_))
        ));

        assert_eq!(profile.remove_stat_exp(&stat.key()).unwrap(), 100);
        assert!(!profile.stat_exp().contains_key(&stat.key()));
    }

    #[test]
    fn test_remove_task() {
        let (stat, task, mut profile) = sample_profile();
        let absent = Task::new("Nonexistent Task", stat.key()).unwrap();
        assert!(matches!(
            profile.remove_task(&absent.key()),
            Err(ProgressError::UnknownTask(_))
        ));

        let removed = profile.remove_task(&task.key()).unwrap();
        assert_eq!(removed.key(), task.key());
        assert!(profile.tasks().is_empty());
    }
}
