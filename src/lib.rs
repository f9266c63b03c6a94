//! # questlog - Experience & Leveling Engine for Gamified Task Tracking
//!
//! The domain core of a gamified task tracker: users accumulate
//! experience ("exp") toward named **Stats** by completing **Tasks**.
//! This crate is the leveling engine and task-lifecycle state machine;
//! persistence, HTTP surfaces and account handling live in outer layers
//! that read and write the plain records exposed here.
//!
//! ## Core Concepts
//!
//! ### Progression Pipeline
//!
//! ```text
//! [Task] --complete--> exp reward --merge--> [UserProfile] --exp--> [Stat] --> level / icon / tips
//! ```
//!
//! 1. **Tasks** compute an exp reward on completion (modifiers, late
//!    penalty)
//! 2. **UserProfile** accumulates per-stat exp totals
//! 3. **Stats** map exp totals to levels, icon tiers and contextual tips
//!
//! ### Key Features
//!
//! - **Gap-free level curve**: consecutive level brackets tile the exp
//!   axis exactly, on a clean round-to-10 grid
//! - **Validated mutation**: every setter checks bounds and errors
//!   instead of clamping
//! - **Due-date state machine**: sweep jobs mark tasks past due; late
//!   completion pays a penalized reward
//! - **Anti-repeat tips**: per-level hints that never repeat
//!   back-to-back, with an injectable RNG for deterministic tests
//! - **Stable identity**: opaque keys, so renaming a stat never
//!   reassigns its exp
//!
//! ## Example
//!
//! ```rust
//! use questlog::{Stat, Task, UserProfile};
//! use std::collections::HashMap;
//!
//! let stat = Stat::new("Focus").unwrap();
//! let mut task = Task::new("Read a chapter", stat.key()).unwrap();
//! let mut profile = UserProfile::default();
//!
//! // Completing the task yields round(10 * 1 * 1 * 0.8 / 2) * 2 = 8 exp.
//! let reward = task.complete().unwrap();
//! profile.merge_stat_exp(HashMap::from([(stat.key(), reward)])).unwrap();
//!
//! let snapshot = stat.snapshot(profile.stat_exp()[&stat.key()]);
//! assert_eq!(snapshot.level, 0); // 8 exp is below the level-1 requirement
//! assert_eq!(snapshot.icon_name, "focus_0");
//! ```
//!
//! ## Modules
//!
//! - [`stat`] - Stat entities and the leveling curve
//! - [`tips`] - Per-level tip bank with anti-repeat selection
//! - [`task`] - Task entities and the completion state machine
//! - [`profile`] - Per-user aggregate of exp totals and tasks
//! - [`snapshot`] - Externally rendered stat payloads
//! - [`key`] - Opaque identity keys
//! - [`error`] - Error types

pub mod error;
pub mod key;
pub mod profile;
pub mod snapshot;
pub mod stat;
pub mod task;
pub mod tips;

mod validate;

// Re-export main types for convenience
pub use error::ProgressError;
pub use key::{StatKey, TaskKey};
pub use profile::UserProfile;
pub use snapshot::StatSnapshot;
pub use stat::{LevelBracket, Stat, MAX_TRACKED_LEVEL, UNMAPPED_LEVEL};
pub use task::{Task, TaskStatus};
pub use tips::StatTips;
