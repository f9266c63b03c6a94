//! Per-level tip bank for stats.
//!
//! A `StatTips` stores short hint strings keyed by level and hands out a
//! contextual tip when a stat reaches a level. Selection avoids repeating
//! the tip returned last time for the same level, and falls back to the
//! two preceding levels when the requested level has no tips of its own.

use crate::error::ProgressError;
use crate::validate::check_i64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default inclusive level range covered by a tip bank.
pub const DEFAULT_MIN_LEVEL: i32 = 0;
/// Default inclusive upper level bound of a tip bank.
pub const DEFAULT_MAX_LEVEL: i32 = 30;

/// Hard limits on configurable level bounds.
const LEVEL_BOUND_MIN: i64 = 0;
const LEVEL_BOUND_MAX: i64 = 100;

/// How many levels below the requested one the tip search may fall back.
const FALLBACK_DEPTH: i32 = 2;

/// A bank of per-level tips with anti-repeat selection.
///
/// Every level in `[min_level, max_level]` has an entry in the bank,
/// possibly empty. Multi-tip levels are sampled uniformly, excluding the
/// previously returned tip for that level, so the same tip is never
/// delivered twice in a row. Single-tip levels always return their one
/// entry.
///
/// # Examples
///
/// ```rust
/// use questlog::StatTips;
/// use std::collections::BTreeMap;
///
/// let mut bank = StatTips::with_tips(BTreeMap::from([
///     (2, vec!["unlock the journal".to_string()]),
/// ]));
///
/// let tip = bank.get_tip_for_level(2).unwrap();
/// assert_eq!(tip, "You have reached level 2! That means that: unlock the journal");
///
/// // Level 4 has no tips; the search falls back to level 2.
/// let tip = bank.get_tip_for_level(4).unwrap();
/// assert!(tip.starts_with("You have passed level 2!"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatTips {
    min_level: i32,
    max_level: i32,
    /// Fully populated: one entry per level in range, empty where no tip.
    tips: BTreeMap<i32, Vec<String>>,
    /// Last tip returned per level, for anti-repeat selection.
    previously_used: HashMap<i32, String>,
}

impl Default for StatTips {
    fn default() -> Self {
        Self {
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
            tips: (DEFAULT_MIN_LEVEL..=DEFAULT_MAX_LEVEL)
                .map(|level| (level, Vec::new()))
                .collect(),
            previously_used: HashMap::new(),
        }
    }
}

impl StatTips {
    /// Create an empty tip bank covering `[min_level, max_level]`.
    ///
    /// Both bounds must lie in `[0, 100]` and `max_level` must not be
    /// below `min_level`.
    pub fn new(min_level: i32, max_level: i32) -> Result<Self, ProgressError> {
        check_i64(
            "tip minimum level",
            min_level as i64,
            LEVEL_BOUND_MIN,
            LEVEL_BOUND_MAX,
        )?;
        check_i64(
            "tip maximum level",
            max_level as i64,
            LEVEL_BOUND_MIN,
            LEVEL_BOUND_MAX,
        )?;
        if max_level < min_level {
            return Err(ProgressError::InvertedLevelBounds {
                min_level,
                max_level,
            });
        }
        Ok(Self {
            min_level,
            max_level,
            tips: (min_level..=max_level)
                .map(|level| (level, Vec::new()))
                .collect(),
            previously_used: HashMap::new(),
        })
    }

    /// Create a tip bank over the default range, seeded with `tips`.
    ///
    /// Seed entries for levels outside the default range are dropped,
    /// same as in [`append`](Self::append).
    pub fn with_tips(tips: BTreeMap<i32, Vec<String>>) -> Self {
        let mut bank = Self::default();
        bank.append(tips);
        bank
    }

    /// The inclusive lower level bound.
    pub fn min_level(&self) -> i32 {
        self.min_level
    }

    /// The inclusive upper level bound.
    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    /// The per-level tip lists.
    pub fn tips(&self) -> &BTreeMap<i32, Vec<String>> {
        &self.tips
    }

    /// Merge additional tips into the bank.
    ///
    /// Entries for levels outside `[min_level, max_level]` are dropped
    /// without error; this is silent filtering, not a failure condition.
    pub fn append(&mut self, tips: BTreeMap<i32, Vec<String>>) {
        for (level, mut list) in tips {
            if level < self.min_level || level > self.max_level {
                continue;
            }
            if let Some(existing) = self.tips.get_mut(&level) {
                existing.append(&mut list);
            }
        }
    }

    /// Get a contextual tip for `level`, sampling with the thread RNG.
    ///
    /// See [`get_tip_for_level_with`](Self::get_tip_for_level_with).
    pub fn get_tip_for_level(&mut self, level: i32) -> Result<String, ProgressError> {
        self.get_tip_for_level_with(level, &mut rand::thread_rng())
    }

    /// Get a contextual tip for `level`, sampling with the given RNG.
    ///
    /// Searches `level`, `level - 1` and `level - 2` (never below
    /// `min_level`) for the first level that has any tip, and formats it
    /// as a "reached"/"passed" announcement. "reached" is used only when
    /// the tip comes from the exact requested level.
    ///
    /// # Errors
    ///
    /// * [`ProgressError::LevelOutOfRange`] if `level` is outside the
    ///   bank's configured bounds.
    /// * [`ProgressError::NoTipAvailable`] if none of the searched levels
    ///   has a tip.
    pub fn get_tip_for_level_with<R: Rng>(
        &mut self,
        level: i32,
        rng: &mut R,
    ) -> Result<String, ProgressError> {
        if level < self.min_level || level > self.max_level {
            return Err(ProgressError::LevelOutOfRange {
                level,
                min_level: self.min_level,
                max_level: self.max_level,
            });
        }

        let floor = (level - FALLBACK_DEPTH).max(self.min_level);
        for candidate in (floor..=level).rev() {
            if let Some(tip) = self.select_tip(candidate, rng) {
                let verb = if candidate == level { "reached" } else { "passed" };
                return Ok(format!(
                    "You have {} level {}! That means that: {}",
                    verb, candidate, tip
                ));
            }
        }

        Err(ProgressError::NoTipAvailable(level))
    }

    /// Pick a tip for exactly `level`, honoring the anti-repeat rule.
    ///
    /// Returns `None` when the level has no tips.
    fn select_tip<R: Rng>(&mut self, level: i32, rng: &mut R) -> Option<String> {
        let list = self.tips.get(&level)?;
        let tip = match list.len() {
            0 => return None,
            1 => list[0].clone(),
            _ => {
                let previous = self.previously_used.get(&level);
                let candidates: Vec<&String> =
                    list.iter().filter(|tip| previous != Some(*tip)).collect();
                // All entries equal the previous tip: fall back to the full list.
                if candidates.is_empty() {
                    list[rng.gen_range(0..list.len())].clone()
                } else {
                    candidates[rng.gen_range(0..candidates.len())].clone()
                }
            }
        };
        self.previously_used.insert(level, tip.clone());
        Some(tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seed_bank() -> StatTips {
        StatTips::with_tips(BTreeMap::from([
            (1, vec!["level1 tip1".to_string()]),
            (
                2,
                vec![
                    "level2 tip1".to_string(),
                    "level2 tip2".to_string(),
                    "level2 tip3".to_string(),
                ],
            ),
            (3, vec!["level3 tip1".to_string()]),
        ]))
    }

    #[test]
    fn test_every_level_in_range_has_entry() {
        let bank = seed_bank();
        assert_eq!(bank.tips().len(), 31);
        assert!(bank.tips()[&17].is_empty());
        assert_eq!(bank.tips()[&2].len(), 3);
    }

    #[test]
    fn test_new_validates_bounds() {
        assert!(StatTips::new(0, 30).is_ok());
        assert!(matches!(
            StatTips::new(-1, 30),
            Err(ProgressError::OutOfBounds { .. })
        ));
        assert!(matches!(
            StatTips::new(0, 101),
            Err(ProgressError::OutOfBounds { .. })
        ));
        assert!(matches!(
            StatTips::new(10, 5),
            Err(ProgressError::InvertedLevelBounds { .. })
        ));
    }

    #[test]
    fn test_append_merges_and_filters() {
        let mut bank = seed_bank();
        bank.append(BTreeMap::from([
            (3, vec!["level3 tip2".to_string()]),
            (900, vec!["dropped".to_string()]),
        ]));
        assert_eq!(bank.tips()[&3].len(), 2);
        assert!(!bank.tips().contains_key(&900));
    }

    #[test]
    fn test_level_out_of_range() {
        let mut bank = seed_bank();
        assert!(matches!(
            bank.get_tip_for_level(-1),
            Err(ProgressError::LevelOutOfRange { .. })
        ));
        assert!(matches!(
            bank.get_tip_for_level(900),
            Err(ProgressError::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn test_fallback_to_lower_level() {
        let mut bank = seed_bank();
        // Levels 5 and 4 are empty; 3 has a tip.
        let tip = bank.get_tip_for_level(5).unwrap();
        assert_eq!(
            tip,
            "You have passed level 3! That means that: level3 tip1"
        );
        // Level 6 searches 6, 5, 4: all empty.
        assert!(matches!(
            bank.get_tip_for_level(6),
            Err(ProgressError::NoTipAvailable(6))
        ));
    }

    #[test]
    fn test_reached_wording_for_exact_level() {
        let mut bank = seed_bank();
        let tip = bank.get_tip_for_level(1).unwrap();
        assert_eq!(
            tip,
            "You have reached level 1! That means that: level1 tip1"
        );
    }

    #[test]
    fn test_single_tip_level_never_runs_out() {
        let mut bank = seed_bank();
        let first = bank.get_tip_for_level(3).unwrap();
        let second = bank.get_tip_for_level(3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_immediate_repeat_on_multi_tip_level() {
        let mut bank = seed_bank();
        let mut rng = StdRng::seed_from_u64(7);
        let mut previous = bank.get_tip_for_level_with(2, &mut rng).unwrap();
        for _ in 0..50 {
            let next = bank.get_tip_for_level_with(2, &mut rng).unwrap();
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_deterministic_when_one_candidate_remains() {
        let mut bank = StatTips::with_tips(BTreeMap::from([(
            4,
            vec!["first".to_string(), "second".to_string()],
        )]));
        let mut rng = StdRng::seed_from_u64(0);
        let a = bank.get_tip_for_level_with(4, &mut rng).unwrap();
        let b = bank.get_tip_for_level_with(4, &mut rng).unwrap();
        let c = bank.get_tip_for_level_with(4, &mut rng).unwrap();
        // With two tips the selection must alternate deterministically.
        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
