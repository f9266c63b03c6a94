//! Stat entities and the leveling curve.
//!
//! A `Stat` is a named progression track: an exponential exp curve
//! rounded to a coarse grid with a linear flat bonus on top, an icon
//! tier derived from the level, and an owned tip bank. The curve is
//! configured per stat and validated on every mutation.

use crate::error::ProgressError;
use crate::key::StatKey;
use crate::snapshot::StatSnapshot;
use crate::tips::StatTips;
use crate::validate::{check_f64, check_i64, check_text};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Levels at which the stat's icon changes to the next tier.
pub const ICON_CHANGE_THRESHOLDS: [i32; 3] = [4, 9, 13];

/// Highest level the bracket search covers.
pub const MAX_TRACKED_LEVEL: i32 = 50;

/// Sentinel level returned when an exp total lies past the level cap.
///
/// Callers must treat this as "level cap exceeded", not as level zero.
pub const UNMAPPED_LEVEL: i32 = -1;

/// Exp bracket boundaries are rounded to this grid.
const EXP_ROUND_TO: i64 = 10;

const DISPLAY_NAME_FIELD: &str = "stat display name";
const MIN_DISPLAY_NAME_LEN: usize = 3;
const MAX_DISPLAY_NAME_LEN: usize = 64;

const MULT_BOUNDS: (f64, f64) = (1.0, 10.0);
const FLAT_BONUS_BOUNDS: (i64, i64) = (0, 999_999);
const BASE_REQUIREMENT_BOUNDS: (i64, i64) = (0, 999_999);

/// Default exp curve: each level costs 1.3x the previous one.
pub const DEFAULT_EXP_REQUIREMENT_MULT: f64 = 1.3;
/// Default flat exp added per level on top of the exponential curve.
pub const DEFAULT_EXP_REQUIREMENT_FLAT_BONUS: i64 = 150;
/// Default exp required to reach level 1.
pub const DEFAULT_LEVEL_BASE_REQUIREMENT: i64 = 100;

/// The level and exp bracket an exp total falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBracket {
    /// The level (0 below the base requirement, [`UNMAPPED_LEVEL`] past the cap).
    pub level: i32,
    /// Minimum exp of this level's bracket.
    pub min_exp: i64,
    /// Maximum exp of this level's bracket.
    pub max_exp: i64,
}

/// A named skill/attribute progression track.
///
/// Identity is the opaque [`StatKey`] assigned at creation; equality and
/// hashing compare keys only, so renaming a stat never changes which
/// profile entries it owns. The `id_name` slug is re-derived whenever
/// the display name changes.
///
/// # Examples
///
/// ```rust
/// use questlog::Stat;
///
/// let stat = Stat::new(" Magic Skill_!").unwrap();
/// assert_eq!(stat.id_name(), "magic_skill");
/// assert_eq!(stat.icon_base_name(), "magic_skill");
///
/// // 100 exp reaches level 1 on the default curve.
/// assert_eq!(stat.exp_to_level(99), 0);
/// assert_eq!(stat.exp_to_level(100), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    key: StatKey,
    display_name: String,
    /// Slug derived from `display_name`; never set directly.
    id_name: String,
    icon_base_name: String,
    exp_requirement_mult: f64,
    exp_requirement_flat_bonus: i64,
    level_base_requirement: i64,
    tips: StatTips,
}

impl PartialEq for Stat {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Stat {}

impl Hash for Stat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Stat {
    /// Create a stat with the default exp curve.
    ///
    /// The display name is validated (3 to 64 characters, at least 3 of
    /// them alphanumeric); the icon base name defaults to the derived
    /// `id_name` slug.
    pub fn new(display_name: &str) -> Result<Self, ProgressError> {
        Self::with_curve(
            display_name,
            DEFAULT_EXP_REQUIREMENT_MULT,
            DEFAULT_EXP_REQUIREMENT_FLAT_BONUS,
            DEFAULT_LEVEL_BASE_REQUIREMENT,
        )
    }

    /// Create a stat with an explicit exp curve.
    ///
    /// # Errors
    ///
    /// Validates the display name first, then each curve parameter:
    /// `exp_requirement_mult` in `[1, 10]`, `exp_requirement_flat_bonus`
    /// and `level_base_requirement` in `[0, 999999]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use questlog::Stat;
    ///
    /// let stat = Stat::with_curve("Piano", 1.2, 100, 100).unwrap();
    /// assert_eq!(stat.bounds_for_level(1), (100, 219));
    ///
    /// assert!(Stat::with_curve("Piano", 0.5, 100, 100).is_err());
    /// ```
    pub fn with_curve(
        display_name: &str,
        exp_requirement_mult: f64,
        exp_requirement_flat_bonus: i64,
        level_base_requirement: i64,
    ) -> Result<Self, ProgressError> {
        check_text(
            DISPLAY_NAME_FIELD,
            display_name,
            MIN_DISPLAY_NAME_LEN,
            MAX_DISPLAY_NAME_LEN,
        )?;
        check_f64(
            "stat exp requirement multiplier",
            exp_requirement_mult,
            MULT_BOUNDS.0,
            MULT_BOUNDS.1,
        )?;
        check_i64(
            "stat exp flat bonus",
            exp_requirement_flat_bonus,
            FLAT_BONUS_BOUNDS.0,
            FLAT_BONUS_BOUNDS.1,
        )?;
        check_i64(
            "stat level base requirement",
            level_base_requirement,
            BASE_REQUIREMENT_BOUNDS.0,
            BASE_REQUIREMENT_BOUNDS.1,
        )?;

        let id_name = derive_id_name(display_name);
        Ok(Self {
            key: StatKey::new(),
            display_name: display_name.to_string(),
            icon_base_name: id_name.clone(),
            id_name,
            exp_requirement_mult,
            exp_requirement_flat_bonus,
            level_base_requirement,
            tips: StatTips::default(),
        })
    }

    /// This stat's identity key.
    pub fn key(&self) -> StatKey {
        self.key
    }

    /// The user-facing name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The slug derived from the display name.
    pub fn id_name(&self) -> &str {
        &self.id_name
    }

    /// The base name icon variants are built from.
    pub fn icon_base_name(&self) -> &str {
        &self.icon_base_name
    }

    /// The per-level exp multiplier.
    pub fn exp_requirement_mult(&self) -> f64 {
        self.exp_requirement_mult
    }

    /// The flat exp added per level.
    pub fn exp_requirement_flat_bonus(&self) -> i64 {
        self.exp_requirement_flat_bonus
    }

    /// The exp required to reach level 1.
    pub fn level_base_requirement(&self) -> i64 {
        self.level_base_requirement
    }

    /// The stat's tip bank.
    pub fn tips(&self) -> &StatTips {
        &self.tips
    }

    /// Mutable access to the tip bank (tip delivery records state).
    pub fn tips_mut(&mut self) -> &mut StatTips {
        &mut self.tips
    }

    /// Replace the tip bank.
    pub fn set_tips(&mut self, tips: StatTips) {
        self.tips = tips;
    }

    /// Rename the stat, re-deriving the `id_name` slug.
    ///
    /// The icon base name is left untouched; it only defaults to the
    /// slug at construction.
    pub fn set_display_name(&mut self, value: &str) -> Result<(), ProgressError> {
        check_text(
            DISPLAY_NAME_FIELD,
            value,
            MIN_DISPLAY_NAME_LEN,
            MAX_DISPLAY_NAME_LEN,
        )?;
        self.display_name = value.to_string();
        self.id_name = derive_id_name(value);
        Ok(())
    }

    /// Set the base name icon variants are built from.
    pub fn set_icon_base_name(&mut self, value: impl Into<String>) {
        self.icon_base_name = value.into();
    }

    /// Set the per-level exp multiplier (bounds `[1, 10]`).
    pub fn set_exp_requirement_mult(&mut self, value: f64) -> Result<(), ProgressError> {
        check_f64(
            "stat exp requirement multiplier",
            value,
            MULT_BOUNDS.0,
            MULT_BOUNDS.1,
        )?;
        self.exp_requirement_mult = value;
        Ok(())
    }

    /// Set the flat exp added per level (bounds `[0, 999999]`).
    pub fn set_exp_requirement_flat_bonus(&mut self, value: i64) -> Result<(), ProgressError> {
        check_i64(
            "stat exp flat bonus",
            value,
            FLAT_BONUS_BOUNDS.0,
            FLAT_BONUS_BOUNDS.1,
        )?;
        self.exp_requirement_flat_bonus = value;
        Ok(())
    }

    /// Set the exp required to reach level 1 (bounds `[0, 999999]`).
    pub fn set_level_base_requirement(&mut self, value: i64) -> Result<(), ProgressError> {
        check_i64(
            "stat level base requirement",
            value,
            BASE_REQUIREMENT_BOUNDS.0,
            BASE_REQUIREMENT_BOUNDS.1,
        )?;
        self.level_base_requirement = value;
        Ok(())
    }

    /// The inclusive exp bracket `[min, max]` for a level.
    ///
    /// Base formula, with `R = 10` as the rounding grid:
    ///
    /// ```text
    /// min = round(base · mult^(level-1) / R) · R + flat · (level-1)
    /// max = round(base · mult^level     / R) · R + flat · level − 1
    /// ```
    ///
    /// Consecutive brackets tile the exp axis exactly: for every level,
    /// `bounds_for_level(i + 1).0 == bounds_for_level(i).1 + 1`.
    pub fn bounds_for_level(&self, level: i32) -> (i64, i64) {
        let base = self.level_base_requirement as f64;
        let grid = EXP_ROUND_TO as f64;
        let min = (base * self.exp_requirement_mult.powi(level - 1) / grid).round() as i64
            * EXP_ROUND_TO
            + self.exp_requirement_flat_bonus * (level as i64 - 1);
        let max = (base * self.exp_requirement_mult.powi(level) / grid).round() as i64
            * EXP_ROUND_TO
            + self.exp_requirement_flat_bonus * level as i64
            - 1;
        (min, max)
    }

    /// The level and bracket an exp total falls into.
    ///
    /// Exp below the base requirement is level 0 with the bracket
    /// `[0, base − 1]`. Otherwise levels `1..=50` are scanned for the
    /// containing bracket. Exp past the cap yields [`UNMAPPED_LEVEL`]
    /// with a zeroed bracket.
    pub fn bracket_for_exp(&self, exp: i64) -> LevelBracket {
        if exp < self.level_base_requirement {
            return LevelBracket {
                level: 0,
                min_exp: 0,
                max_exp: self.level_base_requirement - 1,
            };
        }

        for level in 1..=MAX_TRACKED_LEVEL {
            let (min_exp, max_exp) = self.bounds_for_level(level);
            if exp >= min_exp && exp <= max_exp {
                return LevelBracket {
                    level,
                    min_exp,
                    max_exp,
                };
            }
        }

        LevelBracket {
            level: UNMAPPED_LEVEL,
            min_exp: 0,
            max_exp: 0,
        }
    }

    /// Convert an exp total to its level.
    ///
    /// See [`bracket_for_exp`](Self::bracket_for_exp) for the sentinel
    /// contract past the level cap.
    pub fn exp_to_level(&self, exp: i64) -> i32 {
        self.bracket_for_exp(exp).level
    }

    /// The icon variant name for a level.
    ///
    /// The tier is the count of [`ICON_CHANGE_THRESHOLDS`] at or below
    /// the level, so levels 0..=3 use tier 0 and level 13+ uses tier 3.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use questlog::Stat;
    ///
    /// let stat = Stat::new("Magic Skill").unwrap();
    /// assert_eq!(stat.icon_name_for_level(3), "magic_skill_0");
    /// assert_eq!(stat.icon_name_for_level(4), "magic_skill_1");
    /// assert_eq!(stat.icon_name_for_level(13), "magic_skill_3");
    /// ```
    pub fn icon_name_for_level(&self, level: i32) -> String {
        let tier = ICON_CHANGE_THRESHOLDS
            .iter()
            .filter(|threshold| **threshold <= level)
            .count();
        format!("{}_{}", self.icon_base_name, tier)
    }

    /// Render the stat at an exp total for the presentation layer.
    pub fn snapshot(&self, exp: i64) -> StatSnapshot {
        let bracket = self.bracket_for_exp(exp);
        StatSnapshot {
            display_name: self.display_name.clone(),
            level: bracket.level,
            current_exp: exp,
            this_level_exp_req: bracket.min_exp,
            next_level_exp_req: bracket.max_exp,
            icon_name: self.icon_name_for_level(bracket.level),
        }
    }

    /// Legacy loose identity: matching `id_name` or `icon_base_name`.
    ///
    /// Kept for name-based lookups only. Nothing in the crate keys
    /// storage on this; two stats sharing an icon base are still
    /// distinct entities.
    pub fn name_matches(&self, other: &Stat) -> bool {
        self.id_name == other.id_name || self.icon_base_name == other.icon_base_name
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stat {} ({}), icon base {:?}, mult {}, flat bonus {}, base requirement {}",
            self.display_name,
            self.id_name,
            self.icon_base_name,
            self.exp_requirement_mult,
            self.exp_requirement_flat_bonus,
            self.level_base_requirement
        )
    }
}

/// Derive the slug for a display name.
///
/// Trims, drops characters that are neither alphanumeric nor a space,
/// lowercases, then turns spaces into underscores.
fn derive_id_name(display_name: &str) -> String {
    display_name
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}
