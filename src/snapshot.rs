//! Externally rendered stat payloads.
//!
//! `StatSnapshot` is the canonical representation handed to the
//! presentation layer: a read-only record bundling the stat's name, the
//! level derived from an exp total, the exp bracket for that level and
//! the icon to display.

use serde::{Deserialize, Serialize};

/// A stat rendered at a given exp total.
///
/// Produced by [`Stat::snapshot`](crate::Stat::snapshot). Levels are the
/// bracket-search result, so a snapshot past the level cap carries the
/// unmapped sentinel level `-1` with a zeroed bracket.
///
/// # Examples
///
/// ```rust
/// use questlog::Stat;
///
/// let stat = Stat::new("Focus").unwrap();
/// let snapshot = stat.snapshot(150);
/// assert_eq!(snapshot.level, 1);
/// assert_eq!(snapshot.icon_name, "focus_0");
///
/// let json = serde_json::to_value(&snapshot).unwrap();
/// assert_eq!(json["current_exp"], 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    /// The stat's display name.
    pub display_name: String,
    /// Level derived from `current_exp` (0, 1..=50, or -1 past the cap).
    pub level: i32,
    /// The exp total the snapshot was taken at.
    pub current_exp: i64,
    /// Minimum exp of the current level's bracket.
    pub this_level_exp_req: i64,
    /// Maximum exp of the current level's bracket.
    pub next_level_exp_req: i64,
    /// Icon variant for the current level's tier.
    pub icon_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::Stat;

    #[test]
    fn test_snapshot_field_names() {
        let stat = Stat::new("Focus").unwrap();
        let json = serde_json::to_value(stat.snapshot(0)).unwrap();
        for field in [
            "display_name",
            "level",
            "current_exp",
            "this_level_exp_req",
            "next_level_exp_req",
            "icon_name",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let stat = Stat::new("Focus").unwrap();
        let snapshot = stat.snapshot(450);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StatSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
