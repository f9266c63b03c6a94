//! Opaque identity keys for stats and tasks.
//!
//! Entities are identified by stable keys assigned at creation, not by
//! their (mutable, derived) names. Keys come from a process-wide counter,
//! so two entities created in the same process never collide. A
//! persistence layer that reloads entities reconstructs their keys with
//! [`StatKey::from_raw`] / [`TaskKey::from_raw`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

fn next_raw() -> u64 {
    NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

macro_rules! entity_key {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Allocate a fresh, process-unique key.
            pub fn new() -> Self {
                Self(next_raw())
            }

            /// Reconstruct a key from its raw value.
            ///
            /// Intended for the persistence layer only; the caller is
            /// responsible for keeping raw values unique.
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw value of this key.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                Ok(Self(u64::deserialize(deserializer)?))
            }
        }
    };
}

entity_key!(
    /// Stable identity key for a [`Stat`](crate::Stat).
    ///
    /// Stat identity is by key, never by display name or icon name:
    /// renaming a stat does not change which profile entries it owns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use questlog::StatKey;
    ///
    /// let a = StatKey::new();
    /// let b = StatKey::new();
    /// assert_ne!(a, b);
    /// assert_eq!(a, StatKey::from_raw(a.as_u64()));
    /// ```
    StatKey,
    "stat"
);

entity_key!(
    /// Stable identity key for a [`Task`](crate::Task).
    ///
    /// Two tasks with identical fields are still distinct tasks; profile
    /// deduplication compares keys only.
    TaskKey,
    "task"
);
