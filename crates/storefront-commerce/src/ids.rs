//! Newtype IDs for type-safe identifiers.
//!
//! Catalog and order identifiers are plain integers assigned by whoever owns
//! the record. Wrapping them keeps a `ProductId` from being passed where an
//! `OrderId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer-backed newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from its integer value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the integer value.
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(OrderLineId);

/// Hands out sequential IDs starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Sequence {
    last: i64,
}

impl Sequence {
    pub(crate) fn next(&mut self) -> i64 {
        self.last += 1;
        self.last
    }

    /// Make sure `next` never hands out `id` or anything below it.
    pub(crate) fn skip_past(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}
