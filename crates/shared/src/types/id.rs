//! Typed IDs for type-safe entity references.
//!
//! Every identifier in the ledger is a store-assigned serial. Wrapping them
//! prevents accidentally passing a `ClientId` where an `AccountNumber` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed serial ID wrappers.
macro_rules! serial_id {
    ($name:ident, $inner:ty, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wraps a raw store value.
            #[must_use]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns the raw store value.
            #[must_use]
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

serial_id!(AccountNumber, i32, "Store-assigned number of an account.");
serial_id!(ClientId, i32, "Unique identifier for a client.");
serial_id!(TransferId, i64, "Unique identifier for a recorded transfer attempt.");
