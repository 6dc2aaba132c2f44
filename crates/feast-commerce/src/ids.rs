//! String identifiers for catalog entries, carts, orders and bookings.
//!
//! Each kind gets its own type so a `ProductId` cannot stand in for a
//! `RestaurantId`. All of them serialize as plain strings.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fresh id such as `ord_18c2f0a9e41-3`, unique within this process.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, unique_suffix()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }
    };
}

string_id!(
    /// Catalog key of a restaurant, e.g. `bella-vista`.
    RestaurantId,
    "rst"
);
string_id!(
    /// Catalog key of a menu item, e.g. `pizza-margherita`.
    ProductId,
    "prd"
);
string_id!(CartId, "cart");
string_id!(OrderId, "ord");
string_id!(ReservationId, "rsv");

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Milliseconds since the epoch in hex, then a per-process counter.
fn unique_suffix() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{millis:x}-{seq}")
}
