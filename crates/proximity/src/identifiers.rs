//! Identifiers for buses and stops.
//!
//! Backed by `Arc<str>` so reports and indices can share them without copying.
//! Ids arriving from feeds, GeoJSON properties or the command line are
//! trimmed, so `"periyar "` and `"periyar"` name the same stop.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(from = "String"))]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().trim().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        // Hash and Eq come from the inner str, so maps keyed by id accept &str
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

identifier!(
    /// Fleet or registration number of a bus, e.g. `TN-58-N-1234`
    BusIdentifier
);
identifier!(
    /// Stable id of a bus stop
    StopIdentifier
);
