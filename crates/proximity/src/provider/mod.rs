//! Stop directories.

pub mod stop_index;

pub use stop_index::{StopIndex, StopMatch};
