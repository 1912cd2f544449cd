//! Kind-specific value generators.
//!
//! These functions hold the generation rules that go beyond direct
//! delegation to the field provider.

pub mod date;
pub mod email;
pub mod numeric;
