//! Configuration: compile-time limits and character policies

pub mod charmap;
pub mod constants;

pub use charmap::{default_policies, CharacterPolicies, CharmapError};
pub use constants::compile_time;
