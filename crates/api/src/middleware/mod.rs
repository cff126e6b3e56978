//! Request extractors.

pub mod actor;

pub use actor::{ACTOR_HEADER, Actor};
