//! Trait definitions for Procore operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! API differences in the implementations.

mod find;
mod list;

pub use find::Find;
pub use list::{List, DEFAULT_PER_PAGE};
