//! Domain logic for the valuables catalogue.
//!
//! Pure, storage-agnostic building blocks shared by the database layer and
//! the HTTP API: identifier and timestamp types, the [`patch::Patch`]
//! tri-state, item rules, and the partial-update decoder, guard and
//! validator.

pub mod error;
pub mod item;
pub mod item_patch;
pub mod patch;
pub mod types;
