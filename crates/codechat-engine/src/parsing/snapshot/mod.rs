//! # Snapshot Testing Support
//!
//! Utilities for testing the classifier via snapshot assertions and invariant
//! checks.
//!
//! ## Modules
//!
//! - **`normalize`**: converts a `BlockModel` into a stable, serializable
//!   `Snap` with a one-line-per-block text rendering for `insta`
//! - **`invariants`**: runtime checks for partition correctness (line and
//!   byte ranges cover the document exactly once, in order; adjacent blocks
//!   obey the merge rule)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
