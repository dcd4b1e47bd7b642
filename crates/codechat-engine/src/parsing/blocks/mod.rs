//! # Block Parsing
//!
//! Two-phase partitioning of source text into code and doc blocks.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line becomes a
//!    `ClassifiedLine`, either Code or Doc. Multi-line block comments are the
//!    only state carried between lines.
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` merges runs of
//!    Code lines into `CodeBlock`s and runs of same-indent Doc lines into
//!    `DocBlock`s.
//!
//! ## Key Invariants
//!
//! - A line is never split between code and doc
//! - Every line lands in exactly one block, in source order
//! - Adjacent doc lines share a block iff their indent strings are identical

pub mod builder;
pub mod classify;
pub mod types;

pub use builder::{BlockBuilder, group_lines};
pub use classify::{LineClassifier, classify_lines};
pub use types::{ClassifiedLine, CommentPart, DocLine, LineKind};
