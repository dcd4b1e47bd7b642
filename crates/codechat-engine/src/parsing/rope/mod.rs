pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineEnding, LineRef, lines_with_spans};
pub use slice::{preview, slice_to_string};
pub use span::{LineSpan, Span};
