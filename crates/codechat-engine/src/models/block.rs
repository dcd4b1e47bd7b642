use crate::parsing::rope::{LineSpan, Span};
use crate::syntax::CommentStyle;

/// A contiguous run of lines none of which classified as documentation.
///
/// The text itself lives in the model's rope; slicing it with `span` yields the
/// original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub lines: LineSpan,
    pub span: Span,
}

/// A run of doc lines sharing one indent string.
///
/// # Invariants
///
/// - every constituent line had exactly `indent` before its delimiter
/// - the constituent lines are contiguous (`lines`) in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Leading whitespace; the grouping key.
    pub indent: String,
    /// Style of the first constituent line. Later lines' styles are not
    /// retained, so an edited block is always re-wrapped in this one style.
    pub style: CommentStyle,
    /// De-delimited body text of all constituent lines, joined with `\n`, as
    /// captured at classification time.
    pub contents: String,
    pub lines: LineSpan,
    pub span: Span,
    /// Terminator of the block's last line (`""` at end of file).
    pub ending: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Code(CodeBlock),
    Doc(DocBlock),
}

impl Block {
    pub fn lines(&self) -> LineSpan {
        match self {
            Block::Code(c) => c.lines,
            Block::Doc(d) => d.lines,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Block::Code(c) => c.span,
            Block::Doc(d) => d.span,
        }
    }

    #[must_use]
    pub fn is_doc(&self) -> bool {
        matches!(self, Block::Doc(_))
    }

    pub fn as_doc(&self) -> Option<&DocBlock> {
        match self {
            Block::Doc(d) => Some(d),
            Block::Code(_) => None,
        }
    }
}
