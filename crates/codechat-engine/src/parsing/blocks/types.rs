use crate::parsing::rope::LineRef;
use crate::syntax::StyleRef;

/// Where a doc line sits within its comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPart {
    /// An inline comment, running to end of line.
    Inline,
    /// A block comment opened and closed on this line.
    Whole,
    /// First line of a multi-line block comment.
    Open,
    /// Interior line of a multi-line block comment.
    Continue,
    /// Last line of a multi-line block comment.
    Close,
}

/// The documentation facts of a line classified as Doc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    /// Whitespace preceding the opening delimiter. For the interior and
    /// closing lines of a block comment this is the opening line's indent.
    pub indent: String,
    pub style: StyleRef,
    /// Text between the delimiters, without the separating whitespace.
    pub body: String,
    pub part: CommentPart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Code,
    Doc(DocLine),
}

/// A source line together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub line: LineRef,
    pub kind: LineKind,
}

impl ClassifiedLine {
    pub fn code(line: LineRef) -> Self {
        Self {
            line,
            kind: LineKind::Code,
        }
    }

    pub fn doc(line: LineRef, doc: DocLine) -> Self {
        Self {
            line,
            kind: LineKind::Doc(doc),
        }
    }

    #[must_use]
    pub fn is_doc(&self) -> bool {
        matches!(self.kind, LineKind::Doc(_))
    }

    pub fn as_doc(&self) -> Option<&DocLine> {
        match &self.kind {
            LineKind::Doc(doc) => Some(doc),
            LineKind::Code => None,
        }
    }
}
