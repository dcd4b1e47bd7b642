use xi_rope::Rope;

use super::span::Span;

/// A reference to a single source line with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Zero-based line number.
    pub index: usize,
    /// Byte span of this line in the rope, including its terminator.
    pub span: Span,
    /// The line text without its terminator.
    pub text: String,
    /// The exact terminator that ended this line: `""`, `"\n"` or `"\r\n"`.
    pub ending: &'static str,
}

impl LineRef {
    /// Byte span of the line without its terminator.
    #[must_use]
    pub fn text_span(&self) -> Span {
        Span {
            start: self.span.start,
            end: self.span.end - self.ending.len(),
        }
    }
}

/// Line terminator convention of a document, used for synthesized lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detects the convention from the first terminator in the rope.
    pub fn detect(rope: &Rope) -> Self {
        lines_with_spans(rope)
            .find(|l| !l.ending.is_empty())
            .map(|l| Self::from_terminator(l.ending))
            .unwrap_or_default()
    }

    fn from_terminator(ending: &str) -> Self {
        if ending == "\r\n" {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters so that concatenating every
/// line's text and ending reproduces the rope exactly.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        let ending = if line.ends_with("\r\n") {
            "\r\n"
        } else if line.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        LineRef {
            index,
            span: Span { start, end: offset },
            text: line[..line.len() - ending.len()].to_string(),
            ending,
        }
    })
}
