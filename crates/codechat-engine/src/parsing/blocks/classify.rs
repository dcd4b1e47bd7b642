use crate::parsing::rope::LineRef;
use crate::syntax::{CommentSyntax, StyleRef};

use super::types::{ClassifiedLine, CommentPart, DocLine};

/// Scanner state carried from one line to the next.
#[derive(Debug)]
enum ScanState {
    /// Between comments: each line is tried against every candidate style.
    Seeking,
    /// Inside a block comment whose opening line passed the doc tests.
    ///
    /// Lines are held back until the close is seen, since trailing code after
    /// the close turns the whole comment back into code.
    InBlockComment {
        style: usize,
        indent: String,
        pending: Vec<ClassifiedLine>,
    },
    /// Inside a block comment that failed the doc tests when opened. Its lines
    /// are code, and none of them may start a doc comment.
    InCodeComment { style: usize },
}

/// Outcome of trying a block style on an opening line.
enum BlockOpen<'t> {
    Whole(&'t str),
    Pending(&'t str),
    /// Not a doc comment. `unclosed` is set when the comment continues past
    /// this line.
    NotDoc { unclosed: bool },
}

/// Classifies source lines as Code or Doc for one language.
///
/// Lines are fed in order through [`push`](Self::push); classification is
/// complete once [`finish`](Self::finish) is called. Never fails: input that
/// doesn't fit the doc-comment shape is classified as Code.
pub struct LineClassifier<'s> {
    syntax: &'s CommentSyntax,
    candidates: Vec<StyleRef>,
    state: ScanState,
    out: Vec<ClassifiedLine>,
}

impl<'s> LineClassifier<'s> {
    pub fn new(syntax: &'s CommentSyntax) -> Self {
        Self {
            syntax,
            candidates: syntax.candidates(),
            state: ScanState::Seeking,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: LineRef) {
        match std::mem::replace(&mut self.state, ScanState::Seeking) {
            ScanState::Seeking => self.seek(line),
            ScanState::InBlockComment {
                style,
                indent,
                pending,
            } => self.continue_block(line, style, indent, pending),
            ScanState::InCodeComment { style } => {
                let close = &self.syntax.block_styles()[style].close;
                if !line.text.contains(close.as_str()) {
                    self.state = ScanState::InCodeComment { style };
                }
                self.out.push(ClassifiedLine::code(line));
            }
        }
    }

    pub fn finish(mut self) -> Vec<ClassifiedLine> {
        if let ScanState::InBlockComment { pending, .. } =
            std::mem::replace(&mut self.state, ScanState::Seeking)
        {
            // Unterminated at EOF: treat conservatively as code.
            if let Some(first) = pending.first() {
                log::debug!(
                    "unterminated block comment opened on line {}; classified as code",
                    first.line.index + 1
                );
            }
            self.out
                .extend(pending.into_iter().map(|c| ClassifiedLine::code(c.line)));
        }
        self.out
    }

    fn seek(&mut self, line: LineRef) {
        let text = line.text.as_str();
        let rest = text.trim_start();
        if rest.is_empty() {
            self.out.push(ClassifiedLine::code(line));
            return;
        }
        let indent = &text[..text.len() - rest.len()];

        let mut unclosed_code_comment = None;
        for &candidate in &self.candidates {
            match candidate {
                StyleRef::Block(i) => {
                    let delims = &self.syntax.block_styles()[i];
                    let Some(after) = rest.strip_prefix(delims.open.as_str()) else {
                        continue;
                    };
                    match open_block(after, &delims.close) {
                        BlockOpen::Whole(body) => {
                            let doc = doc_line(indent, candidate, body, CommentPart::Whole);
                            self.out.push(ClassifiedLine::doc(line, doc));
                            return;
                        }
                        BlockOpen::Pending(body) => {
                            let doc = doc_line(indent, candidate, body, CommentPart::Open);
                            self.state = ScanState::InBlockComment {
                                style: i,
                                indent: indent.to_string(),
                                pending: vec![ClassifiedLine::doc(line, doc)],
                            };
                            return;
                        }
                        BlockOpen::NotDoc { unclosed } => {
                            if unclosed && unclosed_code_comment.is_none() {
                                unclosed_code_comment = Some(i);
                            }
                        }
                    }
                }
                StyleRef::Inline(i) => {
                    let delim = &self.syntax.inline_styles()[i];
                    let Some(body) = rest
                        .strip_prefix(delim.as_str())
                        .and_then(strip_separator)
                    else {
                        continue;
                    };
                    let doc = doc_line(indent, candidate, body, CommentPart::Inline);
                    self.out.push(ClassifiedLine::doc(line, doc));
                    return;
                }
            }
        }

        if let Some(style) = unclosed_code_comment {
            self.state = ScanState::InCodeComment { style };
        }
        self.out.push(ClassifiedLine::code(line));
    }

    fn continue_block(
        &mut self,
        line: LineRef,
        style: usize,
        indent: String,
        mut pending: Vec<ClassifiedLine>,
    ) {
        let close = self.syntax.block_styles()[style].close.as_str();
        let text = line.text.as_str();

        let Some(pos) = text.find(close) else {
            let body = strip_indent(text, &indent).to_string();
            let doc = DocLine {
                indent: indent.clone(),
                style: StyleRef::Block(style),
                body,
                part: CommentPart::Continue,
            };
            pending.push(ClassifiedLine::doc(line, doc));
            self.state = ScanState::InBlockComment {
                style,
                indent,
                pending,
            };
            return;
        };

        if !text[pos + close.len()..].trim().is_empty() {
            // Code follows the close: the whole comment is a source statement.
            self.out
                .extend(pending.into_iter().map(|c| ClassifiedLine::code(c.line)));
            self.out.push(ClassifiedLine::code(line));
            return;
        }

        let body = strip_closing_separator(strip_indent(&text[..pos], &indent)).to_string();
        self.out.extend(pending);
        let doc = DocLine {
            indent,
            style: StyleRef::Block(style),
            body,
            part: CommentPart::Close,
        };
        self.out.push(ClassifiedLine::doc(line, doc));
    }
}

/// Classifies every line of a document in one pass.
pub fn classify_lines(
    syntax: &CommentSyntax,
    lines: impl IntoIterator<Item = LineRef>,
) -> Vec<ClassifiedLine> {
    let mut classifier = LineClassifier::new(syntax);
    for line in lines {
        classifier.push(line);
    }
    classifier.finish()
}

fn doc_line(indent: &str, style: StyleRef, body: &str, part: CommentPart) -> DocLine {
    DocLine {
        indent: indent.to_string(),
        style,
        body: body.to_string(),
        part,
    }
}

/// Applies the doc tests to the text following a block opener.
fn open_block<'t>(after: &'t str, close: &str) -> BlockOpen<'t> {
    let Some(body) = strip_separator(after) else {
        return BlockOpen::NotDoc {
            unclosed: !after.contains(close),
        };
    };
    match body.find(close) {
        None => BlockOpen::Pending(body),
        Some(pos) if body[pos + close.len()..].trim().is_empty() => {
            BlockOpen::Whole(strip_closing_separator(&body[..pos]))
        }
        Some(_) => BlockOpen::NotDoc { unclosed: false },
    }
}

/// Removes the one mandatory whitespace character after an opening delimiter.
fn strip_separator(after: &str) -> Option<&str> {
    let c = after.chars().next()?;
    c.is_whitespace().then(|| &after[c.len_utf8()..])
}

/// Removes one whitespace character standing before a closing delimiter.
fn strip_closing_separator(body: &str) -> &str {
    match body.chars().next_back() {
        Some(c) if c.is_whitespace() => &body[..body.len() - c.len_utf8()],
        _ => body,
    }
}

fn strip_indent<'t>(text: &'t str, indent: &str) -> &'t str {
    text.strip_prefix(indent).unwrap_or(text)
}
