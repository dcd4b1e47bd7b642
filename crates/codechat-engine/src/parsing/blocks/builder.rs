use crate::models::{Block, CodeBlock, DocBlock};
use crate::parsing::rope::{LineRef, LineSpan, Span};
use crate::syntax::{CommentStyle, CommentSyntax};

use super::types::{ClassifiedLine, DocLine, LineKind};

#[derive(Debug)]
enum RunState {
    None,
    Code {
        lines: LineSpan,
        span: Span,
    },
    Doc {
        indent: String,
        style: CommentStyle,
        contents: String,
        lines: LineSpan,
        span: Span,
        ending: &'static str,
    },
}

/// Groups classified lines into code and doc blocks.
///
/// Consecutive code lines form one [`CodeBlock`]. Consecutive doc lines form
/// one [`DocBlock`] as long as their indent strings are identical, whatever
/// comment style each line used.
pub struct BlockBuilder<'s> {
    syntax: &'s CommentSyntax,
    run: RunState,
    out: Vec<Block>,
}

impl<'s> BlockBuilder<'s> {
    pub fn new(syntax: &'s CommentSyntax) -> Self {
        Self {
            syntax,
            run: RunState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: ClassifiedLine) {
        match c.kind {
            LineKind::Code => self.extend_code(&c.line),
            LineKind::Doc(doc) => self.extend_doc(&c.line, doc),
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.out
    }

    fn extend_code(&mut self, line: &LineRef) {
        if let RunState::Code { lines, span } = &mut self.run {
            lines.end = line.index + 1;
            span.end = line.span.end;
            return;
        }
        self.flush();
        self.run = RunState::Code {
            lines: LineSpan::single(line.index),
            span: line.span,
        };
    }

    fn extend_doc(&mut self, line: &LineRef, doc: DocLine) {
        if let RunState::Doc {
            indent,
            contents,
            lines,
            span,
            ending,
            ..
        } = &mut self.run
            && *indent == doc.indent
        {
            contents.push('\n');
            contents.push_str(&doc.body);
            lines.end = line.index + 1;
            span.end = line.span.end;
            *ending = line.ending;
            return;
        }

        let Some(style) = self.syntax.style(doc.style) else {
            // A style this syntax doesn't know can't be re-wrapped on edit.
            self.extend_code(line);
            return;
        };
        self.flush();
        self.run = RunState::Doc {
            indent: doc.indent,
            style,
            contents: doc.body,
            lines: LineSpan::single(line.index),
            span: line.span,
            ending: line.ending,
        };
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.run, RunState::None) {
            RunState::None => {}
            RunState::Code { lines, span } => {
                self.out.push(Block::Code(CodeBlock { lines, span }));
            }
            RunState::Doc {
                indent,
                style,
                contents,
                lines,
                span,
                ending,
            } => {
                self.out.push(Block::Doc(DocBlock {
                    indent,
                    style,
                    contents,
                    lines,
                    span,
                    ending,
                }));
            }
        }
    }
}

/// Groups every classified line of a document in one pass.
pub fn group_lines(
    syntax: &CommentSyntax,
    lines: impl IntoIterator<Item = ClassifiedLine>,
) -> Vec<Block> {
    let mut builder = BlockBuilder::new(syntax);
    for line in lines {
        builder.push(line);
    }
    builder.finish()
}
