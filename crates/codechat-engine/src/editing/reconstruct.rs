use crate::error::{CodeChatError, Result};
use crate::models::{Block, BlockModel, DocBlock};
use crate::syntax::CommentStyle;

/// Turns a block model back into source text.
///
/// Code blocks and unedited doc blocks are copied from the original source, so
/// a model with no edits reconstructs byte-for-byte. Edited doc blocks are
/// re-synthesized in their representative style.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconstructor {
    fallback_to_inline: bool,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, an edited block whose contents collide with its block-comment
    /// close is re-wrapped in the language's first inline style instead of
    /// failing. Has no effect for languages without inline comments.
    pub fn with_inline_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_inline = enabled;
        self
    }

    pub fn reconstruct(&self, model: &BlockModel) -> Result<String> {
        let mut out = String::with_capacity(model.source().len());
        let eol = model.line_ending().as_str();

        for (i, block) in model.blocks().iter().enumerate() {
            match block {
                Block::Doc(doc) if model.is_edited(i) => {
                    let contents = model.contents(i).unwrap_or(&doc.contents);
                    let style = self.style_for(model, i, doc, contents)?;
                    synthesize(&mut out, doc, style, contents, eol);
                }
                _ => out.push_str(&model.raw_text(block)),
            }
        }

        log::debug!(
            "reconstructed {} bytes ({} edited doc blocks)",
            out.len(),
            model.edited_blocks().count()
        );
        Ok(out)
    }

    fn style_for<'m>(
        &self,
        model: &'m BlockModel,
        index: usize,
        doc: &'m DocBlock,
        contents: &str,
    ) -> Result<&'m CommentStyle> {
        let CommentStyle::Block { open, close } = &doc.style else {
            return Ok(&doc.style);
        };
        if !contents.contains(close.as_str()) {
            return Ok(&doc.style);
        }
        match model.fallback_inline() {
            Some(inline) if self.fallback_to_inline => {
                log::warn!(
                    "doc block {index} contains '{close}'; re-wrapping in '{}' comments",
                    inline.tag()
                );
                Ok(inline)
            }
            _ => Err(CodeChatError::DelimiterCollision {
                block: index,
                open: open.clone(),
                close: close.clone(),
            }),
        }
    }
}

/// Reconstructs with default options: collisions are errors.
pub fn reconstruct(model: &BlockModel) -> Result<String> {
    Reconstructor::new().reconstruct(model)
}

/// Writes `contents` as comment lines in `style`.
///
/// Inline: every line becomes `indent + delimiter + " " + line`.
/// Block: `indent + open + " "` starts the first line, later lines get just
/// the indent, and `" " + close` ends the last line.
fn synthesize(out: &mut String, doc: &DocBlock, style: &CommentStyle, contents: &str, eol: &str) {
    for (n, line) in contents.split('\n').enumerate() {
        if n > 0 {
            out.push_str(eol);
        }
        out.push_str(&doc.indent);
        match style {
            CommentStyle::Inline { delimiter } => {
                out.push_str(delimiter);
                out.push(' ');
            }
            CommentStyle::Block { open, .. } if n == 0 => {
                out.push_str(open);
                out.push(' ');
            }
            CommentStyle::Block { .. } => {}
        }
        out.push_str(line);
    }
    if let CommentStyle::Block { close, .. } = style {
        out.push(' ');
        out.push_str(close);
    }
    out.push_str(doc.ending);
}
