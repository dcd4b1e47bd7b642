use std::collections::BTreeMap;

use xi_rope::Rope;

use crate::error::{CodeChatError, Result};
use crate::parsing::rope::{LineEnding, slice_to_string};
use crate::syntax::CommentStyle;

use super::block::{Block, DocBlock};

/// A classified document: immutable blocks over the original source, plus an
/// overlay of edited doc-block contents keyed by block index.
///
/// Blocks and source never change after construction. Edits only touch the
/// overlay, so deciding whether a block is unchanged is a local lookup and an
/// unedited model always reconstructs to the exact source bytes.
#[derive(Debug, Clone)]
pub struct BlockModel {
    source: Rope,
    language: String,
    language_known: bool,
    ending: LineEnding,
    line_count: usize,
    blocks: Vec<Block>,
    fallback_inline: Option<CommentStyle>,
    edits: BTreeMap<usize, String>,
}

impl BlockModel {
    pub(crate) fn new(
        source: Rope,
        language: &str,
        language_known: bool,
        fallback_inline: Option<CommentStyle>,
        blocks: Vec<Block>,
        line_count: usize,
    ) -> Self {
        Self {
            ending: LineEnding::detect(&source),
            source,
            language: language.to_string(),
            language_known,
            line_count,
            blocks,
            fallback_inline,
            edits: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> &Rope {
        &self.source
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// False when no comment syntax was registered for the language and every
    /// line was classified as code.
    pub fn is_language_known(&self) -> bool {
        self.language_known
    }

    pub fn line_ending(&self) -> LineEnding {
        self.ending
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Doc blocks with their index in [`blocks`](Self::blocks).
    pub fn doc_blocks(&self) -> impl Iterator<Item = (usize, &DocBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_doc().map(|d| (i, d)))
    }

    /// The first inline style of the language, if it has one.
    pub fn fallback_inline(&self) -> Option<&CommentStyle> {
        self.fallback_inline.as_ref()
    }

    /// Original source bytes of a block.
    pub fn raw_text(&self, block: &Block) -> String {
        slice_to_string(&self.source, block.span())
    }

    /// Current contents of a doc block, edits applied.
    pub fn contents(&self, index: usize) -> Option<&str> {
        let doc = self.blocks.get(index)?.as_doc()?;
        Some(
            self.edits
                .get(&index)
                .map_or(doc.contents.as_str(), String::as_str),
        )
    }

    /// Whether a doc block's current contents differ from those captured at
    /// classification time.
    #[must_use]
    pub fn is_edited(&self, index: usize) -> bool {
        self.edits.contains_key(&index)
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Indices of edited doc blocks, ascending.
    pub fn edited_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.edits.keys().copied()
    }

    /// Replaces the contents of the doc block at `index`.
    ///
    /// Setting contents equal to the original clears the edit, so the block
    /// reconstructs byte-identically again.
    pub fn set_contents(&mut self, index: usize, contents: impl Into<String>) -> Result<()> {
        let contents = contents.into();
        let Some(doc) = self.blocks.get(index).and_then(Block::as_doc) else {
            return Err(CodeChatError::SpanMismatch {
                reference: format!("block {index} is not a doc block"),
            });
        };
        if doc.contents == contents {
            self.edits.remove(&index);
        } else {
            self.edits.insert(index, contents);
        }
        Ok(())
    }

    /// Drops the edit of one doc block.
    pub fn revert(&mut self, index: usize) {
        self.edits.remove(&index);
    }

    /// Drops every edit.
    pub fn revert_all(&mut self) {
        self.edits.clear();
    }
}
