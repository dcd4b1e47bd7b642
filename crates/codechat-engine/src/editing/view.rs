use serde::{Deserialize, Serialize};

use crate::models::{Block, BlockModel};

/// The editable record of one doc block, serialized as the ordered tuple
/// `[from, to, indent, delimiter, contents]`.
///
/// `from`/`to` are character offsets of the contents inside
/// [`EditableView::text`], not offsets into the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlockRecord(pub usize, pub usize, pub String, pub String, pub String);

impl DocBlockRecord {
    pub fn from(&self) -> usize {
        self.0
    }

    pub fn to(&self) -> usize {
        self.1
    }

    pub fn indent(&self) -> &str {
        &self.2
    }

    /// Opaque style tag, resolvable with `CommentSyntax::style_for_tag`.
    pub fn delimiter(&self) -> &str {
        &self.3
    }

    pub fn contents(&self) -> &str {
        &self.4
    }

    /// The same record carrying new contents.
    #[must_use]
    pub fn with_contents(&self, contents: impl Into<String>) -> Self {
        Self(self.0, self.1, self.2.clone(), self.3.clone(), contents.into())
    }
}

/// The hydrated document handed to the editing surface.
///
/// `text` is code verbatim interleaved with each doc block's contents (followed
/// by that block's final line terminator); `records` describe the doc blocks in
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditableView {
    pub text: String,
    pub records: Vec<DocBlockRecord>,
    /// Model block index of each record.
    #[serde(skip)]
    block_indices: Vec<usize>,
}

impl EditableView {
    /// Builds the view of a model, edits applied.
    pub fn hydrate(model: &BlockModel) -> Self {
        let mut text = String::with_capacity(model.source().len());
        let mut offset = 0usize;
        let mut records = vec![];
        let mut block_indices = vec![];

        for (i, block) in model.blocks().iter().enumerate() {
            match block {
                Block::Code(_) => {
                    let raw = model.raw_text(block);
                    offset += raw.chars().count();
                    text.push_str(&raw);
                }
                Block::Doc(doc) => {
                    let contents = model.contents(i).unwrap_or(&doc.contents);
                    let from = offset;
                    offset += contents.chars().count();
                    text.push_str(contents);
                    records.push(DocBlockRecord(
                        from,
                        offset,
                        doc.indent.clone(),
                        doc.style.tag().to_string(),
                        contents.to_string(),
                    ));
                    block_indices.push(i);

                    text.push_str(doc.ending);
                    offset += doc.ending.len();
                }
            }
        }

        Self {
            text,
            records,
            block_indices,
        }
    }

    /// Model block index of the record spanning exactly `from..to`.
    pub fn block_at(&self, from: usize, to: usize) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.0 == from && r.1 == to)
            .map(|k| self.block_indices[k])
    }

    /// The record describing a model block, if it is a doc block.
    pub fn record_for_block(&self, block: usize) -> Option<&DocBlockRecord> {
        self.block_indices
            .iter()
            .position(|&b| b == block)
            .map(|k| &self.records[k])
    }
}
