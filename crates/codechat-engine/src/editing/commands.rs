use crate::error::{CodeChatError, Result};
use crate::models::BlockModel;

use super::view::{DocBlockRecord, EditableView};

/// An edit the editing surface can request. Only doc-block contents are
/// editable; indent, style and block boundaries are fixed until the file is
/// reclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Replace the contents of the doc block at a model index.
    SetContents { block: usize, contents: String },
    /// Apply an edited record, located by its `from..to` in the current view.
    ApplyRecord(DocBlockRecord),
}

impl Cmd {
    /// Applies the command, returning the index of the doc block it changed.
    pub fn apply(self, model: &mut BlockModel) -> Result<usize> {
        match self {
            Cmd::SetContents { block, contents } => {
                model.set_contents(block, contents)?;
                Ok(block)
            }
            Cmd::ApplyRecord(record) => {
                let view = EditableView::hydrate(model);
                let block = resolve(&view, model, &record)?;
                model.set_contents(block, record.4)?;
                Ok(block)
            }
        }
    }
}

/// Applies a batch of records taken from one view, all or nothing.
///
/// Every record is resolved against the current view before anything changes,
/// so a single stale record leaves the model untouched.
pub fn apply_records(model: &mut BlockModel, records: &[DocBlockRecord]) -> Result<Vec<usize>> {
    let view = EditableView::hydrate(model);
    let blocks = records
        .iter()
        .map(|r| resolve(&view, model, r))
        .collect::<Result<Vec<_>>>()?;
    for (&block, record) in blocks.iter().zip(records) {
        model.set_contents(block, record.contents())?;
    }
    Ok(blocks)
}

fn resolve(view: &EditableView, model: &BlockModel, record: &DocBlockRecord) -> Result<usize> {
    let block = view
        .block_at(record.from(), record.to())
        .ok_or_else(|| CodeChatError::SpanMismatch {
            reference: format!("{}..{}", record.from(), record.to()),
        })?;
    if let Some(doc) = model.block(block).and_then(|b| b.as_doc())
        && (doc.indent != record.indent() || doc.style.tag() != record.delimiter())
    {
        log::warn!(
            "record {}..{} changes indent or delimiter; only its contents are applied",
            record.from(),
            record.to()
        );
    }
    Ok(block)
}
