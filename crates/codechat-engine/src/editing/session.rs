use std::sync::Arc;

use relative_path::{RelativePath, RelativePathBuf};

use crate::error::Result;
use crate::io::{IoError, Persister, SourceLoader};
use crate::models::BlockModel;
use crate::parsing::parse_source;
use crate::syntax::CommentSyntaxRegistry;

use super::commands::{self, Cmd};
use super::reconstruct::Reconstructor;
use super::view::{DocBlockRecord, EditableView};

/// One open document: its block model, where it came from, and how to write
/// it back.
#[derive(Debug, Clone)]
pub struct EditSession {
    registry: Arc<CommentSyntaxRegistry>,
    path: RelativePathBuf,
    model: BlockModel,
    reconstructor: Reconstructor,
}

impl EditSession {
    /// Loads and classifies the document at `path`.
    pub fn load(
        registry: Arc<CommentSyntaxRegistry>,
        loader: &impl SourceLoader,
        path: &RelativePath,
    ) -> std::result::Result<Self, IoError> {
        let loaded = loader.load(path)?;
        Ok(Self::from_source(
            registry,
            path.to_relative_path_buf(),
            &loaded.language,
            &loaded.text,
        ))
    }

    /// Starts a session over text that is already in memory.
    pub fn from_source(
        registry: Arc<CommentSyntaxRegistry>,
        path: RelativePathBuf,
        language: &str,
        text: &str,
    ) -> Self {
        let model = parse_source(&registry, language, text);
        Self {
            registry,
            path,
            model,
            reconstructor: Reconstructor::new(),
        }
    }

    /// Uses `reconstructor` for saving, e.g. to enable the inline fallback.
    pub fn with_reconstructor(mut self, reconstructor: Reconstructor) -> Self {
        self.reconstructor = reconstructor;
        self
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn model(&self) -> &BlockModel {
        &self.model
    }

    pub fn view(&self) -> EditableView {
        EditableView::hydrate(&self.model)
    }

    pub fn apply(&mut self, cmd: Cmd) -> Result<usize> {
        cmd.apply(&mut self.model)
    }

    pub fn apply_records(&mut self, records: &[DocBlockRecord]) -> Result<Vec<usize>> {
        commands::apply_records(&mut self.model, records)
    }

    pub fn is_dirty(&self) -> bool {
        self.model.is_dirty()
    }

    /// Drops every pending edit.
    pub fn revert(&mut self) {
        self.model.revert_all();
    }

    /// The source text the session would save.
    pub fn reconstruct(&self) -> Result<String> {
        self.reconstructor.reconstruct(&self.model)
    }

    /// Reconstructs and persists the document, then reclassifies the saved
    /// text so block indices match what is on disk.
    ///
    /// On a delimiter collision nothing is written and the edits are kept.
    pub fn save(&mut self, persister: &impl Persister) -> std::result::Result<(), IoError> {
        let text = self.reconstruct()?;
        persister.persist(&self.path, &text)?;
        log::info!("saved {} ({} bytes)", self.path, text.len());
        let language = self.model.language().to_string();
        self.model = parse_source(&self.registry, &language, &text);
        Ok(())
    }

    /// Re-reads the document, discarding pending edits.
    pub fn reload(&mut self, loader: &impl SourceLoader) -> std::result::Result<(), IoError> {
        let loaded = loader.load(&self.path)?;
        self.model = parse_source(&self.registry, &loaded.language, &loaded.text);
        Ok(())
    }
}
