use thiserror::Error;

/// Errors raised by the doc-block engine.
///
/// All variants are recoverable at the session level: none of them affect any
/// other document's model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeChatError {
    /// No comment syntax is registered for the language. Classification
    /// still succeeds, treating every line as code.
    #[error("no comment syntax registered for language '{0}'")]
    UnknownLanguage(String),

    /// Edited doc-block contents contain the closing delimiter of the block
    /// comment style they would be wrapped in.
    #[error(
        "doc block {block} cannot be wrapped in '{open} ... {close}': its contents contain '{close}'"
    )]
    DelimiterCollision {
        block: usize,
        open: String,
        close: String,
    },

    /// A block reference no longer matches the current model; the editing
    /// surface must reload.
    #[error("stale doc block reference ({reference}); reload required")]
    SpanMismatch { reference: String },
}

impl CodeChatError {
    /// Whether the caller can recover by reloading the document and retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, CodeChatError::SpanMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, CodeChatError>;
