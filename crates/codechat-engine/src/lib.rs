pub mod editing;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod syntax;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    Cmd, DocBlockRecord, EditSession, EditableView, Reconstructor, apply_records, reconstruct,
};
pub use error::{CodeChatError, Result};
pub use io::{FsProject, IoError, LoadedSource, Persister, SourceLoader};
pub use models::{Block, BlockModel, CodeBlock, DocBlock, SourceFile};
pub use parsing::parse_source;
pub use syntax::{
    BlockDelimiters, CommentStyle, CommentSyntax, CommentSyntaxRegistry, RegistryBuilder,
};
