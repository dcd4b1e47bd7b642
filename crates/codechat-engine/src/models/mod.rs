pub mod block;
pub mod block_model;
pub mod source_file;

pub use block::{Block, CodeBlock, DocBlock};
pub use block_model::BlockModel;
pub use source_file::SourceFile;
