use std::fmt;

use serde::Serialize;

use crate::models::{Block, BlockModel};
use crate::parsing::rope::preview;

/// Snapshot of a classified document for testing with `insta`.
#[derive(Debug, Serialize)]
pub struct Snap {
    pub language: String,
    pub blocks: Vec<BlockSnap>,
}

/// Snapshot of a single block.
#[derive(Debug, Serialize)]
pub struct BlockSnap {
    /// "Code" or "Doc".
    pub kind: &'static str,
    /// Line range as (start, end).
    pub lines: (usize, usize),
    /// Doc blocks only.
    pub indent: Option<String>,
    /// Style tag, doc blocks only.
    pub style: Option<String>,
    /// Doc contents, or a preview of the code text.
    pub text: String,
}

/// Converts a block model into a serializable snapshot.
pub fn normalize(model: &BlockModel) -> Snap {
    let blocks = model
        .blocks()
        .iter()
        .map(|b| {
            let lines = (b.lines().start, b.lines().end);
            match b {
                Block::Code(c) => BlockSnap {
                    kind: "Code",
                    lines,
                    indent: None,
                    style: None,
                    text: preview(model.source(), c.span, 80),
                },
                Block::Doc(d) => BlockSnap {
                    kind: "Doc",
                    lines,
                    indent: Some(d.indent.clone()),
                    style: Some(d.style.tag().to_string()),
                    text: d.contents.clone(),
                },
            }
        })
        .collect();

    Snap {
        language: model.language().to_string(),
        blocks,
    }
}

/// One line per block: kind, line range, and for doc blocks indent and style.
impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.blocks {
            write!(f, "{} {}..{}", b.kind, b.lines.0, b.lines.1)?;
            if let (Some(indent), Some(style)) = (&b.indent, &b.style) {
                write!(f, " indent={indent:?} style={style:?}")?;
            }
            writeln!(f, " {:?}", b.text)?;
        }
        Ok(())
    }
}
