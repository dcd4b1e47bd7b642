use crate::models::{Block, BlockModel};

/// Validates the partition invariants of a block model.
///
/// Asserts that:
/// - line spans cover `[0, line_count)` exactly once, in order
/// - byte spans cover the whole source exactly once, in order
/// - no block is empty
/// - no two code blocks are adjacent
/// - adjacent doc blocks have different indents
/// - a doc block's contents has one line per constituent source line
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(model: &BlockModel) {
    let mut next_line = 0;
    let mut next_byte = 0;
    for (i, b) in model.blocks().iter().enumerate() {
        let lines = b.lines();
        let span = b.span();
        assert!(!lines.is_empty(), "block {i} covers no lines");
        assert_eq!(
            lines.start, next_line,
            "block {i} starts at line {} but line {next_line} is uncovered or overlapped",
            lines.start
        );
        assert_eq!(
            span.start, next_byte,
            "block {i} starts at byte {} but expected {next_byte}",
            span.start
        );
        next_line = lines.end;
        next_byte = span.end;

        if let Block::Doc(d) = b {
            assert_eq!(
                d.contents.split('\n').count(),
                lines.len(),
                "doc block {i} contents don't have one line per source line"
            );
        }
    }
    assert_eq!(next_line, model.line_count(), "trailing lines uncovered");
    assert_eq!(next_byte, model.source().len(), "trailing bytes uncovered");

    for (i, pair) in model.blocks().windows(2).enumerate() {
        match (&pair[0], &pair[1]) {
            (Block::Code(_), Block::Code(_)) => {
                panic!("code blocks {i} and {} are adjacent", i + 1)
            }
            (Block::Doc(a), Block::Doc(b)) => assert_ne!(
                a.indent,
                b.indent,
                "doc blocks {i} and {} share an indent but were not merged",
                i + 1
            ),
            _ => {}
        }
    }
}
