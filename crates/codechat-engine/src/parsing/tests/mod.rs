//! Integration tests for the parsing module.
//!
//! Uses inline `insta` snapshots of the normalised one-line-per-block dump,
//! and checks the partition invariants on every parsed document.

use rstest::rstest;

use crate::models::{Block, BlockModel};
use crate::parsing::blocks::{classify_lines, group_lines};
use crate::parsing::parse_source;
use crate::parsing::rope::lines_with_spans;
use crate::parsing::snapshot::{invariants, normalize};
use crate::syntax::CommentSyntaxRegistry;

fn parse(language: &str, text: &str) -> BlockModel {
    let model = parse_source(&CommentSyntaxRegistry::builtin(), language, text);
    invariants(&model);
    model
}

fn dump(language: &str, text: &str) -> String {
    normalize(&parse(language, text)).to_string()
}

// Snapshot tests

#[test]
fn snapshot_c_mixed_comments() {
    let text = "/* Header\n   comment */\nint x;\n// one\n// two\n    // indented\nint y; // trailing\n";
    insta::assert_snapshot!(dump("c", text), @r##"
    Doc 0..2 indent="" style="/*" "Header\n   comment"
    Code 2..3 "int x;\n"
    Doc 3..5 indent="" style="//" "one\ntwo"
    Doc 5..6 indent="    " style="//" "indented"
    Code 6..7 "int y; // trailing\n"
    "##);
}

#[test]
fn snapshot_lua_block_then_inline_merge() {
    insta::assert_snapshot!(dump("lua", "--[[ block ]]\n-- line\nlocal x = 1\n"), @r##"
    Doc 0..2 indent="" style="--[[" "block\nline"
    Code 2..3 "local x = 1\n"
    "##);
}

#[test]
fn snapshot_python_blank_line_splits_doc() {
    insta::assert_snapshot!(dump("python", "# a\n\n# b\nx = 1"), @r##"
    Doc 0..1 indent="" style="#" "a"
    Code 1..2 "\n"
    Doc 2..3 indent="" style="#" "b"
    Code 3..4 "x = 1"
    "##);
}

// Invariant tests

#[rstest]
#[case::empty("")]
#[case::only_blank_lines("\n\n\n")]
#[case::only_code("int main() {\n  return 0;\n}\n")]
#[case::only_docs("// a\n// b\n")]
#[case::crlf("// a\r\n\r\nint x;\r\n/* b */\r\n")]
#[case::no_trailing_newline("int x;\n// end")]
#[case::unterminated("int x;\n/* never\n   closed\n")]
#[case::comment_then_code("/* a */ int x;\n/* b\n*/ int y;\n")]
#[case::nested_indents("// a\n  // b\n    // c\n  // d\n// e\n")]
#[case::unicode("// naïve café\nchar *s = \"é\";\n")]
fn partition_invariants_hold(#[case] text: &str) {
    let model = parse("c", text);
    assert_eq!(model.raw_text_of_all(), text);
}

/// Test that an empty document produces no blocks.
#[test]
fn empty_document() {
    let model = parse("c", "");
    assert!(model.blocks().is_empty());
    assert_eq!(model.line_count(), 0);
}

/// Test that a block comment failing the doc tests hides inner comments.
#[test]
fn comment_inside_code_comment_stays_code() {
    let model = parse("c", "/*not doc\n// still comment\n*/\nint x;\n");
    assert_eq!(model.blocks().len(), 1);
    assert!(matches!(model.blocks()[0], Block::Code(_)));
}

/// Test unterminated block comments are classified as code.
#[test]
fn unterminated_block_comment_is_code() {
    let model = parse("c", "// doc\n/* never\nclosed\n");
    assert_eq!(model.blocks().len(), 2);
    assert!(model.blocks()[0].is_doc());
    assert_eq!(model.blocks()[1].lines().start, 1);
    assert!(!model.blocks()[1].is_doc());
}

/// Test an unregistered language degrades to a single code block.
#[test]
fn unknown_language_is_all_code() {
    let model = parse_source(&CommentSyntaxRegistry::builtin(), "cobol", "// x\n# y\n");
    invariants(&model);
    assert!(!model.is_language_known());
    assert_eq!(model.language(), "cobol");
    assert_eq!(model.blocks().len(), 1);
    assert!(!model.blocks()[0].is_doc());
}

/// Test that doc-line merging only ever joins identical indents.
#[test]
fn merge_rule_is_exact_indent_match() {
    let model = parse("c", "// a\n\t// b\n    // c\n    // d\n");
    let indents: Vec<&str> = model.doc_blocks().map(|(_, d)| d.indent.as_str()).collect();
    assert_eq!(indents, vec!["", "\t", "    "]);
    assert_eq!(model.contents(2), Some("c\nd"));
}

/// Test that `parse_source` is exactly the classify + group pipeline.
#[test]
fn parse_source_matches_classify_then_group() {
    let text = "/* a\n   b */\nint x;\n  // c\n/* open\n";
    let registry = CommentSyntaxRegistry::builtin();
    let syntax = registry.lookup("c").unwrap();
    let rope = xi_rope::Rope::from(text);
    let classified = classify_lines(syntax, lines_with_spans(&rope));
    let lines = classified.len();

    let model = parse("c", text);

    assert_eq!(model.line_count(), lines);
    assert_eq!(model.blocks(), group_lines(syntax, classified).as_slice());
}

impl BlockModel {
    /// Concatenation of every block's raw text, for partition tests.
    fn raw_text_of_all(&self) -> String {
        self.blocks().iter().map(|b| self.raw_text(b)).collect()
    }
}
