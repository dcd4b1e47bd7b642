pub mod blocks;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{classify_lines, group_lines};
use rope::lines_with_spans;

use crate::models::BlockModel;
use crate::syntax::{CommentSyntax, CommentSyntaxRegistry};

/// Classifies and groups `text` using the registry's syntax for `language`.
///
/// An unregistered language is not fatal: the document is classified with no
/// comment styles, so it comes back as a single code block.
pub fn parse_source(registry: &CommentSyntaxRegistry, language: &str, text: &str) -> BlockModel {
    match registry.lookup(language) {
        Ok(syntax) => parse_with_syntax(syntax, language, true, text),
        Err(e) => {
            log::warn!("{e}; treating every line as code");
            parse_with_syntax(&CommentSyntax::none(), language, false, text)
        }
    }
}

fn parse_with_syntax(
    syntax: &CommentSyntax,
    language: &str,
    language_known: bool,
    text: &str,
) -> BlockModel {
    let rope = Rope::from(text);
    let classified = classify_lines(syntax, lines_with_spans(&rope));
    let line_count = classified.len();
    let blocks = group_lines(syntax, classified);

    log::debug!(
        "classified {line_count} {language} lines into {} blocks ({} doc)",
        blocks.len(),
        blocks.iter().filter(|b| b.is_doc()).count()
    );

    BlockModel::new(
        rope,
        language,
        language_known,
        syntax.fallback_inline(),
        blocks,
        line_count,
    )
}
