//! # Comment Syntax
//!
//! Per-language comment delimiters and the process-wide registry that maps a
//! language id to them.
//!
//! ## Modules
//!
//! - **`registry`**: `CommentSyntaxRegistry`, immutable once built, and its
//!   `RegistryBuilder`
//! - **`builtin`**: the default table of languages shipped with the engine
//!
//! A language owns zero or more inline styles (a single delimiter that runs to
//! end of line) and zero or more block styles (an open/close pair). Styles are
//! addressed by [`StyleRef`] inside the engine and by an opaque tag (the
//! opening delimiter) across the editing-surface boundary.

pub mod builtin;
pub mod registry;

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

pub use registry::{CommentSyntaxRegistry, RegistryBuilder};

/// The open/close pair of a block comment style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockDelimiters {
    pub open: String,
    pub close: String,
}

impl BlockDelimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Index of a style within one [`CommentSyntax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRef {
    Inline(usize),
    Block(usize),
}

/// A resolved, owned comment style.
///
/// Doc blocks carry one of these as their representative style so that
/// reconstruction never needs to go back to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentStyle {
    Inline { delimiter: String },
    Block { open: String, close: String },
}

impl CommentStyle {
    /// The opaque tag identifying this style to the editing surface.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            CommentStyle::Inline { delimiter } => delimiter,
            CommentStyle::Block { open, .. } => open,
        }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self, CommentStyle::Inline { .. })
    }
}

/// Comment delimiters for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSyntax {
    inline: Vec<String>,
    block: Vec<BlockDelimiters>,
}

impl CommentSyntax {
    /// Builds a syntax, discarding empty delimiters (they would match every line).
    pub fn new<I, S>(inline: I, block: impl IntoIterator<Item = BlockDelimiters>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inline: inline
                .into_iter()
                .map(Into::into)
                .filter(|d: &String| !d.is_empty())
                .collect(),
            block: block
                .into_iter()
                .filter(|b| !b.open.is_empty() && !b.close.is_empty())
                .collect(),
        }
    }

    /// A syntax with no comment styles: everything classifies as code.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    pub fn inline_styles(&self) -> &[String] {
        &self.inline
    }

    pub fn block_styles(&self) -> &[BlockDelimiters] {
        &self.block
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.block.is_empty()
    }

    /// Resolves a style reference into an owned style.
    pub fn style(&self, r: StyleRef) -> Option<CommentStyle> {
        match r {
            StyleRef::Inline(i) => self.inline.get(i).map(|d| CommentStyle::Inline {
                delimiter: d.clone(),
            }),
            StyleRef::Block(i) => self.block.get(i).map(|b| CommentStyle::Block {
                open: b.open.clone(),
                close: b.close.clone(),
            }),
        }
    }

    /// Resolves an opaque delimiter tag back to a style. Block styles win when
    /// a tag is ambiguous.
    pub fn style_for_tag(&self, tag: &str) -> Option<StyleRef> {
        self.block
            .iter()
            .position(|b| b.open == tag)
            .map(StyleRef::Block)
            .or_else(|| {
                self.inline
                    .iter()
                    .position(|d| d == tag)
                    .map(StyleRef::Inline)
            })
    }

    /// The first inline style, used when a block style can't wrap edited text.
    pub fn fallback_inline(&self) -> Option<CommentStyle> {
        self.inline.first().map(|d| CommentStyle::Inline {
            delimiter: d.clone(),
        })
    }

    /// Candidate styles in classification order: block styles before inline
    /// styles, longest opening delimiter first within each kind.
    pub fn candidates(&self) -> Vec<StyleRef> {
        // Stable sorts: equal lengths keep declaration order.
        let mut block: Vec<usize> = (0..self.block.len()).collect();
        block.sort_by_key(|&i| Reverse(self.block[i].open.len()));
        let mut inline: Vec<usize> = (0..self.inline.len()).collect();
        inline.sort_by_key(|&i| Reverse(self.inline[i].len()));

        block
            .into_iter()
            .map(StyleRef::Block)
            .chain(inline.into_iter().map(StyleRef::Inline))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lua() -> CommentSyntax {
        CommentSyntax::new(["--"], [BlockDelimiters::new("--[[", "]]")])
    }

    #[test]
    fn empty_delimiters_are_dropped() {
        let syntax = CommentSyntax::new(["", "#"], [BlockDelimiters::new("", "*/")]);
        assert_eq!(syntax.inline_styles(), &["#".to_string()]);
        assert!(syntax.block_styles().is_empty());
    }

    #[test]
    fn candidates_put_blocks_first_longest_first() {
        let syntax = CommentSyntax::new(
            ["/", "//"],
            [
                BlockDelimiters::new("/*", "*/"),
                BlockDelimiters::new("/**", "*/"),
            ],
        );
        assert_eq!(
            syntax.candidates(),
            vec![
                StyleRef::Block(1),
                StyleRef::Block(0),
                StyleRef::Inline(1),
                StyleRef::Inline(0),
            ]
        );
    }

    #[test]
    fn tags_round_trip_through_styles() {
        let syntax = lua();
        let r = syntax.style_for_tag("--[[").unwrap();
        assert_eq!(r, StyleRef::Block(0));
        assert_eq!(syntax.style(r).unwrap().tag(), "--[[");
        assert_eq!(syntax.style_for_tag("--"), Some(StyleRef::Inline(0)));
        assert_eq!(syntax.style_for_tag("#"), None);
    }

    #[test]
    fn none_has_no_styles() {
        assert!(CommentSyntax::none().is_empty());
        assert!(CommentSyntax::none().candidates().is_empty());
        assert!(CommentSyntax::none().fallback_inline().is_none());
    }
}
