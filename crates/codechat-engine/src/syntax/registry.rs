use std::collections::HashMap;
use std::path::Path;

use crate::error::{CodeChatError, Result};

use super::{CommentSyntax, builtin::BUILTIN_LANGUAGES};

/// Read-only table mapping language ids to their comment syntax.
///
/// Built once through [`RegistryBuilder`] and then shared by reference (or in
/// an `Arc`) with every classification call. There are no mutating methods.
#[derive(Debug, Clone, Default)]
pub struct CommentSyntaxRegistry {
    languages: HashMap<String, CommentSyntax>,
    /// Lower-cased file extension -> language id.
    extensions: HashMap<String, String>,
}

impl CommentSyntaxRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The registry holding only the built-in language table.
    pub fn builtin() -> Self {
        RegistryBuilder::default().with_builtins().build()
    }

    /// Looks up the syntax for a language id.
    pub fn lookup(&self, language: &str) -> Result<&CommentSyntax> {
        self.languages
            .get(language)
            .ok_or_else(|| CodeChatError::UnknownLanguage(language.to_string()))
    }

    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Resolves a file path to a language id by its extension.
    pub fn language_for_path(&self, path: impl AsRef<Path>) -> Option<&str> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        self.extensions.get(&ext).map(String::as_str)
    }

    /// All registered language ids, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Accumulates languages before freezing them into a [`CommentSyntaxRegistry`].
///
/// Later registrations of the same id replace earlier ones, which is how user
/// configuration overrides the built-in table.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: CommentSyntaxRegistry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(mut self) -> Self {
        for lang in BUILTIN_LANGUAGES {
            self = self.language(lang.id, lang.syntax(), lang.extensions.iter().copied());
        }
        self
    }

    /// Registers (or replaces) a language and maps its extensions to it.
    pub fn language<I, S>(mut self, id: &str, syntax: CommentSyntax, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.registry.languages.insert(id.to_string(), syntax).is_some() {
            log::debug!("comment syntax for '{id}' replaced");
        }
        for ext in extensions {
            let ext = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
            if ext.is_empty() {
                continue;
            }
            self.registry.extensions.insert(ext, id.to_string());
        }
        self
    }

    pub fn build(self) -> CommentSyntaxRegistry {
        self.registry
    }
}
