use relative_path::{RelativePath, RelativePathBuf};

use crate::syntax::CommentSyntaxRegistry;

/// A source file inside a project, with the language the registry assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    relative_path: RelativePathBuf,
    language: Option<String>,
}

impl SourceFile {
    /// Creates a source file, resolving its language from the extension.
    pub fn new(relative_path: RelativePathBuf, registry: &CommentSyntaxRegistry) -> Self {
        let language = registry
            .language_for_path(relative_path.as_str())
            .map(str::to_string);
        Self {
            relative_path,
            language,
        }
    }

    /// Creates a source file with an explicit language id.
    pub fn with_language(relative_path: RelativePathBuf, language: impl Into<String>) -> Self {
        Self {
            relative_path,
            language: Some(language.into()),
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// Language id, or `None` when the extension isn't registered.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// File name for display; the full relative path is kept for titles.
    pub fn display_name(&self) -> &str {
        self.relative_path.file_name().unwrap_or("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_language_from_extension() {
        let registry = CommentSyntaxRegistry::builtin();
        let file = SourceFile::new(RelativePathBuf::from("src/lib.rs"), &registry);
        assert_eq!(file.language(), Some("rust"));
        assert_eq!(file.display_name(), "lib.rs");
        assert_eq!(file.relative_path().as_str(), "src/lib.rs");
    }

    #[test]
    fn unknown_extension_has_no_language() {
        let registry = CommentSyntaxRegistry::builtin();
        let file = SourceFile::new(RelativePathBuf::from("notes.txt"), &registry);
        assert_eq!(file.language(), None);
    }

    #[test]
    fn explicit_language_wins() {
        let file = SourceFile::with_language(RelativePathBuf::from("build"), "shell");
        assert_eq!(file.language(), Some("shell"));
    }
}
