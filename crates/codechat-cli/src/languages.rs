use codechat_config::{Config, LanguageConfig};
use codechat_engine::{BlockDelimiters, CommentSyntax, CommentSyntaxRegistry};

/// Built-in languages plus those from the user's config, which win on id
/// clashes.
pub fn build_registry(config: Option<&Config>) -> CommentSyntaxRegistry {
    let mut builder = CommentSyntaxRegistry::builder().with_builtins();
    for language in config.map(|c| c.languages.as_slice()).unwrap_or_default() {
        log::info!("registering '{}' from config", language.id);
        builder = builder.language(&language.id, syntax(language), &language.extensions);
    }
    builder.build()
}

fn syntax(language: &LanguageConfig) -> CommentSyntax {
    CommentSyntax::new(
        language.inline.iter().cloned(),
        language
            .block
            .iter()
            .map(|[open, close]| BlockDelimiters::new(open, close)),
    )
}
