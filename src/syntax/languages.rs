//! Language identification and detection
//!
//! Maps file extensions to language IDs. The outline supports exactly two
//! languages: TypeScript and its untyped dialect JavaScript. Everything else
//! disables the feature.

use std::path::Path;

use tree_sitter::Language;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    TypeScript,
    JavaScript,
}

impl LanguageId {
    /// Detect language from file extension, `None` when unsupported
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(LanguageId::TypeScript),
            "js" | "mjs" | "cjs" => Some(LanguageId::JavaScript),
            _ => None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::TypeScript => "TypeScript",
            LanguageId::JavaScript => "JavaScript",
        }
    }

    /// The tree-sitter grammar for this language
    pub fn grammar(&self) -> Language {
        match self {
            LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageId::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(
            LanguageId::from_extension("ts"),
            Some(LanguageId::TypeScript)
        );
        assert_eq!(
            LanguageId::from_extension("TS"),
            Some(LanguageId::TypeScript)
        );
        assert_eq!(
            LanguageId::from_extension("mjs"),
            Some(LanguageId::JavaScript)
        );
        assert_eq!(LanguageId::from_extension("rs"), None);
        assert_eq!(LanguageId::from_extension("json"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("/src/app.ts")),
            Some(LanguageId::TypeScript)
        );
        assert_eq!(
            LanguageId::from_path(Path::new("index.js")),
            Some(LanguageId::JavaScript)
        );
        assert_eq!(LanguageId::from_path(Path::new("no_extension")), None);
        assert_eq!(LanguageId::from_path(Path::new("style.css")), None);
    }

    #[test]
    fn test_grammars_load() {
        // Both grammars must be ABI-compatible with the linked tree-sitter
        let mut parser = tree_sitter::Parser::new();
        assert!(parser.set_language(&LanguageId::TypeScript.grammar()).is_ok());
        assert!(parser.set_language(&LanguageId::JavaScript.grammar()).is_ok());
    }
}
