//! Project context: descriptor discovery, parsers, tracked sources
//!
//! A [`ProjectContext`] is the analysis side of the outline: the project
//! descriptor (`tsconfig.json`) it was created from, one tree-sitter parser
//! per supported language, and the in-memory text of every file the outline
//! has looked at this session. Created lazily on the first refresh that has
//! an active editor, then kept for the life of the session.

mod snapshot;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tree_sitter::{Parser, Tree};

use crate::syntax::LanguageId;

pub use snapshot::{AstSnapshot, NodeId, RefreshOutcome, SnapshotStore};

/// File name of the project descriptor searched for in the workspace
pub const DESCRIPTOR_NAME: &str = "tsconfig.json";

/// Why a refresh could not complete.
///
/// These are environment errors: the store reports them and keeps its prior
/// (possibly stale) state intact. None of them should ever take the host UI
/// down.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("no workspace root available to search for {DESCRIPTOR_NAME}")]
    NoWorkspaceRoot,

    #[error("no {DESCRIPTOR_NAME} found under {0}")]
    NoDescriptor(PathBuf),

    #[error("failed to read project descriptor {path}")]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project descriptor {path}")]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported language for {0}")]
    UnsupportedLanguage(PathBuf),

    #[error("failed to read source file {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load {0} grammar")]
    Grammar(&'static str),

    #[error("parser produced no tree for {0}")]
    ParseFailed(PathBuf),
}

/// Locate the project descriptor under `root`.
///
/// Walks the workspace (gitignore-aware) collecting every `tsconfig.json`;
/// the shallowest match wins. Extra matches are logged and ignored.
pub fn discover_descriptor(root: &Path) -> Result<PathBuf, RefreshError> {
    let mut matches: Vec<PathBuf> = WalkBuilder::new(root)
        .build()
        .flatten()
        .filter(|entry| {
            entry.file_type().is_some_and(|t| t.is_file())
                && entry.file_name() == DESCRIPTOR_NAME
        })
        .map(|entry| entry.into_path())
        .collect();

    // Deterministic pick: shallowest path first, then lexicographic
    matches.sort_by_key(|p| (p.components().count(), p.clone()));

    let mut it = matches.into_iter();
    let first = it
        .next()
        .ok_or_else(|| RefreshError::NoDescriptor(root.to_path_buf()))?;
    for extra in it {
        tracing::debug!("Ignoring additional project descriptor {}", extra.display());
    }
    Ok(first)
}

/// The loaded analysis context for one project.
pub struct ProjectContext {
    descriptor_path: PathBuf,
    descriptor: serde_json::Value,
    parsers: HashMap<LanguageId, Parser>,
    /// In-memory text of every file this session has analyzed
    sources: HashMap<PathBuf, String>,
}

impl ProjectContext {
    /// Build a context from a descriptor path. The descriptor must exist
    /// and be valid JSON; its contents are held opaquely.
    pub fn new(descriptor_path: PathBuf) -> Result<Self, RefreshError> {
        let raw = std::fs::read_to_string(&descriptor_path).map_err(|source| {
            RefreshError::DescriptorRead {
                path: descriptor_path.clone(),
                source,
            }
        })?;
        let descriptor =
            serde_json::from_str(&raw).map_err(|source| RefreshError::DescriptorParse {
                path: descriptor_path.clone(),
                source,
            })?;
        tracing::info!("Project context created from {}", descriptor_path.display());
        Ok(Self {
            descriptor_path,
            descriptor,
            parsers: HashMap::new(),
            sources: HashMap::new(),
        })
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// The raw descriptor JSON (opaque to the outline itself)
    pub fn descriptor(&self) -> &serde_json::Value {
        &self.descriptor
    }

    /// Resolve the text a snapshot of `path` should be built from:
    /// a source already tracked this session, else the disk copy, else the
    /// editor's in-memory buffer (a new, never-saved file).
    pub fn resolve_source(
        &mut self,
        path: &Path,
        buffer_text: &str,
    ) -> Result<String, RefreshError> {
        if let Some(text) = self.sources.get(path) {
            return Ok(text.clone());
        }
        let text = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| RefreshError::SourceRead {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!("Treating {} as an untracked buffer", path.display());
            buffer_text.to_string()
        };
        self.sources.insert(path.to_path_buf(), text.clone());
        Ok(text)
    }

    /// Whether `path` has been analyzed this session
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.sources.contains_key(path)
    }

    /// Replace the tracked text for `path`
    pub fn update_source(&mut self, path: &Path, text: String) {
        self.sources.insert(path.to_path_buf(), text);
    }

    /// Parse `source` with the language's parser, reusing `old_tree` for an
    /// incremental parse when given.
    pub fn parse(
        &mut self,
        language: LanguageId,
        path: &Path,
        source: &str,
        old_tree: Option<&Tree>,
    ) -> Result<Tree, RefreshError> {
        let parser = self.parser_for(language)?;
        parser
            .parse(source, old_tree)
            .ok_or_else(|| RefreshError::ParseFailed(path.to_path_buf()))
    }

    fn parser_for(&mut self, language: LanguageId) -> Result<&mut Parser, RefreshError> {
        use std::collections::hash_map::Entry;
        match self.parsers.entry(language) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut parser = Parser::new();
                parser
                    .set_language(&language.grammar())
                    .map_err(|_| RefreshError::Grammar(language.display_name()))?;
                Ok(entry.insert(parser))
            }
        }
    }
}

impl std::fmt::Debug for ProjectContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectContext")
            .field("descriptor_path", &self.descriptor_path)
            .field("tracked_files", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_discover_finds_descriptor() {
        let dir = workspace_with(&[("tsconfig.json", "{}"), ("src/a.ts", "")]);
        let found = discover_descriptor(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("tsconfig.json"));
    }

    #[test]
    fn test_discover_prefers_shallowest() {
        let dir = workspace_with(&[
            ("packages/lib/tsconfig.json", "{}"),
            ("tsconfig.json", "{}"),
        ]);
        let found = discover_descriptor(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("tsconfig.json"));
    }

    #[test]
    fn test_discover_none_is_error() {
        let dir = workspace_with(&[("src/a.ts", "")]);
        assert!(matches!(
            discover_descriptor(dir.path()),
            Err(RefreshError::NoDescriptor(_))
        ));
    }

    #[test]
    fn test_context_rejects_bad_descriptor() {
        let dir = workspace_with(&[("tsconfig.json", "not json")]);
        let result = ProjectContext::new(dir.path().join("tsconfig.json"));
        assert!(matches!(result, Err(RefreshError::DescriptorParse { .. })));
    }

    #[test]
    fn test_resolve_source_prefers_tracked_then_disk_then_buffer() {
        let dir = workspace_with(&[("tsconfig.json", "{}"), ("src/a.ts", "const disk = 1;")]);
        let mut ctx = ProjectContext::new(dir.path().join("tsconfig.json")).unwrap();

        // Disk copy on first contact
        let on_disk = dir.path().join("src/a.ts");
        let text = ctx.resolve_source(&on_disk, "ignored buffer").unwrap();
        assert_eq!(text, "const disk = 1;");
        assert!(ctx.is_tracked(&on_disk));

        // Tracked copy wins over a changed disk copy afterwards
        fs::write(&on_disk, "const changed = 2;").unwrap();
        let text = ctx.resolve_source(&on_disk, "ignored buffer").unwrap();
        assert_eq!(text, "const disk = 1;");

        // Missing file falls back to the editor buffer
        let unsaved = dir.path().join("src/new.ts");
        let text = ctx.resolve_source(&unsaved, "let fresh = 3;").unwrap();
        assert_eq!(text, "let fresh = 3;");
        assert!(ctx.is_tracked(&unsaved));
    }

    #[test]
    fn test_parse_both_languages() {
        let dir = workspace_with(&[("tsconfig.json", "{}")]);
        let mut ctx = ProjectContext::new(dir.path().join("tsconfig.json")).unwrap();

        let ts = ctx
            .parse(
                LanguageId::TypeScript,
                Path::new("a.ts"),
                "interface A { x: number }",
                None,
            )
            .unwrap();
        assert_eq!(ts.root_node().kind(), "program");

        let js = ctx
            .parse(
                LanguageId::JavaScript,
                Path::new("a.js"),
                "function f() {}",
                None,
            )
            .unwrap();
        assert!(!js.root_node().has_error());
    }
}
