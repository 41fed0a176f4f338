//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use astview::config::OutlineConfig;
use astview::{Cmd, DocumentScheme, DocumentView, Host, OutlinePanel, TreeItem};

/// Scripted editor shell. Fields are set up front; prompt interactions are
/// recorded so tests can assert on what the user was asked.
pub struct FakeHost {
    pub doc: Option<DocumentView>,
    pub root: Option<PathBuf>,
    pub anchor: Option<usize>,
    /// Response to the next input prompt; `None` simulates cancel
    pub input: Option<String>,
    /// Response to yes/no prompts
    pub accept: bool,
    /// Pick the first offered entry when true, else cancel
    pub pick_first: bool,

    pub prompts: Vec<String>,
    pub confirmations: Vec<String>,
    pub offered_picks: Vec<Vec<String>>,
}

impl FakeHost {
    pub fn new(root: Option<&Path>) -> Self {
        Self {
            doc: None,
            root: root.map(Path::to_path_buf),
            anchor: None,
            input: None,
            accept: false,
            pick_first: false,
            prompts: Vec::new(),
            confirmations: Vec::new(),
            offered_picks: Vec::new(),
        }
    }

    /// Focus a clean file-scheme document whose text matches the disk copy
    pub fn open(&mut self, path: &Path) {
        let text = fs::read_to_string(path).unwrap_or_default();
        self.doc = Some(DocumentView {
            path: path.to_path_buf(),
            scheme: DocumentScheme::File,
            dirty: false,
            text,
            language: None,
        });
    }

    /// Replace the in-memory buffer text, marking the document dirty
    pub fn edit(&mut self, text: &str) {
        let doc = self.doc.as_mut().unwrap();
        doc.text = text.to_string();
        doc.dirty = true;
    }
}

impl Host for FakeHost {
    fn active_document(&self) -> Option<DocumentView> {
        self.doc.clone()
    }

    fn workspace_root(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn selection_anchor(&self) -> Option<usize> {
        self.anchor
    }

    fn prompt_input(&mut self, placeholder: &str) -> Option<String> {
        self.prompts.push(placeholder.to_string());
        self.input.clone()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.accept
    }

    fn pick(&mut self, items: &[String]) -> Option<String> {
        self.offered_picks.push(items.to_vec());
        if self.pick_first {
            items.first().cloned()
        } else {
            None
        }
    }
}

/// Temp workspace with a `tsconfig.json` and the given files
pub fn workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

pub fn panel() -> OutlinePanel {
    OutlinePanel::new(OutlineConfig::default())
}

/// Flatten nested batches into a flat effect list
pub fn flatten(cmd: Cmd) -> Vec<Cmd> {
    match cmd {
        Cmd::None => Vec::new(),
        Cmd::Batch(cmds) => cmds.into_iter().flat_map(flatten).collect(),
        other => vec![other],
    }
}

/// Find a row whose label starts with `prefix`
pub fn item_by_label<'a>(items: &'a [TreeItem], prefix: &str) -> Option<&'a TreeItem> {
    items.iter().find(|item| item.label.starts_with(prefix))
}
