//! Host editor surface observed by the outline
//!
//! The outline never owns editor state. The host implements [`Host`] to let
//! the panel observe the active document and to route user prompts; all
//! outbound effects travel the other way as [`crate::commands::Cmd`] values.

use std::path::PathBuf;

use crate::syntax::LanguageId;

/// URI scheme of a document. The outline only activates for on-disk files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentScheme {
    /// A regular file on disk
    File,
    /// An unsaved, never-persisted buffer
    Untitled,
    /// Anything else (diff views, output channels, ...)
    Other,
}

/// A point-in-time view of the document open in the active editor.
///
/// Owned by the host and handed to the panel by value on each observation;
/// the panel never holds onto one across events.
#[derive(Debug, Clone)]
pub struct DocumentView {
    /// Absolute path of the document
    pub path: PathBuf,
    pub scheme: DocumentScheme,
    /// True when the buffer has modifications the disk copy does not
    pub dirty: bool,
    /// Full in-memory buffer text
    pub text: String,
    /// Host-reported language, overriding extension-based detection
    pub language: Option<LanguageId>,
}

impl DocumentView {
    /// The document's language: the host's report, else path detection
    pub fn language_id(&self) -> Option<LanguageId> {
        self.language.or_else(|| LanguageId::from_path(&self.path))
    }
}

/// The editor shell as seen from the outline panel.
///
/// One implementation per host (and a scripted fake in tests). All methods
/// are synchronous from the panel's point of view; the host is free to pump
/// its own event loop underneath a prompt.
pub trait Host {
    /// The currently focused document, if any editor is active
    fn active_document(&self) -> Option<DocumentView>;

    /// Root directory to search for the project descriptor
    fn workspace_root(&self) -> Option<PathBuf>;

    /// Byte offset of the selection anchor in the active document
    fn selection_anchor(&self) -> Option<usize>;

    /// Ask the user for a line of input; `None` means cancelled
    fn prompt_input(&mut self, placeholder: &str) -> Option<String>;

    /// Ask the user a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Let the user pick one entry from a list; `None` means cancelled
    fn pick(&mut self, items: &[String]) -> Option<String>;
}
