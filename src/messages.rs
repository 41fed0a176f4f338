//! Message types for the Elm-style architecture
//!
//! All state changes flow through these: [`EditorEvent`]s the host observes
//! and forwards, and [`OutlineCommand`]s the user invokes on the panel.

use std::path::PathBuf;

use crate::project::NodeId;

/// Editor lifecycle events the panel synchronizes against
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The focused document changed (or all editors closed)
    ActiveEditorChanged,
    /// A document's content was edited
    DocumentChanged {
        /// Path of the edited document, which may not be the tracked one
        path: PathBuf,
        /// Number of discrete edit regions in the event; one re-sync runs
        /// per region
        region_count: usize,
    },
    /// The caret or selection moved in the active editor
    SelectionChanged,
    /// Host configuration changed; re-read settings
    ConfigurationChanged,
}

/// Commands invoked from the panel's UI surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineCommand {
    /// Re-synchronize and reload the whole tree
    RefreshAll,
    /// Re-synchronize and reload one subtree
    RefreshNode(NodeId),
    /// Switch between direct and syntactic child traversal
    ToggleTraversalMode,
    /// Render every row non-expandable
    CollapseAll,
    /// Prompt for a new name and rename the node's declaration
    RenameNode(NodeId),
    /// List applicable refactors for the node's span
    RefactorNode(NodeId),
    /// Remove the node from its source file, after confirmation
    RemoveNode(NodeId),
    /// Always reports not implemented
    AddChild(NodeId),
    /// Move the editor caret/selection to the node's span
    SelectNode(NodeId),
}
