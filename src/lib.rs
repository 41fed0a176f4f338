//! astview - AST outline panel engine
//!
//! Mirrors the syntax tree of the host editor's active document into a
//! pull-based outline tree, keeps it synchronized across editor events, and
//! exposes tree-aware edit operations (rename, remove, refactor listing).
//! The host editor shell and tree widget are external; this crate is the
//! state and synchronization logic between a live text buffer and a live
//! tree-sitter parse.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod messages;
pub mod mutate;
pub mod outline;
pub mod project;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::OutlineConfig;
pub use editor::{DocumentScheme, DocumentView, Host};
pub use messages::{EditorEvent, OutlineCommand};
pub use outline::{CollapsibleState, IconCategory, OutlineState, TraversalMode, TreeItem};
pub use project::{AstSnapshot, NodeId, ProjectContext, RefreshError, RefreshOutcome, SnapshotStore};
pub use update::OutlinePanel;
