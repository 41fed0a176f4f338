//! The AST snapshot store
//!
//! Owns the single parsed representation of the active document and the
//! refresh sequence that keeps it aligned with the editor. Nodes cross the
//! UI boundary as generation-stamped [`NodeId`]s; resolving an id from an
//! older generation yields `None`, never a dangling node.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Tree};

use super::{discover_descriptor, ProjectContext, RefreshError};
use crate::editor::DocumentView;
use crate::syntax::{compute_incremental_edit, LanguageId};

/// Identity handle for a node inside the current snapshot.
///
/// Valid only until the next snapshot replacement; the generation stamp
/// makes stale handles resolve to `None` instead of the wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: u64,
    raw: usize,
}

impl NodeId {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The parsed representation of exactly one file's text.
pub struct AstSnapshot {
    path: PathBuf,
    language: LanguageId,
    source: String,
    tree: Tree,
    generation: u64,
}

impl AstSnapshot {
    fn new(path: PathBuf, language: LanguageId, source: String, tree: Tree, generation: u64) -> Self {
        Self {
            path,
            language,
            source,
            tree,
            generation,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Identity handle for a node of this snapshot
    pub fn id_of(&self, node: &Node) -> NodeId {
        NodeId {
            generation: self.generation,
            raw: node.id(),
        }
    }

    /// Resolve an identity handle. `None` for stale generations or ids that
    /// no longer exist in the tree.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        if id.generation != self.generation {
            return None;
        }
        find_by_raw_id(self.root(), id.raw)
    }

    /// Source text of a node
    pub fn text_of(&self, node: &Node) -> &str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    /// The smallest node whose span contains the byte offset
    pub fn node_at_byte(&self, offset: usize) -> Option<Node<'_>> {
        self.root().descendant_for_byte_range(offset, offset)
    }

    /// Total node count (all nodes, named and anonymous)
    pub fn node_count(&self) -> usize {
        fn count(node: Node) -> usize {
            let mut total = 1;
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                total += count(child);
            }
            total
        }
        count(self.root())
    }
}

fn find_by_raw_id(node: Node<'_>, raw: usize) -> Option<Node<'_>> {
    if node.id() == raw {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_by_raw_id(child, raw) {
            return Some(found);
        }
    }
    None
}

/// What a completed refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No active editor; nothing to synchronize against
    NoEditor,
    /// A refresh was already in flight; this call coalesced into it
    Coalesced,
    /// Snapshot already matched the active document
    Unchanged,
    /// Snapshot was created, switched, or re-parsed
    Updated,
}

/// Owns the one [`AstSnapshot`] and the [`ProjectContext`] it belongs to.
///
/// `refresh` is idempotent and safe to call on every editor event. The
/// accessors [`SnapshotStore::snapshot`] and [`SnapshotStore::context`]
/// panic when called before the first successful refresh: that is an
/// ordering bug in the caller, surfaced loudly on purpose.
#[derive(Default)]
pub struct SnapshotStore {
    context: Option<ProjectContext>,
    snapshot: Option<AstSnapshot>,
    generation: u64,
    /// Held while a refresh runs. Every transition is synchronous today,
    /// so overlap only becomes possible once refresh work suspends at a
    /// host boundary; [`RefreshOutcome::Coalesced`] is the contract for
    /// that case.
    in_flight: bool,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align held state with the active document.
    ///
    /// Ensures a project context exists (locating the descriptor on first
    /// need), replaces the snapshot when the active path changed, and
    /// force-syncs the snapshot text to the buffer when the document is
    /// dirty. Errors leave all prior state intact.
    pub fn refresh(
        &mut self,
        doc: Option<&DocumentView>,
        workspace_root: Option<&Path>,
    ) -> Result<RefreshOutcome, RefreshError> {
        let Some(doc) = doc else {
            return Ok(RefreshOutcome::NoEditor);
        };
        if self.in_flight {
            tracing::debug!("Refresh already in flight, coalescing");
            return Ok(RefreshOutcome::Coalesced);
        }
        self.in_flight = true;
        let result = self.refresh_inner(doc, workspace_root);
        self.in_flight = false;
        if let Err(e) = &result {
            tracing::warn!("Refresh failed, keeping prior state: {e}");
        }
        result
    }

    fn refresh_inner(
        &mut self,
        doc: &DocumentView,
        workspace_root: Option<&Path>,
    ) -> Result<RefreshOutcome, RefreshError> {
        if self.context.is_none() {
            let root = workspace_root.ok_or(RefreshError::NoWorkspaceRoot)?;
            let descriptor = discover_descriptor(root)?;
            self.context = Some(ProjectContext::new(descriptor)?);
        }
        let Some(ctx) = self.context.as_mut() else {
            unreachable!("context initialized above");
        };

        let mut outcome = RefreshOutcome::Unchanged;

        let path_changed = self
            .snapshot
            .as_ref()
            .is_none_or(|snap| snap.path() != doc.path);
        if path_changed {
            let language = doc
                .language_id()
                .ok_or_else(|| RefreshError::UnsupportedLanguage(doc.path.clone()))?;
            let source = ctx.resolve_source(&doc.path, &doc.text)?;
            let tree = ctx.parse(language, &doc.path, &source, None)?;
            self.generation += 1;
            self.snapshot = Some(AstSnapshot::new(
                doc.path.clone(),
                language,
                source,
                tree,
                self.generation,
            ));
            tracing::debug!("Snapshot switched to {}", doc.path.display());
            outcome = RefreshOutcome::Updated;
        }

        // Keep the outline reflecting keystrokes the disk copy does not have
        if doc.dirty {
            if self.replace_text(&doc.text)? {
                outcome = RefreshOutcome::Updated;
            }
        }

        Ok(outcome)
    }

    /// Replace the snapshot's text, re-parsing incrementally. Returns false
    /// when the text already matched. No-op without a snapshot.
    fn replace_text(&mut self, new_text: &str) -> Result<bool, RefreshError> {
        let prepared = match self.snapshot.as_ref() {
            Some(snap) if snap.source() != new_text => {
                let mut old_tree = snap.tree().clone();
                if let Some(edit) = compute_incremental_edit(snap.source(), new_text) {
                    old_tree.edit(&edit);
                }
                Some((snap.path().to_path_buf(), snap.language(), old_tree))
            }
            _ => None,
        };
        let Some((path, language, old_tree)) = prepared else {
            return Ok(false);
        };
        let Some(ctx) = self.context.as_mut() else {
            return Ok(false);
        };

        let tree = ctx.parse(language, &path, new_text, Some(&old_tree))?;
        ctx.update_source(&path, new_text.to_string());
        self.generation += 1;
        self.snapshot = Some(AstSnapshot::new(
            path,
            language,
            new_text.to_string(),
            tree,
            self.generation,
        ));
        Ok(true)
    }

    /// Swap in edited source after a mutation, re-parsing and invalidating
    /// all outstanding node handles.
    ///
    /// Panics if called before the first successful refresh.
    pub fn apply_edit(&mut self, new_source: &str) -> Result<(), RefreshError> {
        assert!(
            self.snapshot.is_some(),
            "apply_edit() called before refresh()"
        );
        self.replace_text(new_source)?;
        Ok(())
    }

    /// Path of the last-synchronized document, if any
    pub fn tracked_path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(|s| s.path())
    }

    /// Current snapshot generation; bumped on every re-parse
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn try_snapshot(&self) -> Option<&AstSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn try_context(&self) -> Option<&ProjectContext> {
        self.context.as_ref()
    }

    /// The current snapshot.
    ///
    /// Panics if called before the first successful refresh; that ordering
    /// bug should fail fast rather than surface as an empty outline.
    pub fn snapshot(&self) -> &AstSnapshot {
        self.snapshot
            .as_ref()
            .expect("snapshot() called before first successful refresh()")
    }

    /// The project context.
    ///
    /// Panics if called before the first successful refresh.
    pub fn context(&self) -> &ProjectContext {
        self.context
            .as_ref()
            .expect("context() called before first successful refresh()")
    }
}
