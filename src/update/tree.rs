//! Pull-based tree data source
//!
//! The host tree view pulls rows through these methods; a reload command
//! only tells it to pull again. Everything is projected on demand from the
//! current snapshot, so there is no cached tree to invalidate.

use super::OutlinePanel;
use crate::outline::{children_of, project_item, TreeItem};
use crate::project::NodeId;

impl OutlinePanel {
    /// Children of `parent` under the active traversal mode; `None` means
    /// the tree root. Empty before the first successful refresh or when a
    /// handle is stale.
    pub fn get_children(&self, parent: Option<NodeId>) -> Vec<TreeItem> {
        let Some(snapshot) = self.store.try_snapshot() else {
            return Vec::new();
        };
        let node = match parent {
            None => Some(snapshot.root()),
            Some(id) => snapshot.node(id),
        };
        let Some(node) = node else {
            return Vec::new();
        };
        children_of(&node, self.state.mode)
            .iter()
            .map(|child| project_item(snapshot, child, &self.state))
            .collect()
    }

    /// Parent row of a node; `None` at the root or for stale handles
    pub fn get_parent(&self, id: NodeId) -> Option<TreeItem> {
        let snapshot = self.store.try_snapshot()?;
        let parent = snapshot.node(id)?.parent()?;
        Some(project_item(snapshot, &parent, &self.state))
    }

    /// The renderable row for one node
    pub fn get_tree_item(&self, id: NodeId) -> Option<TreeItem> {
        let snapshot = self.store.try_snapshot()?;
        let node = snapshot.node(id)?;
        Some(project_item(snapshot, &node, &self.state))
    }
}
