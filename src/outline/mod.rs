//! Outline projection
//!
//! Pure mapping from syntax nodes to the items the host tree view renders,
//! plus the small session state (traversal mode, auto-refresh, collapse-all)
//! every tree query reads.

mod item;

use tree_sitter::Node;

pub use item::{CollapsibleState, IconCategory, TreeItem, project_item};

/// Which children of a node the tree view exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// Every concrete-syntax child, punctuation included
    DirectChildren,
    /// Only named (semantically meaningful) children
    #[default]
    SyntacticChildren,
}

impl TraversalMode {
    pub fn toggled(self) -> Self {
        match self {
            TraversalMode::DirectChildren => TraversalMode::SyntacticChildren,
            TraversalMode::SyntacticChildren => TraversalMode::DirectChildren,
        }
    }
}

/// Session configuration read by every tree query.
///
/// Mutated only by explicit user commands; never by refreshes.
#[derive(Debug, Clone)]
pub struct OutlineState {
    pub mode: TraversalMode,
    /// Re-sync the outline on every text edit of the tracked document
    pub auto_refresh: bool,
    /// Render every item non-expandable until the next mode change
    pub collapse_all: bool,
}

impl Default for OutlineState {
    fn default() -> Self {
        Self {
            mode: TraversalMode::default(),
            auto_refresh: true,
            collapse_all: false,
        }
    }
}

/// The children of `node` under the given traversal mode, in source order
pub fn children_of<'tree>(node: &Node<'tree>, mode: TraversalMode) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    match mode {
        TraversalMode::DirectChildren => node.children(&mut cursor).collect(),
        TraversalMode::SyntacticChildren => node.named_children(&mut cursor).collect(),
    }
}

/// Whether `node` has at least one child under the given traversal mode
pub fn has_children(node: &Node, mode: TraversalMode) -> bool {
    match mode {
        TraversalMode::DirectChildren => node.child_count() > 0,
        TraversalMode::SyntacticChildren => node.named_child_count() > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&crate::syntax::LanguageId::TypeScript.grammar())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_mode_toggle_round_trips() {
        let mode = TraversalMode::SyntacticChildren;
        assert_eq!(mode.toggled().toggled(), mode);
    }

    #[test]
    fn test_direct_mode_includes_punctuation() {
        let tree = parse("class Foo {}");
        let class_decl = tree.root_node().named_child(0).unwrap();
        let body = class_decl.child_by_field_name("body").unwrap();

        // The braces only show up in the exhaustive view
        let direct = children_of(&body, TraversalMode::DirectChildren);
        let syntactic = children_of(&body, TraversalMode::SyntacticChildren);
        assert!(direct.len() > syntactic.len());
        assert!(direct.iter().any(|n| n.kind() == "{"));
        assert!(syntactic.iter().all(|n| n.kind() != "{"));
    }

    #[test]
    fn test_toggle_restores_child_count() {
        let tree = parse("function go(a, b) { return a + b; }");
        let root = tree.root_node();
        let mode = TraversalMode::SyntacticChildren;
        let before = children_of(&root, mode).len();
        let after = children_of(&root, mode.toggled().toggled()).len();
        assert_eq!(before, after);
    }

    #[test]
    fn test_has_children_matches_listing() {
        let tree = parse("const x = 1;");
        let root = tree.root_node();
        for mode in [TraversalMode::DirectChildren, TraversalMode::SyntacticChildren] {
            assert_eq!(
                has_children(&root, mode),
                !children_of(&root, mode).is_empty()
            );
        }
    }
}
