//! Node-to-tree-item projection
//!
//! Stateless: everything the host needs to render one outline row is derived
//! from the node, the snapshot text, and the current [`OutlineState`].

use tree_sitter::Node;

use super::{has_children, OutlineState};
use crate::project::{AstSnapshot, NodeId};

/// Longest tooltip shown before truncation
const TOOLTIP_MAX_CHARS: usize = 40;

/// Icon chosen for an outline row.
///
/// Matching is first-match-wins down this list; the predicates overlap (a
/// method definition is both function-like and property-like), so the
/// ordering here is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCategory {
    Interface,
    Class,
    Import,
    Function,
    Property,
    BooleanLiteral,
    Literal,
    Numeric,
    TypeOperator,
    Namespace,
    General,
}

impl IconCategory {
    /// Classify a node by its syntactic kind
    pub fn of(node: &Node) -> Self {
        let kind = node.kind();
        if is_interface(kind) {
            IconCategory::Interface
        } else if is_class(kind) {
            IconCategory::Class
        } else if is_import(kind) {
            IconCategory::Import
        } else if is_function_like(kind) {
            IconCategory::Function
        } else if is_property_like(kind) {
            IconCategory::Property
        } else if is_boolean_literal(kind) {
            IconCategory::BooleanLiteral
        } else if is_literal(kind) {
            IconCategory::Literal
        } else if is_numeric(kind) {
            IconCategory::Numeric
        } else if is_type_operator(kind) {
            IconCategory::TypeOperator
        } else if is_namespace(kind) {
            IconCategory::Namespace
        } else {
            IconCategory::General
        }
    }
}

fn is_interface(kind: &str) -> bool {
    matches!(kind, "interface_declaration" | "interface_body")
}

fn is_class(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration" | "abstract_class_declaration" | "class" | "class_body"
    )
}

fn is_import(kind: &str) -> bool {
    matches!(
        kind,
        "import_statement" | "import_clause" | "import_specifier" | "namespace_import" | "import"
    )
}

fn is_function_like(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "function_expression"
            | "generator_function_declaration"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
            | "method_signature"
            | "function_signature"
            | "call_expression"
    )
}

fn is_property_like(kind: &str) -> bool {
    matches!(
        kind,
        "property_signature"
            | "public_field_definition"
            | "property_identifier"
            | "pair"
            | "method_definition"
            | "shorthand_property_identifier"
    )
}

fn is_boolean_literal(kind: &str) -> bool {
    matches!(kind, "true" | "false")
}

fn is_literal(kind: &str) -> bool {
    matches!(
        kind,
        "string" | "string_fragment" | "template_string" | "regex" | "null" | "undefined"
    )
}

fn is_numeric(kind: &str) -> bool {
    kind == "number"
}

fn is_type_operator(kind: &str) -> bool {
    matches!(
        kind,
        "type_annotation"
            | "union_type"
            | "intersection_type"
            | "type_query"
            | "index_type_query"
            | "conditional_type"
            | "type_predicate"
    )
}

fn is_namespace(kind: &str) -> bool {
    matches!(kind, "internal_module" | "module" | "namespace_export")
}

/// Whether a row can be expanded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsibleState {
    None,
    Collapsed,
}

/// One renderable outline row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Handle to resolve the node behind this row; stale after any re-parse
    pub id: NodeId,
    pub label: String,
    pub icon: IconCategory,
    pub collapsible: CollapsibleState,
    pub tooltip: String,
    /// Kind name the host uses to decide which context actions to offer
    pub context_tag: String,
}

/// Project one node into its outline row under the current session state
pub fn project_item(snapshot: &AstSnapshot, node: &Node, state: &OutlineState) -> TreeItem {
    let kind = pascal_case(node.kind());
    let label = match semantic_name(snapshot, node) {
        Some(name) => format!("{name}({kind})"),
        None => kind.clone(),
    };

    let collapsible = if !state.collapse_all && has_children(node, state.mode) {
        CollapsibleState::Collapsed
    } else {
        CollapsibleState::None
    };

    TreeItem {
        id: snapshot.id_of(node),
        label,
        icon: IconCategory::of(node),
        collapsible,
        tooltip: truncate_chars(snapshot.text_of(node), TOOLTIP_MAX_CHARS),
        context_tag: kind,
    }
}

/// The declared name of a node, when its kind carries one
fn semantic_name<'s>(snapshot: &'s AstSnapshot, node: &Node) -> Option<&'s str> {
    let name_node = node.child_by_field_name("name")?;
    let text = snapshot.text_of(&name_node);
    (!text.is_empty()).then_some(text)
}

/// Convert a snake_case node kind to PascalCase for display
fn pascal_case(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len());
    for part in kind.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.is_empty() {
        // Punctuation kinds ("{", ";") have no word characters
        kind.to_string()
    } else {
        out
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => text[..byte].to_string(),
        None => text.to_string(),
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
    fn test_pascal_case_kinds() {
        assert_eq!(pascal_case("class_declaration"), "ClassDeclaration");
        assert_eq!(pascal_case("interface_declaration"), "InterfaceDeclaration");
        assert_eq!(pascal_case("number"), "Number");
        assert_eq!(pascal_case("{"), "{");
    }

    #[test]
    fn test_icon_precedence_function_beats_property() {
        // method_definition matches both the function and property predicates
        assert!(is_function_like("method_definition"));
        assert!(is_property_like("method_definition"));

        let tree = parse("class Foo { go() {} }");
        let root = tree.root_node();
        let method = root
            .named_child(0)
            .unwrap()
            .child_by_field_name("body")
            .unwrap()
            .named_child(0)
            .unwrap();
        assert_eq!(method.kind(), "method_definition");
        assert_eq!(IconCategory::of(&method), IconCategory::Function);
    }

    #[test]
    fn test_icon_categories() {
        let tree = parse("interface I {}\nclass C {}\nimport x from 'y';\nconst n = 42;");
        let root = tree.root_node();
        let kinds: Vec<IconCategory> = (0..root.named_child_count())
            .map(|i| IconCategory::of(&root.named_child(i).unwrap()))
            .collect();
        assert!(kinds.contains(&IconCategory::Interface));
        assert!(kinds.contains(&IconCategory::Class));
        assert!(kinds.contains(&IconCategory::Import));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 40), "short");
        let long = "x".repeat(60);
        assert_eq!(truncate_chars(&long, 40).chars().count(), 40);
        // Multibyte text must not split a char
        let accents = "é".repeat(50);
        assert_eq!(truncate_chars(&accents, 40).chars().count(), 40);
    }
}
