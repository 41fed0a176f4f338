//! Mutation gateway
//!
//! Tree-aware edits triggered from outline rows: rename, remove, and
//! refactor listing. Each operation produces the edited source text; the
//! controller owns persistence, re-parse, and user-facing prompts. Nothing
//! here touches the UI.

use std::collections::HashSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tree_sitter::Node;

use crate::project::AstSnapshot;

/// What a node's kind allows, declared per kind instead of probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeCapabilities {
    pub renameable: bool,
    pub removable: bool,
}

/// The capabilities of a node, decided by pattern-match on its kind.
///
/// Renameable: declarations that carry a `name` field. Removable: whole
/// statements or members sitting in a container that tolerates their
/// absence. A source file is neither.
pub fn capabilities(node: &Node) -> NodeCapabilities {
    let renameable = matches!(
        node.kind(),
        "class_declaration"
            | "abstract_class_declaration"
            | "interface_declaration"
            | "function_declaration"
            | "generator_function_declaration"
            | "method_definition"
            | "method_signature"
            | "property_signature"
            | "public_field_definition"
            | "enum_declaration"
            | "type_alias_declaration"
            | "variable_declarator"
            | "internal_module"
    ) && node.child_by_field_name("name").is_some();

    let removable = node.parent().is_some_and(|parent| {
        matches!(
            parent.kind(),
            "program" | "statement_block" | "class_body" | "interface_body" | "enum_body"
        )
    }) && node.is_named();

    NodeCapabilities {
        renameable,
        removable,
    }
}

/// Why a mutation did not happen.
#[derive(Debug, thiserror::Error)]
pub enum MutateError {
    #[error("this node does not support the rename operation")]
    RenameUnsupported,

    #[error("this node does not support the remove operation")]
    RemoveUnsupported,

    #[error("node kind {0} has no name to rename")]
    NoNameField(String),

    #[error("failed to persist {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not implemented yet.")]
    NotImplemented(&'static str),
}

/// Source text with `node`'s name identifier replaced by `new_name`.
///
/// Fails without side effects when the node's kind does not rename.
pub fn rename(snapshot: &AstSnapshot, node: &Node, new_name: &str) -> Result<String, MutateError> {
    if !capabilities(node).renameable {
        return Err(MutateError::RenameUnsupported);
    }
    let name_node = node
        .child_by_field_name("name")
        .ok_or_else(|| MutateError::NoNameField(node.kind().to_string()))?;
    Ok(splice(
        snapshot.source(),
        name_node.byte_range(),
        new_name,
    ))
}

/// Source text with `node`'s whole span removed.
///
/// Also consumes one trailing newline so removing a statement does not
/// leave a blank line behind.
pub fn remove(snapshot: &AstSnapshot, node: &Node) -> Result<String, MutateError> {
    if !capabilities(node).removable {
        return Err(MutateError::RemoveUnsupported);
    }
    let source = snapshot.source();
    let mut range = node.byte_range();
    let rest = &source.as_bytes()[range.end..];
    if rest.first() == Some(&b'\n') {
        range.end += 1;
    } else if rest.starts_with(b"\r\n") {
        range.end += 2;
    }
    Ok(splice(source, range, ""))
}

/// Applying a listed refactor. Always unimplemented; the caller surfaces
/// this to the user instead of silently doing nothing.
pub fn apply_refactor(_action: &RefactorAction) -> Result<String, MutateError> {
    Err(MutateError::NotImplemented("Applying refactors"))
}

/// Write edited source back to disk
pub fn persist(path: &Path, source: &str) -> Result<(), MutateError> {
    std::fs::write(path, source).map_err(|source| MutateError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

fn splice(source: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(source.len() + replacement.len());
    out.push_str(&source[..range.start]);
    out.push_str(replacement);
    out.push_str(&source[range.end..]);
    out
}

/// One refactor suggestion for a source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefactorAction {
    /// Family the action belongs to ("Extract", "Convert", ...)
    pub family: String,
    pub description: String,
}

impl RefactorAction {
    pub fn new(family: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            description: description.into(),
        }
    }

    /// The label shown in the picker
    pub fn menu_label(&self) -> String {
        format!("{} - {}", self.family, self.description)
    }
}

/// Source of refactor suggestions for a span. The real engine lives outside
/// this crate; tests substitute a scripted implementation.
pub trait LanguageService {
    fn refactors_for(&self, snapshot: &AstSnapshot, span: Range<usize>) -> Vec<RefactorAction>;
}

/// Suggestions derived from syntax alone, with no type information.
#[derive(Debug, Default)]
pub struct SyntacticService;

impl LanguageService for SyntacticService {
    fn refactors_for(&self, snapshot: &AstSnapshot, span: Range<usize>) -> Vec<RefactorAction> {
        let Some(node) = snapshot.node_at_byte(span.start) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            match n.kind() {
                "function_declaration" => {
                    actions.push(RefactorAction::new("Convert", "Convert to arrow function"));
                }
                "arrow_function" => {
                    actions.push(RefactorAction::new(
                        "Convert",
                        "Convert to function declaration",
                    ));
                }
                "string" => {
                    actions.push(RefactorAction::new("Convert", "Convert to template string"));
                }
                "variable_declarator" => {
                    actions.push(RefactorAction::new("Extract", "Extract to function"));
                }
                _ => {}
            }
            current = n.parent();
        }
        actions
    }
}

/// Refactor actions for `span`, deduplicated by their menu label, in the
/// order the service produced them.
pub fn list_refactors(
    service: &dyn LanguageService,
    snapshot: &AstSnapshot,
    span: Range<usize>,
) -> Vec<RefactorAction> {
    let mut seen = HashSet::new();
    service
        .refactors_for(snapshot, span)
        .into_iter()
        .filter(|action| seen.insert(action.menu_label()))
        .collect()
}
