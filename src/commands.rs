//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host should perform after an update:
//! tree reload notifications, reveal requests, user-facing messages. The
//! panel never calls into the host UI directly.

use crate::project::NodeId;

/// A side effect requested from the host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Re-pull the whole tree from the data source
    ReloadTree,
    /// Re-pull one subtree
    ReloadSubtree(NodeId),
    /// Expand ancestors and scroll a node into view
    RevealNode {
        id: NodeId,
        /// Keep keyboard focus in the editor while revealing
        preserve_focus: bool,
    },
    /// Show or hide the whole outline view
    SetViewEnabled(bool),
    /// Move the editor caret/selection to a byte span of the active document
    SetSelection { start: usize, end: usize },
    /// Non-blocking informational message
    ShowInfo(String),
    /// Non-blocking error message
    ShowError(String),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Collapse a command list into a single command
    pub fn batch(mut cmds: Vec<Cmd>) -> Cmd {
        cmds.retain(|c| !matches!(c, Cmd::None));
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_flattens_trivial_cases() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::ReloadTree]), Cmd::ReloadTree);
        assert_eq!(
            Cmd::batch(vec![Cmd::None, Cmd::ReloadTree, Cmd::SetViewEnabled(true)]),
            Cmd::Batch(vec![Cmd::ReloadTree, Cmd::SetViewEnabled(true)])
        );
    }
}
