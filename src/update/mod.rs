//! The synchronization controller
//!
//! Elm-style update layer: editor events and panel commands come in, state
//! transitions happen against the snapshot store, and [`Cmd`] effects go
//! back out to the host. The panel owns all of its state explicitly; there
//! is no module-level mutable state anywhere.

mod tree;

use crate::commands::Cmd;
use crate::config::OutlineConfig;
use crate::editor::{DocumentScheme, Host};
use crate::messages::{EditorEvent, OutlineCommand};
use crate::mutate::{self, LanguageService, RefactorAction, SyntacticService};
use crate::outline::OutlineState;
use crate::project::{NodeId, RefreshError, RefreshOutcome, SnapshotStore};

/// The outline panel: snapshot store, session state, and the transitions
/// between them.
pub struct OutlinePanel {
    store: SnapshotStore,
    state: OutlineState,
    config: OutlineConfig,
    service: Box<dyn LanguageService>,
    enabled: bool,
}

impl OutlinePanel {
    pub fn new(config: OutlineConfig) -> Self {
        Self::with_service(config, Box::new(SyntacticService))
    }

    /// Construct with a substitute refactor provider
    pub fn with_service(config: OutlineConfig, service: Box<dyn LanguageService>) -> Self {
        let state = OutlineState {
            auto_refresh: config.auto_refresh,
            ..OutlineState::default()
        };
        Self {
            store: SnapshotStore::new(),
            state,
            config,
            service,
            enabled: false,
        }
    }

    pub fn state(&self) -> &OutlineState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Process one editor lifecycle event
    pub fn handle_event(&mut self, host: &mut dyn Host, event: EditorEvent) -> Cmd {
        match event {
            EditorEvent::ActiveEditorChanged => self.on_active_editor_changed(host),
            EditorEvent::DocumentChanged { path, region_count } => {
                self.on_document_changed(host, &path, region_count)
            }
            EditorEvent::SelectionChanged => self.on_selection_changed(host),
            EditorEvent::ConfigurationChanged => {
                self.config = OutlineConfig::load();
                self.state.auto_refresh = self.config.auto_refresh;
                Cmd::None
            }
        }
    }

    fn on_active_editor_changed(&mut self, host: &mut dyn Host) -> Cmd {
        let Some(doc) = host.active_document() else {
            self.enabled = false;
            return Cmd::SetViewEnabled(false);
        };
        // File-scheme documents in a supported language only
        if doc.scheme != DocumentScheme::File || doc.language_id().is_none() {
            self.enabled = false;
            return Cmd::SetViewEnabled(false);
        }

        self.enabled = true;
        match self.refresh_now(host) {
            Ok(_) => Cmd::batch(vec![
                Cmd::SetViewEnabled(true),
                Cmd::ReloadTree,
                self.sync_selection(host),
            ]),
            Err(e) => Cmd::batch(vec![
                Cmd::SetViewEnabled(true),
                Cmd::ShowError(e.to_string()),
            ]),
        }
    }

    fn on_document_changed(
        &mut self,
        host: &mut dyn Host,
        path: &std::path::Path,
        region_count: usize,
    ) -> Cmd {
        if !self.state.auto_refresh {
            return Cmd::None;
        }
        if self.store.tracked_path() != Some(path) {
            return Cmd::None;
        }

        // One refresh and one reload per edit region, so a multi-cursor
        // edit re-syncs once per cursor
        let mut cmds = Vec::new();
        for _ in 0..region_count.max(1) {
            match self.refresh_now(host) {
                Ok(RefreshOutcome::Coalesced) => {}
                Ok(_) => cmds.push(Cmd::ReloadTree),
                Err(e) => {
                    cmds.push(Cmd::ShowError(e.to_string()));
                    break;
                }
            }
        }
        Cmd::batch(cmds)
    }

    fn on_selection_changed(&mut self, host: &mut dyn Host) -> Cmd {
        if !self.enabled || host.active_document().is_none() {
            return Cmd::None;
        }
        if let Err(e) = self.refresh_now(host) {
            tracing::debug!("Selection sync skipped: {e}");
            return Cmd::None;
        }
        self.sync_selection(host)
    }

    /// Process one user command from the panel UI
    pub fn handle_command(&mut self, host: &mut dyn Host, command: OutlineCommand) -> Cmd {
        match command {
            OutlineCommand::RefreshAll => match self.refresh_now(host) {
                Ok(_) => Cmd::ReloadTree,
                Err(e) => Cmd::ShowError(e.to_string()),
            },
            OutlineCommand::RefreshNode(id) => match self.refresh_now(host) {
                // A re-parse invalidates the handle, so fall back to a
                // full reload whenever the tree actually changed
                Ok(RefreshOutcome::Unchanged) => Cmd::ReloadSubtree(id),
                Ok(_) => Cmd::ReloadTree,
                Err(e) => Cmd::ShowError(e.to_string()),
            },
            OutlineCommand::ToggleTraversalMode => {
                self.state.mode = self.state.mode.toggled();
                self.state.collapse_all = false;
                Cmd::ReloadTree
            }
            OutlineCommand::CollapseAll => {
                self.state.collapse_all = true;
                Cmd::ReloadTree
            }
            OutlineCommand::RenameNode(id) => self.rename_node(host, id),
            OutlineCommand::RemoveNode(id) => self.remove_node(host, id),
            OutlineCommand::RefactorNode(id) => self.refactor_node(host, id),
            OutlineCommand::AddChild(_) => {
                Cmd::ShowInfo("Adding a child node is not implemented yet.".to_string())
            }
            OutlineCommand::SelectNode(id) => match self.resolve_span(id) {
                Some((start, end)) => Cmd::SetSelection { start, end },
                None => Cmd::ReloadTree,
            },
        }
    }

    fn rename_node(&mut self, host: &mut dyn Host, id: NodeId) -> Cmd {
        let (path, source) = {
            let Some(snapshot) = self.store.try_snapshot() else {
                return Cmd::None;
            };
            let Some(node) = snapshot.node(id) else {
                return Cmd::ReloadTree;
            };
            if !mutate::capabilities(&node).renameable {
                return Cmd::ShowInfo(
                    "Sorry, this node doesn't support rename operation.".to_string(),
                );
            }
            let Some(new_name) = host.prompt_input("Enter new name") else {
                return Cmd::None;
            };
            if new_name.is_empty() {
                return Cmd::None;
            }
            match mutate::rename(snapshot, &node, &new_name) {
                Ok(source) => (snapshot.path().to_path_buf(), source),
                Err(e) => return Cmd::ShowInfo(e.to_string()),
            }
        };
        self.commit_edit(&path, source)
    }

    fn remove_node(&mut self, host: &mut dyn Host, id: NodeId) -> Cmd {
        let (path, source) = {
            let Some(snapshot) = self.store.try_snapshot() else {
                return Cmd::None;
            };
            let Some(node) = snapshot.node(id) else {
                return Cmd::ReloadTree;
            };
            if !mutate::capabilities(&node).removable {
                return Cmd::ShowInfo(
                    "Sorry, this node doesn't support remove operation.".to_string(),
                );
            }
            if !host.confirm("Are you sure you want to remove this node?") {
                return Cmd::None;
            }
            match mutate::remove(snapshot, &node) {
                Ok(source) => (snapshot.path().to_path_buf(), source),
                Err(e) => return Cmd::ShowInfo(e.to_string()),
            }
        };
        self.commit_edit(&path, source)
    }

    fn refactor_node(&mut self, host: &mut dyn Host, id: NodeId) -> Cmd {
        let (path, actions) = {
            let Some(snapshot) = self.store.try_snapshot() else {
                return Cmd::None;
            };
            let Some(node) = snapshot.node(id) else {
                return Cmd::ReloadTree;
            };
            let actions =
                mutate::list_refactors(self.service.as_ref(), snapshot, node.byte_range());
            (snapshot.path().to_path_buf(), actions)
        };
        if actions.is_empty() {
            return Cmd::ShowInfo("No refactors available for this node.".to_string());
        }
        let labels: Vec<String> = actions.iter().map(RefactorAction::menu_label).collect();
        let Some(picked) = host.pick(&labels) else {
            return Cmd::None;
        };
        let Some(action) = actions.iter().find(|a| a.menu_label() == picked) else {
            return Cmd::None;
        };
        match mutate::apply_refactor(action) {
            Ok(source) => self.commit_edit(&path, source),
            Err(e) => Cmd::ShowInfo(e.to_string()),
        }
    }

    /// Persist edited source and re-sync the snapshot to it
    fn commit_edit(&mut self, path: &std::path::Path, source: String) -> Cmd {
        if let Err(e) = mutate::persist(path, &source) {
            return Cmd::ShowError(e.to_string());
        }
        match self.store.apply_edit(&source) {
            Ok(()) => Cmd::ReloadTree,
            Err(e) => Cmd::ShowError(e.to_string()),
        }
    }

    fn refresh_now(&mut self, host: &dyn Host) -> Result<RefreshOutcome, RefreshError> {
        let doc = host.active_document();
        let root = host.workspace_root();
        self.store.refresh(doc.as_ref(), root.as_deref())
    }

    /// Reveal the node containing the selection anchor, focus untouched
    fn sync_selection(&mut self, host: &dyn Host) -> Cmd {
        let Some(anchor) = host.selection_anchor() else {
            return Cmd::None;
        };
        let Some(snapshot) = self.store.try_snapshot() else {
            return Cmd::None;
        };
        match snapshot.node_at_byte(anchor) {
            Some(node) => Cmd::RevealNode {
                id: snapshot.id_of(&node),
                preserve_focus: true,
            },
            None => Cmd::None,
        }
    }

    fn resolve_span(&self, id: NodeId) -> Option<(usize, usize)> {
        let snapshot = self.store.try_snapshot()?;
        let node = snapshot.node(id)?;
        Some((node.start_byte(), node.end_byte()))
    }
}
