//! Multi-view product design editor state.
//!
//! [`DesignManager`] owns one [`DesignDocument`] per product view, the
//! editor selection, a single-element clipboard and a bounded snapshot
//! history. Every mutating operation ends in a checkpoint so a single
//! `undo()` restores the collection to what it was before the call.
//!
//! ## Module Structure
//!
//! - `element` - user-added element sum type and ids
//! - `document` - per-view document with its singleton elements
//! - `selection` - what the editor has selected
//! - `history` - bounded snapshot stack with a cursor

mod document;
mod element;
mod history;
mod selection;

pub use document::{
    BadgeListElement, DataField, DataFieldPanel, DesignDocument, MapElement, MapSettings, WeatherElement,
};
pub use element::{new_element_id, CanvasElement, ElementContent, ElementFrame, ElementKind};
pub use history::History;
pub use selection::Selection;

use crate::achievements::AchievementOption;
use crate::constants::{DEFAULT_VIEW, PASTE_OFFSET};
use crate::error::{DesignError, DesignResult};
use std::collections::BTreeMap;

/// All views of a design keyed by view name
pub type Designs = BTreeMap<String, DesignDocument>;

/// What caused a change notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DesignChange {
    Checkpoint,
    Undo,
    Redo,
    Load,
}

type ChangeListener = Box<dyn Fn(DesignChange, &Designs) + Send + Sync>;

pub struct DesignManager {
    designs: Designs,
    current_view: String,
    selection: Option<Selection>,
    clipboard: Option<CanvasElement>,
    history: History,
    /// Set while undo/redo write a snapshot back
    applying_state: bool,
    listeners: Vec<ChangeListener>,
}

impl Default for DesignManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DesignManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignManager")
            .field("current_view", &self.current_view)
            .field("views", &self.designs.len())
            .field("selection", &self.selection)
            .field("history_len", &self.history.len())
            .field("history_index", &self.history.index())
            .finish()
    }
}

impl DesignManager {
    /// Editor with a default "front" view, the map selected and a single
    /// history entry
    pub fn new() -> Self {
        let mut designs = Designs::new();
        designs.insert(DEFAULT_VIEW.to_string(), DesignDocument::default());

        let mut manager = Self {
            designs,
            current_view: DEFAULT_VIEW.to_string(),
            selection: Some(Selection::Map),
            clipboard: None,
            history: History::new(),
            applying_state: false,
            listeners: Vec::new(),
        };
        manager.init_history();
        manager
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current_view(&self) -> &str {
        &self.current_view
    }

    pub fn designs(&self) -> &Designs {
        &self.designs
    }

    pub fn view_names(&self) -> Vec<&str> {
        self.designs.keys().map(String::as_str).collect()
    }

    /// Document of the current view.
    ///
    /// The current view is created whenever it becomes current.
    pub fn current_design(&self) -> &DesignDocument {
        static EMPTY: once_cell::sync::Lazy<DesignDocument> = once_cell::sync::Lazy::new(DesignDocument::default);
        self.designs.get(&self.current_view).unwrap_or(&*EMPTY)
    }

    /// Mutable document of the current view, created if missing.
    ///
    /// Direct edits are not checkpointed; call
    /// [`save_state_to_history`](Self::save_state_to_history) afterwards.
    pub fn current_design_mut(&mut self) -> &mut DesignDocument {
        self.designs.entry(self.current_view.clone()).or_default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn clipboard(&self) -> Option<&CanvasElement> {
        self.clipboard.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn is_applying_state(&self) -> bool {
        self.applying_state
    }

    pub fn element(&self, kind: ElementKind, id: &str) -> Option<&CanvasElement> {
        self.current_design().element(kind, id)
    }

    pub fn element_mut(&mut self, kind: ElementKind, id: &str) -> Option<&mut CanvasElement> {
        self.designs.get_mut(&self.current_view)?.element_mut(kind, id)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn can_paste(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Something other than the map is selected
    pub fn can_copy_cut_delete(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| *s != Selection::Map)
    }

    // ========================================================================
    // Views and Selection
    // ========================================================================

    /// Make `name` the current view, creating it from the default document.
    ///
    /// Switching to the view that is already current leaves the selection
    /// alone. No history entry is recorded.
    pub fn switch_view(&mut self, name: &str) {
        if name == self.current_view {
            return;
        }
        tracing::debug!(from = %self.current_view, to = %name, "Switching design view");
        self.selection = None;
        self.current_view = name.to_string();
        self.designs.entry(self.current_view.clone()).or_default();
    }

    pub fn select_element(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn deselect_all(&mut self) {
        self.selection = None;
    }

    // ========================================================================
    // Element Operations
    // ========================================================================

    /// Append a user element to the current view, select it and checkpoint.
    ///
    /// Returns the element's id.
    pub fn add_element(&mut self, element: CanvasElement) -> String {
        let kind = element.kind();
        let id = element.id().to_string();
        tracing::debug!(view = %self.current_view, %kind, %id, "Adding element");

        self.current_design_mut().elements.push(element);
        self.selection = Some(Selection::element(kind, id.clone()));
        self.save_state_to_history();
        id
    }

    /// Remove the first element matching `kind` and `id` from the current view.
    ///
    /// The selection is cleared either way. Nothing is recorded when no
    /// element matches.
    pub fn remove_element(&mut self, kind: ElementKind, id: &str) -> DesignResult<CanvasElement> {
        self.selection = None;
        let removed = self
            .designs
            .get_mut(&self.current_view)
            .and_then(|doc| doc.remove_element(kind, id))
            .ok_or_else(|| DesignError::ElementNotFound {
                kind,
                id: id.to_string(),
            })?;

        tracing::debug!(view = %self.current_view, %kind, %id, "Removed element");
        self.save_state_to_history();
        Ok(removed)
    }

    /// Put a copy of the selected user element on the clipboard
    pub fn copy_selection(&mut self) -> DesignResult<()> {
        let selection = self.selection.as_ref().ok_or(DesignError::NothingSelected)?;
        let Selection::Element { kind, id } = selection else {
            return Err(DesignError::NotCopyable);
        };
        let element = self
            .element(*kind, id)
            .cloned()
            .ok_or_else(|| DesignError::ElementNotFound {
                kind: *kind,
                id: id.clone(),
            })?;
        self.clipboard = Some(element);
        Ok(())
    }

    /// Copy the selected user element, then remove it
    pub fn cut_selection(&mut self) -> DesignResult<CanvasElement> {
        self.copy_selection()?;
        match self.selection.clone() {
            Some(Selection::Element { kind, id }) => self.remove_element(kind, &id),
            _ => Err(DesignError::NothingSelected),
        }
    }

    /// Insert the clipboard element into the current view under a new id,
    /// offset from the original. Returns the new id.
    pub fn paste(&mut self) -> DesignResult<String> {
        let mut element = self.clipboard.clone().ok_or(DesignError::ClipboardEmpty)?;
        element.frame.id = new_element_id(element.kind());
        element.frame.x += PASTE_OFFSET.0;
        element.frame.y += PASTE_OFFSET.1;
        Ok(self.add_element(element))
    }

    /// Delete whatever is selected.
    ///
    /// User elements are removed. Singletons other than the map are hidden.
    pub fn delete_selection(&mut self) -> DesignResult<()> {
        let selection = self.selection.clone().ok_or(DesignError::NothingSelected)?;
        match &selection {
            Selection::Map => return Err(DesignError::NotDeletable),
            Selection::Element { kind, id } => return self.remove_element(*kind, id).map(|_| ()),
            _ => {}
        }

        if let Some(frame) = self.current_design_mut().singleton_frame_mut(&selection) {
            frame.visible = false;
        }

        tracing::debug!(view = %self.current_view, id = selection.id(), "Hid element");
        self.selection = None;
        self.save_state_to_history();
        Ok(())
    }

    // ========================================================================
    // Data Fields and Achievements
    // ========================================================================

    /// Flip the `selected` flag of a data field, returning the new value
    pub fn toggle_data_field(&mut self, id: &str) -> DesignResult<bool> {
        let field = self
            .current_design_mut()
            .data_fields
            .field_mut(id)
            .ok_or_else(|| DesignError::FieldNotFound(id.to_string()))?;
        field.selected = !field.selected;
        let selected = field.selected;
        self.save_state_to_history();
        Ok(selected)
    }

    /// Move a data field to `index` in display order
    pub fn move_data_field(&mut self, id: &str, index: usize) -> DesignResult<()> {
        if !self.current_design_mut().data_fields.move_field(id, index) {
            return Err(DesignError::FieldNotFound(id.to_string()));
        }
        self.save_state_to_history();
        Ok(())
    }

    /// Store the badges picked for the current view
    pub fn set_achievements(&mut self, achievements: Vec<AchievementOption>) {
        self.current_design_mut().achievements = achievements;
        self.save_state_to_history();
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Record the current collection as a new history entry.
    ///
    /// Skipped while undo/redo are writing a snapshot back.
    pub fn save_state_to_history(&mut self) {
        if self.applying_state {
            tracing::debug!("Skipping checkpoint while applying history state");
            return;
        }
        self.history.push(self.designs.clone());
        tracing::debug!(
            len = self.history.len(),
            index = self.history.index(),
            "Saved design checkpoint"
        );
        self.notify(DesignChange::Checkpoint);
    }

    /// Restore the previous checkpoint. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        tracing::debug!(index = self.history.index(), "Undo");
        self.apply_snapshot(snapshot, DesignChange::Undo);
        true
    }

    /// Reapply the next checkpoint. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        tracing::debug!(index = self.history.index(), "Redo");
        self.apply_snapshot(snapshot, DesignChange::Redo);
        true
    }

    /// Start a fresh history holding only the current collection
    pub fn init_history(&mut self) {
        self.history.reset(self.designs.clone());
    }

    fn apply_snapshot(&mut self, snapshot: Designs, change: DesignChange) {
        self.applying_state = true;

        let mut restored = snapshot;
        for view in self.designs.keys() {
            restored.entry(view.clone()).or_default();
        }
        restored.entry(self.current_view.clone()).or_default();
        self.designs = restored;

        self.notify(change);
        self.applying_state = false;
    }

    // ========================================================================
    // Persistence and Listeners
    // ========================================================================

    /// Replace every view with externally supplied state and restart history
    pub fn load_designs(&mut self, designs: Designs) {
        self.designs = designs;
        self.designs.entry(self.current_view.clone()).or_default();
        self.selection = None;
        self.init_history();
        tracing::debug!(views = self.designs.len(), "Loaded designs");
        self.notify(DesignChange::Load);
    }

    pub fn export_json(&self) -> DesignResult<String> {
        Ok(serde_json::to_string(&self.designs)?)
    }

    pub fn import_json(&mut self, json: &str) -> DesignResult<()> {
        let designs: Designs = serde_json::from_str(json)?;
        self.load_designs(designs);
        Ok(())
    }

    /// Register a callback run after every checkpoint, undo, redo and load
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(DesignChange, &Designs) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, change: DesignChange) {
        for listener in &self.listeners {
            listener(change, &self.designs);
        }
    }
}
