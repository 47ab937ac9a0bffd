use crate::view_model::{AppViewModel, UploadRowView};
use crate::{ConfirmToken, DisplayedItem, SelectionController, UploadTracker};

/// Canonical state for one view session.
///
/// The tracker and the selection controller are plain owned fields: the
/// shell constructs one `AppState` per view session and passes it by
/// reference to whatever needs it, rather than hanging either off ambient
/// global state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    tracker: UploadTracker,
    selection: SelectionController,
    items: Vec<DisplayedItem>,
    pending_confirm: Option<ConfirmToken>,
    last_confirm_token: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracker(&self) -> &UploadTracker {
        &self.tracker
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn items(&self) -> &[DisplayedItem] {
        &self.items
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut UploadTracker {
        &mut self.tracker
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionController {
        &mut self.selection
    }

    pub(crate) fn set_items(&mut self, items: Vec<DisplayedItem>) {
        self.items = items;
    }

    /// Runs the intersection pass for a live marquee drag against the
    /// displayed collection.
    pub(crate) fn marquee_drag_to(&mut self, position: crate::Point) -> bool {
        let Self {
            selection, items, ..
        } = self;
        selection.drag_to(position, items)
    }

    pub(crate) fn allocate_confirm_token(&mut self) -> ConfirmToken {
        self.last_confirm_token += 1;
        let token = ConfirmToken(self.last_confirm_token);
        self.pending_confirm = Some(token);
        token
    }

    pub(crate) fn has_pending_confirm(&self) -> bool {
        self.pending_confirm.is_some()
    }

    /// Clears the pending token if `token` matches it; a stale token
    /// leaves the pending request untouched.
    pub(crate) fn resolve_confirm(&mut self, token: ConfirmToken) -> bool {
        if self.pending_confirm == Some(token) {
            self.pending_confirm = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and resets the dirty flag; the shell renders only when this
    /// reports true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let uploads: Vec<UploadRowView> = self
            .tracker
            .entries()
            .map(|entry| UploadRowView {
                upload_id: entry.upload_id,
                file_name: entry.file_name.clone(),
                progress: entry.progress,
                status: entry.status,
                error: entry.error.clone(),
            })
            .collect();

        // A selected id whose item is no longer displayed is treated as
        // unselected rather than surfaced as an error.
        let selected: Vec<_> = self
            .selection
            .selected()
            .iter()
            .filter(|id| self.items.iter().any(|item| &item.item_id == *id))
            .cloned()
            .collect();

        AppViewModel {
            upload_count: uploads.len(),
            active_upload_count: self.tracker.active_count(),
            uploads,
            selection_count: selected.len(),
            selected,
            marquee: self.selection.marquee_rect(),
            dirty: self.dirty,
        }
    }
}
