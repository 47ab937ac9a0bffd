use crate::{AppState, Effect, Msg, TransferResult};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked { folder_id, files } => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(files.len());
            for file in files {
                let upload_id = state.tracker_mut().enqueue(file.name.clone());
                effects.push(Effect::StartUpload {
                    upload_id,
                    file_name: file.name,
                    source: file.path,
                    folder_id: folder_id.clone(),
                });
            }
            state.mark_dirty();
            effects
        }
        Msg::UploadProgress { upload_id, percent } => {
            // Unknown ids are expected: the user may have dismissed the
            // entry while the transfer was still reporting.
            if state.tracker_mut().update_progress(upload_id, percent) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadFinished { upload_id, result } => {
            let changed = match result {
                TransferResult::Success => state.tracker_mut().mark_completed(upload_id),
                TransferResult::Failed { message } => {
                    state.tracker_mut().mark_error(upload_id, message)
                }
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DismissUpload { upload_id } => {
            if state.tracker_mut().remove(upload_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearCompletedClicked => {
            if state.tracker_mut().clear_completed() > 0 {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ItemClicked { item_id, modifier } => {
            state.mark_dirty();
            if modifier {
                state.selection_mut().toggle(item_id);
                vec![Effect::SelectionChanged {
                    selected: state.selection().selected_ids(),
                }]
            } else {
                state.selection_mut().replace(item_id.clone());
                vec![
                    Effect::SelectionChanged {
                        selected: state.selection().selected_ids(),
                    },
                    Effect::ItemActivated { item_id },
                ]
            }
        }
        Msg::CheckboxToggled { item_id } => {
            state.mark_dirty();
            state.selection_mut().toggle(item_id);
            vec![Effect::SelectionChanged {
                selected: state.selection().selected_ids(),
            }]
        }
        Msg::ItemOpened { item_id } => {
            // Selection already moved on the first click of the pair.
            vec![Effect::OpenItem { item_id }]
        }
        Msg::MarqueePressed { position, additive } => {
            state.selection_mut().begin_drag(position, additive);
            state.mark_dirty();
            Vec::new()
        }
        Msg::MarqueeMoved { position } => {
            // Live updates only; the single change notification comes on
            // release.
            if state.marquee_drag_to(position) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::MarqueeReleased => {
            if state.selection_mut().end_drag() {
                state.mark_dirty();
                vec![Effect::SelectionChanged {
                    selected: state.selection().selected_ids(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::MarqueeCancelled => {
            if state.selection_mut().cancel_drag() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CollectionChanged { items, selected } => {
            let selected = retain_displayed(selected, &items);
            state.set_items(items);
            state.selection_mut().sync_from(selected);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SelectionSynced { selected } => {
            let selected = retain_displayed(selected, state.items());
            state.selection_mut().sync_from(selected);
            state.mark_dirty();
            Vec::new()
        }
        Msg::DeleteSelectionRequested => {
            let count = state.selection().selected().len();
            if count == 0 || state.has_pending_confirm() {
                return (state, Vec::new());
            }
            let token = state.allocate_confirm_token();
            vec![Effect::RequestConfirm {
                token,
                prompt: format!("Delete {count} selected item(s)?"),
            }]
        }
        Msg::ConfirmResolved { token, accepted } => {
            if !state.resolve_confirm(token) {
                // Stale token from an already-superseded dialog.
                return (state, Vec::new());
            }
            if accepted {
                let item_ids = state.selection().selected_ids();
                if !item_ids.is_empty() {
                    vec![Effect::DeleteItems { item_ids }]
                } else {
                    Vec::new()
                }
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn retain_displayed(
    selected: Vec<crate::ItemId>,
    items: &[crate::DisplayedItem],
) -> Vec<crate::ItemId> {
    selected
        .into_iter()
        .filter(|id| items.iter().any(|item| &item.item_id == id))
        .collect()
}
