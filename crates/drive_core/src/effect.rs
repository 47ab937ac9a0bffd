use std::path::PathBuf;

use crate::{ItemId, UploadId};

/// Correlates a confirm request with its eventual answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfirmToken(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand one picked file to the transport collaborator.
    StartUpload {
        upload_id: UploadId,
        file_name: String,
        source: PathBuf,
        folder_id: String,
    },
    /// Controlled-component change notification: the owner receives the
    /// new selection after every user-driven mutation and exactly once per
    /// finished marquee drag.
    SelectionChanged { selected: Vec<ItemId> },
    /// Plain click selected a single item for the detail surface.
    ItemActivated { item_id: ItemId },
    /// Double-click open request; selection is unchanged by this.
    OpenItem { item_id: ItemId },
    /// Ask the owner to show a yes/no dialog for the given token.
    RequestConfirm { token: ConfirmToken, prompt: String },
    /// Confirmed deletion of the listed items via the backend API.
    DeleteItems { item_ids: Vec<ItemId> },
}
