use std::path::PathBuf;

use crate::{ConfirmToken, DisplayedItem, ItemId, Point, UploadId};

/// A file chosen in the native picker, before it has an upload id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
}

/// Terminal outcome of one transfer, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferResult {
    Success,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files to upload into a destination folder.
    FilesPicked {
        folder_id: String,
        files: Vec<PickedFile>,
    },
    /// Transport progress for one upload.
    UploadProgress { upload_id: UploadId, percent: u8 },
    /// Transport completion (success or failure) for one upload.
    UploadFinished {
        upload_id: UploadId,
        result: TransferResult,
    },
    /// User dismissed one tray entry.
    DismissUpload { upload_id: UploadId },
    /// User clicked "clear completed" in the tray.
    ClearCompletedClicked,
    /// Click or tap on an item; `modifier` is ctrl/cmd.
    ItemClicked { item_id: ItemId, modifier: bool },
    /// Explicit per-item checkbox interaction. Never triggers activation.
    CheckboxToggled { item_id: ItemId },
    /// Double-click/double-tap open. Does not change selection further.
    ItemOpened { item_id: ItemId },
    /// Pointer-down on empty canvas; starts a marquee drag.
    MarqueePressed { position: Point, additive: bool },
    /// Pointer move while a marquee drag is live.
    MarqueeMoved { position: Point },
    /// Pointer-up finalizing a marquee drag.
    MarqueeReleased,
    /// Drag aborted (pointer left the window or a cancel key).
    MarqueeCancelled,
    /// The displayed collection changed (navigation, filter). Carries the
    /// new items and the owner's selection for them.
    CollectionChanged {
        items: Vec<DisplayedItem>,
        selected: Vec<ItemId>,
    },
    /// Owner override of the selection without a collection change.
    SelectionSynced { selected: Vec<ItemId> },
    /// User asked to delete the current selection.
    DeleteSelectionRequested,
    /// Answer to a pending confirm request. A dismissed dialog arrives as
    /// `accepted: false`.
    ConfirmResolved { token: ConfirmToken, accepted: bool },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
