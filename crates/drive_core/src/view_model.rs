use crate::{ItemId, Rect, UploadId, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub uploads: Vec<UploadRowView>,
    pub upload_count: usize,
    pub active_upload_count: usize,
    /// Selected ids filtered to the displayed collection, in sorted order.
    pub selected: Vec<ItemId>,
    pub selection_count: usize,
    /// Live marquee rectangle while a drag is in progress.
    pub marquee: Option<Rect>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRowView {
    pub upload_id: UploadId,
    pub file_name: String,
    pub progress: u8,
    pub status: UploadStatus,
    pub error: Option<String>,
}
