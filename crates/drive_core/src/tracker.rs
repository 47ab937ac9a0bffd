use std::collections::BTreeMap;

use crate::{IdAllocator, UploadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Completed,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub upload_id: UploadId,
    pub file_name: String,
    /// Percentage in 0..=100. The tracker applies the latest value it
    /// receives; monotonicity is the progress stream's concern.
    pub progress: u8,
    pub status: UploadStatus,
    /// Present only when `status` is `Error`.
    pub error: Option<String>,
}

/// Single source of truth for all in-flight and settled uploads.
///
/// Entries are created only by [`enqueue`](UploadTracker::enqueue) and
/// destroyed only by [`remove`](UploadTracker::remove) or
/// [`clear_completed`](UploadTracker::clear_completed). Status transitions
/// only `Uploading -> Completed` or `Uploading -> Error`; terminal entries
/// are frozen, so late callbacks after dismissal or completion are benign
/// no-ops. Mutators return whether anything observable changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadTracker {
    entries: BTreeMap<UploadId, UploadEntry>,
    ids: IdAllocator,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new entry with status `Uploading` and progress 0.
    pub fn enqueue(&mut self, file_name: impl Into<String>) -> UploadId {
        let upload_id = self.ids.next_id();
        self.entries.insert(
            upload_id,
            UploadEntry {
                upload_id,
                file_name: file_name.into(),
                progress: 0,
                status: UploadStatus::Uploading,
                error: None,
            },
        );
        upload_id
    }

    pub fn update_progress(&mut self, upload_id: UploadId, percent: u8) -> bool {
        let Some(entry) = self.entries.get_mut(&upload_id) else {
            return false;
        };
        if entry.status.is_terminal() {
            return false;
        }
        let percent = percent.min(100);
        if entry.progress == percent {
            return false;
        }
        entry.progress = percent;
        true
    }

    pub fn mark_completed(&mut self, upload_id: UploadId) -> bool {
        let Some(entry) = self.entries.get_mut(&upload_id) else {
            return false;
        };
        if entry.status.is_terminal() {
            return false;
        }
        entry.status = UploadStatus::Completed;
        true
    }

    pub fn mark_error(&mut self, upload_id: UploadId, message: impl Into<String>) -> bool {
        let Some(entry) = self.entries.get_mut(&upload_id) else {
            return false;
        };
        if entry.status.is_terminal() {
            return false;
        }
        entry.status = UploadStatus::Error;
        entry.error = Some(message.into());
        true
    }

    /// Deletes the entry regardless of status. Unknown ids are a no-op.
    pub fn remove(&mut self, upload_id: UploadId) -> bool {
        self.entries.remove(&upload_id).is_some()
    }

    /// Removes all and only `Completed` entries; returns how many went.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.status != UploadStatus::Completed);
        before - self.entries.len()
    }

    pub fn get(&self, upload_id: UploadId) -> Option<&UploadEntry> {
        self.entries.get(&upload_id)
    }

    /// Snapshot of all entries in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = &UploadEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.status == UploadStatus::Uploading)
            .count()
    }
}
