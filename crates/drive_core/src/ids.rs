/// Opaque identifier for one tracked upload, stable for the entry's lifetime.
pub type UploadId = u64;

/// Identifier of an item in the displayed collection, as supplied by the
/// server listing.
pub type ItemId = String;

/// Hands out session-unique upload ids.
///
/// Ids start at 1 and are strictly increasing; an id is never reused within
/// a session, even after the entry it named has been removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdAllocator {
    last: UploadId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> UploadId {
        self.last += 1;
        self.last
    }
}
