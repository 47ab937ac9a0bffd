//! Drive core: pure state machines for upload tracking and item selection.
mod effect;
mod ids;
mod msg;
mod selection;
mod state;
mod tracker;
mod update;
mod view_model;

pub use effect::{ConfirmToken, Effect};
pub use ids::{IdAllocator, ItemId, UploadId};
pub use msg::{Msg, PickedFile, TransferResult};
pub use selection::{DisplayedItem, Point, Rect, SelectionController};
pub use state::AppState;
pub use tracker::{UploadEntry, UploadStatus, UploadTracker};
pub use update::update;
pub use view_model::{AppViewModel, UploadRowView};
