//! Drive engine: the transport collaborator that moves file bytes to the
//! backend and reports per-upload progress and completion events.
mod engine;
mod types;
mod upload;

pub use engine::TransportHandle;
pub use types::{
    FailureKind, TransportEvent, UploadError, UploadId, UploadOutcome, UploadProgress,
};
pub use upload::{ChannelProgressSink, ProgressSink, ReqwestUploader, UploadSettings, Uploader};
