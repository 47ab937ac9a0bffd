use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use drive_logging::drive_warn;

use crate::upload::{ChannelProgressSink, ReqwestUploader, UploadSettings, Uploader};
use crate::{TransportEvent, UploadId};

enum TransportCommand {
    Enqueue {
        upload_id: UploadId,
        source: PathBuf,
        file_name: String,
        folder_id: String,
    },
}

/// Channel facade over the transport: commands in, events out.
///
/// A dedicated thread owns a tokio runtime and spawns one task per upload,
/// so any number of transfers are in flight at once and their events
/// interleave arbitrarily across upload ids. Dropping every clone of the
/// handle closes the command channel and lets the thread wind down;
/// in-flight transfers are not cancelled.
#[derive(Clone)]
pub struct TransportHandle {
    cmd_tx: mpsc::Sender<TransportCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<TransportEvent>>>,
}

impl TransportHandle {
    pub fn new(settings: UploadSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let uploader = Arc::new(ReqwestUploader::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(uploader.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn enqueue(
        &self,
        upload_id: UploadId,
        source: impl Into<PathBuf>,
        file_name: impl Into<String>,
        folder_id: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(TransportCommand::Enqueue {
            upload_id,
            source: source.into(),
            file_name: file_name.into(),
            folder_id: folder_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<TransportEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    command: TransportCommand,
    event_tx: mpsc::Sender<TransportEvent>,
) {
    match command {
        TransportCommand::Enqueue {
            upload_id,
            source,
            file_name,
            folder_id,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = uploader
                .upload(upload_id, &source, &file_name, &folder_id, &sink)
                .await;
            if let Err(err) = &result {
                drive_warn!("upload {} failed: {}", upload_id, err);
            }
            let _ = event_tx.send(TransportEvent::Finished { upload_id, result });
        }
    }
}
