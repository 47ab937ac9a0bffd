use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use drive_core::{Effect, Msg, TransferResult};
use drive_engine::{TransportEvent, TransportHandle, UploadSettings};
use drive_logging::{drive_info, drive_warn};

use super::app::ShellEvent;
use super::confirm::ConfirmGate;

pub(crate) struct EffectRunner {
    transport: TransportHandle,
    confirm: Arc<ConfirmGate>,
}

impl EffectRunner {
    pub fn new(
        event_tx: mpsc::Sender<ShellEvent>,
        settings: UploadSettings,
        confirm: Arc<ConfirmGate>,
    ) -> Self {
        let transport = TransportHandle::new(settings);
        let runner = Self { transport, confirm };
        runner.spawn_event_pump(event_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload {
                    upload_id,
                    file_name,
                    source,
                    folder_id,
                } => {
                    drive_info!(
                        "StartUpload upload_id={} file={} folder={}",
                        upload_id,
                        file_name,
                        folder_id
                    );
                    self.transport.enqueue(upload_id, source, file_name, folder_id);
                }
                Effect::SelectionChanged { selected } => {
                    // Sibling surfaces (the toolbar count) hang off this
                    // notification rather than keeping their own copy.
                    drive_info!("selection changed: {} item(s)", selected.len());
                }
                Effect::ItemActivated { item_id } => {
                    drive_info!("item activated: {}", item_id);
                }
                Effect::OpenItem { item_id } => {
                    drive_info!("open item: {}", item_id);
                }
                Effect::RequestConfirm { token, prompt } => {
                    self.confirm.request(token);
                    println!("{prompt} [y/n]");
                }
                Effect::DeleteItems { item_ids } => {
                    drive_info!("delete via api: {:?}", item_ids);
                    println!("deleted {} item(s)", item_ids.len());
                }
            }
        }
    }

    fn spawn_event_pump(&self, event_tx: mpsc::Sender<ShellEvent>) {
        let transport = self.transport.clone();
        thread::spawn(move || loop {
            if let Some(event) = transport.try_recv() {
                let msg = match event {
                    TransportEvent::Progress(progress) => Msg::UploadProgress {
                        upload_id: progress.upload_id,
                        percent: progress.percent,
                    },
                    TransportEvent::Finished { upload_id, result } => Msg::UploadFinished {
                        upload_id,
                        result: match result {
                            Ok(outcome) => {
                                drive_info!(
                                    "upload {} stored as {} ({} bytes, sha256 {})",
                                    upload_id,
                                    outcome.stored_id,
                                    outcome.byte_len,
                                    outcome.sha256
                                );
                                TransferResult::Success
                            }
                            Err(err) => {
                                drive_warn!("upload {} failed: {}", upload_id, err);
                                TransferResult::Failed {
                                    message: err.to_string(),
                                }
                            }
                        },
                    },
                };
                if event_tx.send(ShellEvent::Core(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}
