use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use futures_util::TryStreamExt;
use reqwest::multipart;
use sha2::{Digest, Sha256};
use tokio_util::io::ReaderStream;
use url::Url;

use crate::{
    FailureKind, TransportEvent, UploadError, UploadId, UploadOutcome, UploadProgress,
};

#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Base URL of the backend API; files are posted to `{endpoint}/files`.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Files larger than this are rejected before any bytes are sent.
    pub max_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_bytes: 256 * 1024 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: TransportEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<TransportEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<TransportEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: TransportEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        upload_id: UploadId,
        source: &Path,
        file_name: &str,
        folder_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<UploadOutcome, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn target_url(&self) -> Result<Url, UploadError> {
        let raw = format!("{}/files", self.settings.endpoint.trim_end_matches('/'));
        Url::parse(&raw).map_err(|err| UploadError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        upload_id: UploadId,
        source: &Path,
        file_name: &str,
        folder_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<UploadOutcome, UploadError> {
        let target = self.target_url()?;
        let client = self.build_client()?;

        let metadata = tokio::fs::metadata(source)
            .await
            .map_err(|err| UploadError::new(FailureKind::Io, err.to_string()))?;
        let total = metadata.len();
        if total > self.settings.max_bytes {
            return Err(UploadError::new(
                FailureKind::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: total,
                },
                "file too large",
            ));
        }

        let file = tokio::fs::File::open(source)
            .await
            .map_err(|err| UploadError::new(FailureKind::Io, err.to_string()))?;

        sink.emit(TransportEvent::Progress(UploadProgress {
            upload_id,
            percent: 0,
            bytes_sent: 0,
        }));

        // The body stream must be 'static, so outgoing chunks are mirrored
        // through a channel back to this task, which hashes them and
        // reports progress while the request is in flight.
        let (chunk_tx, mut chunk_rx) = tokio::sync::mpsc::unbounded_channel::<Bytes>();
        let body_stream = ReaderStream::new(file).inspect_ok(move |chunk: &Bytes| {
            let _ = chunk_tx.send(chunk.clone());
        });

        let part = multipart::Part::stream_with_length(
            reqwest::Body::wrap_stream(body_stream),
            total,
        )
        .file_name(file_name.to_string());
        let form = multipart::Form::new()
            .text("folder_id", folder_id.to_string())
            .part("file", part);

        let send = client.post(target).multipart(form).send();
        let observe = async {
            let mut hasher = Sha256::new();
            let mut sent: u64 = 0;
            while let Some(chunk) = chunk_rx.recv().await {
                hasher.update(&chunk);
                sent += chunk.len() as u64;
                let percent = if total == 0 {
                    100
                } else {
                    ((sent.min(total) * 100) / total) as u8
                };
                sink.emit(TransportEvent::Progress(UploadProgress {
                    upload_id,
                    percent,
                    bytes_sent: sent,
                }));
            }
            (hasher, sent)
        };

        let (response, (hasher, sent)) = tokio::join!(send, observe);
        let response = response.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|err| UploadError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let stored_id = payload
            .get("id")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                UploadError::new(FailureKind::MalformedResponse, "response is missing `id`")
            })?
            .to_string();

        sink.emit(TransportEvent::Progress(UploadProgress {
            upload_id,
            percent: 100,
            bytes_sent: sent,
        }));

        let digest = hasher.finalize();
        let sha256 = digest.iter().map(|byte| format!("{byte:02x}")).collect();

        Ok(UploadOutcome {
            stored_id,
            byte_len: sent,
            sha256,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
