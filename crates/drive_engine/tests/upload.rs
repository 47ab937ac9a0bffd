use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use drive_engine::{
    FailureKind, ProgressSink, ReqwestUploader, TransportEvent, UploadProgress, UploadSettings,
    Uploader,
};
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<TransportEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn take(&self) -> Vec<TransportEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: TransportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn source_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

fn settings_for(server: &MockServer) -> UploadSettings {
    UploadSettings {
        endpoint: server.uri(),
        ..UploadSettings::default()
    }
}

#[tokio::test]
async fn uploader_posts_file_and_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "stored-1" })),
        )
        .mount(&server)
        .await;

    let content = b"hello drive upload".to_vec();
    let file = source_file(&content);
    let uploader = ReqwestUploader::new(settings_for(&server));
    let sink = TestSink::new();

    let outcome = uploader
        .upload(1, file.path(), "hello.txt", "folder-1", &sink)
        .await
        .expect("upload ok");

    assert_eq!(outcome.stored_id, "stored-1");
    assert_eq!(outcome.byte_len, content.len() as u64);
    let expected_sha: String = Sha256::digest(&content)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    assert_eq!(outcome.sha256, expected_sha);

    let percents: Vec<u8> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            TransportEvent::Progress(UploadProgress { percent, .. }) => Some(percent),
            _ => None,
        })
        .collect();
    assert_eq!(percents.first(), Some(&0));
    assert_eq!(percents.last(), Some(&100));
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn uploader_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let file = source_file(b"payload");
    let uploader = ReqwestUploader::new(settings_for(&server));
    let sink = TestSink::new();

    let err = uploader
        .upload(7, file.path(), "payload.bin", "folder-1", &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn uploader_rejects_oversized_file_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = source_file(b"0123456789");
    let settings = UploadSettings {
        max_bytes: 4,
        ..settings_for(&server)
    };
    let uploader = ReqwestUploader::new(settings);
    let sink = TestSink::new();

    let err = uploader
        .upload(2, file.path(), "big.bin", "folder-1", &sink)
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 4,
            actual: 10
        }
    );
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn uploader_times_out_on_slow_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "id": "late" })),
        )
        .mount(&server)
        .await;

    let file = source_file(b"payload");
    let settings = UploadSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let uploader = ReqwestUploader::new(settings);
    let sink = TestSink::new();

    let err = uploader
        .upload(3, file.path(), "slow.bin", "folder-1", &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn uploader_fails_on_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let file = source_file(b"payload");
    let uploader = ReqwestUploader::new(settings_for(&server));
    let sink = TestSink::new();

    let err = uploader
        .upload(4, file.path(), "payload.bin", "folder-1", &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn uploader_fails_on_missing_source_file() {
    let server = MockServer::start().await;
    let uploader = ReqwestUploader::new(settings_for(&server));
    let sink = TestSink::new();

    let err = uploader
        .upload(5, "/nonexistent/drive-fixture".as_ref(), "gone.bin", "folder-1", &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}

#[tokio::test]
async fn uploader_rejects_invalid_endpoint() {
    let file = source_file(b"payload");
    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: "not a url".to_string(),
        ..UploadSettings::default()
    });
    let sink = TestSink::new();

    let err = uploader
        .upload(6, file.path(), "payload.bin", "folder-1", &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
