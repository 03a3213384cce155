use super::mocks::{MockApiClient, MockCaptureDevice, RecordingShell};
use clinic_client::{
    api::{Detection, HistoryEntry, ImageFile},
    app::ClinicApp,
    session::{SessionStorage, TokenStore},
};
use std::sync::Arc;

pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Everything a test needs to drive the app and inspect its collaborators.
pub struct TestHarness {
    pub app: ClinicApp,
    pub api: Arc<MockApiClient>,
    pub storage: Arc<SessionStorage>,
    pub shell: Arc<RecordingShell>,
}

/// Create an app backed by in-memory storage, optionally logged in.
pub async fn create_harness(api: MockApiClient, token: Option<&str>) -> TestHarness {
    let api = Arc::new(api);
    let storage = Arc::new(SessionStorage::new(":memory:", "token").await.unwrap());
    if let Some(token) = token {
        storage.set_token(token).await.unwrap();
    }
    let shell = Arc::new(RecordingShell::new());

    let app = ClinicApp::new(
        api.clone(),
        storage.clone(),
        shell.clone(),
        DATE_FORMAT,
    );

    TestHarness {
        app,
        api,
        storage,
        shell,
    }
}

pub async fn create_harness_with_camera(
    api: MockApiClient,
    device: Arc<MockCaptureDevice>,
) -> TestHarness {
    let mut harness = create_harness(api, Some("test-token")).await;
    harness.app = harness.app.with_camera_device(device);
    harness
}

pub fn history_entry(timestamp: &str, classes: &[&str]) -> HistoryEntry {
    HistoryEntry {
        id: None,
        image_path: None,
        timestamp: timestamp.to_string(),
        detections: classes
            .iter()
            .map(|class| Detection::new(*class, 0.8))
            .collect(),
    }
}

pub fn sample_upload(name: &str) -> ImageFile {
    ImageFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}
