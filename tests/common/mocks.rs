use async_trait::async_trait;
use clinic_client::{
    Error, Result,
    api::{ApiClient, HistoryEntry, ImageFile, PredictionResult, TokenResponse},
    app::{Route, Shell},
    camera::{CaptureDevice, MediaConstraints, MediaStream, TrackState},
};
use image::{Rgb, RgbImage};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

/// Scripted server answer: a payload or a bare status code.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

/// Mock API client for testing
#[derive(Debug)]
pub struct MockApiClient {
    pub login_reply: Mutex<Reply<TokenResponse>>,
    pub register_reply: Mutex<Reply<()>>,
    pub history_reply: Mutex<Reply<Vec<HistoryEntry>>>,
    pub predict_reply: Mutex<Reply<PredictionResult>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Camera whose first track is sampled while a predict call is in flight.
    pub watched_camera: Option<Arc<MockCaptureDevice>>,
    pub tracks_during_predict: Mutex<Vec<TrackState>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self {
            login_reply: Mutex::new(Reply::Ok(TokenResponse {
                access_token: "test-token".to_string(),
                token_type: "bearer".to_string(),
            })),
            register_reply: Mutex::new(Reply::Ok(())),
            history_reply: Mutex::new(Reply::Ok(Vec::new())),
            predict_reply: Mutex::new(Reply::Ok(PredictionResult {
                detections: Vec::new(),
                image_base64: None,
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
            watched_camera: None,
            tracks_during_predict: Mutex::new(Vec::new()),
        }
    }

    pub fn with_login(self, reply: Reply<TokenResponse>) -> Self {
        *self.login_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_register(self, reply: Reply<()>) -> Self {
        *self.register_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_history(self, reply: Reply<Vec<HistoryEntry>>) -> Self {
        *self.history_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_predict(self, reply: Reply<PredictionResult>) -> Self {
        *self.predict_reply.lock().unwrap() = reply;
        self
    }

    pub fn watching_camera(mut self, device: Arc<MockCaptureDevice>) -> Self {
        self.watched_camera = Some(device);
        self
    }

    pub fn get_tracks_during_predict(&self) -> Vec<TrackState> {
        self.tracks_during_predict.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn login(&self, username: &str, _password: &str) -> Result<TokenResponse> {
        self.record(format!("login:{username}"));
        match self.login_reply.lock().unwrap().clone() {
            Reply::Ok(token) => Ok(token),
            Reply::Status(code) => Err(Error::Auth {
                status: status(code),
                detail: "Incorrect username or password".to_string(),
            }),
        }
    }

    async fn register(&self, username: &str, _password: &str) -> Result<()> {
        self.record(format!("register:{username}"));
        match self.register_reply.lock().unwrap().clone() {
            Reply::Ok(()) => Ok(()),
            Reply::Status(code) => Err(Error::Registration {
                status: status(code),
                detail: "Username already registered".to_string(),
            }),
        }
    }

    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        self.record(format!("history:{token}"));
        match self.history_reply.lock().unwrap().clone() {
            Reply::Ok(entries) => Ok(entries),
            Reply::Status(401) => Err(Error::SessionExpired),
            Reply::Status(code) => Err(Error::HistoryLoad {
                status: status(code),
            }),
        }
    }

    async fn predict(&self, token: &str, image: ImageFile) -> Result<PredictionResult> {
        self.record(format!("predict:{token}:{}", image.name));
        if let Some(ref device) = self.watched_camera {
            let state = device.track_state(0);
            self.tracks_during_predict.lock().unwrap().push(state);
        }
        match self.predict_reply.lock().unwrap().clone() {
            Reply::Ok(result) => Ok(result),
            Reply::Status(code) => Err(Error::Prediction {
                status: status(code),
                detail: "model unavailable".to_string(),
            }),
        }
    }
}

/// Shell that records alerts and navigations.
#[derive(Debug, Default)]
pub struct RecordingShell {
    pub alerts: Mutex<Vec<String>>,
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn get_routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Capture device with a solid-color frame, or a scripted open or grab failure.
#[derive(Debug, Default)]
pub struct MockCaptureDevice {
    pub error: Option<String>,
    pub frame_error: Option<String>,
    pub opens: Mutex<usize>,
    /// Track states of every stream handed out, in open order.
    pub streams: Mutex<Vec<Arc<Mutex<TrackState>>>>,
}

impl MockCaptureDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_frame_error(mut self, error: impl Into<String>) -> Self {
        self.frame_error = Some(error.into());
        self
    }

    pub fn open_count(&self) -> usize {
        *self.opens.lock().unwrap()
    }

    pub fn track_state(&self, stream: usize) -> TrackState {
        *self.streams.lock().unwrap()[stream].lock().unwrap()
    }
}

#[async_trait]
impl CaptureDevice for MockCaptureDevice {
    async fn open(&self, constraints: MediaConstraints) -> Result<Box<dyn MediaStream>> {
        *self.opens.lock().unwrap() += 1;
        assert_eq!(constraints, MediaConstraints::VIDEO_ONLY);

        if let Some(ref error) = self.error {
            return Err(Error::camera(error.clone()));
        }

        let track = Arc::new(Mutex::new(TrackState::Live));
        self.streams.lock().unwrap().push(Arc::clone(&track));
        Ok(Box::new(MockStream {
            track,
            frame_error: self.frame_error.clone(),
        }))
    }
}

struct MockStream {
    track: Arc<Mutex<TrackState>>,
    frame_error: Option<String>,
}

impl MediaStream for MockStream {
    fn grab_frame(&mut self) -> Result<RgbImage> {
        if let Some(ref error) = self.frame_error {
            return Err(Error::camera(error.clone()));
        }
        Ok(RgbImage::from_pixel(4, 4, Rgb([30, 120, 200])))
    }

    fn track_states(&self) -> Vec<TrackState> {
        vec![*self.track.lock().unwrap()]
    }

    fn stop_all_tracks(&mut self) {
        *self.track.lock().unwrap() = TrackState::Ended;
    }
}
