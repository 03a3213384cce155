use super::ClinicApp;
use crate::{
    Error, Result,
    api::PredictionResult,
    camera::{CameraSession, CameraState},
};
use tracing::{info, warn};

impl ClinicApp {
    pub fn camera_state(&self) -> CameraState {
        self.camera
            .as_ref()
            .map(CameraSession::state)
            .unwrap_or(CameraState::Idle)
    }

    /// Opens a video-only stream and shows the camera controls. Failures
    /// raise an alert and leave the camera idle.
    pub async fn start_camera(&mut self) -> Result<()> {
        let started = match self.camera_device.clone() {
            Some(device) => CameraSession::start(device.as_ref()).await,
            None => Err(Error::camera("no capture device available")),
        };

        match started {
            Ok(session) => {
                // A replaced session stops its tracks when dropped.
                if self.camera.replace(session).is_some() {
                    warn!("Camera restarted while a stream was open");
                }
                self.page.show_camera_controls();
                self.page.hide_raw_preview();
                self.page.hide_result();
                Ok(())
            }
            Err(e) => {
                self.shell.alert(&e.to_string());
                Err(e)
            }
        }
    }

    /// Stops the active stream, if any, and hides the camera controls.
    pub fn stop_camera(&mut self) {
        if let Some(mut session) = self.camera.take() {
            session.stop();
        }
        self.page.hide_camera_controls();
    }

    /// Takes a still from the open stream, previews it, stops the camera,
    /// then submits the JPEG for prediction.
    ///
    /// A failed grab raises an alert and stops the camera.
    pub async fn capture_image(&mut self) -> Result<PredictionResult> {
        let grabbed = match self.camera.as_mut() {
            Some(session) => session.grab_jpeg(),
            None => Err(Error::camera("camera is not streaming")),
        };

        let file = match grabbed {
            Ok(file) => file,
            Err(e) => {
                warn!("Capture failed: {}", e);
                self.stop_camera();
                self.shell.alert(&e.to_string());
                return Err(e);
            }
        };
        info!("Captured frame ({} bytes)", file.bytes.len());

        self.page.show_raw_preview(file.to_data_url());
        self.stop_camera();

        self.predict_image(file).await
    }
}
