use super::device::{CaptureDevice, MediaConstraints, MediaStream, TrackState};
use crate::{Error, Result, api::ImageFile};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use tracing::{debug, info, warn};

pub const CAPTURE_FILE_NAME: &str = "capture.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Idle,
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEvent {
    StreamOpened,
    StreamStopped,
}

/// An open camera stream. Dropping the session stops its tracks.
pub struct CameraSession {
    stream: Box<dyn MediaStream>,
    state: CameraState,
}

impl CameraSession {
    /// Requests a video-only stream from `device`.
    pub async fn start(device: &dyn CaptureDevice) -> Result<Self> {
        let stream = device
            .open(MediaConstraints::VIDEO_ONLY)
            .await
            .map_err(|e| match e {
                Error::CameraAccess(_) => e,
                other => Error::camera(other.to_string()),
            })?;

        let mut session = Self {
            stream,
            state: CameraState::Idle,
        };
        session.transition(CameraEvent::StreamOpened)?;
        Ok(session)
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state == CameraState::Streaming
    }

    pub fn track_states(&self) -> Vec<TrackState> {
        self.stream.track_states()
    }

    fn transition(&mut self, event: CameraEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (CameraState::Idle, CameraEvent::StreamOpened) => CameraState::Streaming,
            (CameraState::Streaming, CameraEvent::StreamStopped) => CameraState::Idle,
            (state, event) => {
                warn!("Invalid camera transition from {:?} with {:?}", state, event);
                return Err(Error::internal(format!(
                    "Invalid camera transition from {state:?} with {event:?}"
                )));
            }
        };

        info!("Camera state: {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
        Ok(())
    }

    /// Stops every track. Safe to call on a stopped session.
    pub fn stop(&mut self) {
        if self.state == CameraState::Idle {
            debug!("Camera already stopped");
            return;
        }

        self.stream.stop_all_tracks();
        // Streaming -> Idle is always valid.
        let _ = self.transition(CameraEvent::StreamStopped);
    }

    /// Grabs the current frame as a JPEG file.
    pub fn grab_jpeg(&mut self) -> Result<ImageFile> {
        if !self.is_streaming() {
            return Err(Error::camera("camera is not streaming"));
        }

        let frame = self.stream.grab_frame()?;
        debug!("Captured {}x{} frame", frame.width(), frame.height());
        Ok(ImageFile::jpeg(CAPTURE_FILE_NAME, encode_jpeg(frame)?))
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn encode_jpeg(frame: RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(frame).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
    Ok(bytes)
}
