use super::device::{CaptureDevice, MediaConstraints, MediaStream, TrackState};
use crate::{Error, Result};
use async_trait::async_trait;
use image::RgbImage;
use std::path::PathBuf;
use tracing::debug;

/// Capture device backed by an image file, for headless capture.
#[derive(Debug, Clone)]
pub struct StillImageDevice {
    path: PathBuf,
}

impl StillImageDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CaptureDevice for StillImageDevice {
    async fn open(&self, constraints: MediaConstraints) -> Result<Box<dyn MediaStream>> {
        if !constraints.video {
            return Err(Error::camera("device only provides video"));
        }

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::camera(format!("Requested device not found: {} ({e})", self.path.display()))
        })?;
        let frame = image::load_from_memory(&bytes)
            .map_err(|e| Error::camera(format!("Could not start video source: {e}")))?
            .to_rgb8();

        debug!(
            "Opened still image device {} ({}x{})",
            self.path.display(),
            frame.width(),
            frame.height()
        );

        Ok(Box::new(StillImageStream {
            frame,
            video_track: TrackState::Live,
        }))
    }
}

struct StillImageStream {
    frame: RgbImage,
    video_track: TrackState,
}

impl MediaStream for StillImageStream {
    fn grab_frame(&mut self) -> Result<RgbImage> {
        match self.video_track {
            TrackState::Live => Ok(self.frame.clone()),
            TrackState::Ended => Err(Error::camera("video track has ended")),
        }
    }

    fn track_states(&self) -> Vec<TrackState> {
        vec![self.video_track]
    }

    fn stop_all_tracks(&mut self) {
        self.video_track = TrackState::Ended;
    }
}
