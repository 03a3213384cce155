use crate::Result;
use async_trait::async_trait;
use image::RgbImage;

/// What `open` asks the device for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub video: bool,
    pub audio: bool,
}

impl MediaConstraints {
    pub const VIDEO_ONLY: Self = Self {
        video: true,
        audio: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Live,
    Ended,
}

/// Source of camera streams. Failures map to [`crate::Error::CameraAccess`].
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    async fn open(&self, constraints: MediaConstraints) -> Result<Box<dyn MediaStream>>;
}

/// An open stream with one or more tracks.
pub trait MediaStream: Send {
    /// Current frame of the video track.
    fn grab_frame(&mut self) -> Result<RgbImage>;

    fn track_states(&self) -> Vec<TrackState>;

    /// Ends every track. Calling it on an ended stream does nothing.
    fn stop_all_tracks(&mut self);
}
