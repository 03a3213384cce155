//! Camera streams and still-frame capture.
//!
//! A [`CameraSession`] owns the open stream: it is returned by
//! [`CameraSession::start`] and stopped by [`CameraSession::stop`] or on drop,
//! so at most one live handle exists per session value.

mod device;
mod session;
mod still;

pub use device::{CaptureDevice, MediaConstraints, MediaStream, TrackState};
pub use session::{CAPTURE_FILE_NAME, CameraEvent, CameraSession, CameraState, encode_jpeg};
pub use still::StillImageDevice;
