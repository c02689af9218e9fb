//! Camera capture: opening a device and pulling frames from it.

use log::debug;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

/// Errors that can occur while opening or reading a capture device.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The device exists but could not be opened for capture.
    #[error("camera {camera_id} could not be opened")]
    OpenFailed { camera_id: i32 },
    /// The device produced no frame for too many consecutive reads.
    #[error("no frame after {attempts} consecutive reads, capture device appears stalled")]
    ReadStalled { attempts: u32 },
    /// Error reported by the capture backend.
    #[error("capture backend error: {0}")]
    Backend(#[from] opencv::Error),
}

/// A source of frames, pulled one per loop iteration.
///
/// The production implementation is [`CameraCapture`]; tests substitute
/// scripted sources.
pub trait FrameSource {
    /// Pull the next frame. `Ok(None)` means no frame was available this
    /// tick; a single failed read is not an error.
    fn read(&mut self) -> Result<Option<Mat>, CaptureError>;

    /// Release the underlying device. Safe to call more than once.
    fn release(&mut self) -> Result<(), CaptureError>;
}

/// Live handle to a camera device.
///
/// Owns the device exclusively for the lifetime of the run. Opening
/// fails fast when the device cannot be used, so the loop never spins
/// on a source that will never produce a frame.
pub struct CameraCapture {
    inner: VideoCapture,
    released: bool,
}

impl CameraCapture {
    /// Open the camera identified by `camera_id`.
    ///
    /// # Errors
    /// * `CaptureError::OpenFailed` - the device could not be opened
    pub fn open(camera_id: i32) -> Result<Self, CaptureError> {
        let inner = VideoCapture::new(camera_id, videoio::CAP_ANY)?;
        if !inner.is_opened()? {
            return Err(CaptureError::OpenFailed { camera_id });
        }
        debug!("camera {} opened", camera_id);
        Ok(Self {
            inner,
            released: false,
        })
    }
}

impl FrameSource for CameraCapture {
    fn read(&mut self) -> Result<Option<Mat>, CaptureError> {
        let mut frame = Mat::default();
        if !self.inner.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.inner.release()?;
        debug!("camera released");
        Ok(())
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_invalid_device_fails() {
        // Device index that is very unlikely to exist
        let result = CameraCapture::open(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_failed_error_message() {
        let err = CaptureError::OpenFailed { camera_id: 3 };
        assert_eq!(format!("{}", err), "camera 3 could not be opened");
    }

    #[test]
    fn test_read_stalled_error_message() {
        let err = CaptureError::ReadStalled { attempts: 100 };
        let msg = format!("{}", err);
        assert!(msg.contains("100"));
        assert!(msg.contains("stalled"));
    }
}
