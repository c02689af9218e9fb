//! On-screen display surface and interactive key polling.

use opencv::core::Mat;
use opencv::highgui;
use thiserror::Error;

/// Fixed window identifier used for every rendered frame.
pub const WINDOW_NAME: &str = "camview";

/// Key poll timeout in milliseconds. Short enough to be effectively
/// non-blocking; the poll also serves as the window event pump tick.
const KEY_POLL_MS: i32 = 1;

/// Errors reported by the display backend.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display backend error: {0}")]
    Backend(#[from] opencv::Error),
}

/// Interactive commands recognized by the capture loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Terminate the loop (`q`).
    Quit,
    /// Save the currently displayed frame (`s`).
    Save,
}

/// A surface that renders frames and polls for key presses.
///
/// The production implementation is [`Window`]; tests substitute
/// scripted surfaces.
pub trait DisplaySurface {
    /// Render a frame.
    fn show(&mut self, frame: &Mat) -> Result<(), DisplayError>;

    /// Poll for a key press with a short timeout. Keys other than the
    /// recognized commands map to `None`.
    fn poll_key(&mut self) -> Result<Option<KeyCommand>, DisplayError>;

    /// Close all open surfaces. Safe to call more than once.
    fn close_all(&mut self) -> Result<(), DisplayError>;
}

/// A visible on-screen window under the fixed identifier.
pub struct Window {
    name: &'static str,
}

impl Window {
    /// Create the window. The same identifier is reused for every frame.
    pub fn open() -> Result<Self, DisplayError> {
        highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self { name: WINDOW_NAME })
    }
}

impl DisplaySurface for Window {
    fn show(&mut self, frame: &Mat) -> Result<(), DisplayError> {
        highgui::imshow(self.name, frame)?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<KeyCommand>, DisplayError> {
        let key = highgui::wait_key(KEY_POLL_MS)? & 0xff;
        Ok(match key {
            k if k == i32::from(b'q') => Some(KeyCommand::Quit),
            k if k == i32::from(b's') => Some(KeyCommand::Save),
            _ => None,
        })
    }

    fn close_all(&mut self) -> Result<(), DisplayError> {
        highgui::destroy_all_windows()?;
        Ok(())
    }
}
