//! The capture-display-measure loop.
//!
//! Pulls one frame per iteration from a [`FrameSource`], applies the
//! configured resize and preprocessing, renders it to a
//! [`DisplaySurface`], periodically logs measured throughput, and
//! handles the two interactive commands (quit, save-frame).

use chrono::{DateTime, Local};
use log::{info, warn};
use opencv::core::{Mat, Vector};
use opencv::imgcodecs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::capture::{CaptureError, FrameSource};
use crate::config::RunConfig;
use crate::display::{DisplayError, DisplaySurface, KeyCommand};
use crate::preprocess;
use crate::rate::RateCounter;

/// Consecutive failed reads after which the capture device is treated
/// as stalled and the run aborts.
pub const READ_STALL_LIMIT: u32 = 100;

/// Errors that can terminate a capture run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image operation failed: {0}")]
    Image(#[from] opencv::Error),
    #[error("failed to write image '{path}'")]
    SaveFailed { path: PathBuf },
}

/// Run the capture loop until quit is requested or a fatal error occurs.
///
/// The source is released and all display surfaces are closed on every
/// exit path, exactly once; cleanup failures are logged, not propagated.
pub fn run(
    config: &RunConfig,
    source: &mut impl FrameSource,
    display: &mut impl DisplaySurface,
) -> Result<(), RunError> {
    // Directory creation is idempotent
    fs::create_dir_all(&config.output_directory).map_err(|e| RunError::OutputDir {
        path: config.output_directory.clone(),
        source: e,
    })?;

    let outcome = drive(config, source, display);

    if let Err(e) = source.release() {
        warn!("failed to release capture source: {}", e);
    }
    if let Err(e) = display.close_all() {
        warn!("failed to close display: {}", e);
    }

    outcome
}

fn drive(
    config: &RunConfig,
    source: &mut impl FrameSource,
    display: &mut impl DisplaySurface,
) -> Result<(), RunError> {
    let mut rate = RateCounter::new(config.captures_period);
    let mut last_frame: Option<Mat> = None;
    let mut failed_reads: u32 = 0;

    loop {
        match source.read()? {
            Some(frame) => {
                failed_reads = 0;

                let mut frame = frame;
                if let Some(size) = config.image_size {
                    frame = preprocess::resize_to(&frame, size)?;
                }
                if let Some(mode) = config.preprocessing {
                    frame = preprocess::apply(mode, &frame)?;
                }

                display.show(&frame)?;

                if let Some(fps) = rate.tick() {
                    info!("rate = {} fps", fps);
                }

                last_frame = Some(frame);
            }
            None => {
                // A single failed read is skipped; only a long run of them
                // means the device has stalled.
                failed_reads += 1;
                if failed_reads >= READ_STALL_LIMIT {
                    return Err(CaptureError::ReadStalled {
                        attempts: failed_reads,
                    }
                    .into());
                }
            }
        }

        match display.poll_key()? {
            Some(KeyCommand::Quit) => return Ok(()),
            Some(KeyCommand::Save) => {
                save_frame(&config.output_directory, last_frame.as_ref())?;
            }
            None => {}
        }
    }
}

/// Save the last displayed frame as a PNG named after the current local time.
fn save_frame(directory: &Path, frame: Option<&Mat>) -> Result<(), RunError> {
    let Some(frame) = frame else {
        warn!("no frame captured yet, nothing to save");
        return Ok(());
    };

    let path = directory.join(frame_filename(&Local::now()));
    info!("Saving {}", path.display());

    let written = imgcodecs::imwrite(&path.to_string_lossy(), frame, &Vector::new())?;
    if !written {
        return Err(RunError::SaveFailed { path });
    }
    Ok(())
}

fn frame_filename(now: &DateTime<Local>) -> String {
    format!("{}.png", now.format("%Y%m%d-%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_frame_filename_format() {
        let moment = Local.with_ymd_and_hms(2024, 1, 31, 13, 5, 9).unwrap();
        assert_eq!(frame_filename(&moment), "20240131-13:05:09.png");
    }

    #[test]
    fn test_frame_filename_zero_pads() {
        let moment = Local.with_ymd_and_hms(2026, 8, 2, 1, 2, 3).unwrap();
        assert_eq!(frame_filename(&moment), "20260802-01:02:03.png");
    }
}
