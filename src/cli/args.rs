//! CLI argument parsing with clap.
//!
//! Long flag names keep the original external interface (`--outputDirectory`,
//! `--imageSizeHW`, ...). Values not given on the command line fall back to
//! the config file and then to built-in defaults, resolved in
//! [`crate::config::RunConfig::resolve`].

use clap::Parser;
use std::path::PathBuf;

use super::enums::PreprocessingArg;
use crate::config::SizeHw;

/// Capture camera frames, preprocess and display them, and measure throughput
#[derive(Parser, Debug)]
#[command(name = "camview")]
#[command(version, about = "Camera capture and display diagnostic", long_about = None)]
pub struct Args {
    /// The directory for saved frames. Default: ./outputs_display
    #[arg(long = "outputDirectory")]
    pub output_directory: Option<PathBuf>,

    /// Target frame size as a '(H, W)' pair, or 'None' to keep the native size
    #[arg(long = "imageSizeHW", value_parser = parse_image_size)]
    pub image_size_hw: Option<ImageSizeArg>,

    /// The camera device identifier. Default: 0
    #[arg(long = "cameraID")]
    pub camera_id: Option<i32>,

    /// Preprocessing applied to every frame. Default: None
    #[arg(long = "preprocessing", value_enum, ignore_case = true)]
    pub preprocessing: Option<PreprocessingArg>,

    /// The number of captures used to compute the frame rate. Default: 50
    #[arg(long = "capturesPeriod", value_parser = parse_captures_period)]
    pub captures_period: Option<u32>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// Parsed `--imageSizeHW` value; `None` inside means the literal `None`
/// was given and frames keep their native size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSizeArg(pub Option<SizeHw>);

/// Parse a '(H, W)' literal or the case-insensitive literal 'None'.
pub fn parse_image_size(s: &str) -> Result<ImageSizeArg, String> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        return Ok(ImageSizeArg(None));
    }

    let inner = trimmed
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(trimmed);
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid size '{}'. Use '(H, W)', e.g. '(480, 640)', or 'None'",
            s
        ));
    }
    let height: i32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid height '{}' in size", parts[0]))?;
    let width: i32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid width '{}' in size", parts[1]))?;
    if height <= 0 || width <= 0 {
        return Err("Size height and width must be greater than 0".to_string());
    }
    Ok(ImageSizeArg(Some(SizeHw { height, width })))
}

/// Parse and validate the rate-report period (at least 1 frame).
pub fn parse_captures_period(s: &str) -> Result<u32, String> {
    let period: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid frame count", s))?;
    if period == 0 {
        return Err("Captures period must be at least 1".to_string());
    }
    Ok(period)
}
