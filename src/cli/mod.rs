//! Command-line interface definitions and helpers.

mod args;
mod enums;

pub use args::{parse_image_size, Args, ImageSizeArg};
pub use enums::PreprocessingArg;
