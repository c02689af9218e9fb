//! Fixed per-frame transforms: grayscale, blur, and Laplacian edge filtering.

use opencv::core::{self, Mat, Point, Size};
use opencv::imgproc;

use crate::config::SizeHw;

/// Bias added to the Laplacian output so negative responses end up
/// centered around mid-gray instead of being clipped to zero.
pub const LAPLACIAN_BIAS: f64 = 128.0;

/// A fixed transform applied uniformly to every captured frame.
///
/// The set is closed; `Option<Preprocessing>` covers the no-op case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preprocessing {
    /// Convert the color frame to single-channel intensity.
    Grayscale,
    /// Grayscale followed by a 3x3 averaging blur.
    GrayscaleBlur3x3,
    /// Grayscale followed by a discrete Laplacian edge filter with
    /// 8-bit unsigned output, biased by 128.
    Laplacian,
}

/// Apply a preprocessing mode to a frame, producing a new frame.
pub fn apply(mode: Preprocessing, frame: &Mat) -> Result<Mat, opencv::Error> {
    match mode {
        Preprocessing::Grayscale => to_grayscale(frame),
        Preprocessing::GrayscaleBlur3x3 => {
            let gray = to_grayscale(frame)?;
            let mut blurred = Mat::default();
            imgproc::blur(
                &gray,
                &mut blurred,
                Size::new(3, 3),
                Point::new(-1, -1),
                core::BORDER_DEFAULT,
            )?;
            Ok(blurred)
        }
        Preprocessing::Laplacian => {
            let gray = to_grayscale(frame)?;
            let mut edges = Mat::default();
            imgproc::laplacian(
                &gray,
                &mut edges,
                core::CV_8U,
                1,
                1.0,
                LAPLACIAN_BIAS,
                core::BORDER_DEFAULT,
            )?;
            Ok(edges)
        }
    }
}

/// Resize a frame to exactly the configured (rows, columns) target.
///
/// The target is stored as (height, width); the backend call takes its
/// size in (columns, rows) order.
pub fn resize_to(frame: &Mat, size: SizeHw) -> Result<Mat, opencv::Error> {
    let mut resized = Mat::default();
    imgproc::resize(
        frame,
        &mut resized,
        Size::new(size.width, size.height),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;
    Ok(resized)
}

fn to_grayscale(frame: &Mat) -> Result<Mat, opencv::Error> {
    let mut gray = Mat::default();
    imgproc::cvt_color_def(frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::Scalar;
    use opencv::prelude::*;

    fn color_frame(rows: i32, cols: i32) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC3, Scalar::new(10.0, 80.0, 160.0, 0.0))
            .expect("test frame")
    }

    #[test]
    fn test_grayscale_yields_single_channel() {
        let frame = color_frame(48, 64);
        let out = apply(Preprocessing::Grayscale, &frame).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(out.rows(), 48);
        assert_eq!(out.cols(), 64);
    }

    #[test]
    fn test_grayscale_blur_yields_single_channel() {
        let frame = color_frame(48, 64);
        let out = apply(Preprocessing::GrayscaleBlur3x3, &frame).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(out.rows(), 48);
        assert_eq!(out.cols(), 64);
    }

    #[test]
    fn test_laplacian_yields_single_channel_u8() {
        let frame = color_frame(48, 64);
        let out = apply(Preprocessing::Laplacian, &frame).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(out.typ(), core::CV_8U);
    }

    #[test]
    fn test_laplacian_of_flat_image_is_bias() {
        // A constant image has zero second derivative everywhere, so every
        // output pixel should equal the bias exactly.
        let frame = color_frame(32, 32);
        let out = apply(Preprocessing::Laplacian, &frame).unwrap();
        let data = out.data_bytes().unwrap();
        assert!(!data.is_empty());
        assert!(data.iter().all(|&v| v == 128), "expected uniform 128");
    }

    #[test]
    fn test_resize_matches_target_shape_exactly() {
        let frame = color_frame(480, 640);
        let out = resize_to(
            &frame,
            SizeHw {
                height: 100,
                width: 200,
            },
        )
        .unwrap();
        assert_eq!(out.rows(), 100);
        assert_eq!(out.cols(), 200);
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn test_resize_upscales_too() {
        let frame = color_frame(10, 10);
        let out = resize_to(
            &frame,
            SizeHw {
                height: 300,
                width: 400,
            },
        )
        .unwrap();
        assert_eq!(out.rows(), 300);
        assert_eq!(out.cols(), 400);
    }
}
