//! Rendering of histograms into image files

use crate::{histogram::Histogram1D, numeric::Float, Result};

use eyre::WrapErr;
use image::{Rgb, RgbImage};

use std::path::Path;

/// Size of the rendered canvas (pixels)
const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 600;

/// Blank space around the plotting frame (pixels)
const MARGIN: u32 = 60;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME: Rgb<u8> = Rgb([0, 0, 0]);
const BAR: Rgb<u8> = Rgb([54, 100, 180]);

/// Draw a histogram as a bar chart
///
/// Bars are scaled so that the fullest bin reaches the top of the frame.
/// Under- and overflow are not drawn.
///
pub fn render(hist: &Histogram1D) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
    let (left, right) = (MARGIN, CANVAS_WIDTH - MARGIN);
    let (top, bottom) = (MARGIN, CANVAS_HEIGHT - MARGIN);
    let frame_width = right - left;
    let frame_height = bottom - top;

    // Draw the bars
    let maximum = hist.maximum();
    if maximum > 0. {
        let n_bins = hist.n_bins() as u64;
        for (bin, &content) in hist.contents().iter().enumerate() {
            let bin = bin as u64;
            let x_start = left + (bin * u64::from(frame_width) / n_bins) as u32;
            let x_end = left + ((bin + 1) * u64::from(frame_width) / n_bins) as u32;
            let height = (content / maximum * frame_height as Float).round() as u32;
            for x in x_start..x_end.max(x_start + 1) {
                for y in (bottom - height)..bottom {
                    canvas.put_pixel(x, y, BAR);
                }
            }
        }
    }

    // Draw the frame on top
    for x in left..=right {
        canvas.put_pixel(x, top, FRAME);
        canvas.put_pixel(x, bottom, FRAME);
    }
    for y in top..=bottom {
        canvas.put_pixel(left, y, FRAME);
        canvas.put_pixel(right, y, FRAME);
    }

    canvas
}

/// Render a histogram into a PNG file
pub fn save_png(hist: &Histogram1D, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    render(hist)
        .save_with_format(path, image::ImageFormat::Png)
        .wrap_err_with(|| format!("Failed to save histogram {} to {}", hist.name, path.display()))
}
