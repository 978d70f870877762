//! Triptych composition
//!
//! The model paints one wide picture holding three works side by side.
//! It is stretched to a 3:1 strip, cut into three panels and laid out as
//! framed panels on a white wall. The composed figure is what the gallery
//! stores and what audiences look at.

use exhibit_core::Blob;
use exhibit_core::caption::WORKS_PER_EXHIBIT;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::{ExhibitError, Result};

/// Space around the panels
pub const MARGIN: u32 = 24;
/// Space between neighbouring frames
pub const GAP: u32 = 24;
/// Frame thickness around each panel
pub const FRAME: u32 = 7;

const WALL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME_COLOR: Rgba<u8> = Rgba([0x1c, 0x1c, 0x1c, 255]);

/// Resize to `width x width/3` and cut into three panels
///
/// The last panel takes the columns left over when the width is not a
/// multiple of three.
pub fn split_panels(image: &DynamicImage) -> Result<Vec<RgbaImage>> {
    let width = image.width();
    let height = width / WORKS_PER_EXHIBIT as u32;
    if height == 0 {
        return Err(ExhibitError::InvalidImage(format!(
            "{}px wide is too narrow for a triptych",
            width
        )));
    }

    let strip = image.resize_exact(width, height, FilterType::Lanczos3).to_rgba8();
    let split = width / WORKS_PER_EXHIBIT as u32;
    let panels = (0..WORKS_PER_EXHIBIT as u32)
        .map(|i| {
            let x = split * i;
            let w = if i + 1 == WORKS_PER_EXHIBIT as u32 { width - x } else { split };
            imageops::crop_imm(&strip, x, 0, w, height).to_image()
        })
        .collect();
    Ok(panels)
}

/// Lay out framed panels left to right
pub fn compose(panels: &[RgbaImage]) -> RgbaImage {
    let tallest = panels.iter().map(|p| p.height()).max().unwrap_or(0);
    let framed_widths: u32 = panels.iter().map(|p| p.width() + 2 * FRAME).sum();
    let gaps = GAP * panels.len().saturating_sub(1) as u32;

    let mut canvas = RgbaImage::from_pixel(
        2 * MARGIN + framed_widths + gaps,
        2 * MARGIN + tallest + 2 * FRAME,
        WALL,
    );

    let mut x = MARGIN;
    for panel in panels {
        let frame = RgbaImage::from_pixel(
            panel.width() + 2 * FRAME,
            panel.height() + 2 * FRAME,
            FRAME_COLOR,
        );
        imageops::replace(&mut canvas, &frame, x as i64, MARGIN as i64);
        imageops::replace(&mut canvas, panel, (x + FRAME) as i64, (MARGIN + FRAME) as i64);
        x += frame.width() + GAP;
    }

    canvas
}

/// Decode a generated image and return the composed triptych as PNG
pub fn compose_triptych(image: &Blob) -> Result<Blob> {
    let decoded = image::load_from_memory(&image.data)?;
    let canvas = compose(&split_panels(&decoded)?);

    let mut png = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(Blob::new("image/png", png))
}
