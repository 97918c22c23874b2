//! Dominant-color sampling
//!
//! A sample is a single pixel row rendered off-screen from the host
//! surface, directly below the reserved status-bar overlay. The row is
//! reduced to its most frequent color and then dropped.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, ShellError};
use crate::theme::color::Rgb;

/// Off-screen buffer holding one rendered pixel row
///
/// Owned by the sampling pass; the allocation is released when the value
/// drops, whichever way the pass ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRow {
    pixels: Vec<Rgb>,
}

impl PixelRow {
    /// Allocate a row of `width` pixels, initialized to black
    pub fn with_width(width: usize) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; width],
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}

impl From<Vec<Rgb>> for PixelRow {
    fn from(pixels: Vec<Rgb>) -> Self {
        Self { pixels }
    }
}

/// A drawable surface owned by the host (the web view and its chrome)
pub trait RenderSurface {
    /// Width of the surface in pixels
    fn width(&self) -> u32;

    /// Height of the surface in pixels
    fn height(&self) -> u32;

    /// Draw the surface row at `y` into `row`
    ///
    /// `row` is exactly [`RenderSurface::width`] pixels wide.
    fn render_row(&self, y: u32, row: &mut PixelRow) -> Result<()>;
}

/// Render the row immediately following `offset` into a fresh buffer
pub fn capture_row<S: RenderSurface + ?Sized>(surface: &S, offset: u32) -> Result<PixelRow> {
    let width = surface.width();
    if width == 0 {
        return Err(ShellError::EmptySurface);
    }

    let height = surface.height();
    if offset >= height {
        return Err(ShellError::RenderBuffer(format!(
            "row {} is outside a surface of height {}",
            offset, height
        )));
    }

    let mut row = PixelRow::with_width(width as usize);
    surface.render_row(offset, &mut row)?;
    Ok(row)
}

/// Most frequent color of a row
///
/// Equal counts resolve to the color seen first scanning left to right.
/// Returns `None` for an empty slice.
pub fn dominant_color(pixels: &[Rgb]) -> Option<Rgb> {
    // color -> (count, index of first occurrence)
    let mut tally: HashMap<Rgb, (usize, usize)> = HashMap::new();
    for (index, &pixel) in pixels.iter().enumerate() {
        tally.entry(pixel).or_insert((0, index)).0 += 1;
    }

    tally
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(color, _)| color)
}

/// Capture the row below `offset` and reduce it to its dominant color
pub fn sample_dominant<S: RenderSurface + ?Sized>(surface: &S, offset: u32) -> Result<Rgb> {
    let row = capture_row(surface, offset)?;
    let color = dominant_color(row.pixels()).ok_or(ShellError::EmptySurface)?;
    debug!(
        offset,
        width = row.width(),
        color = %color,
        "Sampled dominant color"
    );
    Ok(color)
}
