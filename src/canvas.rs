use image::RgbImage;
use std::fmt;

use crate::color::Rgb8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelError {
    OutOfBounds,
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelError::OutOfBounds => write!(f, "pixel coordinate outside image bounds"),
        }
    }
}

impl std::error::Error for PixelError {}

/// The pristine/working raster pair backing the map view.
///
/// `pristine` is the province map exactly as loaded and is never written
/// again — it is the authority for province identity and for restoring
/// highlights. `working` starts as a copy and receives every highlight
/// paint; it is what the viewport displays.
pub struct MapBuffer {
    pristine: RgbImage,
    working: RgbImage,
}

impl MapBuffer {
    pub fn new(pristine: RgbImage) -> Self {
        let working = pristine.clone();
        Self { pristine, working }
    }

    pub fn width(&self) -> u32 {
        self.pristine.width()
    }

    pub fn height(&self) -> u32 {
        self.pristine.height()
    }

    pub fn pristine(&self) -> &RgbImage {
        &self.pristine
    }

    pub fn working(&self) -> &RgbImage {
        &self.working
    }

    pub fn pristine_pixel(&self, x: u32, y: u32) -> Result<Rgb8, PixelError> {
        if x >= self.width() || y >= self.height() {
            return Err(PixelError::OutOfBounds);
        }
        Ok(self.pristine.get_pixel(x, y).0)
    }

    pub fn working_pixel(&self, x: u32, y: u32) -> Result<Rgb8, PixelError> {
        if x >= self.width() || y >= self.height() {
            return Err(PixelError::OutOfBounds);
        }
        Ok(self.working.get_pixel(x, y).0)
    }

    /// Overwrite every masked coordinate of the working buffer with `color`.
    /// `mask` is a flat `width * height` byte mask (non-zero = painted).
    pub fn paint_mask(&mut self, mask: &[u8], color: Rgb8) {
        let buf: &mut [u8] = &mut self.working;
        debug_assert_eq!(mask.len() * 3, buf.len());
        for (i, m) in mask.iter().enumerate() {
            if *m != 0 {
                let o = i * 3;
                buf[o..o + 3].copy_from_slice(&color);
            }
        }
    }

    /// Copy the pristine pixel values back into the working buffer at every
    /// masked coordinate. Exact by construction: pristine never drifts.
    pub fn restore_mask(&mut self, mask: &[u8]) {
        let MapBuffer { pristine, working } = self;
        let src: &[u8] = pristine;
        let dst: &mut [u8] = &mut *working;
        debug_assert_eq!(mask.len() * 3, dst.len());
        for (i, m) in mask.iter().enumerate() {
            if *m != 0 {
                let o = i * 3;
                dst[o..o + 3].copy_from_slice(&src[o..o + 3]);
            }
        }
    }
}
