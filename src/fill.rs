use image::RgbImage;
use std::fmt;

use crate::canvas::MapBuffer;
use crate::color::Rgb8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillError {
    InvalidSeed,
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::InvalidSeed => write!(f, "seed coordinate outside image bounds"),
        }
    }
}

impl std::error::Error for FillError {}

/// Exact-match 4-connected flood fill over a flat byte mask.
///
/// The mask and the traversal stack are kept between calls so repeated
/// region picks on a large map reuse one allocation. The stack is explicit
/// (no recursion): a full-map region is just a long loop, never a deep one.
pub struct FloodFill {
    mask: Vec<u8>,
    stack: Vec<u32>,
}

impl FloodFill {
    pub fn new() -> Self {
        Self {
            mask: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Mask of all pixels 4-connected to `seed` whose color equals the seed
    /// pixel exactly — zero tolerance, no color drift allowed. 255 = in
    /// region, 0 = out.
    pub fn compute_mask(&mut self, image: &RgbImage, seed: (u32, u32)) -> Result<&[u8], FillError> {
        let (w, h) = image.dimensions();
        if seed.0 >= w || seed.1 >= h {
            return Err(FillError::InvalidSeed);
        }
        let wu = w as usize;
        let hu = h as usize;
        self.mask.clear();
        self.mask.resize(wu * hu, 0);

        // RgbImage derefs to its raw RGB byte buffer.
        let flat: &[u8] = image;

        #[inline(always)]
        fn pix(flat: &[u8], idx: usize) -> [u8; 3] {
            let o = idx * 3;
            [flat[o], flat[o + 1], flat[o + 2]]
        }

        let seed_idx = seed.1 as usize * wu + seed.0 as usize;
        let target = pix(flat, seed_idx);

        // The stack stores packed flat indices; a flat index fits in u32 for
        // any map this tool handles (< 4G pixels).
        self.stack.clear();
        self.mask[seed_idx] = 255;
        self.stack.push(seed_idx as u32);

        while let Some(idx) = self.stack.pop() {
            let i = idx as usize;
            let x = i % wu;
            let y = i / wu;

            if x > 0 {
                let ni = i - 1;
                if self.mask[ni] == 0 && pix(flat, ni) == target {
                    self.mask[ni] = 255;
                    self.stack.push(ni as u32);
                }
            }
            if x + 1 < wu {
                let ni = i + 1;
                if self.mask[ni] == 0 && pix(flat, ni) == target {
                    self.mask[ni] = 255;
                    self.stack.push(ni as u32);
                }
            }
            if y > 0 {
                let ni = i - wu;
                if self.mask[ni] == 0 && pix(flat, ni) == target {
                    self.mask[ni] = 255;
                    self.stack.push(ni as u32);
                }
            }
            if y + 1 < hu {
                let ni = i + wu;
                if self.mask[ni] == 0 && pix(flat, ni) == target {
                    self.mask[ni] = 255;
                    self.stack.push(ni as u32);
                }
            }
        }

        Ok(&self.mask)
    }

    /// Paint the seed's region in the working buffer with `color`.
    ///
    /// The region boundary is always computed against the pristine buffer,
    /// not whatever is currently displayed — repeated highlight cycles stay
    /// idempotent and immune to drift from earlier paints.
    pub fn apply_highlight(
        &mut self,
        map: &mut MapBuffer,
        seed: (u32, u32),
        color: Rgb8,
    ) -> Result<(), FillError> {
        let mask = self.compute_mask(map.pristine(), seed)?;
        map.paint_mask(mask, color);
        Ok(())
    }

    /// Restore the seed's region in the working buffer from pristine. Exact
    /// inverse of `apply_highlight` for the same seed. Provinces sharing a
    /// pristine color restore together — a property of the boundary scheme,
    /// not special-cased.
    pub fn remove_highlight(&mut self, map: &mut MapBuffer, seed: (u32, u32)) -> Result<(), FillError> {
        let mask = self.compute_mask(map.pristine(), seed)?;
        map.restore_mask(mask);
        Ok(())
    }
}

impl Default for FloodFill {
    fn default() -> Self {
        Self::new()
    }
}
