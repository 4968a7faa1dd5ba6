use image::{Rgb, RgbImage};

use statepainter::canvas::MapBuffer;
use statepainter::fill::{FillError, FloodFill};

/// 6x4 map: columns 0-2 are #112233, columns 3-5 are #445566.
fn two_region_map() -> RgbImage {
    let mut img = RgbImage::new(6, 4);
    for y in 0..4 {
        for x in 0..6 {
            let c = if x < 3 {
                [0x11, 0x22, 0x33]
            } else {
                [0x44, 0x55, 0x66]
            };
            img.put_pixel(x, y, Rgb(c));
        }
    }
    img
}

#[test]
fn mask_covers_connected_same_color_pixels_only() {
    let img = two_region_map();
    let mut fill = FloodFill::new();
    let mask = fill.compute_mask(&img, (1, 1)).unwrap();
    for y in 0..4u32 {
        for x in 0..6u32 {
            let expected = if x < 3 { 255 } else { 0 };
            assert_eq!(mask[(y * 6 + x) as usize], expected, "at ({}, {})", x, y);
        }
    }
}

#[test]
fn out_of_bounds_seed_is_rejected() {
    let img = two_region_map();
    let mut fill = FloodFill::new();
    assert_eq!(fill.compute_mask(&img, (6, 0)).unwrap_err(), FillError::InvalidSeed);
    assert_eq!(fill.compute_mask(&img, (0, 4)).unwrap_err(), FillError::InvalidSeed);
}

#[test]
fn fill_has_zero_color_tolerance() {
    // Middle pixel differs by one in the blue channel — must not be filled.
    let mut img = RgbImage::new(3, 1);
    img.put_pixel(0, 0, Rgb([10, 10, 10]));
    img.put_pixel(1, 0, Rgb([10, 10, 11]));
    img.put_pixel(2, 0, Rgb([10, 10, 10]));

    let mut fill = FloodFill::new();
    let mask = fill.compute_mask(&img, (0, 0)).unwrap();
    assert_eq!(mask, &[255, 0, 0][..]);
}

#[test]
fn diagonal_pixels_are_not_connected() {
    // 2x2 checkerboard: (0,0) and (1,1) share a color but only touch at a
    // corner, so a 4-connected fill picks up just the seed.
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([1, 1, 1]));
    img.put_pixel(1, 1, Rgb([1, 1, 1]));
    img.put_pixel(1, 0, Rgb([2, 2, 2]));
    img.put_pixel(0, 1, Rgb([2, 2, 2]));

    let mut fill = FloodFill::new();
    let mask = fill.compute_mask(&img, (0, 0)).unwrap();
    assert_eq!(mask, &[255, 0, 0, 0][..]);
}

#[test]
fn highlight_roundtrip_restores_pristine() {
    let mut map = MapBuffer::new(two_region_map());
    let mut fill = FloodFill::new();

    fill.apply_highlight(&mut map, (0, 0), [0xff, 0x00, 0xff]).unwrap();
    assert_eq!(map.working_pixel(1, 1).unwrap(), [0xff, 0x00, 0xff]);
    // The other region is untouched.
    assert_eq!(map.working_pixel(4, 1).unwrap(), [0x44, 0x55, 0x66]);
    // Pristine is never mutated.
    assert_eq!(map.pristine_pixel(1, 1).unwrap(), [0x11, 0x22, 0x33]);

    fill.remove_highlight(&mut map, (0, 0)).unwrap();
    assert_eq!(map.working().as_raw(), map.pristine().as_raw());
}

#[test]
fn repeated_highlights_are_idempotent() {
    // The boundary always comes from pristine, so painting twice with
    // different colors and removing once still restores exactly.
    let mut map = MapBuffer::new(two_region_map());
    let mut fill = FloodFill::new();

    fill.apply_highlight(&mut map, (0, 0), [1, 2, 3]).unwrap();
    fill.apply_highlight(&mut map, (0, 0), [4, 5, 6]).unwrap();
    assert_eq!(map.working_pixel(2, 3).unwrap(), [4, 5, 6]);

    fill.remove_highlight(&mut map, (0, 0)).unwrap();
    assert_eq!(map.working().as_raw(), map.pristine().as_raw());
}
