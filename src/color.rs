use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Packed RGB triple. Used both for province identity (pristine pixel color)
/// and for state display colors.
pub type Rgb8 = [u8; 3];

/// Lowercase `#rrggbb` form, the wire representation in exported records.
pub fn rgb_to_hex(c: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

/// Identity of a province: the exact color of its pixels in the pristine map.
/// Two pixels with the same pristine color are the same province for lookup
/// purposes, even when they are not connected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ProvinceKey(pub Rgb8);

impl ProvinceKey {
    pub fn hex(self) -> String {
        rgb_to_hex(self.0)
    }
}

impl fmt::Display for ProvinceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Draw random 24-bit colors until one turns up that no committed state has
/// reserved. The active draft's color is not in `used` — it only becomes
/// reserved when the draft commits.
pub fn allocate_color(used: &HashSet<Rgb8>) -> Rgb8 {
    let mut rng = rand::thread_rng();
    loop {
        let c: u32 = rng.gen_range(0..=0xFF_FFFF);
        let rgb = [(c >> 16) as u8, (c >> 8) as u8, c as u8];
        if !used.contains(&rgb) {
            return rgb;
        }
    }
}
