use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes `0x__RRGGBB`; the top byte is ignored.
    pub fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub fn to_packed(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Decodes a color stored as the bit pattern of an `f32` field.
    pub fn from_packed_f32(value: f32) -> Self {
        Self::from_packed(value.to_bits())
    }

    pub fn to_packed_f32(self) -> f32 {
        f32::from_bits(self.to_packed())
    }

    /// Scales unit-range components to bytes, rounding half to even.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8;
        Self {
            r: scale(r),
            g: scale(g),
            b: scale(b),
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.to_array()
    }
}

/// Quantization steps per channel for random colors.
const RANDOM_STEPS: u32 = 100;
/// Component sums outside `(MIN_SUM, MAX_SUM)` are redrawn so colors are
/// neither near-black nor near-white.
const MIN_SUM: f64 = 0.2;
const MAX_SUM: f64 = 2.8;

/// Draws unit-range components on a 0.01 grid with pairwise distinct
/// channels and a sum strictly inside `(0.2, 2.8)`.
pub fn random_unit_color<R: Rng>(rng: &mut R) -> [f64; 3] {
    let mut draw = || f64::from(rng.gen_range(0..RANDOM_STEPS)) / f64::from(RANDOM_STEPS);
    loop {
        let r = draw();
        let g = loop {
            let g = draw();
            if g != r {
                break g;
            }
        };
        let b = loop {
            let b = draw();
            if b != r && b != g {
                break b;
            }
        };

        let sum = r + g + b;
        if sum > MIN_SUM && sum < MAX_SUM {
            return [r, g, b];
        }
    }
}

/// A random, visually distinct color for telling whole clouds apart.
pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    let [r, g, b] = random_unit_color(rng);
    Rgb::from_unit(r, g, b)
}
