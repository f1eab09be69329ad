use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color, laid out for direct GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Per-channel linear interpolation; `t` is clamped to [0, 1]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Fixed palette the spawn gradients interpolate between
pub mod palette {
    use super::Rgba;

    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const BLANK: Rgba = Rgba::new(0, 0, 0, 0);
    pub const GOLD: Rgba = Rgba::new(255, 203, 0, 255);
    pub const SKYBLUE: Rgba = Rgba::new(102, 191, 255, 255);
    pub const RED: Rgba = Rgba::new(230, 41, 55, 255);
    pub const BLUE: Rgba = Rgba::new(0, 121, 241, 255);
    pub const VIOLET: Rgba = Rgba::new(135, 60, 190, 255);
    pub const BROWN: Rgba = Rgba::new(127, 106, 79, 255);
    pub const DARKBROWN: Rgba = Rgba::new(76, 63, 47, 255);
    pub const BEIGE: Rgba = Rgba::new(211, 176, 131, 255);
}
