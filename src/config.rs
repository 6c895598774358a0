//! Compile-time configuration for the watch face.
//!
//! Everything the face needs to know about sizes, timings and colours lives
//! here. Board specific choices are made with Cargo features, the same way the
//! display backend is picked.

use embedded_graphics::pixelcolor::Rgb888;

use crate::noise::NoisePalette;

// Face canvas, (0,0) is top-left corner
pub const CANVAS_WIDTH: u32 = 144;
pub const CANVAS_HEIGHT: u32 = 168;

// Noise columns across the canvas; the cell size is derived from the width
pub const PIXEL_COUNT: u32 = 12;
// Upper bound for rows and columns of the noise grid
pub const MAX_GRID: usize = 20;

pub const FINAL_RADIUS: i32 = 55;
pub const HAND_MARGIN: i32 = 10;

pub const ANIMATION_DURATION_MS: u32 = 500;
pub const ANIMATION_DELAY_MS: u32 = 600;

// How often the main loop asks the RTC for the time
pub const RTC_POLL_MS: u64 = 1000;

// Top edge of the time readout
pub const TEXT_TOP: i32 = 138;
// Offset of the light copy relative to the shadow
pub const TEXT_SHADOW_OFFSET: i32 = 2;

// Palette
pub const CHROME_YELLOW: Rgb888 = Rgb888::new(0xFF, 0xAA, 0x00);
pub const EAR_PINK: Rgb888 = Rgb888::new(0xFF, 0xAA, 0xAA);
pub const OUTLINE: Rgb888 = Rgb888::new(0xFF, 0xFF, 0xFF);
pub const PUPIL: Rgb888 = Rgb888::new(0x00, 0x00, 0x00);
pub const FACE_OUTLINE: Rgb888 = Rgb888::new(0xFF, 0xFF, 0xFF);
pub const HAND: Rgb888 = Rgb888::new(0xFF, 0xFF, 0xFF);
pub const TEXT_LIGHT: Rgb888 = Rgb888::new(0xFF, 0xFF, 0xFF);
pub const TEXT_SHADOW: Rgb888 = Rgb888::new(0x00, 0x00, 0x00);

pub const OUTLINE_WIDTH: u32 = 2;
pub const HAND_WIDTH: u32 = 3;

cfg_if::cfg_if! {
    if #[cfg(feature = "palette-sunset")] {
        pub const DEFAULT_PALETTE: NoisePalette = NoisePalette::Sunset;
    } else {
        pub const DEFAULT_PALETTE: NoisePalette = NoisePalette::Red;
    }
}
