//! Animated cat clock face.
//!
//! A pixel-noise background, a cat's face, an `HH:MM` readout and a clock
//! outline that grows in while the hands sweep to the current time. The face
//! engine is `no_std` and draws into any `embedded-graphics` target; the
//! board support behind `devkit-esp32s3-disp128` runs it on a GC9A01 panel.
#![cfg_attr(not(test), no_std)]

mod log;

pub mod anim;
pub mod clock;
pub mod config;
pub mod driver;
pub mod face;
pub mod framebuffer;
pub mod noise;
pub mod render;
pub mod rtc_pcf85063;
pub mod shapes;

#[cfg(feature = "devkit-esp32s3-disp128")]
pub mod display;
#[cfg(feature = "devkit-esp32s3-disp128")]
pub mod wiring;

pub use clock::{ClockTime, MinuteTicker, Tick, TimeError};
pub use driver::FaceAnimations;
pub use face::ClockFace;
pub use framebuffer::Framebuffer;
pub use noise::NoisePalette;
