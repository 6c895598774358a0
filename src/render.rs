//! Frame drawing helpers for the clock overlay and the time readout.
//!
//! This module provides:
//! - `Hands`, the hour/minute hand angles in turns (1.0 = full circle)
//! - `hand_endpoint` for turning an angle and a length into a point
//! - `draw_clock_overlay` for the growing face outline and the hands
//! - `draw_time_text` for the `HH:MM` readout with its drop shadow
//!
//! The full frame is put together by `ClockFace::draw_frame`; everything here
//! works in canvas coordinates with (0,0) at the top-left corner.

use core::f32::consts::PI;

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::clock::ClockTime;
use crate::config::{
    FACE_OUTLINE, HAND, HAND_MARGIN, HAND_WIDTH, OUTLINE_WIDTH, TEXT_LIGHT, TEXT_SHADOW,
    TEXT_SHADOW_OFFSET, TEXT_TOP,
};

/// Hand positions as fractions of a full turn, clockwise from 12 o'clock.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hands {
    pub hour: f32,
    pub minute: f32,
}

impl Hands {
    /// Resting hands for the live time; the hour hand creeps with the minutes.
    pub fn steady(time: &ClockTime) -> Self {
        let minute = time.minutes() as f32 / 60.0;
        Self {
            hour: time.hours() as f32 / 12.0 + minute / 12.0,
            minute,
        }
    }

    /// Hands mid-sweep. Hours are on the 60 step dial so they move as smoothly
    /// as the minutes.
    pub fn sweeping(hours_60: i32, minutes: i32) -> Self {
        let minute = minutes as f32 / 60.0;
        Self {
            hour: hours_60 as f32 / 60.0 + minute / 12.0,
            minute,
        }
    }
}

pub fn hand_endpoint(center: Point, turns: f32, length: i32) -> Point {
    let angle = turns * 2.0 * PI;
    let len = length as f32;
    center
        + Point::new(
            libm::roundf(libm::sinf(angle) * len) as i32,
            -(libm::roundf(libm::cosf(angle) * len) as i32),
        )
}

/// Face outline of `radius` and the hands that fit inside it. Nothing is
/// drawn for a zero radius; each hand needs a positive length.
pub fn draw_clock_overlay<D, C>(
    target: &mut D,
    center: Point,
    radius: i32,
    hands: &Hands,
) -> Result<(), D::Error>
where
    C: PixelColor + From<Rgb888>,
    D: DrawTarget<Color = C>,
{
    if radius <= 0 {
        return Ok(());
    }

    Circle::with_center(center, (radius * 2 + 1) as u32)
        .into_styled(PrimitiveStyle::with_stroke(C::from(FACE_OUTLINE), OUTLINE_WIDTH))
        .draw(target)?;

    let hand_style = PrimitiveStyle::with_stroke(C::from(HAND), HAND_WIDTH);

    if radius > 2 * HAND_MARGIN {
        let tip = hand_endpoint(center, hands.hour, radius - 2 * HAND_MARGIN);
        Line::new(center, tip).into_styled(hand_style).draw(target)?;
    }
    if radius > HAND_MARGIN {
        let tip = hand_endpoint(center, hands.minute, radius - HAND_MARGIN);
        Line::new(center, tip).into_styled(hand_style).draw(target)?;
    }
    Ok(())
}

/// Top-left anchor of the shadow copy of the readout, centred on a canvas
/// `canvas_width` pixels wide.
pub fn text_anchor(canvas_width: u32) -> Point {
    Point::new(canvas_width as i32 / 2, TEXT_TOP)
}

/// Dark copy at the anchor, light copy up-left of it.
pub fn draw_time_text<D, C>(target: &mut D, canvas_width: u32, text: &str) -> Result<(), D::Error>
where
    C: PixelColor + From<Rgb888>,
    D: DrawTarget<Color = C>,
{
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();

    let anchor = text_anchor(canvas_width);
    let shadow = MonoTextStyle::new(&FONT_10X20, C::from(TEXT_SHADOW));
    Text::with_text_style(text, anchor, shadow, layout).draw(target)?;

    let light = MonoTextStyle::new(&FONT_10X20, C::from(TEXT_LIGHT));
    let lifted = anchor - Point::new(TEXT_SHADOW_OFFSET, TEXT_SHADOW_OFFSET);
    Text::with_text_style(text, lifted, light, layout).draw(target)?;
    Ok(())
}
