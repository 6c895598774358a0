//! GC9A01 (240x240) panel setup over SPI2 using mipidsi.
//
// - `setup_display` resets the panel, brings up SPI and returns a mipidsi display.
// - `blit` copies a composed framebuffer onto the panel in one window write.

use core::fmt;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    gpio::Output,
    spi::master::{Config as SpiConfig, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder,
};

use crate::framebuffer::Framebuffer;
use crate::log::debug_println;
use crate::wiring::DisplayPins;

pub const PANEL_SIZE: u32 = 240;

// A tiny busy-wait delay that satisfies embedded-hal 1.0 DelayNs.
struct SpinDelay;

impl embedded_hal::delay::DelayNs for SpinDelay {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        let mut n = ns / 50 + 1;
        while n != 0 {
            core::hint::spin_loop();
            n -= 1;
        }
    }
}

#[derive(Debug)]
pub enum DisplayError {
    SpiConfig,
    Init,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::SpiConfig => f.write_str("SPI configuration rejected"),
            DisplayError::Init => f.write_str("panel init failed"),
        }
    }
}

pub type DisplayType<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    display_buf: &'a mut [u8],
) -> Result<DisplayType<'a>, DisplayError> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        mut lcd_rst,
        mut lcd_bl,
    } = display_pins;

    // Hardware reset, backlight on
    lcd_rst.set_low();
    for _ in 0..10_000 {
        core::hint::spin_loop();
    }
    lcd_rst.set_high();
    lcd_bl.set_high();

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_hz(40_000_000))
        .with_mode(Mode::_0);
    let spi = Spi::new(spi2, spi_cfg)
        .map_err(|_| DisplayError::SpiConfig)?
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);

    // CS is a push-pull output, setting it can't fail
    let spi_dev = ExclusiveDevice::new(spi, lcd_cs, NoDelay).map_err(|_| DisplayError::Init)?;
    let di = SpiInterface::new(spi_dev, lcd_dc, display_buf);

    let display = DisplayBuilder::new(GC9A01, di)
        .display_size(PANEL_SIZE as u16, PANEL_SIZE as u16)
        .display_offset(0, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut SpinDelay)
        .map_err(|_| DisplayError::Init)?;

    debug_println!("[display] GC9A01 {}x{} ready", PANEL_SIZE, PANEL_SIZE);
    Ok(display)
}

/// Where a `width` x `height` canvas lands when centred on the panel.
pub fn centered_area(width: u32, height: u32) -> Rectangle {
    Rectangle::new(
        Point::new(
            (PANEL_SIZE as i32 - width as i32) / 2,
            (PANEL_SIZE as i32 - height as i32) / 2,
        ),
        Size::new(width, height),
    )
}

/// Push the whole framebuffer to `area` on the panel.
pub fn blit<D>(display: &mut D, area: &Rectangle, frame: &Framebuffer<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    display.fill_contiguous(area, frame.colors())
}
