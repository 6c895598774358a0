// Board pin mapping for the ESP32-S3 devkit with the 1.28" GC9A01 panel.
//! The following wiring is assumed:
//! - LCD SCK  => GPIO10, MOSI => GPIO11 (SPI2)
//! - LCD CS   => GPIO9
//! - LCD DC   => GPIO8
//! - LCD RST  => GPIO14
//! - LCD BL   => GPIO2
//! - RTC SDA  => GPIO47, SCL => GPIO48 (I2C0, PCF85063 at 0x51)
//! - GND => GND, 3.3V => 3.3V

use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{Peripherals, GPIO10, GPIO11, GPIO47, GPIO48, I2C0, SPI2};

/// Everything the display backend takes ownership of.
pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct RtcPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO47<'a>,
    pub scl: GPIO48<'a>,
}

pub struct BoardPins<'a> {
    pub display_pins: DisplayPins<'a>,
    pub rtc_pins: RtcPins<'a>,
}

pub fn init_board_pins(p: Peripherals) -> BoardPins<'static> {
    // SCK/MOSI stay raw pins; the SPI driver configures them
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    let lcd_bl = Output::new(p.GPIO2, Level::Low, OutputConfig::default());

    BoardPins {
        display_pins: DisplayPins {
            spi2: p.SPI2,
            spi_sck: p.GPIO10,
            spi_mosi: p.GPIO11,
            lcd_cs,
            lcd_dc,
            lcd_rst,
            lcd_bl,
        },
        rtc_pins: RtcPins {
            i2c0: p.I2C0,
            sda: p.GPIO47,
            scl: p.GPIO48,
        },
    }
}
