//! Cat face watch firmware
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features devkit-esp32s3-disp128
//! ========================================
//!
//! Composes the face into a 144x168 framebuffer and pushes it to the middle
//! of the round panel. Time comes from the PCF85063; without it the clock
//! runs from uptime.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

esp_bootloader_esp_idf::esp_app_desc!();

use catface_watch::{
    clock::MinuteTicker,
    config::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_PALETTE, RTC_POLL_MS},
    display::{blit, centered_area, setup_display},
    driver::FaceAnimations,
    face::ClockFace,
    framebuffer::Framebuffer,
    rtc_pcf85063::{datetime_to_unix, unix_to_datetime, Pcf85063},
    wiring::{init_board_pins, BoardPins, RtcPins},
};

use core::cell::Cell;
use critical_section::Mutex;
use esp_backtrace as _;
use esp_println::println;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use embedded_hal::delay::DelayNs;
use esp_hal::{
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    main, ram,
    rng::Rng,
    time::Rate,
    timer::systimer::{SystemTimer, Unit},
    Blocking, Config,
};
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoroshiro128StarStar;

const FRAME_PIXELS: usize = (CANVAS_WIDTH * CANVAS_HEIGHT) as usize;

#[ram]
static mut DISPLAY_BUF: [u8; 1024] = [0; 1024];
static mut FRAME: [u16; FRAME_PIXELS] = [0; FRAME_PIXELS];

// Software clock: unix seconds at a known uptime, re-anchored on every good RTC read
static CLOCK_ANCHOR: Mutex<Cell<(u32, u64)>> = Mutex::new(Cell::new((0, 0)));

fn now_ms() -> u64 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    t.saturating_mul(1000) / SystemTimer::ticks_per_second()
}

fn anchor_clock(unix_secs: u32, at_ms: u64) {
    critical_section::with(|cs| CLOCK_ANCHOR.borrow(cs).set((unix_secs, at_ms)));
}

fn clock_seconds(now_ms: u64) -> u32 {
    let (secs, at_ms) = critical_section::with(|cs| CLOCK_ANCHOR.borrow(cs).get());
    secs.saturating_add((now_ms.saturating_sub(at_ms) / 1000) as u32)
}

fn open_rtc(pins: RtcPins<'static>) -> Option<Pcf85063<I2c<'static, Blocking>>> {
    let cfg = I2cConfig::default().with_frequency(Rate::from_khz(400));
    match I2c::new(pins.i2c0, cfg) {
        Ok(i2c) => Some(Pcf85063::new(i2c.with_sda(pins.sda).with_scl(pins.scl))),
        Err(e) => {
            println!("[RTC] I2C config failed: {:?}", e);
            None
        }
    }
}

/// Refresh the software clock from the RTC when it has a trustworthy time.
fn sync_clock(rtc: &mut Option<Pcf85063<I2c<'static, Blocking>>>, now: u64) {
    let Some(dev) = rtc.as_mut() else {
        return;
    };
    match dev.read_datetime() {
        Ok(dt) => anchor_clock(datetime_to_unix(&dt), now),
        Err(e) => println!("[RTC] read failed, keeping software clock: {}", e),
    }
}

#[main]
fn main() -> ! {
    let peripherals = esp_hal::init(Config::default());

    let BoardPins {
        display_pins,
        rtc_pins,
    } = init_board_pins(peripherals);

    // Safe because DISPLAY_BUF and FRAME are only borrowed here, once
    let (display_buf, frame_buf) = unsafe {
        (
            &mut *core::ptr::addr_of_mut!(DISPLAY_BUF),
            &mut *core::ptr::addr_of_mut!(FRAME),
        )
    };

    let mut panel = setup_display(display_pins, display_buf).expect("display init failed");
    let mut frame = Framebuffer::new(CANVAS_WIDTH as u16, CANVAS_HEIGHT as u16, frame_buf)
        .expect("framebuffer size");
    let panel_area = centered_area(CANVAS_WIDTH, CANVAS_HEIGHT);
    if panel.clear(Rgb565::BLACK).is_err() {
        println!("[display] clear failed");
    }

    let mut rtc = open_rtc(rtc_pins);
    let boot_ms = now_ms();
    anchor_clock((boot_ms / 1000) as u32, boot_ms);
    sync_clock(&mut rtc, boot_ms);

    let mut rng = Rng::new();
    let seed = ((rng.random() as u64) << 32) | rng.random() as u64;
    let mut face = ClockFace::new(Xoroshiro128StarStar::seed_from_u64(seed), DEFAULT_PALETTE);
    face.load(Rectangle::new(
        Point::zero(),
        Size::new(CANVAS_WIDTH, CANVAS_HEIGHT),
    ));

    let mut ticker = MinuteTicker::new();
    let mut animations = FaceAnimations::new();
    animations.schedule(boot_ms);

    let mut delay = Delay::new();
    let mut next_poll_ms = boot_ms;

    loop {
        let now = now_ms();

        if now >= next_poll_ms {
            sync_clock(&mut rtc, now);
            let dt = unix_to_datetime(clock_seconds(now));
            if let Some(tick) = ticker.observe(dt.hour, dt.minute) {
                if let Err(e) = face.on_tick(tick) {
                    println!("[face] tick dropped: {}", e);
                }
            }
            next_poll_ms = now.saturating_add(RTC_POLL_MS);
        }

        animations.drive(now, &mut face);

        if face.take_redraw() {
            let Ok(()) = face.draw_frame(&mut frame);
            if blit(&mut panel, &panel_area, &frame).is_err() {
                println!("[display] frame push failed");
            }
        }

        // Animations want ~30 fps; once finished the face only changes per minute
        delay.delay_ms(if animations.is_finished() { 100 } else { 33 });
    }
}
