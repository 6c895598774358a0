//! The watch face engine.
//!
//! `ClockFace` owns everything that survives between frames: the displayed
//! time, the animation state and the pending-redraw flag. The main loop feeds
//! it events (minute ticks, animation progress, sweep start/stop) and asks it
//! to draw whenever a redraw is pending. All calls come from one thread and
//! return without blocking.

use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};
use rand_core::RngCore;

use crate::anim::{anim_percentage, AnimationProgress};
use crate::clock::{hours_to_minutes, ClockTime, Tick, TimeError, TimeText};
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, FINAL_RADIUS};
use crate::log::debug_println;
use crate::noise::{cell_size, NoiseGrid, NoisePalette};
use crate::render::{self, Hands};
use crate::shapes::Shapes;

/// Hand positions while the sweep runs: hours on the 60 step dial.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimatedHands {
    pub hours_60: i32,
    pub minutes: i32,
}

pub struct ClockFace<R> {
    rng: R,
    palette: NoisePalette,
    bounds: Rectangle,
    shapes: Option<Shapes>,
    noise: NoiseGrid,

    last_time: ClockTime,
    // Time captured when the sweep started; the sweep never reads live time
    sweep_target: Option<ClockTime>,
    radius: i32,
    anim_hands: AnimatedHands,
    animating: bool,

    redraw_pending: bool,
}

impl<R: RngCore> ClockFace<R> {
    pub fn new(rng: R, palette: NoisePalette) -> Self {
        Self {
            rng,
            palette,
            bounds: Rectangle::new(Point::zero(), Size::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
            shapes: None,
            noise: NoiseGrid::new(),
            last_time: ClockTime::MIDNIGHT,
            sweep_target: None,
            radius: 0,
            anim_hands: AnimatedHands::default(),
            animating: false,
            redraw_pending: false,
        }
    }

    // ---- lifecycle ----

    /// Face becomes visible inside `bounds`; builds the decorations.
    pub fn load(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.shapes = Some(Shapes::new(cell_size(bounds.size.width)));
        debug_println!(
            "[face] load {}x{} at ({}, {})",
            bounds.size.width,
            bounds.size.height,
            bounds.top_left.x,
            bounds.top_left.y
        );
        self.request_redraw();
    }

    pub fn unload(&mut self) {
        self.shapes = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.shapes.is_some()
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Face centre in canvas coordinates.
    pub fn center(&self) -> Point {
        Point::new(
            self.bounds.size.width as i32 / 2,
            self.bounds.size.height as i32 / 2,
        )
    }

    // ---- events ----

    /// Store the new wall-clock time. An invalid reading leaves the face as it was.
    pub fn on_tick(&mut self, tick: Tick) -> Result<(), TimeError> {
        let time = ClockTime::try_from(tick).map_err(|e| {
            debug_println!("[face] rejected tick {:?}: {}", tick, e);
            e
        })?;
        self.last_time = time;
        self.request_redraw();
        Ok(())
    }

    pub fn on_radius_progress(&mut self, progress: AnimationProgress) {
        self.radius = anim_percentage(progress, FINAL_RADIUS);
        self.request_redraw();
    }

    pub fn on_sweep_started(&mut self) {
        self.sweep_target = Some(self.last_time);
        self.animating = true;
        debug_println!("[face] sweep to {}", self.last_time);
    }

    pub fn on_sweep_progress(&mut self, progress: AnimationProgress) {
        let target = *self.sweep_target.get_or_insert(self.last_time);
        self.anim_hands = AnimatedHands {
            hours_60: anim_percentage(progress, hours_to_minutes(target.hours() as i32)),
            minutes: anim_percentage(progress, target.minutes() as i32),
        };
        self.request_redraw();
    }

    /// Sweep done; the hands follow the live time from here on.
    pub fn on_sweep_stopped(&mut self) {
        self.animating = false;
        self.sweep_target = None;
        self.request_redraw();
    }

    // ---- redraw coalescing ----

    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    /// Returns whether a redraw was pending and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_pending)
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    // ---- state ----

    pub fn time(&self) -> ClockTime {
        self.last_time
    }

    pub fn time_text(&self) -> TimeText {
        self.last_time.to_text()
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn animated_hands(&self) -> AnimatedHands {
        self.anim_hands
    }

    pub fn sweep_target(&self) -> Option<ClockTime> {
        self.sweep_target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn noise(&self) -> &NoiseGrid {
        &self.noise
    }

    /// Hands for the current frame.
    pub fn hands(&self) -> Hands {
        if self.animating {
            Hands::sweeping(self.anim_hands.hours_60, self.anim_hands.minutes)
        } else {
            Hands::steady(&self.last_time)
        }
    }

    // ---- drawing ----

    /// Repaint the whole face: noise, decorations, clock overlay, readout.
    pub fn draw_frame<D, C>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        C: PixelColor + From<Rgb888>,
        D: DrawTarget<Color = C>,
    {
        // Offset to the load bounds and clipped to them
        let mut canvas = target.cropped(&self.bounds);
        let area = Rectangle::new(Point::zero(), self.bounds.size);

        self.noise.regenerate(area, self.palette, &mut self.rng);
        self.noise.draw(&mut canvas)?;

        if let Some(shapes) = &self.shapes {
            shapes.draw(&mut canvas)?;
        }

        render::draw_clock_overlay(&mut canvas, self.center(), self.radius, &self.hands())?;
        render::draw_time_text(&mut canvas, self.bounds.size.width, &self.time_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use embedded_graphics::pixelcolor::Rgb565;
    use rand_xoshiro::rand_core::SeedableRng;
    use rand_xoshiro::Xoroshiro128StarStar;

    fn face() -> ClockFace<Xoroshiro128StarStar> {
        let mut face = ClockFace::new(Xoroshiro128StarStar::seed_from_u64(42), NoisePalette::Sunset);
        face.load(Rectangle::new(Point::zero(), Size::new(CANVAS_WIDTH, CANVAS_HEIGHT)));
        face.take_redraw();
        face
    }

    #[test]
    fn tick_stores_twelve_hour_time_and_asks_for_a_redraw() {
        let mut face = face();
        face.on_tick(Tick::new(14, 5)).unwrap();
        assert_eq!(face.time(), ClockTime::new(2, 5).unwrap());
        assert_eq!(face.time_text().as_str(), "02:05");
        assert!(face.take_redraw());
    }

    #[test]
    fn same_minute_still_redraws() {
        let mut face = face();
        face.on_tick(Tick::new(9, 41)).unwrap();
        face.take_redraw();
        face.on_tick(Tick::new(9, 41)).unwrap();
        assert!(face.take_redraw());
    }

    #[test]
    fn bad_tick_is_rejected_without_touching_state() {
        let mut face = face();
        face.on_tick(Tick::new(8, 15)).unwrap();
        face.take_redraw();
        assert_eq!(face.on_tick(Tick::new(25, 0)), Err(TimeError::HourOutOfRange(25)));
        assert_eq!(face.time_text().as_str(), "08:15");
        assert!(!face.redraw_pending());
    }

    #[test]
    fn redraw_requests_coalesce() {
        let mut face = face();
        face.request_redraw();
        face.on_radius_progress(AnimationProgress::from_fraction(0.3));
        face.on_tick(Tick::new(1, 2)).unwrap();
        assert!(face.take_redraw());
        assert!(!face.take_redraw());
    }

    #[test]
    fn radius_follows_progress() {
        let mut face = face();
        face.on_radius_progress(AnimationProgress::START);
        assert_eq!(face.radius(), 0);
        face.on_radius_progress(AnimationProgress::from_fraction(0.5));
        assert_eq!(face.radius(), 28);
        face.on_radius_progress(AnimationProgress::END);
        assert_eq!(face.radius(), FINAL_RADIUS);
    }

    #[test]
    fn sweep_keeps_the_time_it_started_with() {
        let mut face = face();
        face.on_tick(Tick::new(10, 30)).unwrap();
        face.on_sweep_started();
        assert!(face.is_animating());

        face.on_sweep_progress(AnimationProgress::from_fraction(0.5));
        face.on_tick(Tick::new(10, 31)).unwrap();
        face.on_sweep_progress(AnimationProgress::END);

        assert_eq!(face.animated_hands(), AnimatedHands { hours_60: 50, minutes: 30 });
        assert_eq!(face.sweep_target(), Some(ClockTime::new(10, 30).unwrap()));
        assert_eq!(face.hands(), Hands::sweeping(50, 30));
        // the readout is live even mid-sweep
        assert_eq!(face.time_text().as_str(), "10:31");

        face.on_sweep_stopped();
        assert!(!face.is_animating());
        assert_eq!(face.sweep_target(), None);
        assert_eq!(face.hands(), Hands::steady(&ClockTime::new(10, 31).unwrap()));
    }

    #[test]
    fn sweep_without_start_callback_snapshots_on_first_progress() {
        let mut face = face();
        face.on_tick(Tick::new(6, 0)).unwrap();
        face.on_sweep_progress(AnimationProgress::from_fraction(0.5));
        face.on_tick(Tick::new(7, 0)).unwrap();
        face.on_sweep_progress(AnimationProgress::END);
        assert_eq!(face.animated_hands().hours_60, 30);
    }

    #[test]
    fn frame_paints_the_whole_canvas() {
        let mut face = face();
        face.on_tick(Tick::new(14, 5)).unwrap();

        let mut buf = [0u16; (CANVAS_WIDTH * CANVAS_HEIGHT) as usize];
        let mut fb = Framebuffer::new(CANVAS_WIDTH as u16, CANVAS_HEIGHT as u16, &mut buf).unwrap();
        face.draw_frame(&mut fb).unwrap();

        // Sunset noise always has full red; in RGB565 that is 31
        assert_eq!(fb.pixel(0, 0).map(|c| c.r()), Some(31));
        assert_eq!(fb.pixel(143, 167).map(|c| c.r()), Some(31));
        // chrome yellow iris
        assert_eq!(fb.pixel(42 - 13, 55), Some(Rgb565::from(crate::config::CHROME_YELLOW)));
        // white nose
        assert_eq!(fb.pixel(71, 80), Some(Rgb565::WHITE));
    }

    #[test]
    fn unloaded_face_skips_the_decorations() {
        let mut face = face();
        face.unload();
        assert!(!face.is_loaded());

        let mut buf = [0u16; (CANVAS_WIDTH * CANVAS_HEIGHT) as usize];
        let mut fb = Framebuffer::new(CANVAS_WIDTH as u16, CANVAS_HEIGHT as u16, &mut buf).unwrap();
        face.draw_frame(&mut fb).unwrap();

        // noise where the nose would be
        assert_eq!(fb.pixel(71, 80).map(|c| c.r()), Some(31));
        assert_ne!(fb.pixel(71, 80), Some(Rgb565::WHITE));
    }

    #[test]
    fn noise_changes_between_identical_frames() {
        let mut face = face();
        let mut buf = [0u16; (CANVAS_WIDTH * CANVAS_HEIGHT) as usize];
        let mut fb = Framebuffer::new(CANVAS_WIDTH as u16, CANVAS_HEIGHT as u16, &mut buf).unwrap();

        face.draw_frame(&mut fb).unwrap();
        let first = face.noise().color(0, 0);
        let mut changed = false;
        for _ in 0..8 {
            face.draw_frame(&mut fb).unwrap();
            changed |= face.noise().color(0, 0) != first;
        }
        assert!(changed);
    }
}
