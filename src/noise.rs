//! Pixel-noise background.
//!
//! The canvas is split into square cells, `PIXEL_COUNT` across, and every cell
//! gets a fresh random colour each time a frame is drawn. Nothing is cached
//! between frames; flicker is the effect.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
};
use rand_core::RngCore;

use crate::config::{MAX_GRID, PIXEL_COUNT};

/// Inclusive lower bound plus number of possible values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u8,
    pub span: u16,
}

impl ChannelRange {
    pub const fn fixed(value: u8) -> Self {
        Self { min: value, span: 1 }
    }

    /// Half-open `start..end`, `end` up to 256.
    pub const fn between(start: u8, end: u16) -> Self {
        Self {
            min: start,
            span: end - start as u16,
        }
    }

    pub fn contains(&self, value: u8) -> bool {
        let v = value as u16;
        v >= self.min as u16 && v < self.min as u16 + self.span
    }

    fn sample<R: RngCore>(&self, rng: &mut R) -> u8 {
        if self.span <= 1 {
            return self.min;
        }
        (self.min as u16 + (rng.next_u32() % self.span as u32) as u16) as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoisePalette {
    /// Random red, no green or blue.
    Red,
    /// Full red, green 96..256, blue 0..100.
    Sunset,
}

impl NoisePalette {
    pub fn channels(self) -> [ChannelRange; 3] {
        match self {
            NoisePalette::Red => [
                ChannelRange::between(0, 256),
                ChannelRange::fixed(0),
                ChannelRange::fixed(0),
            ],
            NoisePalette::Sunset => [
                ChannelRange::fixed(255),
                ChannelRange::between(96, 256),
                ChannelRange::between(0, 100),
            ],
        }
    }

    pub fn contains(self, color: Rgb888) -> bool {
        let [r, g, b] = self.channels();
        r.contains(color.r()) && g.contains(color.g()) && b.contains(color.b())
    }

    pub fn sample<R: RngCore>(self, rng: &mut R) -> Rgb888 {
        let [r, g, b] = self.channels();
        Rgb888::new(r.sample(rng), g.sample(rng), b.sample(rng))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NoiseCell {
    pub row: usize,
    pub col: usize,
    pub color: Rgb888,
}

/// Side length of one noise cell for a canvas `width` pixels wide.
pub fn cell_size(width: u32) -> u32 {
    (width / PIXEL_COUNT).max(1)
}

/// Row-major grid of noise colours covering a canvas.
#[derive(Clone, Debug)]
pub struct NoiseGrid {
    origin: Point,
    cell: u32,
    cols: usize,
    rows: usize,
    colors: [[Rgb888; MAX_GRID]; MAX_GRID],
}

impl Default for NoiseGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseGrid {
    pub const fn new() -> Self {
        Self {
            origin: Point::zero(),
            cell: 1,
            cols: 0,
            rows: 0,
            colors: [[Rgb888::BLACK; MAX_GRID]; MAX_GRID],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell
    }

    pub fn color(&self, row: usize, col: usize) -> Option<Rgb888> {
        if row < self.rows && col < self.cols {
            Some(self.colors[row][col])
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = NoiseCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| NoiseCell {
                row,
                col,
                color: self.colors[row][col],
            })
        })
    }

    /// Resize the grid to `bounds` and give every cell a new colour.
    pub fn regenerate<R: RngCore>(&mut self, bounds: Rectangle, palette: NoisePalette, rng: &mut R) {
        let cell = cell_size(bounds.size.width);
        let cols = (bounds.size.width / cell) as usize;
        let rows = bounds.size.height.div_ceil(cell) as usize;
        debug_assert!(
            cols <= MAX_GRID && rows <= MAX_GRID,
            "canvas needs {}x{} noise cells, grid holds {}x{}",
            cols,
            rows,
            MAX_GRID,
            MAX_GRID
        );
        self.origin = bounds.top_left;
        self.cell = cell;
        self.cols = cols.min(MAX_GRID);
        self.rows = rows.min(MAX_GRID);

        for row in self.colors.iter_mut().take(self.rows) {
            for color in row.iter_mut().take(self.cols) {
                *color = palette.sample(rng);
            }
        }
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rectangle {
        let side = self.cell as i32;
        Rectangle::new(
            self.origin + Point::new(col as i32 * side, row as i32 * side),
            Size::new(self.cell, self.cell),
        )
    }

    pub fn draw<D, C>(&self, target: &mut D) -> Result<(), D::Error>
    where
        C: PixelColor + From<Rgb888>,
        D: DrawTarget<Color = C>,
    {
        for cell in self.cells() {
            target.fill_solid(&self.cell_rect(cell.row, cell.col), C::from(cell.color))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_xoshiro::rand_core::SeedableRng;
    use rand_xoshiro::Xoroshiro128StarStar;

    fn canvas() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(144, 168))
    }

    #[test]
    fn grid_shape_follows_canvas_width() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(7);
        let mut grid = NoiseGrid::new();
        grid.regenerate(canvas(), NoisePalette::Red, &mut rng);

        assert_eq!(grid.cell_size(), 12);
        assert_eq!(grid.cols(), 144 / 12);
        assert_eq!(grid.rows(), 14);
        assert_eq!(grid.cells().count(), 12 * 14);
    }

    #[test]
    fn uneven_height_gets_a_partial_last_row() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(7);
        let mut grid = NoiseGrid::new();
        grid.regenerate(Rectangle::new(Point::zero(), Size::new(120, 125)), NoisePalette::Red, &mut rng);
        assert_eq!(grid.cell_size(), 10);
        assert_eq!(grid.cols(), 12);
        assert_eq!(grid.rows(), 13);
    }

    #[test]
    fn tiny_canvas_still_has_cells() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(7);
        let mut grid = NoiseGrid::new();
        grid.regenerate(Rectangle::new(Point::zero(), Size::new(5, 5)), NoisePalette::Red, &mut rng);
        assert_eq!(grid.cell_size(), 1);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.rows(), 5);
    }

    #[test]
    fn tallest_canvas_that_fits_the_grid() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(7);
        let mut grid = NoiseGrid::new();
        grid.regenerate(Rectangle::new(Point::zero(), Size::new(144, 240)), NoisePalette::Red, &mut rng);
        assert_eq!(grid.rows(), MAX_GRID);
        assert_eq!(grid.cell_rect(MAX_GRID - 1, 0).bottom_right(), Some(Point::new(11, 239)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "noise cells")]
    fn canvas_taller_than_the_grid_is_rejected() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(7);
        let mut grid = NoiseGrid::new();
        grid.regenerate(Rectangle::new(Point::zero(), Size::new(144, 300)), NoisePalette::Red, &mut rng);
    }

    #[test]
    fn red_palette_stays_in_bounds() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(1);
        let mut grid = NoiseGrid::new();
        for _ in 0..20 {
            grid.regenerate(canvas(), NoisePalette::Red, &mut rng);
            for cell in grid.cells() {
                assert_eq!(cell.color.g(), 0);
                assert_eq!(cell.color.b(), 0);
            }
        }
    }

    #[test]
    fn sunset_palette_stays_in_bounds() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(2);
        let mut grid = NoiseGrid::new();
        for _ in 0..20 {
            grid.regenerate(canvas(), NoisePalette::Sunset, &mut rng);
            for cell in grid.cells() {
                let c = cell.color;
                assert_eq!(c.r(), 255);
                assert!(c.g() >= 96, "green {} too low", c.g());
                assert!(c.b() < 100, "blue {} too high", c.b());
                assert!(NoisePalette::Sunset.contains(c));
            }
        }
    }

    #[test]
    fn every_frame_is_rerolled() {
        let mut rng = Xoroshiro128StarStar::seed_from_u64(3);
        let mut grid = NoiseGrid::new();
        grid.regenerate(canvas(), NoisePalette::Red, &mut rng);
        let first: heapless::Vec<Rgb888, 400> = grid.cells().map(|c| c.color).collect();
        grid.regenerate(canvas(), NoisePalette::Red, &mut rng);
        let second: heapless::Vec<Rgb888, 400> = grid.cells().map(|c| c.color).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn same_seed_same_noise() {
        let mut a = NoiseGrid::new();
        let mut b = NoiseGrid::new();
        a.regenerate(canvas(), NoisePalette::Sunset, &mut Xoroshiro128StarStar::seed_from_u64(9));
        b.regenerate(canvas(), NoisePalette::Sunset, &mut Xoroshiro128StarStar::seed_from_u64(9));
        assert!(a.cells().zip(b.cells()).all(|(x, y)| x == y));
    }

    #[test]
    fn cells_are_offset_by_the_bounds_origin() {
        let mut grid = NoiseGrid::new();
        let bounds = Rectangle::new(Point::new(48, 36), Size::new(144, 168));
        grid.regenerate(bounds, NoisePalette::Red, &mut Xoroshiro128StarStar::seed_from_u64(4));
        assert_eq!(
            grid.cell_rect(1, 2),
            Rectangle::new(Point::new(48 + 24, 36 + 12), Size::new(12, 12))
        );
    }
}
