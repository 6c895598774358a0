// RGB565 framebuffer the face is composed into before it goes to the panel.
//
// The buffer is borrowed so the firmware can place it in a static and tests
// can use a plain array. Pixels outside the buffer are dropped, which is what
// gives the renderer its free clipping.

use core::convert::Infallible;
use core::fmt;

use embedded_graphics::{
    pixelcolor::{raw::RawU16, IntoStorage, Rgb565},
    prelude::*,
    primitives::Rectangle,
    Pixel,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FramebufferError {
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferError::SizeMismatch { expected, actual } => {
                write!(f, "framebuffer holds {} pixels, expected {}", actual, expected)
            }
        }
    }
}

pub struct Framebuffer<'fb> {
    w: u16,
    h: u16,
    fb: &'fb mut [u16],
}

impl<'fb> Framebuffer<'fb> {
    pub fn new(width: u16, height: u16, fb: &'fb mut [u16]) -> Result<Self, FramebufferError> {
        // Validate FB size matches WxH (RGB565)
        let expected = (width as usize) * (height as usize);
        if fb.len() != expected {
            return Err(FramebufferError::SizeMismatch {
                expected,
                actual: fb.len(),
            });
        }
        Ok(Self { w: width, h: height, fb })
    }

    pub fn width(&self) -> u16 {
        self.w
    }

    pub fn height(&self) -> u16 {
        self.h
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return None;
        }
        Some(y as usize * self.w as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(x, y).map(|i| Rgb565::from(RawU16::new(self.fb[i])))
    }

    /// Raw RGB565 words, row-major.
    pub fn as_raw(&self) -> &[u16] {
        &self.fb[..]
    }

    /// Colours row-major, for pushing the whole frame to a panel.
    pub fn colors(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.fb.iter().map(|&raw| Rgb565::from(RawU16::new(raw)))
    }
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for Framebuffer<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.index(p.x, p.y) {
                self.fb[i] = c.into_storage();
            }
        }
        Ok(())
    }

    // Row copy into the visible part; the rest of the iterator is consumed
    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let visible = area.intersection(&self.bounding_box());
        if visible.is_zero_sized() {
            return Ok(());
        }

        let area_w = area.size.width as usize;
        let left_skip = (visible.top_left.x - area.top_left.x) as usize;
        let top_skip = (visible.top_left.y - area.top_left.y) as usize;
        let take = visible.size.width as usize;
        let fbw = self.w as usize;

        let mut it = colors.into_iter();
        for _ in 0..top_skip * area_w {
            it.next();
        }

        for ry in 0..visible.size.height as usize {
            let row_start = (visible.top_left.y as usize + ry) * fbw + visible.top_left.x as usize;
            for _ in 0..left_skip {
                it.next();
            }
            for dst in &mut self.fb[row_start..row_start + take] {
                match it.next() {
                    Some(c) => *dst = c.into_storage(),
                    None => return Ok(()),
                }
            }
            for _ in 0..area_w - left_skip - take {
                it.next();
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        if visible.is_zero_sized() {
            return Ok(());
        }
        let raw = color.into_storage();
        let fbw = self.w as usize;
        let x0 = visible.top_left.x as usize;
        for y in 0..visible.size.height as usize {
            let row_start = (visible.top_left.y as usize + y) * fbw + x0;
            self.fb[row_start..row_start + visible.size.width as usize].fill(raw);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fb.fill(color.into_storage());
        Ok(())
    }
}
