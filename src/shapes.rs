//! Cat face decorations: eyes, nose, ears and mouth.
//!
//! Built once when the face is loaded and never changed afterwards. The only
//! runtime geometry is the initial placement of the filled paths and the eye
//! sizes, which scale with the noise cell size.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Polyline, Triangle},
};

use crate::config::{CHROME_YELLOW, EAR_PINK, OUTLINE, OUTLINE_WIDTH, PUPIL};

const NOSE_POINTS: [Point; 3] = [Point::new(0, 0), Point::new(26, 0), Point::new(26 / 2, 20)];
const NOSE_AT: Point = Point::new(58, 77);

const LEFT_INNER_EAR_POINTS: [Point; 3] = [Point::new(0, 0), Point::new(14, 8), Point::new(5, -8)];
const LEFT_INNER_EAR_AT: Point = Point::new(25, 20);
const RIGHT_INNER_EAR_POINTS: [Point; 3] = [Point::new(0, 0), Point::new(-14, 8), Point::new(-5, -8)];
const RIGHT_INNER_EAR_AT: Point = Point::new(117, 20);

const LEFT_EAR: [Point; 3] = [Point::new(20, 25), Point::new(30, 7), Point::new(51, 20)];
const RIGHT_EAR: [Point; 3] = [Point::new(91, 20), Point::new(112, 9), Point::new(122, 25)];

const MOUTH_RIGHT: [Point; 4] = [
    Point::new(71, 97),
    Point::new(80, 110),
    Point::new(100, 110),
    Point::new(110, 97),
];
const MOUTH_LEFT: [Point; 4] = [
    Point::new(71, 97),
    Point::new(62, 110),
    Point::new(42, 110),
    Point::new(32, 97),
];

// Iris centres; pupils sit one pixel towards the nose
const LEFT_EYE: Point = Point::new(42, 55);
const RIGHT_EYE: Point = Point::new(100, 55);
const GLINT_Y: i32 = 50;

/// Closed three point path with a placement offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Path3 {
    points: [Point; 3],
    offset: Point,
}

impl Path3 {
    pub const fn new(points: [Point; 3]) -> Self {
        Self {
            points,
            offset: Point::zero(),
        }
    }

    pub fn move_to(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Points with the offset applied.
    pub fn points(&self) -> [Point; 3] {
        self.points.map(|p| p + self.offset)
    }

    pub fn draw_filled<D, C>(&self, target: &mut D, color: Rgb888) -> Result<(), D::Error>
    where
        C: PixelColor + From<Rgb888>,
        D: DrawTarget<Color = C>,
    {
        let [a, b, c] = self.points();
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_fill(C::from(color)))
            .draw(target)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Disc {
    pub center: Point,
    pub radius: u32,
    pub color: Rgb888,
}

impl Disc {
    fn circle(&self) -> Circle {
        Circle::with_center(self.center, self.radius * 2 + 1)
    }
}

fn scaled(cell: u32, factor: f32) -> i32 {
    (cell as f32 * factor) as i32
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shapes {
    eyes: [Disc; 6],
    nose: Path3,
    inner_ears: [Path3; 2],
}

impl Shapes {
    /// Lay out the face for noise cells `cell` pixels wide.
    pub fn new(cell: u32) -> Self {
        let iris = scaled(cell, 1.2) as u32;
        let pupil = scaled(cell, 1.1) as u32;
        let glint = scaled(cell, 0.1) as u32;
        let glint_dx = scaled(cell, 0.75);

        let left_pupil = LEFT_EYE + Point::new(1, 0);
        let right_pupil = RIGHT_EYE - Point::new(1, 0);

        let eyes = [
            Disc { center: LEFT_EYE, radius: iris, color: CHROME_YELLOW },
            Disc { center: RIGHT_EYE, radius: iris, color: CHROME_YELLOW },
            Disc { center: left_pupil, radius: pupil, color: PUPIL },
            Disc { center: right_pupil, radius: pupil, color: PUPIL },
            Disc {
                center: Point::new(left_pupil.x - glint_dx, GLINT_Y),
                radius: glint,
                color: OUTLINE,
            },
            Disc {
                center: Point::new(right_pupil.x - glint_dx, GLINT_Y),
                radius: glint,
                color: OUTLINE,
            },
        ];

        let mut nose = Path3::new(NOSE_POINTS);
        nose.move_to(NOSE_AT);

        let mut left_ear = Path3::new(LEFT_INNER_EAR_POINTS);
        left_ear.move_to(LEFT_INNER_EAR_AT);
        let mut right_ear = Path3::new(RIGHT_INNER_EAR_POINTS);
        right_ear.move_to(RIGHT_INNER_EAR_AT);

        Self {
            eyes,
            nose,
            inner_ears: [left_ear, right_ear],
        }
    }

    pub fn eyes(&self) -> &[Disc; 6] {
        &self.eyes
    }

    pub fn nose(&self) -> &Path3 {
        &self.nose
    }

    pub fn inner_ears(&self) -> &[Path3; 2] {
        &self.inner_ears
    }

    pub fn draw<D, C>(&self, target: &mut D) -> Result<(), D::Error>
    where
        C: PixelColor + From<Rgb888>,
        D: DrawTarget<Color = C>,
    {
        for eye in &self.eyes {
            eye.circle()
                .into_styled(PrimitiveStyle::with_fill(C::from(eye.color)))
                .draw(target)?;
        }

        self.nose.draw_filled(target, OUTLINE)?;
        for ear in &self.inner_ears {
            ear.draw_filled(target, EAR_PINK)?;
        }

        let stroke = PrimitiveStyle::with_stroke(C::from(OUTLINE), OUTLINE_WIDTH);
        for line in [&LEFT_EAR[..], &RIGHT_EAR[..], &MOUTH_RIGHT[..], &MOUTH_LEFT[..]] {
            Polyline::new(line).into_styled(stroke).draw(target)?;
        }
        Ok(())
    }
}
