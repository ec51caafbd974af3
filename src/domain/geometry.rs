//! Geometric types for scene coordinates and region bounds

use std::ops::{Add, AddAssign, Sub};

/// A point (or offset vector) in scene-space coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point from coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector magnitude when treating the point as an offset
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        (other - self).magnitude()
    }

    /// Whether two points land on the same integer scene cell.
    /// Used as the no-op test for redundant mutations.
    pub fn roughly_equals(self, other: Point) -> bool {
        self.x as i32 == other.x as i32 && self.y as i32 == other.y as i32
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Logical size of an image or view
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size from dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Integer-truncated bounds of a region, used for pixel cropping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Clip the box against an image of the given pixel dimensions.
    /// Returns `None` when nothing of the box lies inside the image.
    pub fn clip_to(&self, image_width: u32, image_height: u32) -> Option<BoundingBox> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = (self.x + self.width).min(image_width as i32);
        let bottom = (self.y + self.height).min(image_height as i32);
        if left < right && top < bottom {
            Some(BoundingBox {
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            })
        } else {
            None
        }
    }
}
