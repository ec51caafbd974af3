//! Directional arrow links between scene points
//!
//! Arrows are derived visuals: they are fully recomputed from region order
//! or highlight state and never mutated in place.

use super::geometry::Point;

/// An ordered pair of scene points, drawn tail to head
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub tail: Point,
    pub head: Point,
}

impl Arrow {
    /// Create an arrow from tail to head
    pub fn new(tail: Point, head: Point) -> Self {
        Self { tail, head }
    }

    /// Length of the arrow shaft
    pub fn length(&self) -> f32 {
        self.tail.distance_to(self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(0.0, 12.0));
        assert_eq!(arrow.length(), 12.0);
    }
}
