//! Text regions: draggable, resizable rectangles with recognition results
//!
//! All coordinates are in scene space. Mutators clamp instead of rejecting,
//! so a region always satisfies the minimum-extent invariant. They return a
//! change indicator; re-rendering is the caller's business.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use uuid::Uuid;

use super::geometry::{BoundingBox, Point};

/// Smallest width/height a region may have, in scene units
pub const MIN_EXTENT: f32 = 50.0;

/// Capture radius for the corner hotspots, in scene units
pub const HOTSPOT_RADIUS: f32 = 50.0;

/// Stable opaque identifier for a region, preserved across reorder and save/load
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(Uuid);

impl RegionId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RegionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Named control points of a region
///
/// `hit_test_hotspot` checks these in declaration order, so End wins
/// whenever hotspots overlap on a small region.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotspot {
    #[default]
    None,
    /// Bottom-right corner
    End,
    /// Top-left corner
    Start,
    TopRight,
    BottomLeft,
}

/// A rectangular text annotation over a page image
#[derive(Clone, Debug)]
pub struct Region {
    id: RegionId,
    origin: Point,
    end: Point,
    top_right: Point,
    bottom_left: Point,
    /// Text returned by the recognition engine, or the failure sentinel
    pub detected_text: Option<String>,
    /// Machine translation of the detected text
    pub translated_text: Option<String>,
    /// Pixel crop of the region, refreshed when geometry changes after commit
    pub thumbnail: Option<RgbaImage>,
    /// Transient hover/inspection state, never persisted
    pub is_highlighted: bool,
}

impl Region {
    /// Create a provisional region anchored at `origin`.
    /// It is born at the minimum extent; growing happens through `set_end`.
    pub fn new(origin: Point) -> Self {
        let end = origin + Point::new(MIN_EXTENT, MIN_EXTENT);
        let mut region = Self {
            id: RegionId::new(),
            origin,
            end,
            top_right: Point::default(),
            bottom_left: Point::default(),
            detected_text: None,
            translated_text: None,
            thumbnail: None,
            is_highlighted: false,
        };
        region.recalculate_corners();
        region
    }

    /// Rebuild a region from persisted data, keeping its identifier
    pub fn from_saved(
        id: RegionId,
        origin: Point,
        end: Point,
        detected_text: Option<String>,
        translated_text: Option<String>,
    ) -> Self {
        let mut region = Self {
            id,
            origin,
            end,
            top_right: Point::default(),
            bottom_left: Point::default(),
            detected_text,
            translated_text,
            thumbnail: None,
            is_highlighted: false,
        };
        // a hand-edited file may carry a degenerate rectangle
        region.end = region.calc_end(end);
        region.recalculate_corners();
        region
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Bottom-right corner
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn top_right(&self) -> Point {
        self.top_right
    }

    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    // Clamp a proposed origin against the fixed end point so the extents
    // never drop below MIN_EXTENT.
    fn calc_origin(&self, value: Point) -> Point {
        Point::new(
            value.x.min(self.end.x - MIN_EXTENT),
            value.y.min(self.end.y - MIN_EXTENT),
        )
    }

    // Clamp a proposed end against the fixed origin point.
    fn calc_end(&self, value: Point) -> Point {
        Point::new(
            value.x.max(self.origin.x + MIN_EXTENT),
            value.y.max(self.origin.y + MIN_EXTENT),
        )
    }

    fn recalculate_corners(&mut self) {
        self.top_right = Point::new(self.end.x, self.origin.y);
        self.bottom_left = Point::new(self.origin.x, self.end.y);
    }

    /// Move the top-left corner. Returns whether anything changed.
    pub fn set_start(&mut self, value: Point) -> bool {
        if value.roughly_equals(self.origin) {
            return false;
        }
        self.origin = self.calc_origin(value);
        self.recalculate_corners();
        true
    }

    /// Move the bottom-right corner. Returns whether anything changed.
    pub fn set_end(&mut self, value: Point) -> bool {
        if value.roughly_equals(self.end) {
            return false;
        }
        self.end = self.calc_end(value);
        self.recalculate_corners();
        true
    }

    /// Move the bottom-left corner, adjusting `origin.x` and `end.y`
    pub fn set_bottom_left(&mut self, value: Point) -> bool {
        let fixed_y = self.origin.y;
        let fixed_x = self.end.x;
        self.origin = self.calc_origin(Point::new(value.x, fixed_y));
        self.end = self.calc_end(Point::new(fixed_x, value.y));
        self.recalculate_corners();
        true
    }

    /// Move the top-right corner, adjusting `end.x` and `origin.y`
    pub fn set_top_right(&mut self, value: Point) -> bool {
        let fixed_y = self.end.y;
        let fixed_x = self.origin.x;
        self.end = self.calc_end(Point::new(value.x, fixed_y));
        self.origin = self.calc_origin(Point::new(fixed_x, value.y));
        self.recalculate_corners();
        true
    }

    /// Rigid shift of the whole region; extents are unchanged.
    /// Returns whether anything changed. Unlike the corner mutators there
    /// is no proximity no-op: sub-unit deltas accumulate across a drag.
    pub fn translate(&mut self, delta: Point) -> bool {
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }
        self.origin += delta;
        self.end += delta;
        self.recalculate_corners();
        true
    }

    /// Which hotspot, if any, lies within the capture radius of `pos`.
    /// End is checked first so overlapping hotspots resolve deterministically.
    pub fn hit_test_hotspot(&self, pos: Point) -> Hotspot {
        let spots = [
            (self.end, Hotspot::End),
            (self.origin, Hotspot::Start),
            (self.top_right, Hotspot::TopRight),
            (self.bottom_left, Hotspot::BottomLeft),
        ];
        for (spot, tag) in spots {
            if pos.distance_to(spot) < HOTSPOT_RADIUS {
                return tag;
            }
        }
        Hotspot::None
    }

    /// Strict interior test (boundary points do not count)
    pub fn contains_point(&self, point: Point) -> bool {
        let horizontal = point.x > self.origin.x && point.x < self.end.x;
        let vertical = point.y > self.origin.y && point.y < self.end.y;
        horizontal && vertical
    }

    /// Integer-truncated `(x, y, width, height)` for cropping
    pub fn bounding_box(&self) -> BoundingBox {
        let x = self.origin.x as i32;
        let y = self.origin.y as i32;
        BoundingBox {
            x,
            y,
            width: self.end.x as i32 - x,
            height: self.end.y as i32 - y,
        }
    }

    /// Center of the truncated bounding box
    pub fn center(&self) -> Point {
        let b = self.bounding_box();
        Point::new(
            b.x as f32 + b.width as f32 / 2.0,
            b.y as f32 + b.height as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(region: &Region) {
        assert!(region.end().x - region.origin().x >= MIN_EXTENT);
        assert!(region.end().y - region.origin().y >= MIN_EXTENT);
        assert!(region.origin().x < region.end().x);
        assert!(region.origin().y < region.end().y);
        assert_eq!(
            region.top_right(),
            Point::new(region.end().x, region.origin().y)
        );
        assert_eq!(
            region.bottom_left(),
            Point::new(region.origin().x, region.end().y)
        );
    }

    #[test]
    fn test_new_region_has_minimum_extent() {
        let region = Region::new(Point::new(100.0, 200.0));
        assert_eq!(region.origin(), Point::new(100.0, 200.0));
        assert_eq!(region.end(), Point::new(150.0, 250.0));
        assert_invariants(&region);
    }

    #[test]
    fn test_set_end_clamps_against_origin() {
        let mut region = Region::new(Point::new(0.0, 0.0));
        assert!(region.set_end(Point::new(10.0, 300.0)));
        assert_eq!(region.end(), Point::new(MIN_EXTENT, 300.0));
        assert_invariants(&region);
    }

    #[test]
    fn test_set_start_clamps_against_end() {
        let mut region = Region::new(Point::new(0.0, 0.0));
        region.set_end(Point::new(200.0, 200.0));
        assert!(region.set_start(Point::new(400.0, -30.0)));
        assert_eq!(region.origin(), Point::new(150.0, -30.0));
        assert_invariants(&region);
    }

    #[test]
    fn test_set_end_close_enough_is_noop() {
        let mut region = Region::new(Point::new(0.0, 0.0));
        region.set_end(Point::new(120.0, 120.0));
        assert!(!region.set_end(Point::new(120.4, 120.9)));
        assert_eq!(region.end(), Point::new(120.0, 120.0));
    }

    #[test]
    fn test_corner_mutations_preserve_invariants() {
        let mut region = Region::new(Point::new(0.0, 0.0));
        region.set_end(Point::new(200.0, 200.0));

        region.set_bottom_left(Point::new(-40.0, 500.0));
        assert_eq!(region.origin(), Point::new(-40.0, 0.0));
        assert_eq!(region.end(), Point::new(200.0, 500.0));
        assert_invariants(&region);

        region.set_top_right(Point::new(1000.0, -90.0));
        assert_eq!(region.end().x, 1000.0);
        assert_eq!(region.origin().y, -90.0);
        assert_invariants(&region);

        // collapse attempts get clamped, never rejected
        region.set_bottom_left(Point::new(5000.0, -5000.0));
        assert_invariants(&region);
        region.set_top_right(Point::new(-5000.0, 5000.0));
        assert_invariants(&region);
    }

    #[test]
    fn test_mutation_storm_keeps_invariants() {
        let mut region = Region::new(Point::new(10.0, 10.0));
        let moves = [
            (-300.0, 250.0),
            (475.5, -12.25),
            (0.0, 0.0),
            (33.3, 999.0),
            (-1.0, -1.0),
        ];
        for (i, (x, y)) in moves.into_iter().enumerate() {
            let p = Point::new(x, y);
            match i % 4 {
                0 => {
                    region.set_start(p);
                }
                1 => {
                    region.set_end(p);
                }
                2 => {
                    region.set_top_right(p);
                }
                _ => {
                    region.set_bottom_left(p);
                }
            }
            assert_invariants(&region);
        }
        region.translate(Point::new(-77.7, 13.0));
        assert_invariants(&region);
    }

    #[test]
    fn test_translate_accumulates_sub_unit_deltas() {
        let mut region = Region::new(Point::new(10.0, 10.0));
        for _ in 0..20 {
            assert!(region.translate(Point::new(0.9, 0.9)));
        }
        assert!((region.origin().x - 28.0).abs() < 1e-4);
        assert!((region.origin().y - 28.0).abs() < 1e-4);
        assert!(!region.translate(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_hotspot_priority_resolves_to_end() {
        // at the minimum extent, the center is within radius of every
        // hotspot; End must win the tie-break
        let region = Region::new(Point::new(0.0, 0.0));
        assert_eq!(region.hit_test_hotspot(Point::new(25.0, 25.0)), Hotspot::End);
        assert_eq!(region.hit_test_hotspot(Point::new(15.0, 15.0)), Hotspot::End);
    }

    #[test]
    fn test_hotspot_detection_on_large_region() {
        let mut region = Region::new(Point::new(0.0, 0.0));
        region.set_end(Point::new(500.0, 500.0));
        assert_eq!(region.hit_test_hotspot(Point::new(2.0, 3.0)), Hotspot::Start);
        assert_eq!(
            region.hit_test_hotspot(Point::new(495.0, 495.0)),
            Hotspot::End
        );
        assert_eq!(
            region.hit_test_hotspot(Point::new(498.0, 4.0)),
            Hotspot::TopRight
        );
        assert_eq!(
            region.hit_test_hotspot(Point::new(1.0, 497.0)),
            Hotspot::BottomLeft
        );
        assert_eq!(
            region.hit_test_hotspot(Point::new(250.0, 250.0)),
            Hotspot::None
        );
    }

    #[test]
    fn test_contains_point_is_strict() {
        let mut region = Region::new(Point::new(0.0, 0.0));
        region.set_end(Point::new(100.0, 100.0));
        assert!(region.contains_point(Point::new(50.0, 50.0)));
        assert!(!region.contains_point(Point::new(0.0, 50.0)));
        assert!(!region.contains_point(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_bounding_box_truncates() {
        let mut region = Region::new(Point::new(10.7, 20.9));
        region.set_end(Point::new(110.6, 220.2));
        let b = region.bounding_box();
        assert_eq!((b.x, b.y, b.width, b.height), (10, 20, 100, 200));
    }

    #[test]
    fn test_from_saved_keeps_id_and_clamps() {
        let id = RegionId::new();
        let region = Region::from_saved(
            id,
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
            Some("text".into()),
            None,
        );
        assert_eq!(region.id(), id);
        assert_invariants(&region);
    }

    #[test]
    fn test_region_id_round_trips_as_string() {
        let id = RegionId::new();
        let parsed: RegionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<RegionId>().is_err());
    }
}
