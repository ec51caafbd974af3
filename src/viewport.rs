//! Viewport transform: zoom and pan between device and scene coordinates
//!
//! The mapping is `device = scene * scale + offset`. Zoom gestures anchor
//! the scene point under the pointer so repeated steps do not drift.

use crate::domain::{Point, Size};

/// Zoom factor applied per discrete zoom-in step
pub const ZOOM_IN_FACTOR: f32 = 1.1;
/// Zoom factor applied per discrete zoom-out step
pub const ZOOM_OUT_FACTOR: f32 = 0.8;
/// The fitted image occupies at least this share of the fitting scale
const FIT_MARGIN: f32 = 0.8;

/// Scale factor and pan offset mapping scene space to device space
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    scale: f32,
    offset: Point,
    min_zoom: f32,
    /// Scene point held under the pointer for the current zoom run
    anchor: Option<Point>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::default(),
            min_zoom: FIT_MARGIN,
            anchor: None,
        }
    }
}

impl ViewTransform {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    /// Reset the transform to fit `image` inside `view`.
    /// The image is never forced smaller than 80% of the fitting scale.
    pub fn fit(&mut self, image: Size, view: Size) {
        let width_scale = view.width / image.width;
        let height_scale = view.height / image.height;
        self.min_zoom = width_scale.min(height_scale) * FIT_MARGIN;
        self.scale = self.min_zoom;
        self.offset = Point::default();
        self.anchor = None;
        log::debug!(
            "viewport fit: image {}x{}, view {}x{}, min zoom {}",
            image.width,
            image.height,
            view.width,
            view.height,
            self.min_zoom
        );
    }

    /// Map a device-space point to scene space at the current scale and pan
    pub fn to_scene(&self, device: Point) -> Point {
        Point::new(
            (device.x - self.offset.x) / self.scale,
            (device.y - self.offset.y) / self.scale,
        )
    }

    /// Map a scene-space point to device space
    pub fn to_device(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.scale + self.offset.x,
            scene.y * self.scale + self.offset.y,
        )
    }

    /// Apply one discrete zoom step at the given device position
    pub fn zoom_step(&mut self, zoom_in: bool, device: Point) {
        let factor = if zoom_in {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };
        self.zoom_by(factor, device);
    }

    /// Scale by `factor`, clamped at the minimum zoom. The first call of a
    /// zoom run records the scene point under `device`; every step then
    /// re-anchors the view so that point stays under the pointer.
    pub fn zoom_by(&mut self, factor: f32, device: Point) {
        let mut factor = factor;
        if self.scale * factor < self.min_zoom {
            factor = self.min_zoom / self.scale;
        }
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let anchor = self.to_scene(device);
                self.anchor = Some(anchor);
                anchor
            }
        };
        self.scale *= factor;
        self.offset = Point::new(
            device.x - anchor.x * self.scale,
            device.y - anchor.y * self.scale,
        );
    }

    /// Forget the zoom anchor. Called when the zoom modifier is released.
    pub fn clear_anchor(&mut self) {
        self.anchor = None;
    }
}
