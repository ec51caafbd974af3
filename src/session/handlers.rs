//! Pointer, key, and scroll input handlers
//!
//! Raw device-space input comes in, geometry mutations and change
//! notifications come out. All geometric edits are total: the only
//! rejected outcome is a too-small provisional region, which is discarded
//! silently at pointer-up.

use crate::domain::{Hotspot, Point, Region};
use crate::session::events::{CursorHint, EditorEvent, Key};
use crate::session::state::{COMMIT_MIN_DIAGONAL, EditorSession, PointerState};

impl EditorSession {
    /// Pointer pressed. Disambiguates create-new, drag-hotspot, and
    /// move-whole-region from the hover state and a hotspot test.
    pub fn on_pointer_down(&mut self, device: Point) -> Vec<EditorEvent> {
        if self.image.is_none() {
            return Vec::new();
        }
        let scene = self.viewport.to_scene(device);
        self.pointer = match self.hover {
            Some(id) => {
                let hotspot = self
                    .region(id)
                    .map(|r| r.hit_test_hotspot(scene))
                    .unwrap_or_default();
                match hotspot {
                    Hotspot::None => PointerState::Translating { id, last: scene },
                    hotspot => PointerState::DraggingHotspot { id, hotspot },
                }
            }
            None => PointerState::Creating {
                region: Region::new(scene),
                down: scene,
                last: scene,
            },
        };
        Vec::new()
    }

    /// Pointer moved. Updates hover and cursor feedback, and drives the
    /// mutation matching the current pointer state.
    pub fn on_pointer_move(&mut self, device: Point) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        let scene = self.viewport.to_scene(device);

        // hover tracking runs on every move, pressed or not
        if self.update_hover(scene) {
            events.push(EditorEvent::HighlightChanged(self.hover));
        }

        let mut cursor = CursorHint::Default;
        let hotspot = match &self.pointer {
            PointerState::Idle => match self
                .hover
                .and_then(|id| self.region(id))
                .map(|r| r.hit_test_hotspot(scene))
            {
                Some(Hotspot::None) => {
                    cursor = CursorHint::Move;
                    None
                }
                other => other,
            },
            PointerState::Creating { .. } => Some(Hotspot::End),
            PointerState::DraggingHotspot { hotspot, .. } => Some(*hotspot),
            PointerState::Translating { .. } => None,
        };
        match hotspot {
            Some(Hotspot::Start | Hotspot::End) => cursor = CursorHint::DiagonalResize,
            Some(Hotspot::TopRight | Hotspot::BottomLeft) => {
                cursor = CursorHint::AntiDiagonalResize
            }
            _ => {}
        }
        if cursor != self.cursor {
            self.cursor = cursor;
            events.push(EditorEvent::CursorHint(cursor));
        }

        let mut state = std::mem::take(&mut self.pointer);
        let mut target_gone = false;
        match &mut state {
            PointerState::Idle => {}
            PointerState::Creating { region, last, .. } => {
                if region.set_end(scene) {
                    events.push(EditorEvent::RegionsChanged {
                        active: Some(region.id()),
                    });
                }
                *last = scene;
            }
            PointerState::DraggingHotspot { id, hotspot } => {
                let (id, hotspot) = (*id, *hotspot);
                let mut changed = false;
                match self.region_mut(id) {
                    Some(region) => {
                        changed = match hotspot {
                            Hotspot::End => region.set_end(scene),
                            Hotspot::Start => region.set_start(scene),
                            Hotspot::TopRight => region.set_top_right(scene),
                            Hotspot::BottomLeft => region.set_bottom_left(scene),
                            Hotspot::None => false,
                        };
                    }
                    None => target_gone = true,
                }
                if changed {
                    self.overlay.recompute(&self.regions);
                    events.push(EditorEvent::RegionsChanged { active: Some(id) });
                    events.push(EditorEvent::OrderArrowsChanged(
                        self.overlay.links().to_vec(),
                    ));
                }
            }
            PointerState::Translating { id, last } => {
                let id = *id;
                let delta = scene - *last;
                *last = scene;
                let mut moved = false;
                match self.region_mut(id) {
                    Some(region) => moved = region.translate(delta),
                    None => target_gone = true,
                }
                if moved {
                    self.overlay.recompute(&self.regions);
                    events.push(EditorEvent::RegionsChanged { active: Some(id) });
                    events.push(EditorEvent::OrderArrowsChanged(
                        self.overlay.links().to_vec(),
                    ));
                }
            }
        }
        // the dragged region was deleted mid-gesture (deletion chord)
        if target_gone {
            state = PointerState::Idle;
        }
        self.pointer = state;
        events
    }

    /// Pointer released. Commits or discards a provisional region, and
    /// refreshes the thumbnail of a dragged committed one.
    pub fn on_pointer_up(&mut self, device: Point) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        let scene = self.viewport.to_scene(device);

        if self.cursor != CursorHint::Default {
            self.cursor = CursorHint::Default;
            events.push(EditorEvent::CursorHint(CursorHint::Default));
        }

        match std::mem::take(&mut self.pointer) {
            PointerState::Idle => {}
            PointerState::Creating {
                mut region, down, ..
            } => {
                let diagonal = scene.distance_to(down);
                if diagonal >= COMMIT_MIN_DIAGONAL {
                    region.thumbnail = self
                        .image
                        .as_ref()
                        .and_then(|img| img.crop(region.bounding_box()));
                    let id = region.id();
                    self.regions.push(region);
                    self.overlay.recompute(&self.regions);
                    events.push(EditorEvent::RegionsChanged { active: Some(id) });
                    events.push(EditorEvent::OrderArrowsChanged(
                        self.overlay.links().to_vec(),
                    ));
                    events.push(EditorEvent::RegionCommitted(id));
                } else {
                    log::debug!(
                        "provisional region too small (diagonal {diagonal:.1}), discarding"
                    );
                }
            }
            PointerState::DraggingHotspot { id, .. } | PointerState::Translating { id, .. } => {
                let bounds = self.region(id).map(|r| r.bounding_box());
                if let (Some(bounds), Some(image)) = (bounds, &self.image) {
                    let thumbnail = image.crop(bounds);
                    if let Some(region) = self.region_mut(id) {
                        region.thumbnail = thumbnail;
                    }
                }
                self.overlay.recompute(&self.regions);
                events.push(EditorEvent::RegionsChanged { active: Some(id) });
                events.push(EditorEvent::OrderArrowsChanged(
                    self.overlay.links().to_vec(),
                ));
            }
        }
        events
    }

    pub fn on_key_press(&mut self, key: Key) -> Vec<EditorEvent> {
        self.pressed_keys.insert(key);
        Vec::new()
    }

    /// Key released. While Ctrl and X are both held, any release fires the
    /// deletion chord on the hovered region, whatever the pointer state.
    pub fn on_key_release(&mut self, key: Key) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        if self.pressed_keys.contains(&Key::Control)
            && self.pressed_keys.contains(&Key::Character('x'))
        {
            if let Some(id) = self.hover {
                events = self.delete_region(id);
            }
        }
        self.pressed_keys.remove(&key);
        if key == Key::Control {
            self.viewport.clear_anchor();
        }
        events
    }

    /// Scroll gesture. Zooms only while the Control modifier is held;
    /// otherwise the gesture is a plain scroll and the view stays at the
    /// same scale.
    pub fn on_scroll(&mut self, delta_y: f32, device: Point) -> Vec<EditorEvent> {
        if !self.pressed_keys.contains(&Key::Control) {
            return Vec::new();
        }
        self.viewport.zoom_step(delta_y > 0.0, device);
        Vec::new()
    }

    // Retest every region so the hover flag only flips on state change;
    // the last containing region wins when regions overlap.
    fn update_hover(&mut self, scene: Point) -> bool {
        let mut hover = None;
        for region in &mut self.regions {
            let inside = region.contains_point(scene);
            region.is_highlighted = inside;
            if inside {
                hover = Some(region.id());
            }
        }
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PageImage;
    use crate::domain::Size;
    use crate::project::DisplayFlags;
    use image::RgbaImage;

    // 200x200 image in a 250x250 view fits at scale 1.0, so device and
    // scene coordinates coincide
    fn session() -> EditorSession {
        let mut session = EditorSession::new();
        session.set_image(
            PageImage::new(RgbaImage::new(200, 200)),
            Size::new(250.0, 250.0),
        );
        session
    }

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn draw_region(session: &mut EditorSession, from: Point, to: Point) {
        session.on_pointer_down(from);
        session.on_pointer_move(to);
        session.on_pointer_up(to);
    }

    #[test]
    fn test_create_and_commit_region() {
        let mut session = session();
        session.on_pointer_down(p(10.0, 10.0));
        session.on_pointer_move(p(120.0, 90.0));
        let events = session.on_pointer_up(p(120.0, 90.0));

        assert_eq!(session.regions().len(), 1);
        let region = &session.regions()[0];
        assert_eq!(region.origin(), p(10.0, 10.0));
        assert_eq!(region.end(), p(120.0, 90.0));
        assert!(region.thumbnail.is_some());
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EditorEvent::RegionCommitted(id) if *id == region.id()))
        );
    }

    #[test]
    fn test_creation_moves_report_rubber_band() {
        let mut session = session();
        session.on_pointer_down(p(10.0, 10.0));
        let events = session.on_pointer_move(p(120.0, 90.0));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EditorEvent::RegionsChanged { active: Some(_) }))
        );

        // the provisional rectangle is readable before commit
        let provisional = session.active_region().unwrap();
        assert_eq!(provisional.end(), p(120.0, 90.0));
        assert!(session.regions().is_empty());

        session.on_pointer_up(p(120.0, 90.0));
        assert!(session.active_region().is_none());
        assert_eq!(session.regions().len(), 1);
    }

    #[test]
    fn test_hotspot_drag_reports_each_change() {
        let mut session = session();
        draw_region(&mut session, p(10.0, 10.0), p(110.0, 110.0));
        session.on_pointer_move(p(100.0, 100.0));
        session.on_pointer_down(p(100.0, 100.0));

        let events = session.on_pointer_move(p(150.0, 150.0));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EditorEvent::RegionsChanged { active: Some(_) }))
        );

        // a move that stays in the same integer cell changes nothing
        let events = session.on_pointer_move(p(150.3, 150.3));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, EditorEvent::RegionsChanged { .. }))
        );
    }

    #[test]
    fn test_small_drag_is_discarded() {
        let mut session = session();
        session.on_pointer_down(p(100.0, 100.0));
        session.on_pointer_move(p(105.0, 105.0));
        let events = session.on_pointer_up(p(105.0, 105.0));

        // diagonal ~7.07 < 32: no commit, list unchanged
        assert!(session.regions().is_empty());
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, EditorEvent::RegionCommitted(_)))
        );
    }

    #[test]
    fn test_commit_threshold_boundary() {
        let mut session = session();
        session.on_pointer_down(p(0.0, 0.0));
        session.on_pointer_move(p(31.0, 0.0));
        session.on_pointer_up(p(31.0, 0.0));
        assert!(session.regions().is_empty());

        session.on_pointer_down(p(0.0, 0.0));
        session.on_pointer_move(p(32.0, 0.0));
        session.on_pointer_up(p(32.0, 0.0));
        assert_eq!(session.regions().len(), 1);
    }

    #[test]
    fn test_pointer_down_without_image_is_ignored() {
        let mut session = EditorSession::new();
        session.on_pointer_down(p(10.0, 10.0));
        session.on_pointer_move(p(100.0, 100.0));
        session.on_pointer_up(p(100.0, 100.0));
        assert!(session.regions().is_empty());
    }

    #[test]
    fn test_hover_tracks_last_region_on_overlap() {
        let mut session = session();
        // overlapping regions can only come from a loaded page
        let mut first = Region::new(p(10.0, 10.0));
        first.set_end(p(110.0, 110.0));
        let mut second = Region::new(p(50.0, 50.0));
        second.set_end(p(150.0, 150.0));
        let (first_id, second_id) = (first.id(), second.id());
        session.load_page(vec![first, second], DisplayFlags::default());

        // both regions contain (80, 80); the last in iteration order wins
        session.on_pointer_move(p(80.0, 80.0));
        assert_eq!(session.hovered(), Some(second_id));
        assert!(session.regions()[0].is_highlighted);
        assert!(session.regions()[1].is_highlighted);

        session.on_pointer_move(p(30.0, 30.0));
        assert_eq!(session.hovered(), Some(first_id));
        assert!(!session.regions()[1].is_highlighted);

        session.on_pointer_move(p(199.0, 199.0));
        assert_eq!(session.hovered(), None);
    }

    #[test]
    fn test_drag_end_hotspot_resizes() {
        let mut session = session();
        draw_region(&mut session, p(10.0, 10.0), p(110.0, 110.0));
        let id = session.regions()[0].id();

        // hover near the End corner, then grab and drag it
        session.on_pointer_move(p(100.0, 100.0));
        session.on_pointer_down(p(100.0, 100.0));
        assert!(matches!(
            session.pointer,
            PointerState::DraggingHotspot {
                hotspot: Hotspot::End,
                ..
            }
        ));
        session.on_pointer_move(p(180.0, 160.0));
        session.on_pointer_up(p(180.0, 160.0));

        let region = session.region(id).unwrap();
        assert_eq!(region.end(), p(180.0, 160.0));
        assert_eq!(region.origin(), p(10.0, 10.0));
    }

    #[test]
    fn test_translate_moves_incrementally() {
        // the region must be large enough that its center sits outside
        // every hotspot radius, otherwise the press grabs a corner
        let mut session = session_with_big_region();
        let id = session.regions()[0].id();
        session.on_pointer_move(p(100.0, 100.0));
        session.on_pointer_down(p(100.0, 100.0));
        assert!(matches!(session.pointer, PointerState::Translating { .. }));
        session.on_pointer_move(p(110.0, 105.0));
        session.on_pointer_move(p(120.0, 115.0));
        session.on_pointer_up(p(120.0, 115.0));

        let region = session.region(id).unwrap();
        assert_eq!(region.origin(), p(30.0, 25.0));
        assert_eq!(region.end(), p(190.0, 185.0));
    }

    fn session_with_big_region() -> EditorSession {
        let mut session = session();
        draw_region(&mut session, p(10.0, 10.0), p(170.0, 170.0));
        session
    }

    #[test]
    fn test_cursor_hints() {
        let mut session = session_with_big_region();

        session.on_pointer_move(p(12.0, 12.0));
        assert_eq!(session.cursor(), CursorHint::DiagonalResize);

        session.on_pointer_move(p(168.0, 12.0));
        assert_eq!(session.cursor(), CursorHint::AntiDiagonalResize);

        session.on_pointer_move(p(90.0, 90.0));
        assert_eq!(session.cursor(), CursorHint::Move);

        let events = session.on_pointer_move(p(199.0, 199.0));
        assert_eq!(session.cursor(), CursorHint::Default);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EditorEvent::CursorHint(CursorHint::Default)))
        );
    }

    #[test]
    fn test_deletion_chord_removes_hovered_region() {
        let mut session = session_with_big_region();
        session.on_pointer_move(p(90.0, 90.0));
        assert!(session.hovered().is_some());

        session.on_key_press(Key::Control);
        session.on_key_press(Key::Character('x'));
        let events = session.on_key_release(Key::Character('x'));
        session.on_key_release(Key::Control);

        assert!(session.regions().is_empty());
        assert_eq!(session.hovered(), None);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EditorEvent::RegionsChanged { active: None }))
        );
    }

    #[test]
    fn test_deletion_chord_cancels_active_drag() {
        let mut session = session();
        draw_region(&mut session, p(10.0, 10.0), p(110.0, 110.0));
        session.on_pointer_move(p(100.0, 100.0));
        session.on_pointer_down(p(100.0, 100.0));
        assert!(matches!(
            session.pointer,
            PointerState::DraggingHotspot { .. }
        ));

        session.on_key_press(Key::Control);
        session.on_key_press(Key::Character('x'));
        session.on_key_release(Key::Character('x'));
        session.on_key_release(Key::Control);

        assert!(session.regions().is_empty());
        assert!(matches!(session.pointer, PointerState::Idle));

        // finishing the press must not resurrect the region
        session.on_pointer_move(p(150.0, 150.0));
        session.on_pointer_up(p(150.0, 150.0));
        assert!(session.regions().is_empty());
    }

    #[test]
    fn test_deletion_chord_without_hover_is_noop() {
        let mut session = session_with_big_region();
        session.on_pointer_move(p(199.0, 199.0));
        session.on_key_press(Key::Control);
        session.on_key_press(Key::Character('x'));
        let events = session.on_key_release(Key::Character('x'));
        assert!(events.is_empty());
        assert_eq!(session.regions().len(), 1);
    }

    #[test]
    fn test_scroll_without_modifier_does_not_zoom() {
        let mut session = session();
        let before = session.viewport.scale();
        session.on_scroll(1.0, p(100.0, 100.0));
        assert_eq!(session.viewport.scale(), before);

        session.on_key_press(Key::Control);
        session.on_scroll(1.0, p(100.0, 100.0));
        assert!(session.viewport.scale() > before);
    }

    #[test]
    fn test_order_arrows_follow_translation() {
        let mut session = session();
        draw_region(&mut session, p(0.0, 0.0), p(60.0, 60.0));
        draw_region(&mut session, p(100.0, 100.0), p(190.0, 190.0));
        session.set_show_order(true);
        assert_eq!(session.overlay().links().len(), 1);
        let before = session.overlay().links()[0];

        // drag the second region by an interior point clear of its corners
        session.on_pointer_move(p(140.0, 140.0));
        session.on_pointer_down(p(140.0, 140.0));
        assert!(matches!(session.pointer, PointerState::Translating { .. }));
        let events = session.on_pointer_move(p(135.0, 135.0));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EditorEvent::OrderArrowsChanged(_)))
        );
        session.on_pointer_up(p(135.0, 135.0));
        assert_ne!(session.overlay().links()[0], before);
    }
}
