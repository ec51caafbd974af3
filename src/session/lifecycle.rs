//! Page binding, overlay toggles, and worker-result application
//!
//! Page switches go through `take_page`/`load_page` so no edit can be
//! attributed to the wrong page: the outgoing region list leaves the
//! session before the incoming one arrives, all on the main surface.

use crate::capture::PageImage;
use crate::domain::{Region, RegionId, Size};
use crate::ocr::RECOGNITION_FAILED;
use crate::pipeline::{TaskOutcome, TaskUpdate};
use crate::project::DisplayFlags;
use crate::session::events::EditorEvent;
use crate::session::state::{EditorSession, PointerState};

impl EditorSession {
    /// Bind a page image and fit the viewport to the given view size
    pub fn set_image(&mut self, image: PageImage, view: Size) {
        self.viewport.fit(image.size(), view);
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&PageImage> {
        self.image.as_ref()
    }

    /// Load a page's stored regions and display flags into the surface.
    /// Thumbnails are re-cropped from the current image.
    pub fn load_page(&mut self, mut regions: Vec<Region>, flags: DisplayFlags) -> Vec<EditorEvent> {
        for region in &mut regions {
            region.is_highlighted = false;
            region.thumbnail = self
                .image
                .as_ref()
                .and_then(|img| img.crop(region.bounding_box()));
        }
        log::debug!("page loaded with {} regions", regions.len());
        self.regions = regions;
        self.pointer = PointerState::Idle;
        self.hover = None;
        self.show_overlay_text = flags.showing_overlay_text;
        self.overlay.clear_highlight();
        self.overlay.set_showing(flags.showing_order, &self.regions);
        vec![
            EditorEvent::RegionsChanged { active: None },
            EditorEvent::OrderArrowsChanged(self.overlay.links().to_vec()),
            EditorEvent::HighlightChanged(None),
        ]
    }

    /// Take the live region list and flags back out, leaving the surface
    /// empty. Used to flush the outgoing page on a switch.
    pub fn take_page(&mut self) -> (Vec<Region>, DisplayFlags) {
        let flags = self.display_flags();
        self.pointer = PointerState::Idle;
        self.hover = None;
        self.overlay.clear_highlight();
        (std::mem::take(&mut self.regions), flags)
    }

    /// Toggle the reading-order arrows
    pub fn set_show_order(&mut self, showing: bool) -> Vec<EditorEvent> {
        self.overlay.set_showing(showing, &self.regions);
        vec![EditorEvent::OrderArrowsChanged(
            self.overlay.links().to_vec(),
        )]
    }

    pub fn set_show_overlay_text(&mut self, showing: bool) {
        self.show_overlay_text = showing;
    }

    /// Replace the reading order with the given id sequence.
    /// An unknown or missing id keeps the previous order and errors.
    pub fn reorder(&mut self, order: &[RegionId]) -> anyhow::Result<Vec<EditorEvent>> {
        crate::order::reorder(&mut self.regions, order)?;
        self.overlay.recompute(&self.regions);
        Ok(vec![
            EditorEvent::RegionsChanged { active: None },
            EditorEvent::OrderArrowsChanged(self.overlay.links().to_vec()),
        ])
    }

    /// Remove a committed region, e.g. through the deletion chord or a
    /// list widget's delete action
    pub fn delete_region(&mut self, id: RegionId) -> Vec<EditorEvent> {
        let Some(index) = self.regions.iter().position(|r| r.id() == id) else {
            return Vec::new();
        };
        self.regions.remove(index);
        if self.hover == Some(id) {
            self.hover = None;
        }
        if let Some((highlighted, _)) = self.overlay.highlight() {
            if highlighted == id {
                self.overlay.clear_highlight();
            }
        }
        // an in-flight drag of this region has lost its target
        let drag_refers = match &self.pointer {
            PointerState::DraggingHotspot { id: target, .. }
            | PointerState::Translating { id: target, .. } => *target == id,
            _ => false,
        };
        if drag_refers {
            self.pointer = PointerState::Idle;
        }
        self.overlay.recompute(&self.regions);
        vec![
            EditorEvent::RegionsChanged { active: None },
            EditorEvent::OrderArrowsChanged(self.overlay.links().to_vec()),
            EditorEvent::HighlightChanged(self.hover),
        ]
    }

    /// Point the inspection highlight arrow at a region, e.g. when a list
    /// widget row is hovered
    pub fn show_highlight(&mut self, id: RegionId) -> Vec<EditorEvent> {
        let events = self.clear_highlight();
        if !self.overlay.show_highlight(&self.regions, id) {
            return events;
        }
        if let Some(region) = self.region_mut(id) {
            region.is_highlighted = true;
        }
        vec![EditorEvent::HighlightChanged(Some(id))]
    }

    pub fn clear_highlight(&mut self) -> Vec<EditorEvent> {
        let Some((id, _)) = self.overlay.highlight() else {
            return Vec::new();
        };
        self.overlay.clear_highlight();
        if let Some(region) = self.region_mut(id) {
            region.is_highlighted = false;
        }
        vec![EditorEvent::HighlightChanged(None)]
    }

    /// Apply a worker completion on the main surface. Results addressed to
    /// a region that is no longer live (deleted, or on a switched-out
    /// page) are discarded silently.
    pub fn apply_task_update(&mut self, update: TaskUpdate) -> Vec<EditorEvent> {
        let id = update.region_id;
        let Some(region) = self.region_mut(id) else {
            log::debug!("dropping stale task result for region {id}");
            return Vec::new();
        };
        match update.outcome {
            TaskOutcome::Recognized(text) => {
                region.detected_text = Some(text.clone());
                vec![
                    EditorEvent::RegionsChanged { active: Some(id) },
                    EditorEvent::Status(format!("OCR result: {text}")),
                ]
            }
            TaskOutcome::RecognitionFailed(error) => {
                region.detected_text = Some(RECOGNITION_FAILED.to_string());
                vec![
                    EditorEvent::RegionsChanged { active: Some(id) },
                    EditorEvent::Status(format!("OCR failed: {error}")),
                ]
            }
            TaskOutcome::Translated(text) => {
                region.translated_text = Some(text);
                vec![EditorEvent::RegionsChanged { active: Some(id) }]
            }
            TaskOutcome::TranslationFailed(error) => {
                log::warn!("translation failed for region {id}: {error}");
                vec![EditorEvent::Status(format!("translation failed: {error}"))]
            }
        }
    }
}
