//! Editing session state: the live region list for the active page plus
//! the pointer-interaction state machine's bookkeeping

use std::collections::HashSet;

use crate::capture::PageImage;
use crate::domain::{Hotspot, Point, Region, RegionId};
use crate::order::OrderOverlay;
use crate::project::DisplayFlags;
use crate::session::events::{CursorHint, Key};
use crate::viewport::ViewTransform;

/// A drawn region must span at least this raw pointer diagonal (down-point
/// to up-point) to be committed; smaller drags are discarded silently.
pub const COMMIT_MIN_DIAGONAL: f32 = 32.0;

/// What the pressed pointer is currently doing
#[derive(Clone, Debug, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Growing a provisional region from its fixed origin
    Creating {
        region: Region,
        down: Point,
        last: Point,
    },
    /// Dragging one control point of a committed region
    DraggingHotspot { id: RegionId, hotspot: Hotspot },
    /// Moving a whole committed region; `last` is the incremental reference
    Translating { id: RegionId, last: Point },
}

/// The editing surface bound to the active page.
///
/// All methods run on the main surface; worker results re-enter through
/// [`EditorSession::apply_task_update`](crate::session::EditorSession).
#[derive(Debug, Default)]
pub struct EditorSession {
    pub(super) regions: Vec<Region>,
    pub(super) image: Option<PageImage>,
    pub viewport: ViewTransform,
    pub(super) overlay: OrderOverlay,
    pub(super) show_overlay_text: bool,
    pub(super) pointer: PointerState,
    pub(super) hover: Option<RegionId>,
    pub(super) cursor: CursorHint,
    pub(super) pressed_keys: HashSet<Key>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed regions on the active page, in reading order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id() == id)
    }

    pub(super) fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id() == id)
    }

    /// The provisional region being drawn, if a creation drag is in
    /// progress. It is not in [`regions`](Self::regions) until commit;
    /// the rubber band renders from here.
    pub fn active_region(&self) -> Option<&Region> {
        match &self.pointer {
            PointerState::Creating { region, .. } => Some(region),
            _ => None,
        }
    }

    /// The region currently under the pointer, if any
    pub fn hovered(&self) -> Option<RegionId> {
        self.hover
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Arrow overlay derived from the current reading order
    pub fn overlay(&self) -> &OrderOverlay {
        &self.overlay
    }

    pub fn show_overlay_text(&self) -> bool {
        self.show_overlay_text
    }

    pub fn display_flags(&self) -> DisplayFlags {
        DisplayFlags {
            showing_order: self.overlay.showing(),
            showing_overlay_text: self.show_overlay_text,
        }
    }

    /// Detected text eligible for a translation request: present,
    /// not the failure sentinel, and not yet translated.
    pub fn translation_request(&self, id: RegionId) -> Option<String> {
        let region = self.region(id)?;
        let text = region.detected_text.as_deref()?;
        if text == crate::ocr::RECOGNITION_FAILED || region.translated_text.is_some() {
            return None;
        }
        Some(text.to_string())
    }
}
