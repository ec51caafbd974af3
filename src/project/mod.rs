//! Multi-page project model and its on-disk JSON form
//!
//! Exactly one page is active at a time; its regions live inside the
//! [`EditorSession`](crate::session::EditorSession) while it is active and
//! are flushed back here on a switch, so stored state and live state never
//! need merging.

pub mod persist;

use std::mem;
use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::domain::Region;
use crate::session::{EditorEvent, EditorSession};

/// Per-page view toggles, persisted alongside the regions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub showing_order: bool,
    pub showing_overlay_text: bool,
}

/// One page: the path of its raster image plus region and display state
#[derive(Debug)]
pub struct Page {
    pub path: PathBuf,
    pub flags: DisplayFlags,
    pub regions: Vec<Region>,
}

impl Page {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            flags: DisplayFlags::default(),
            regions: Vec::new(),
        }
    }
}

/// An ordered collection of pages with at most one active in the session
#[derive(Debug, Default)]
pub struct Project {
    pages: Vec<Page>,
    active: Option<usize>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Drop every page. Any active page's live state is discarded with it,
    /// so flush or save first if it matters.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.active = None;
    }

    /// Make `index` the active page: flush the previously active page's
    /// live state out of the session, then load the new page's regions in.
    /// The caller binds the page image beforehand with
    /// [`EditorSession::set_image`].
    pub fn activate_page(
        &mut self,
        index: usize,
        session: &mut EditorSession,
    ) -> anyhow::Result<Vec<EditorEvent>> {
        if index >= self.pages.len() {
            bail!("page index {index} out of range ({} pages)", self.pages.len());
        }
        self.flush_active(session);
        self.active = Some(index);
        let page = &mut self.pages[index];
        let regions = mem::take(&mut page.regions);
        Ok(session.load_page(regions, page.flags))
    }

    /// Write the active page's live regions and flags back into the
    /// project. Safe to call with no active page.
    pub fn flush_active(&mut self, session: &mut EditorSession) {
        let Some(index) = self.active else {
            return;
        };
        let (regions, flags) = session.take_page();
        let page = &mut self.pages[index];
        page.regions = regions;
        page.flags = flags;
        self.active = None;
    }

    /// Absolute or project-relative image path for a page
    pub fn page_path(&self, index: usize) -> anyhow::Result<&PathBuf> {
        self.pages
            .get(index)
            .map(|p| &p.path)
            .with_context(|| format!("no page at index {index}"))
    }
}
