//! Reading-order overlay: sequence arrows between consecutive regions
//!
//! The region list itself is the single source of truth for reading order.
//! Arrows are derived and fully replaced on every recompute; nothing here
//! is patched incrementally.

use anyhow::{Context, bail};

use crate::domain::{Arrow, Point, Region, RegionId};

/// Vertical gap between a region's bottom edge and the highlight arrow head
const HIGHLIGHT_HEAD_GAP: f32 = 5.0;
/// Vertical gap between a region's bottom edge and the highlight arrow tail
const HIGHLIGHT_TAIL_GAP: f32 = 20.0;

/// Derived arrow state for one page: sequence links plus an optional
/// single-region highlight arrow
#[derive(Clone, Debug, Default)]
pub struct OrderOverlay {
    showing: bool,
    links: Vec<Arrow>,
    highlight: Option<(RegionId, Arrow)>,
}

impl OrderOverlay {
    pub fn showing(&self) -> bool {
        self.showing
    }

    /// One arrow per consecutive pair of regions, in reading order
    pub fn links(&self) -> &[Arrow] {
        &self.links
    }

    /// The highlight arrow, if a region is being inspected
    pub fn highlight(&self) -> Option<(RegionId, Arrow)> {
        self.highlight
    }

    /// Toggle order display and rebuild the links
    pub fn set_showing(&mut self, showing: bool, regions: &[Region]) {
        self.showing = showing;
        self.recompute(regions);
    }

    /// Throw away and rebuild every sequence arrow from the current order.
    /// Toggled off or fewer than two regions means no arrows at all.
    pub fn recompute(&mut self, regions: &[Region]) {
        self.links.clear();
        if !self.showing || regions.len() < 2 {
            return;
        }
        for pair in regions.windows(2) {
            self.links.push(Arrow::new(pair[0].center(), pair[1].center()));
        }
    }

    /// Point the highlight arrow at a region, replacing any previous one.
    /// Returns false when the id is not on the page.
    pub fn show_highlight(&mut self, regions: &[Region], id: RegionId) -> bool {
        let Some(region) = regions.iter().find(|r| r.id() == id) else {
            return false;
        };
        let center = region.center();
        let half_height = region.bounding_box().height as f32 / 2.0;
        let head = Point::new(center.x, center.y + half_height + HIGHLIGHT_HEAD_GAP);
        let tail = Point::new(center.x, center.y + half_height + HIGHLIGHT_TAIL_GAP);
        self.highlight = Some((id, Arrow::new(tail, head)));
        true
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }
}

/// Re-project `regions` into the order given by `order`.
///
/// Every id must name a distinct existing region and the sequence must be
/// complete; otherwise the previous order is retained and an error returned.
pub fn reorder(regions: &mut Vec<Region>, order: &[RegionId]) -> anyhow::Result<()> {
    if order.len() != regions.len() {
        bail!(
            "new order has {} ids but the page has {} regions",
            order.len(),
            regions.len()
        );
    }
    let mut picked = Vec::with_capacity(order.len());
    for id in order {
        let index = regions
            .iter()
            .position(|r| r.id() == *id)
            .with_context(|| format!("unknown region id {id} in new order"))?;
        if picked.contains(&index) {
            bail!("duplicate region id {id} in new order");
        }
        picked.push(index);
    }
    // picked is a verified permutation of 0..len, so every take yields
    let mut taken: Vec<Option<Region>> = regions.drain(..).map(Some).collect();
    regions.extend(picked.into_iter().filter_map(|index| taken[index].take()));
    Ok(())
}
