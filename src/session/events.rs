//! Input and output event types for the editing session
//!
//! These give the presentation layer a decoupled interface: it feeds raw
//! pointer/key input in device coordinates and reacts to the engine's
//! change notifications, translating them to its own message types.

use crate::domain::{Arrow, RegionId};

/// Keys the engine cares about. Anything else can be mapped to
/// `Character` by the embedding widget layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Control,
    Character(char),
}

/// Cursor shape the presentation layer should show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    /// Whole-region move
    Move,
    /// Resizing by the Start or End corner
    DiagonalResize,
    /// Resizing by the TopRight or BottomLeft corner
    AntiDiagonalResize,
}

/// Change notifications emitted by the session's input handlers
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// The region set, order, or geometry changed. `active` names the
    /// region the change centered on, if any.
    RegionsChanged { active: Option<RegionId> },
    /// The reading-order arrows were rebuilt
    OrderArrowsChanged(Vec<Arrow>),
    /// A different region (or none) is highlighted
    HighlightChanged(Option<RegionId>),
    /// The pointer cursor shape should change
    CursorHint(CursorHint),
    /// A newly drawn region passed the commit threshold; the owner should
    /// enqueue recognition for it
    RegionCommitted(RegionId),
    /// Human-readable status text for the status bar
    Status(String),
}
