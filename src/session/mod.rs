//! The interactive editing session: pointer state machine, key chords,
//! zoom routing, page lifecycle, and worker-result application

pub mod events;
mod handlers;
mod lifecycle;
mod state;

pub use self::events::{CursorHint, EditorEvent, Key};
pub use self::state::{COMMIT_MIN_DIAGONAL, EditorSession, PointerState};
