//! Engine for annotating paginated raster images with rectangular text
//! regions.
//!
//! The crate is presentation-agnostic: a widget layer feeds raw pointer
//! and key input into an [`session::EditorSession`] in device coordinates
//! and renders from the [`session::EditorEvent`]s it gets back. Recognition
//! and translation run off the main surface through
//! [`pipeline::RecognitionPipeline`]; their results re-enter the session
//! as [`pipeline::TaskUpdate`]s. Multi-page state and `.gmt` project files
//! live in [`project`].

pub mod capture;
pub mod domain;
pub mod ocr;
pub mod order;
pub mod pipeline;
pub mod project;
pub mod session;
pub mod translate;
pub mod viewport;
