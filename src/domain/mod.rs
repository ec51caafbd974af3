//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the engine. Types here
//! should have no presentation or async dependencies.

pub mod arrow;
pub mod geometry;
pub mod region;

pub use arrow::*;
pub use geometry::*;
pub use region::*;
