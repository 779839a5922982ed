//! **warren-core** — grid model and geometry primitives.
//!
//! This crate provides the foundational types for grid-graph pathfinding:
//! integer points and ranges, cardinal directions, and a parse-once
//! read-only cell grid with bounds-checked neighbor lookup.

pub mod geom;
pub mod grid;

pub use geom::{Dir, Point, Range};
pub use grid::{Cell, CellGrid, GridError};
