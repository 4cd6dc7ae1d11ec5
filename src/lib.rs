//! Sparse Conway's Game of Life on an unbounded grid.

pub mod cell;
pub mod dedup;
pub mod engine;
pub mod rle;

pub use cell::Cell;
pub use dedup::unique_cells;
pub use engine::{GameOfLife, GenerationState, MAX_RENDER_SPAN, Neighbors, Window};
pub use rle::RleError;
