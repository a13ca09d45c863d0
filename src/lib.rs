//! Core library for Conway's Game of Life on a toroidal grid.

pub mod pos;
pub mod render;
pub mod rule;
pub mod sim;
pub mod universe;

pub use pos::Pos2;
pub use render::{Render, RenderMode, TextRender, render_neighbor_counts, render_universe};
pub use rule::Transition;
pub use sim::{Budget, RunState, Simulation};
pub use universe::{AllocationError, Cell, Universe};
