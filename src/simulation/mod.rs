mod context;
mod grid;

pub use context::{ResizePolicy, SimulationContext};
pub use grid::Grid;
