mod canvas;
mod context;

pub use canvas::CanvasPipeline;
pub use context::{GpuContext, GpuError};
