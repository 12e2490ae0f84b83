mod canvas;
mod palette;
mod presenter;

pub use canvas::{Canvas, PixelCanvas};
pub use presenter::draw;
