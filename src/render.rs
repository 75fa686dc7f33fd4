pub mod canvas;
pub mod composite;

pub use canvas::{Canvas, render_canvas};
