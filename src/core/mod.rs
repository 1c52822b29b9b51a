pub mod render_loop;
pub mod viewport;

pub use render_loop::RenderLoop;
pub use viewport::{Viewport, PIXEL_RATIO_CAP};
