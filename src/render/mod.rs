pub mod renderer;
pub mod text;

pub use renderer::{PlaybackStatus, Renderer};
pub use text::render_text;
