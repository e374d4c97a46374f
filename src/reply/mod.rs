//! Reply rendering.

pub mod renderer;

pub use renderer::ReplyRenderer;
