//! Text rendering for the token top-up report.

pub mod renderer;

pub use renderer::render;
