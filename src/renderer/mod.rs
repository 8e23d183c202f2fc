//! Rendering module
//!
//! The game produces a backend-agnostic draw list each frame (`scene`), which
//! is replayed by either the browser canvas backend or the CPU backend used
//! for native/headless runs.

mod commands;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
pub mod software;

pub use commands::{Color, DrawCommand, Renderer, colors};
pub use scene::build_frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
#[cfg(not(target_arch = "wasm32"))]
pub use software::SoftwareRenderer;
