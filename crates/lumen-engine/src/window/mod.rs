//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the game window, wires them to the GPU layer
//! and drives the `App` from a `FramePacer`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
