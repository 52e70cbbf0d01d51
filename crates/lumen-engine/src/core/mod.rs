//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop + pacer)
//! and the game. The runtime decides *when* input, updates and frames happen; the
//! `App` decides *what* they do.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx, UpdateCtx};
