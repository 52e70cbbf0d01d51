//! Lumen engine crate.
//!
//! This crate owns the fixed-timestep pacer plus the platform and GPU runtime
//! pieces used by the UI and game layers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
