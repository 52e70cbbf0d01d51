//! GPU device and window surface.
//!
//! Creates the wgpu device for the game window, keeps the swapchain configured
//! across resizes and hands out one encoder + view per presented frame.

mod gpu;
mod init;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
