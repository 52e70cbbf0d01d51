//! Input subsystem.
//!
//! The public API does not expose winit types. The runtime translates platform
//! events into `InputEvent`s (see `platform::winit`), folds them into an
//! `InputState`, and hands them to the application for dispatch.

mod frame;
mod state;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
};
