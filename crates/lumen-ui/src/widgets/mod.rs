pub mod button;
pub mod progress;
