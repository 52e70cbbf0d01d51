use crate::input::InputEvent;
use crate::time::RateReport;

use super::ctx::{FrameCtx, InputCtx, UpdateCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game.
///
/// All callbacks run on the event-loop thread, one at a time, and must not block.
pub trait App {
    /// Called for every translated input event, after it was folded into the
    /// `InputState`.
    fn on_input(&mut self, event: &InputEvent, ctx: &mut InputCtx<'_>) -> AppControl {
        let _ = (event, ctx);
        AppControl::Continue
    }

    /// Called once per fixed logic step.
    fn on_update(&mut self, ctx: &mut UpdateCtx<'_>) -> AppControl;

    /// Called once per paced frame.
    fn on_render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called when the pacer closes a reporting interval.
    fn on_report(&mut self, report: &RateReport) {
        let _ = report;
    }
}
