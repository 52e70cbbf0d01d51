//! Lumen UI: immediate-style widgets for game screens on top of `lumen-engine`.
//!
//! Widgets own their bounds and interaction state, receive pointer input as
//! [`UiEvent`](event::UiEvent)s and paint solid rectangles through a
//! [`Painter`](painter::Painter).
//!
//! ```rust,ignore
//! use lumen_ui::prelude::*;
//!
//! let mut play = Button::new(Rect::new(40.0, 40.0, 200.0, 48.0), MenuAction::Play);
//!
//! // on input:
//! if let Some(ev) = UiEvent::from_input(&input_event) {
//!     if let Some(action) = play.handle(&ev) {
//!         // ...
//!     }
//! }
//!
//! // on render:
//! let mut painter = Painter::new(draw_list);
//! play.paint(&mut painter);
//! ```

pub mod event;
pub mod painter;
pub mod widget;
pub mod widgets;

/// Everything a screen needs to build and draw widgets.
pub mod prelude {
    pub use crate::event::UiEvent;
    pub use crate::painter::Painter;
    pub use crate::widget::Widget;
    pub use crate::widgets::{
        button::{Button, ButtonPalette, ButtonVisual},
        progress::ProgressBar,
    };

    // Re-export the engine primitives everyone needs.
    pub use lumen_engine::coords::{Rect, Vec2};
    pub use lumen_engine::paint::Color;
    pub use lumen_engine::scene::{DrawList, ZIndex};
}
