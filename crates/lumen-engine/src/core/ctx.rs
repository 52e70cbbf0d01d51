use std::time::Duration;

use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::{RectRenderer, RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Context passed to `App::on_input`.
pub struct InputCtx<'a> {
    pub input: &'a InputState,
    pub runtime: &'a mut RuntimeCtx,
}

/// Context passed to `App::on_update`.
pub struct UpdateCtx<'a> {
    pub input: &'a InputState,
    /// Transitions since the previous update. Empty for the second and later
    /// updates of a catch-up burst.
    pub input_frame: &'a InputFrame,
    /// Fixed duration simulated by this update.
    pub dt: Duration,
    pub runtime: &'a mut RuntimeCtx,
}

impl UpdateCtx<'_> {
    /// `dt` in seconds, for scaling per-second speeds.
    pub fn dt_secs(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}

/// Per-frame context passed to `App::on_render`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub renderer: &'a mut RectRenderer,
    pub draw_list: &'a mut DrawList,
    pub input: &'a InputState,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Logical window size in logical pixels.
    pub fn viewport(&self) -> Viewport {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        Viewport::new(logical.width as f32, logical.height as f32)
    }

    /// Records the scene with `draw`, clears the surface with `clear`, draws the
    /// scene and presents the frame.
    ///
    /// A minimized window or a transient surface error skips the frame; only a
    /// fatal surface error returns `AppControl::Exit`.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(Viewport, &mut DrawList),
    {
        let viewport = self.viewport();

        self.draw_list.clear();
        draw(viewport, &mut *self.draw_list);

        if !self.gpu.is_drawable() || !viewport.is_valid() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // Both contexts borrow `frame` and `gpu`; dropped before submit() takes frame.
        {
            let rctx = RenderCtx {
                device: self.gpu.device(),
                queue: self.gpu.queue(),
                surface_format: self.gpu.surface_format(),
                viewport,
            };
            let mut target = RenderTarget {
                encoder: &mut frame.encoder,
                color_view: &frame.view,
            };
            self.renderer.render(&rctx, &mut target, self.draw_list, clear);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
