use std::time::Duration;

use anyhow::{ensure, Result};
use winit::dpi::LogicalSize;

use lumen_engine::coords::Viewport;
use lumen_engine::device::GpuInit;
use lumen_engine::logging::LoggingConfig;
use lumen_engine::time::{CatchUp, PacerConfig};
use lumen_engine::window::RuntimeConfig;

/// Logical size of the window at scale 1.
pub const BASE_SIZE: (f64, f64) = (640.0, 360.0);

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub updates_per_second: f64,
    pub frames_per_second: f64,
    /// Window size multiplier applied to `BASE_SIZE`.
    pub scale: f64,
    /// Maximum updates per iteration when catching up; `None` keeps one update
    /// per iteration.
    pub catch_up: Option<u32>,
    pub busy_wait: bool,
    pub vsync: bool,
    /// `env_logger` filter; `None` falls back to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 200.0,
            frames_per_second: 120.0,
            scale: 1.5,
            catch_up: None,
            busy_wait: false,
            vsync: false,
            log_filter: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.scale.is_finite() && self.scale > 0.0,
            "scale must be a positive finite number, got {}",
            self.scale
        );
        self.pacer_config().validate()
    }

    pub fn pacer_config(&self) -> PacerConfig {
        PacerConfig {
            updates_per_second: self.updates_per_second,
            frames_per_second: self.frames_per_second,
            catch_up: match self.catch_up {
                Some(max_steps) => CatchUp::Drain { max_steps },
                None => CatchUp::SingleStep,
            },
            report_interval: Some(Duration::from_secs(1)),
        }
    }

    pub fn window_size(&self) -> Viewport {
        Viewport::new((BASE_SIZE.0 * self.scale) as f32, (BASE_SIZE.1 * self.scale) as f32)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let size = self.window_size();
        RuntimeConfig {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(size.width as f64, size.height as f64),
            resizable: true,
            busy_wait: self.busy_wait,
            pacer: self.pacer_config(),
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default().vsync(self.vsync)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log_filter {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }
}
