//! Adaptive status-bar theming
//!
//! This module contains:
//! - Color primitives and the contrast/significance decisions
//! - Dominant-color sampling of a rendered row
//! - The cancellable timer abstraction used for scroll debouncing
//! - The theming state machine and its tokio driver

pub mod color;
pub mod driver;
pub mod engine;
pub mod sampler;
pub mod scheduler;
pub mod surface;

pub use color::{appearance_directive, is_significant_change, Appearance, Rgb};
pub use driver::{spawn_driver, ThemeHandle};
pub use engine::{ColorChange, ThemeEngine, ThemeEvent};
pub use sampler::{PixelRow, RenderSurface};
pub use scheduler::{ManualScheduler, Scheduler, TimerToken, TokioScheduler};
pub use surface::ImageSurface;
