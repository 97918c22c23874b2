//! Adaptive status-bar theming engine
//!
//! Consumes host lifecycle events and decides when the status bar color
//! should change. Load events sample immediately; scroll events are
//! debounced so a burst of scrolling produces one sample once motion has
//! settled.
//!
//! ```text
//! Idle ──event──▶ Sampling ──significant──▶ Updating ──▶ Idle
//!                    │
//!                    └──skip / not significant──▶ Idle
//! ```

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::theme::color::{appearance_directive, is_significant_change, Appearance, Rgb};
use crate::theme::sampler::{sample_dominant, RenderSurface};
use crate::theme::scheduler::{Scheduler, TimerToken};

/// Quiet period after the last scroll event before sampling
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(10);

/// Inbound events from the host view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    /// Page load started
    LoadStarted,
    /// Page load progress (0-100)
    ProgressChanged(u8),
    /// Page load finished
    LoadFinished,
    /// Content scrolled
    Scroll,
    /// A timer requested by the engine fired
    DeferredSample(TimerToken),
    /// Height of the reserved status-bar overlay changed
    InsetsChanged(u32),
    /// The host view is being destroyed
    Teardown,
}

/// Payload of the color-changed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorChange {
    pub color: Rgb,
    pub appearance: Appearance,
}

impl ColorChange {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            appearance: appearance_directive(color),
        }
    }
}

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Sampling,
    Updating,
    TornDown,
}

/// Counters for one engine lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplingStats {
    /// Sampling passes that produced a color
    pub samples: u64,
    /// Passes skipped because the surface could not be captured
    pub skipped: u64,
    /// Color changes emitted
    pub changes: u64,
}

/// Theming state machine owning the current dominant color
pub struct ThemeEngine<S: Scheduler> {
    scheduler: S,
    current: Rgb,
    offset: u32,
    debounce: Duration,
    pending: Option<TimerToken>,
    phase: EnginePhase,
    stats: SamplingStats,
}

impl<S: Scheduler> ThemeEngine<S> {
    /// Create an engine that starts from black with no overlay offset
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            current: Rgb::BLACK,
            offset: 0,
            debounce: SCROLL_DEBOUNCE,
            pending: None,
            phase: EnginePhase::Idle,
            stats: SamplingStats::default(),
        }
    }

    /// Set the color considered current before the first sample
    pub fn with_initial_color(mut self, color: Rgb) -> Self {
        self.current = color;
        self
    }

    /// Set the status-bar overlay height to skip when sampling
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// The dominant color currently applied
    pub fn current_color(&self) -> Rgb {
        self.current
    }

    /// Foreground directive for the current color
    pub fn appearance(&self) -> Appearance {
        appearance_directive(self.current)
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn stats(&self) -> SamplingStats {
        self.stats
    }

    /// Token of the deferred scroll sample, if one is outstanding
    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Process one host event
    ///
    /// Returns the color change to apply, if this event produced one.
    pub fn handle<R: RenderSurface + ?Sized>(
        &mut self,
        event: ThemeEvent,
        surface: &R,
    ) -> Option<ColorChange> {
        if self.phase == EnginePhase::TornDown {
            trace!(?event, "Ignoring event after teardown");
            return None;
        }

        match event {
            ThemeEvent::LoadStarted | ThemeEvent::ProgressChanged(_) | ThemeEvent::LoadFinished => {
                self.sample_pass(surface)
            }
            ThemeEvent::Scroll => {
                self.defer_sample();
                None
            }
            ThemeEvent::DeferredSample(token) => {
                if self.pending != Some(token) {
                    debug!(token = token.id(), "Stale deferred sample");
                    return None;
                }
                self.pending = None;
                self.sample_pass(surface)
            }
            ThemeEvent::InsetsChanged(height) => {
                self.offset = height;
                None
            }
            ThemeEvent::Teardown => {
                self.teardown();
                None
            }
        }
    }

    /// Cancel any pending sample and stop reacting to events
    pub fn teardown(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
        self.phase = EnginePhase::TornDown;
    }

    /// Replace the outstanding scroll timer with a fresh one
    fn defer_sample(&mut self) {
        if let Some(previous) = self.pending.take() {
            self.scheduler.cancel(previous);
        }
        self.pending = Some(self.scheduler.schedule(self.debounce));
    }

    fn sample_pass<R: RenderSurface + ?Sized>(&mut self, surface: &R) -> Option<ColorChange> {
        self.phase = EnginePhase::Sampling;

        let sampled = match sample_dominant(surface, self.offset) {
            Ok(color) => color,
            Err(e) => {
                if !e.is_sample_skip() {
                    warn!("Render surface failed: {}", e);
                }
                debug!("Skipping sampling pass: {}", e);
                self.stats.skipped += 1;
                self.phase = EnginePhase::Idle;
                return None;
            }
        };
        self.stats.samples += 1;

        if !is_significant_change(sampled, self.current) {
            self.phase = EnginePhase::Idle;
            return None;
        }

        self.phase = EnginePhase::Updating;
        let change = ColorChange::new(sampled);
        debug!(
            from = %self.current,
            to = %sampled,
            appearance = %change.appearance,
            "Status bar color changed"
        );
        self.current = sampled;
        self.stats.changes += 1;
        self.phase = EnginePhase::Idle;

        Some(change)
    }
}

impl<S: Scheduler> Drop for ThemeEngine<S> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}
