//! Async driver for the theming engine
//!
//! Runs one [`ThemeEngine`] on a single tokio task. Host events arrive on
//! an mpsc channel, debounce timers come back on the scheduler's channel,
//! and color changes are forwarded to the host on a third channel.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Result, ShellError};
use crate::theme::engine::{ColorChange, SamplingStats, ThemeEngine, ThemeEvent};
use crate::theme::sampler::RenderSurface;
use crate::theme::scheduler::{tokio_scheduler, TimerToken, TokioScheduler};

/// Event loop owning an engine and the surface it samples
pub struct ThemeDriver<R> {
    engine: ThemeEngine<TokioScheduler>,
    timers: mpsc::UnboundedReceiver<TimerToken>,
    surface: R,
    events: mpsc::Receiver<ThemeEvent>,
    updates: mpsc::Sender<ColorChange>,
}

impl<R: RenderSurface> ThemeDriver<R> {
    /// Run until teardown, until every event sender is gone, or until the
    /// update receiver is dropped
    pub async fn run(mut self) -> SamplingStats {
        loop {
            let event = tokio::select! {
                maybe = self.events.recv() => match maybe {
                    Some(event) => event,
                    None => break,
                },
                Some(token) = self.timers.recv() => ThemeEvent::DeferredSample(token),
            };

            let is_teardown = event == ThemeEvent::Teardown;
            if let Some(change) = self.engine.handle(event, &self.surface) {
                if self.updates.send(change).await.is_err() {
                    debug!("Color change receiver dropped, stopping theming driver");
                    break;
                }
            }

            if is_teardown {
                break;
            }
        }

        self.engine.teardown();
        self.engine.stats()
    }
}

/// Handle used by the host to feed a spawned driver
#[derive(Debug)]
pub struct ThemeHandle {
    tx: mpsc::Sender<ThemeEvent>,
    task: JoinHandle<SamplingStats>,
}

impl ThemeHandle {
    /// Deliver a host event
    pub async fn send(&self, event: ThemeEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| ShellError::Custom("Theming driver has stopped".into()))
    }

    /// A clone of the event sender, for hosts that dispatch from several places
    pub fn sender(&self) -> mpsc::Sender<ThemeEvent> {
        self.tx.clone()
    }

    /// Tear the engine down and wait for the driver to finish
    pub async fn shutdown(self) -> Result<SamplingStats> {
        // The driver may already be gone; the join below still reports its stats.
        let _ = self.tx.send(ThemeEvent::Teardown).await;
        self.task
            .await
            .map_err(|e| ShellError::Custom(format!("Theming driver failed: {}", e)))
    }
}

/// Spawn a driver sampling `surface` below an overlay of height `offset`
///
/// Returns the host handle and the receiver color changes arrive on.
pub fn spawn_driver<R>(surface: R, offset: u32) -> (ThemeHandle, mpsc::Receiver<ColorChange>)
where
    R: RenderSurface + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(100);
    let (update_tx, update_rx) = mpsc::channel(100);
    let (scheduler, timers) = tokio_scheduler();

    let driver = ThemeDriver {
        engine: ThemeEngine::new(scheduler).with_offset(offset),
        timers,
        surface,
        events: event_rx,
        updates: update_tx,
    };
    let task = tokio::spawn(driver.run());

    (
        ThemeHandle {
            tx: event_tx,
            task,
        },
        update_rx,
    )
}
