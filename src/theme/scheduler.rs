//! Cancellable deferred execution
//!
//! The theming engine never sleeps itself. It asks a [`Scheduler`] to fire
//! a [`TimerToken`] after a delay and is handed that token back later as a
//! `ThemeEvent::DeferredSample`. Cancelling a token guarantees the engine
//! will not act on it, even if the host already queued the firing.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Identifies one scheduled firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host event-loop timers
pub trait Scheduler {
    /// Fire a fresh token once `delay` has elapsed
    fn schedule(&mut self, delay: Duration) -> TimerToken;

    /// Drop a token that has not fired yet; unknown tokens are ignored
    fn cancel(&mut self, token: TimerToken);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, token: TimerToken) {
        (**self).cancel(token)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Virtual clock
// ─────────────────────────────────────────────────────────────────────────────

/// Scheduler driven by an explicit virtual clock
///
/// Nothing fires on its own: the owner moves time forward with
/// [`ManualScheduler::advance_to`] and feeds the returned tokens back into
/// the engine. Used for deterministic tests and offline replays.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerToken, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of a pending token
    pub fn deadline(&self, token: TimerToken) -> Option<Duration> {
        self.pending.get(&token).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Move the clock to `time` and return every token due by then,
    /// ordered by deadline
    ///
    /// Time never moves backwards; an earlier `time` only collects tokens
    /// that are already due.
    pub fn advance_to(&mut self, time: Duration) -> Vec<(Duration, TimerToken)> {
        self.now = self.now.max(time);

        let mut due: Vec<(Duration, TimerToken)> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= self.now)
            .map(|(&token, &deadline)| (deadline, token))
            .collect();
        due.sort();

        for (_, token) in &due {
            self.pending.remove(token);
        }

        due
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending.insert(token, self.now + delay);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.remove(&token);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokio timers
// ─────────────────────────────────────────────────────────────────────────────

/// Scheduler backed by tokio timers
///
/// Each token is a spawned sleep that posts the token on the channel given
/// at construction. Cancelling aborts the sleep. Must be used from within a
/// tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerToken>,
    next_id: u64,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::UnboundedSender<TimerToken>) -> Self {
        Self {
            tx,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Timers that have neither fired nor been cancelled
    pub fn pending_count(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    /// Abort every outstanding timer
    pub fn cancel_all(&mut self) {
        for (token, handle) in self.tasks.drain() {
            trace!(token = token.id(), "Aborting timer");
            handle.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let token = TimerToken(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the driver has shut down.
            let _ = tx.send(token);
        });

        debug!(token = token.id(), delay_ms = delay.as_millis() as u64, "Scheduled timer");
        self.tasks.insert(token, handle);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
        }
    }
}

/// Create a tokio scheduler and the receiver its tokens arrive on
pub fn tokio_scheduler() -> (TokioScheduler, mpsc::UnboundedReceiver<TimerToken>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TokioScheduler::new(tx), rx)
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
