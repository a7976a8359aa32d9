//! Brew countdown timer
//!
//! [`TimerCore`] is the plain state machine and can be driven by hand.
//! [`TimerEngine`] wraps it with a repeating tokio tick task that it owns and
//! cancels on pause, reset, adjust, and drop.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// How often a running timer wakes up to count down.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Signals emitted to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Remaining time reached zero. Sent once per run.
    Completed,
}

/// Countdown state machine without any clock attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerCore {
    total: Duration,
    remaining: Duration,
    state: TimerState,
}

impl TimerCore {
    pub const fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
            state: TimerState::Idle,
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn total(&self) -> Duration {
        self.total
    }

    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Idle or Paused -> Running. Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
            TimerState::Running | TimerState::Completed => false,
        }
    }

    /// Running -> Paused, keeping the remaining time.
    pub fn pause(&mut self) -> bool {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
            true
        } else {
            false
        }
    }

    /// Any state -> Idle with the full total restored.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = self.total;
    }

    /// Replace total and remaining time.
    ///
    /// A running timer keeps running from the new total; anything else
    /// returns to Idle. Returns whether the timer was running.
    pub fn adjust_total(&mut self, total: Duration) -> bool {
        let was_running = self.state == TimerState::Running;
        self.total = total;
        self.remaining = total;
        self.state = if was_running {
            TimerState::Running
        } else {
            TimerState::Idle
        };
        was_running
    }

    /// Count down by `elapsed` while running.
    ///
    /// Reaching zero moves to Completed, pins remaining at zero, and returns
    /// [`TimerEvent::Completed`] exactly once.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.state = TimerState::Completed;
            Some(TimerEvent::Completed)
        } else {
            None
        }
    }

    /// Fraction of the total already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.total - self.remaining).as_secs_f64() / self.total.as_secs_f64()
    }

    /// Remaining time as `m:ss`, truncating partial seconds.
    pub fn time_string(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Timer state shared with the tick task.
///
/// `generation` changes whenever a tick task is cancelled, so a task that was
/// already past its await when aborted sees it is stale once it gets the lock.
#[derive(Debug)]
struct Shared {
    core: TimerCore,
    generation: u64,
}

impl Shared {
    /// Apply one tick from the task started as `generation`.
    ///
    /// `Break` tells the task to exit, carrying the completion event when the
    /// countdown just finished.
    fn tick(&mut self, generation: u64, elapsed: Duration) -> ControlFlow<Option<TimerEvent>> {
        if generation != self.generation || self.core.state() != TimerState::Running {
            return ControlFlow::Break(None);
        }
        match self.core.advance(elapsed) {
            Some(event) => ControlFlow::Break(Some(event)),
            None => ControlFlow::Continue(()),
        }
    }
}

/// Countdown timer with its own tick task.
///
/// Must be used from within a tokio runtime. At most one tick task is alive
/// per engine.
pub struct TimerEngine {
    shared: Arc<Mutex<Shared>>,
    events: mpsc::UnboundedSender<TimerEvent>,
    ticker: Option<JoinHandle<()>>,
}

impl TimerEngine {
    /// Create an idle timer and the receiver for its completion events.
    pub fn new(total: Duration) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            shared: Arc::new(Mutex::new(Shared {
                core: TimerCore::new(total),
                generation: 0,
            })),
            events,
            ticker: None,
        };
        (engine, receiver)
    }

    /// Start or resume. No-op when already running or completed.
    pub fn start(&mut self) {
        if lock(&self.shared).core.start() {
            self.spawn_ticker();
        }
    }

    pub fn pause(&mut self) {
        self.cancel_ticker();
        lock(&self.shared).core.pause();
    }

    pub fn reset(&mut self) {
        self.cancel_ticker();
        lock(&self.shared).core.reset();
    }

    /// Change the duration, restarting the tick if the timer was running.
    pub fn adjust_total(&mut self, total: Duration) {
        self.cancel_ticker();
        if lock(&self.shared).core.adjust_total(total) {
            self.spawn_ticker();
        }
    }

    pub fn state(&self) -> TimerState {
        lock(&self.shared).core.state()
    }

    pub fn total(&self) -> Duration {
        lock(&self.shared).core.total()
    }

    pub fn remaining(&self) -> Duration {
        lock(&self.shared).core.remaining()
    }

    pub fn progress(&self) -> f64 {
        lock(&self.shared).core.progress()
    }

    pub fn time_string(&self) -> String {
        lock(&self.shared).core.time_string()
    }

    fn spawn_ticker(&mut self) {
        self.cancel_ticker();
        let shared = Arc::clone(&self.shared);
        let generation = lock(&self.shared).generation;
        let events = self.events.clone();
        let started = Instant::now();

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(started + TICK_INTERVAL, TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last = started;

            loop {
                interval.tick().await;
                let now = Instant::now();
                let elapsed = now.saturating_duration_since(last);
                last = now;

                let flow = lock(&shared).tick(generation, elapsed);
                if let ControlFlow::Break(event) = flow {
                    if let Some(event) = event {
                        tracing::debug!("Brew timer completed");
                        // The host may have dropped the receiver
                        events.send(event).ok();
                    }
                    break;
                }
            }
        }));
    }

    fn cancel_ticker(&mut self) {
        lock(&self.shared).generation += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
