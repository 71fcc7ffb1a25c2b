//! The 250 ms per-room clock ticker (§4.7, §5). Pacing (`Ticker`) and the
//! wall-clock baseline deltas are charged from (`TickBaseline`) are kept
//! separate, because §4.7 also requires `makeMove` to charge a final
//! pre-apply tick for the mover's think time since the last tick and
//! reset the baseline — that path doesn't go through the periodic
//! `Ticker` at all, but must still read and reset the same baseline so
//! time is never double-charged between the two.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{interval, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Paces a room's background clock loop to one wakeup per `TICK_PERIOD`.
/// Carries no timestamp of its own — elapsed time is read from the
/// room's `TickBaseline` after each wakeup.
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new() -> Self {
        let mut interval = interval(TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Ticker { interval }
    }

    /// Waits for the next 250 ms boundary.
    pub async fn wait(&mut self) {
        self.interval.tick().await;
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Ticker::new()
    }
}

/// The wall-clock timestamp a room's think-time deltas are measured from.
/// `Room::tick` only ever sees a plain millisecond delta, never a raw
/// `Instant`, so room logic stays synchronous and independently
/// testable; this is the one place real time is read, shared between the
/// periodic ticker task and `makeMove`'s pre-apply tick.
pub struct TickBaseline(Mutex<Instant>);

impl TickBaseline {
    pub fn new() -> Self {
        TickBaseline(Mutex::new(Instant::now()))
    }

    /// Milliseconds elapsed since the last read, then resets the
    /// baseline to now.
    pub fn elapsed_and_reset_ms(&self) -> u64 {
        let mut last = self.0.lock().expect("tick baseline mutex is never poisoned");
        let now = Instant::now();
        let delta = now.saturating_duration_since(*last);
        *last = now;
        delta.as_millis() as u64
    }
}

impl Default for TickBaseline {
    fn default() -> Self {
        TickBaseline::new()
    }
}
