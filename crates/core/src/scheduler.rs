//! Tick scheduler - the fixed-period automatic drop
//!
//! A fixed-timestep accumulator: callers feed it wall-clock time and it tells
//! them how many drops are due. Time only accumulates while the game is
//! running, so a pause or game over suspends the timer without a catch-up
//! burst on resume. There is one scheduler per session; `reset` rearms it on
//! restart, so a restart never leaves a second timer behind.

use std::time::Duration;

use crate::game_state::{DropOutcome, GameState};
use crate::rng::PieceSource;
use crate::types::{GameStatus, TICK_MS};

/// What a batch of ticks did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Drops attempted
    pub drops: u32,
    /// Pieces that locked
    pub locked: u32,
    pub lines_cleared: u32,
    /// Set when a tick ended the game
    pub final_score: Option<u32>,
}

impl TickReport {
    pub fn changed(&self) -> bool {
        self.drops > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickScheduler {
    period: Duration,
    elapsed: Duration,
}

impl TickScheduler {
    /// # Panics
    ///
    /// Panics on a zero period.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "tick period must be non-zero");
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time accumulated toward the next tick
    pub fn pending(&self) -> Duration {
        self.elapsed
    }

    /// Discard accumulated time
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Accumulate `elapsed` and return the number of due ticks
    ///
    /// Returns 0 and accumulates nothing unless `status` is Running.
    pub fn advance(&mut self, elapsed: Duration, status: GameStatus) -> u32 {
        if !status.is_running() {
            return 0;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed);

        let period = self.period.as_nanos();
        let total = self.elapsed.as_nanos();
        let due = (total / period).min(u32::MAX as u128) as u32;
        // The remainder is below `period`, which itself fits in a Duration.
        self.elapsed = Duration::from_nanos((total % period) as u64);
        due
    }

    /// Wait until the next tick is due, or `None` while suspended
    pub fn time_until_next(&self, status: GameStatus) -> Option<Duration> {
        status
            .is_running()
            .then(|| self.period.saturating_sub(self.elapsed))
    }

    /// Advance and run every due drop against `game`
    ///
    /// Stops at game over and clears the remaining accumulated time.
    pub fn run_due<S: PieceSource>(
        &mut self,
        game: &mut GameState<S>,
        elapsed: Duration,
    ) -> TickReport {
        let mut report = TickReport::default();
        let due = self.advance(elapsed, game.status());

        for _ in 0..due {
            report.drops += 1;
            match game.drop() {
                DropOutcome::Moved => {}
                DropOutcome::Locked { lines_cleared } => {
                    report.locked += 1;
                    report.lines_cleared += lines_cleared;
                }
                DropOutcome::GameOver {
                    final_score,
                    lines_cleared,
                } => {
                    report.locked += 1;
                    report.lines_cleared += lines_cleared;
                    report.final_score = Some(final_score);
                    self.reset();
                    break;
                }
                DropOutcome::Ignored => break,
            }
        }
        report
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS as u64))
    }
}
