//! Game session - one engine, one tick timer, and the leaderboard hand-off
//!
//! The session is what the event loop drives: actions and elapsed time go
//! in, and on game over the final score is queued for submission exactly
//! once. Leaderboard results are drained without blocking and only ever
//! touch the HUD, never the engine.

use std::time::Duration;

use tracing::{info, warn};

use crate::core::{ActionOutcome, GameState, PieceSource, RandomPieces, TickReport, TickScheduler};
use crate::leaderboard::{BackgroundLeaderboard, LeaderboardEvent, ScoreSubmission, SubmitOutcome};
use crate::term::HudView;
use crate::types::{GameAction, LEADERBOARD_TOP_N};
use crate::ClientConfig;

pub struct GameSession<S = RandomPieces> {
    game: GameState<S>,
    ticks: TickScheduler,
    player: Option<String>,
    leaderboard: Option<BackgroundLeaderboard>,
    top: Vec<(String, u32)>,
    message: Option<String>,
}

impl GameSession<RandomPieces> {
    /// Seeded from `config`, or from OS entropy when no seed is set
    pub fn new(config: &ClientConfig, leaderboard: Option<BackgroundLeaderboard>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, "new session");
        Self::with_game(
            GameState::new(seed),
            config.tick,
            config.player.clone(),
            leaderboard,
        )
    }
}

impl<S: PieceSource> GameSession<S> {
    pub fn with_game(
        game: GameState<S>,
        tick: Duration,
        player: Option<String>,
        leaderboard: Option<BackgroundLeaderboard>,
    ) -> Self {
        let session = Self {
            game,
            ticks: TickScheduler::new(tick),
            player,
            leaderboard,
            top: Vec::new(),
            message: None,
        };
        session.refresh_leaderboard();
        session
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Latest top entries, best first
    pub fn top(&self) -> &[(String, u32)] {
        &self.top
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hud(&self) -> HudView<'_> {
        HudView {
            player: self.player.as_deref().unwrap_or_default(),
            leaderboard: &self.top,
            message: self.message.as_deref(),
        }
    }

    /// How long the loop may wait before a tick is due; `None` while suspended
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.ticks.time_until_next(self.game.status())
    }

    pub fn apply(&mut self, action: GameAction) -> ActionOutcome {
        let outcome = self.game.apply_action(action);
        match outcome {
            ActionOutcome::Restarted => {
                self.ticks.reset();
                self.message = None;
                self.refresh_leaderboard();
            }
            _ => {
                if let Some(final_score) = outcome.final_score() {
                    self.ticks.reset();
                    self.finish(final_score);
                }
            }
        }
        outcome
    }

    /// Run every automatic drop due after `elapsed`
    pub fn advance(&mut self, elapsed: Duration) -> TickReport {
        let report = self.ticks.run_due(&mut self.game, elapsed);
        if let Some(final_score) = report.final_score {
            self.finish(final_score);
        }
        report
    }

    /// Charge `elapsed` to the tick timer, then apply `action` if any
    ///
    /// Time that passed while paused is discarded before a resume applies.
    pub fn step(
        &mut self,
        elapsed: Duration,
        action: Option<GameAction>,
    ) -> Option<ActionOutcome> {
        self.advance(elapsed);
        action.map(|action| self.apply(action))
    }

    /// Apply finished leaderboard calls to the HUD; true if anything changed
    pub fn poll_leaderboard(&mut self) -> bool {
        let mut events = Vec::new();
        if let Some(leaderboard) = &self.leaderboard {
            while let Some(event) = leaderboard.try_recv() {
                events.push(event);
            }
        }
        let changed = !events.is_empty();
        for event in events {
            self.on_event(event);
        }
        changed
    }

    fn on_event(&mut self, event: LeaderboardEvent) {
        match event {
            LeaderboardEvent::Submitted { name, result } => match result {
                Ok(response) => {
                    info!(name = %name, score = response.score, outcome = ?response.outcome, "score submitted");
                    self.message = Some(match response.outcome {
                        SubmitOutcome::Inserted => format!("{name} entered with {}", response.score),
                        SubmitOutcome::Updated => format!("new best for {name}: {}", response.score),
                        SubmitOutcome::Unchanged => format!("best for {name} stays {}", response.score),
                    });
                    self.refresh_leaderboard();
                }
                Err(err) => {
                    warn!(name = %name, %err, "score submission failed");
                    self.message = Some(format!("score not saved: {err}"));
                }
            },
            LeaderboardEvent::Top(Ok(entries)) => {
                self.top = entries.into_iter().map(|e| (e.name, e.score)).collect();
            }
            LeaderboardEvent::Top(Err(err)) => {
                warn!(%err, "leaderboard fetch failed");
                self.message.get_or_insert_with(|| "leaderboard offline".to_string());
            }
        }
    }

    /// Hand the final score to the leaderboard
    fn finish(&mut self, final_score: u32) {
        info!(final_score, lines = self.game.lines(), "game over");

        let Some(player) = self.player.as_deref() else {
            self.message = Some(format!("final score {final_score}"));
            return;
        };
        let Some(leaderboard) = &self.leaderboard else {
            self.message = Some(format!("final score {final_score} (offline)"));
            return;
        };

        let queued = ScoreSubmission::new(player, final_score)
            .and_then(|submission| leaderboard.submit(submission));
        self.message = Some(match queued {
            Ok(()) => format!("submitting {final_score}..."),
            Err(err) => {
                warn!(%err, "score not submitted");
                format!("score not saved: {err}")
            }
        });
    }

    fn refresh_leaderboard(&self) {
        if let Some(leaderboard) = &self.leaderboard {
            // A stopped worker also fails the next submission, which reports it.
            let _ = leaderboard.fetch_top(LEADERBOARD_TOP_N);
        }
    }
}
