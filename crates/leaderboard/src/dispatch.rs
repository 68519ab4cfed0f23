//! Background dispatcher
//!
//! Runs a [`LeaderboardClient`] on its own thread with a single-threaded
//! tokio runtime. Requests go in over an unbounded channel and are served in
//! order; results come back over a std channel the game loop drains with
//! [`BackgroundLeaderboard::try_recv`], so the loop never blocks on I/O.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc as async_mpsc;
use tracing::{debug, warn};

use crate::client::LeaderboardClient;
use crate::entry::{LeaderboardEntry, ScoreSubmission, SubmitResponse};
use crate::error::LeaderboardError;

enum Request {
    Submit(ScoreSubmission),
    FetchTop(usize),
}

/// A completed leaderboard call
#[derive(Debug)]
pub enum LeaderboardEvent {
    Submitted {
        name: String,
        result: Result<SubmitResponse, LeaderboardError>,
    },
    Top(Result<Vec<LeaderboardEntry>, LeaderboardError>),
}

pub struct BackgroundLeaderboard {
    requests: async_mpsc::UnboundedSender<Request>,
    events: mpsc::Receiver<LeaderboardEvent>,
}

impl BackgroundLeaderboard {
    /// Start the worker thread
    ///
    /// The worker exits once this handle is dropped and its queue drains.
    pub fn spawn<C>(client: C) -> std::io::Result<Self>
    where
        C: LeaderboardClient + Send + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (req_tx, mut req_rx) = async_mpsc::unbounded_channel::<Request>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("leaderboard".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(request) = req_rx.recv().await {
                        let event = match request {
                            Request::Submit(submission) => {
                                let name = submission.name().to_string();
                                let result = client.submit(submission).await;
                                LeaderboardEvent::Submitted { name, result }
                            }
                            Request::FetchTop(n) => {
                                LeaderboardEvent::Top(client.fetch_top(n).await)
                            }
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                    debug!("leaderboard worker stopped");
                });
            })?;

        Ok(Self {
            requests: req_tx,
            events: event_rx,
        })
    }

    /// Queue a submission
    pub fn submit(&self, submission: ScoreSubmission) -> Result<(), LeaderboardError> {
        self.enqueue(Request::Submit(submission))
    }

    /// Queue a fetch of the top `n` entries
    pub fn fetch_top(&self, n: usize) -> Result<(), LeaderboardError> {
        self.enqueue(Request::FetchTop(n))
    }

    fn enqueue(&self, request: Request) -> Result<(), LeaderboardError> {
        self.requests.send(request).map_err(|_| {
            warn!("leaderboard worker is gone");
            LeaderboardError::Transport("leaderboard worker stopped".to_string())
        })
    }

    /// Next completed call, if any
    pub fn try_recv(&self) -> Option<LeaderboardEvent> {
        self.events.try_recv().ok()
    }

    /// Wait up to `timeout` for the next completed call
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LeaderboardEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryLeaderboard;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn results_arrive_in_request_order() {
        let local = InMemoryLeaderboard::default();
        let worker = BackgroundLeaderboard::spawn(local.clone()).unwrap();

        worker.submit(ScoreSubmission::new("Ada", 50).unwrap()).unwrap();
        worker.fetch_top(10).unwrap();

        match worker.recv_timeout(WAIT) {
            Some(LeaderboardEvent::Submitted { name, result }) => {
                assert_eq!(name, "Ada");
                assert_eq!(result.unwrap().score, 50);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match worker.recv_timeout(WAIT) {
            Some(LeaderboardEvent::Top(Ok(top))) => {
                assert_eq!(top, vec![LeaderboardEntry::new("Ada", 50)]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(local.table().get("Ada"), Some(50));
    }

    #[test]
    fn try_recv_does_not_block() {
        let worker = BackgroundLeaderboard::spawn(InMemoryLeaderboard::default()).unwrap();
        assert!(worker.try_recv().is_none());
    }
}
