//! Driving a table from decisions that arrive over a channel.
//!
//! A transport (socket relay, UI thread) receives a [`TurnRequest`] for every
//! granted turn and answers with the request's ticket and a [`Decision`].
//! Answers that do not carry the pending ticket are dropped, so a participant
//! who reconnects late can only act on a turn that is still open.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::decision::{Decision, TurnTicket};
use crate::engine::{HandSummary, Progress, Table};
use crate::errors::GameError;
use crate::game::GameStateSnapshot;
use crate::rules::ValidActions;

pub const DEFAULT_TURN_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a remote participant needs to decide one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub ticket: TurnTicket,
    pub state: GameStateSnapshot,
    pub valid_actions: ValidActions,
    /// The acting player's own hole cards
    pub hole_cards: Option<[Card; 2]>,
}

pub struct ChannelDecider {
    requests: Sender<TurnRequest>,
    decisions: Receiver<(TurnTicket, Decision)>,
    timeout: Duration,
}

impl ChannelDecider {
    pub fn new(requests: Sender<TurnRequest>, decisions: Receiver<(TurnTicket, Decision)>) -> Self {
        Self {
            requests,
            decisions,
            timeout: DEFAULT_TURN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Plays one hand on `table`. A turn that times out, whose answer is
    /// invalid, or whose participant has hung up is forfeited (check, else fold).
    pub fn play_hand(&mut self, table: &mut Table) -> Result<HandSummary, GameError> {
        let mut progress = table.start_hand()?;
        loop {
            let ticket = match progress {
                Progress::HandComplete(summary) => return Ok(summary),
                Progress::AwaitingDecision(ticket) => ticket,
            };
            let seat = ticket.player_id;
            let request = TurnRequest {
                ticket,
                state: table.snapshot(),
                valid_actions: table.valid_actions(seat)?,
                hole_cards: table.players()[seat].hole_cards(),
            };
            if self.requests.send(request).is_err() {
                debug!(player = seat, "request channel closed");
            }

            progress = match self.await_answer(ticket) {
                Some(decision) => match table.submit(ticket, decision) {
                    Err(GameError::InvalidAction { .. }) => table.forfeit_turn(ticket)?,
                    other => other?,
                },
                None => {
                    info!(hand = ticket.hand_number, player = seat, "turn timed out");
                    table.forfeit_turn(ticket)?
                }
            };
        }
    }

    /// Waits for an answer carrying `ticket`, dropping any other.
    fn await_answer(&self, ticket: TurnTicket) -> Option<Decision> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.decisions.recv_timeout(left) {
                Ok((t, decision)) if t == ticket => return Some(decision),
                Ok((t, _)) => {
                    warn!(
                        expected_turn = ticket.turn,
                        got_turn = t.turn,
                        player = t.player_id,
                        "discarding answer for a turn that is not pending"
                    );
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TableConfig;
    use crate::rules::ActionKind;
    use std::sync::mpsc;
    use std::thread;

    fn table() -> Table {
        Table::new(TableConfig {
            seats: 2,
            seed: 7,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn silent_participant_checks_or_folds() {
        let (req_tx, _req_rx) = mpsc::channel();
        let (_dec_tx, dec_rx) = mpsc::channel();
        let mut decider = ChannelDecider::new(req_tx, dec_rx).with_timeout(Duration::from_millis(5));
        let mut t = table();
        let summary = decider.play_hand(&mut t).unwrap();
        // small blind times out facing a bet and folds
        assert!(!summary.showdown);
        assert_eq!(summary.winners[0].player_id, 1);
        assert_eq!(t.total_chips(), 2_000);
    }

    #[test]
    fn stale_answers_are_ignored() {
        let (req_tx, req_rx) = mpsc::channel::<TurnRequest>();
        let (dec_tx, dec_rx) = mpsc::channel();
        let remote = thread::spawn(move || {
            for req in req_rx {
                let stale = TurnTicket {
                    turn: req.ticket.turn + 100,
                    ..req.ticket
                };
                dec_tx.send((stale, Decision::fold())).unwrap();
                let answer = if req.valid_actions.can_check {
                    Decision::check()
                } else {
                    Decision::call()
                };
                dec_tx.send((req.ticket, answer)).unwrap();
            }
        });
        let mut decider = ChannelDecider::new(req_tx, dec_rx).with_timeout(Duration::from_secs(5));
        let mut t = table();
        let summary = decider.play_hand(&mut t).unwrap();
        assert!(summary.showdown);
        let events = t.drain_events();
        assert!(events.iter().all(|e| !matches!(
            e,
            crate::events::EngineEvent::PlayerActed {
                action: ActionKind::Fold,
                ..
            }
        )));
        drop(decider);
        remote.join().unwrap();
    }
}
