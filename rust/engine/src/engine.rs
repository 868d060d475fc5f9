use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::cards::Card;
use crate::decision::{Decision, DecisionProvider, TurnTicket};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{BlindPost, EngineEvent, ShownHand, WinnerInfo};
use crate::game::{GameStateSnapshot, Phase, TableConfig};
use crate::hand::best_hand;
use crate::player::Player;
use crate::pot::{self, calculate_side_pots, split_pot, Contribution, Pot};
use crate::rules::{self, ValidActions, ValidatedAction};

/// Where a hand stands after the engine has done all it can on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The engine is suspended until this ticket is resolved via
    /// [`Table::submit`] or [`Table::forfeit_turn`].
    AwaitingDecision(TurnTicket),
    HandComplete(HandSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hand_number: u64,
    pub winners: Vec<WinnerInfo>,
    pub pots: Vec<Pot>,
    pub community_cards: Vec<Card>,
    pub showdown: bool,
    pub eliminated: Vec<usize>,
    /// Set when this hand left a single player with chips
    pub game_over: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub hands_played: u64,
    pub winner: Option<usize>,
    pub chips: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Dealt,
    Betting,
}

/// A single No-Limit Hold'em table and its hand state machine.
///
/// The table is the only writer of the deck, the players and the pots.
/// A hand runs `Idle → blinds → PreFlop → Flop → Turn → River → Showdown → Idle`
/// and suspends once per player turn with exactly one pending [`TurnTicket`].
///
/// # Examples
///
/// ```
/// use riverstone_engine::decision::Decision;
/// use riverstone_engine::engine::Table;
/// use riverstone_engine::game::{GameStateSnapshot, TableConfig};
/// use riverstone_engine::player::Player;
/// use riverstone_engine::rules::ValidActions;
///
/// let mut table = Table::new(TableConfig { seats: 3, ..Default::default() }).unwrap();
/// let mut calling_station =
///     |_: &Player, _: &GameStateSnapshot, v: &ValidActions| Decision::passive(v);
/// let summary = table.play_hand(&mut calling_station).unwrap();
/// assert!(summary.showdown);
/// assert_eq!(table.total_chips(), 3_000);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    deck: Deck,
    players: Vec<Player>,
    hand_number: u64,
    dealer_index: usize,
    phase: Phase,
    community: Vec<Card>,
    current_bet_to_match: u32,
    min_raise: u32,
    stage: Stage,
    pending: Option<TurnTicket>,
    turns_this_hand: u32,
    turns_this_round: u32,
    turn_ceiling: u32,
    chips_at_start: u32,
    preset: Option<Vec<Card>>,
    events: Vec<EngineEvent>,
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        let stacks = vec![config.starting_stack; config.seats];
        Self::with_stacks(config, &stacks)
    }

    /// Seats one player per entry of `stacks`, overriding the configured
    /// seat count and starting stack.
    pub fn with_stacks(config: TableConfig, stacks: &[u32]) -> Result<Self, GameError> {
        let config = TableConfig {
            seats: stacks.len(),
            starting_stack: stacks.iter().copied().max().unwrap_or(0),
            ..config
        };
        config.validate()?;
        let players = stacks
            .iter()
            .enumerate()
            .map(|(id, &chips)| Player::new(id, config.seat_name(id), chips))
            .collect();
        Ok(Self {
            deck: Deck::new_with_seed(config.seed),
            players,
            hand_number: 0,
            dealer_index: 0,
            phase: Phase::PreFlop,
            community: Vec::with_capacity(5),
            current_bet_to_match: 0,
            min_raise: config.big_blind,
            stage: Stage::Idle,
            pending: None,
            turns_this_hand: 0,
            turns_this_round: 0,
            turn_ceiling: 0,
            chips_at_start: 0,
            preset: None,
            events: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn pending(&self) -> Option<TurnTicket> {
        self.pending
    }
    pub fn is_hand_in_progress(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Chips behind plus chips wagered, over every seat.
    pub fn total_chips(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.chips() + p.total_bet_this_hand())
            .sum()
    }

    pub fn pot_total(&self) -> u32 {
        self.players.iter().map(|p| p.total_bet_this_hand()).sum()
    }

    /// Players that still have chips.
    pub fn seated_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_busted()).count()
    }

    /// Events emitted since the previous drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fixes the card order of the next hand instead of shuffling.
    ///
    /// Cards are dealt front to back: one card per seat clockwise from the
    /// dealer's left, a second round the same way, then burn and flop (3),
    /// burn and turn, burn and river.
    ///
    /// The next hand needs `2 × seated + 8` cards. A shorter preset is
    /// discarded when that hand starts, which then fails with
    /// [`GameError::DeckExhausted`] before any chips move.
    pub fn preset_next_deck(&mut self, cards: Vec<Card>) -> Result<(), GameError> {
        crate::cards::ensure_distinct(&cards)?;
        self.preset = Some(cards);
        Ok(())
    }

    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            hand_number: self.hand_number,
            phase: self.phase,
            community_cards: self.community.clone(),
            dealer_index: self.dealer_index,
            current_bet_to_match: self.current_bet_to_match,
            min_raise: self.min_raise,
            pot: self.pot_total(),
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            players: self.players.iter().map(Player::view).collect(),
        }
    }

    /// Offered actions for `player_id` at the current bet.
    pub fn valid_actions(&self, player_id: usize) -> Result<ValidActions, GameError> {
        if self.stage != Stage::Betting {
            return Err(GameError::NoHandInProgress);
        }
        let player = self
            .players
            .get(player_id)
            .ok_or_else(|| GameError::InvalidAction {
                player_id,
                reason: "no such seat".into(),
            })?;
        Ok(self.actions_for(player))
    }

    /// Clears per-hand state, rotates the dealer and shuffles.
    pub fn reset_for_new_hand(&mut self) -> Result<(), GameError> {
        if self.stage != Stage::Idle {
            return Err(GameError::HandInProgress);
        }
        if self.seated_count() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        // hole cards, three burns and the board must all come from the preset
        let needed = 2 * self.seated_count() + 8;
        if let Some(len) = self.preset.as_ref().map(Vec::len) {
            if len < needed {
                self.preset = None;
                warn!(needed, supplied = len, "preset deck too short, discarded");
                return Err(GameError::DeckExhausted {
                    requested: needed,
                    remaining: len,
                });
            }
        }
        for p in &mut self.players {
            p.reset_for_new_hand();
        }
        self.community.clear();
        self.phase = Phase::PreFlop;
        self.current_bet_to_match = 0;
        self.min_raise = self.config.big_blind;
        self.pending = None;
        self.turns_this_hand = 0;
        self.turns_this_round = 0;

        // first hand starts the button at the lowest seated id
        let from = if self.hand_number == 0 {
            self.players.len() - 1
        } else {
            self.dealer_index
        };
        self.dealer_index = self
            .next_seat(from, |p| !p.is_busted())
            .ok_or(GameError::NotEnoughPlayers)?;

        match self.preset.take() {
            Some(cards) => self.deck.stack(cards)?,
            None => {
                self.deck.reset();
                self.deck.shuffle();
            }
        }

        let seated = self.seated_count() as u32;
        let max_stack = self.players.iter().map(Player::chips).max().unwrap_or(0);
        self.turn_ceiling = seated.saturating_mul(
            (max_stack / self.config.big_blind).saturating_add(seated + 2),
        );
        self.chips_at_start = self.total_chips();
        self.stage = Stage::Dealt;
        Ok(())
    }

    /// Starts the next hand: blinds, hole cards, then runs until the first
    /// decision is needed.
    pub fn start_hand(&mut self) -> Result<Progress, GameError> {
        if self.stage == Stage::Idle {
            self.reset_for_new_hand()?;
        }
        if self.stage != Stage::Dealt {
            return Err(GameError::HandInProgress);
        }
        self.hand_number += 1;
        info!(
            hand = self.hand_number,
            dealer = self.dealer_index,
            players = self.seated_count(),
            "hand started"
        );
        self.events.push(EngineEvent::HandStart {
            hand_number: self.hand_number,
            dealer_index: self.dealer_index,
            players: self.players.iter().map(Player::view).collect(),
        });

        let bb_seat = self.post_blinds()?;
        self.deal_hole_cards()?;
        self.stage = Stage::Betting;
        self.events.push(EngineEvent::PhaseChange {
            phase: Phase::PreFlop,
        });
        self.run_until_decision(bb_seat)
    }

    /// Resumes the pending turn with `decision`.
    ///
    /// Fails without changing anything when `ticket` is not the pending one,
    /// or when the decision is outside the offered set; in the latter case the
    /// turn stays pending.
    pub fn submit(&mut self, ticket: TurnTicket, decision: Decision) -> Result<Progress, GameError> {
        self.check_ticket(ticket)?;
        let seat = ticket.player_id;
        let valid = self.actions_for(&self.players[seat]);
        let action = match rules::validate_decision(&valid, decision.action, decision.amount) {
            Ok(action) => action,
            Err(e) => {
                warn!(hand = self.hand_number, player = seat, error = %e, "rejected decision");
                return Err(e);
            }
        };
        self.pending = None;
        self.apply(seat, action);
        self.run_until_decision(seat)
    }

    /// Resolves the pending turn with the default policy: check if
    /// possible, otherwise fold.
    pub fn forfeit_turn(&mut self, ticket: TurnTicket) -> Result<Progress, GameError> {
        self.check_ticket(ticket)?;
        let seat = ticket.player_id;
        let action = self.actions_for(&self.players[seat]).default_action();
        debug!(hand = self.hand_number, player = seat, ?action, "turn forfeited");
        self.pending = None;
        self.apply(seat, action);
        self.run_until_decision(seat)
    }

    /// Plays one full hand, asking `provider` for every decision. A decision
    /// outside the offered set forfeits that turn.
    pub fn play_hand(
        &mut self,
        provider: &mut dyn DecisionProvider,
    ) -> Result<HandSummary, GameError> {
        let mut progress = self.start_hand()?;
        loop {
            let ticket = match progress {
                Progress::HandComplete(summary) => return Ok(summary),
                Progress::AwaitingDecision(ticket) => ticket,
            };
            let seat = ticket.player_id;
            let valid = self.actions_for(&self.players[seat]);
            let state = self.snapshot();
            let decision = provider.decide(&self.players[seat], &state, &valid);
            progress = match self.submit(ticket, decision) {
                Err(GameError::InvalidAction { .. }) => {
                    warn!(hand = self.hand_number, player = seat, "forfeiting turn");
                    self.forfeit_turn(ticket)?
                }
                other => other?,
            };
        }
    }

    /// Plays hands until one player holds every chip or `max_hands` have
    /// been played. Only stops between hands.
    pub fn play_game(
        &mut self,
        provider: &mut dyn DecisionProvider,
        max_hands: u64,
    ) -> Result<GameSummary, GameError> {
        let mut played = 0;
        let mut winner = None;
        while played < max_hands && self.seated_count() >= 2 {
            let summary = self.play_hand(provider)?;
            played += 1;
            winner = summary.game_over;
        }
        Ok(GameSummary {
            hands_played: played,
            winner,
            chips: self.players.iter().map(Player::chips).collect(),
        })
    }

    fn check_ticket(&self, ticket: TurnTicket) -> Result<(), GameError> {
        match self.pending {
            None => Err(GameError::NoDecisionPending),
            Some(p) if p == ticket => Ok(()),
            Some(p) if p.player_id != ticket.player_id => {
                warn!(
                    hand = self.hand_number,
                    expected = p.player_id,
                    actual = ticket.player_id,
                    "submission from a player whose turn it is not"
                );
                Err(GameError::NotPlayersTurn {
                    expected: p.player_id,
                    actual: ticket.player_id,
                })
            }
            // right seat, but an earlier turn or hand
            Some(_) => {
                warn!(hand = self.hand_number, player = ticket.player_id, "stale ticket");
                Err(GameError::NoDecisionPending)
            }
        }
    }

    fn actions_for(&self, player: &Player) -> ValidActions {
        let opponents_can_respond = self
            .players
            .iter()
            .any(|o| o.id != player.id && o.can_act());
        rules::valid_actions(
            player,
            self.current_bet_to_match,
            self.min_raise,
            !player.has_acted_this_round(),
            opponents_can_respond,
        )
    }

    /// First seat after `from` (clockwise, wrapping, `from` last) matching `pred`.
    fn next_seat(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|k| (from + k) % n).find(|&i| pred(&self.players[i]))
    }

    fn post_blinds(&mut self) -> Result<usize, GameError> {
        let seated = |p: &Player| !p.is_busted();
        let (sb_seat, bb_seat) = if self.seated_count() == 2 {
            // heads-up: the dealer posts the small blind
            let bb = self
                .next_seat(self.dealer_index, seated)
                .ok_or(GameError::NotEnoughPlayers)?;
            (self.dealer_index, bb)
        } else {
            let sb = self
                .next_seat(self.dealer_index, seated)
                .ok_or(GameError::NotEnoughPlayers)?;
            let bb = self.next_seat(sb, seated).ok_or(GameError::NotEnoughPlayers)?;
            (sb, bb)
        };

        let sb_amount = self.players[sb_seat].bet(self.config.small_blind);
        let bb_amount = self.players[bb_seat].bet(self.config.big_blind);
        self.current_bet_to_match = sb_amount.max(bb_amount);
        self.min_raise = self.config.big_blind;
        debug!(
            hand = self.hand_number,
            small_blind = sb_seat,
            big_blind = bb_seat,
            "blinds posted"
        );
        self.events.push(EngineEvent::BlindsPosted {
            small_blind: BlindPost {
                player_id: sb_seat,
                amount: sb_amount,
            },
            big_blind: BlindPost {
                player_id: bb_seat,
                amount: bb_amount,
            },
        });
        Ok(bb_seat)
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let order: Vec<usize> = {
            let n = self.players.len();
            (1..=n)
                .map(|k| (self.dealer_index + k) % n)
                .filter(|&i| !self.players[i].is_busted())
                .collect()
        };
        let first = self.deck.deal(order.len())?;
        let second = self.deck.deal(order.len())?;
        for (k, &seat) in order.iter().enumerate() {
            self.players[seat].give_cards([first[k], second[k]]);
        }
        self.events.push(EngineEvent::HoleCardsDealt { players: order });
        Ok(())
    }

    /// Next seat that owes an action after `after`, if the round is not over.
    fn next_actor(&self, after: usize) -> Option<usize> {
        let able = self.players.iter().filter(|p| p.can_act()).count();
        let to_match = self.current_bet_to_match;
        self.next_seat(after, |p| {
            if !p.can_act() {
                return false;
            }
            let unmatched = p.current_bet() < to_match;
            if able <= 1 {
                // nobody left to bet against: only an unmatched bet needs an answer
                return unmatched;
            }
            unmatched || !p.has_acted_this_round()
        })
    }

    fn run_until_decision(&mut self, mut cursor: usize) -> Result<Progress, GameError> {
        loop {
            if self.players.iter().filter(|p| p.is_live()).count() == 1 {
                return self.resolve(false).map(Progress::HandComplete);
            }
            if let Some(seat) = self.next_actor(cursor) {
                return self.grant_turn(seat);
            }
            if self.phase == Phase::River {
                return self.resolve(true).map(Progress::HandComplete);
            }
            self.next_street()?;
            cursor = self.dealer_index;
        }
    }

    fn grant_turn(&mut self, seat: usize) -> Result<Progress, GameError> {
        if self.turns_this_round >= self.turn_ceiling {
            let msg = format!(
                "betting round exceeded {} turns in hand {} ({})",
                self.turn_ceiling, self.hand_number, self.phase
            );
            error!(hand = self.hand_number, phase = %self.phase, "{msg}");
            return Err(GameError::InternalInvariantViolation(msg));
        }
        self.turns_this_hand += 1;
        let ticket = TurnTicket {
            hand_number: self.hand_number,
            turn: self.turns_this_hand,
            player_id: seat,
        };
        let valid = self.actions_for(&self.players[seat]);
        let pot = self.pot_total();
        self.events.push(EngineEvent::AwaitingAction {
            player_id: seat,
            call_amount: valid.call.unwrap_or(0),
            min_raise: valid.raise.map(|r| r.min).or(valid.all_in).unwrap_or(0),
            max_raise: valid.raise.map(|r| r.max).or(valid.all_in).unwrap_or(0),
            pot,
            valid_actions: valid,
        });
        self.pending = Some(ticket);
        Ok(Progress::AwaitingDecision(ticket))
    }

    fn apply(&mut self, seat: usize, action: ValidatedAction) {
        let to_match_before = self.current_bet_to_match;
        let player = &mut self.players[seat];
        let moved = match action {
            ValidatedAction::Fold => {
                player.fold();
                0
            }
            ValidatedAction::Check => 0,
            ValidatedAction::Call(a) | ValidatedAction::Raise(a) | ValidatedAction::AllIn(a) => {
                player.bet(a)
            }
        };
        player.mark_acted();
        let new_bet = player.current_bet();

        if new_bet > to_match_before {
            let raise_by = new_bet - to_match_before;
            self.current_bet_to_match = new_bet;
            // a short all-in moves the price but does not reopen the betting
            if raise_by >= self.min_raise {
                self.min_raise = raise_by;
                for other in self.players.iter_mut().filter(|o| o.id != seat) {
                    if other.can_act() {
                        other.reopen();
                    }
                }
            }
        }
        self.turns_this_round += 1;

        let pot = self.pot_total();
        debug!(
            hand = self.hand_number,
            player = seat,
            phase = %self.phase,
            action = ?action.kind(),
            amount = moved,
            pot,
            "player acted"
        );
        self.events.push(EngineEvent::PlayerActed {
            player_id: seat,
            action: action.kind(),
            amount: moved,
            pot,
        });
    }

    fn next_street(&mut self) -> Result<(), GameError> {
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.current_bet_to_match = 0;
        self.min_raise = self.config.big_blind;
        self.turns_this_round = 0;
        self.phase = self.phase.next();

        self.deck.burn_card();
        let cards = self.deck.deal(self.phase.cards_to_deal())?;
        self.community.extend_from_slice(&cards);
        debug!(hand = self.hand_number, phase = %self.phase, "street dealt");
        self.events.push(EngineEvent::PhaseChange { phase: self.phase });
        self.events.push(EngineEvent::CommunityCardsDealt {
            phase: self.phase,
            cards,
        });
        Ok(())
    }

    fn contributions(&self) -> Vec<Contribution> {
        self.players
            .iter()
            .filter(|p| p.total_bet_this_hand() > 0)
            .map(|p| Contribution {
                player_id: p.id,
                total_bet: p.total_bet_this_hand(),
                folded: !p.is_live(),
            })
            .collect()
    }

    fn invariant(&self, ok: bool, what: impl FnOnce() -> String) -> Result<(), GameError> {
        if ok {
            return Ok(());
        }
        let msg = what();
        error!(hand = self.hand_number, "{msg}");
        Err(GameError::InternalInvariantViolation(msg))
    }

    /// Settles every pot and closes the hand. `showdown` is false when all
    /// but one player folded.
    fn resolve(&mut self, showdown: bool) -> Result<HandSummary, GameError> {
        let pots = calculate_side_pots(&self.contributions());
        let contributed = self.pot_total();
        self.invariant(pot::total(&pots) == contributed, || {
            format!(
                "pots hold {} chips but players contributed {contributed}",
                pot::total(&pots)
            )
        })?;

        if showdown {
            self.phase = Phase::Showdown;
            self.events.push(EngineEvent::PhaseChange {
                phase: Phase::Showdown,
            });
        }

        let n = self.players.len();
        let mut shown: Vec<Option<(u32, ShownHand)>> = vec![None; n];
        if showdown {
            for p in self.players.iter().filter(|p| p.is_live()) {
                let Some(hole) = p.hole_cards() else { continue };
                let mut seven = hole.to_vec();
                seven.extend_from_slice(&self.community);
                let best = best_hand(&seven)?;
                shown[p.id] = Some((
                    best.evaluation.score,
                    ShownHand {
                        category: best.evaluation.category,
                        cards: best.cards,
                    },
                ));
            }
        }

        // seat distance from the dealer's left, for odd-chip order
        let dealer = self.dealer_index;
        let seat_order = |id: usize| (id + n - dealer - 1) % n;

        let mut won = vec![0u32; n];
        for pot in &pots {
            let mut winners: Vec<usize> = if pot.eligible.len() == 1 {
                pot.eligible.clone()
            } else {
                let best = pot
                    .eligible
                    .iter()
                    .filter_map(|&id| shown[id].as_ref().map(|(s, _)| *s))
                    .max();
                pot.eligible
                    .iter()
                    .copied()
                    .filter(|&id| best.is_some() && shown[id].as_ref().map(|(s, _)| *s) == best)
                    .collect()
            };
            winners.sort_by_key(|&id| seat_order(id));
            self.invariant(!winners.is_empty(), || {
                format!("pot of {} has no winner", pot.amount)
            })?;
            for (id, share) in split_pot(pot.amount, &winners) {
                won[id] += share;
            }
        }

        for p in &mut self.players {
            p.award(won[p.id]);
            p.reset_for_new_hand();
        }
        let total = self.total_chips();
        self.invariant(total == self.chips_at_start, || {
            format!(
                "chip count changed from {} to {total} during the hand",
                self.chips_at_start
            )
        })?;

        let winners: Vec<WinnerInfo> = (0..n)
            .filter(|&id| won[id] > 0)
            .map(|id| WinnerInfo {
                player_id: id,
                amount: won[id],
                hand: shown[id].as_ref().map(|(_, h)| h.clone()),
            })
            .collect();

        info!(
            hand = self.hand_number,
            showdown,
            pots = pots.len(),
            winners = ?winners.iter().map(|w| (w.player_id, w.amount)).collect::<Vec<_>>(),
            "hand finished"
        );
        self.events.push(EngineEvent::HandEnd {
            winners: winners.clone(),
            pots: pots.clone(),
            community_cards: self.community.clone(),
            showdown,
        });

        let mut eliminated = Vec::new();
        for p in &mut self.players {
            if !p.is_busted() && p.chips() == 0 {
                p.mark_busted();
                eliminated.push(p.id);
            }
        }
        for &id in &eliminated {
            info!(hand = self.hand_number, player = id, "player eliminated");
            self.events.push(EngineEvent::PlayerEliminated { player_id: id });
        }

        let mut game_over = None;
        let mut remaining = self.players.iter().filter(|p| !p.is_busted());
        if let (Some(last), None) = (remaining.next(), remaining.next()) {
            info!(winner = last.id, "game over");
            game_over = Some(last.id);
            self.events.push(EngineEvent::GameOver { winner_id: last.id });
        }

        self.stage = Stage::Idle;
        self.pending = None;
        Ok(HandSummary {
            hand_number: self.hand_number,
            winners,
            pots,
            community_cards: self.community.clone(),
            showdown,
            eliminated,
            game_over,
        })
    }
}
