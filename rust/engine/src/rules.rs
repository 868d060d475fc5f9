use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::Player;

/// The kinds of action a decision provider can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// Inclusive bounds on the chips a raise adds this action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseBounds {
    pub min: u32,
    pub max: u32,
}

/// The offered action set for one player at one moment.
///
/// Amounts are the chips the action moves from the player's stack, not the
/// resulting bet level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidActions {
    pub player_id: usize,
    /// What the player owes to stay in, before stack clamping
    pub call_amount: u32,
    pub can_fold: bool,
    pub can_check: bool,
    pub call: Option<u32>,
    pub raise: Option<RaiseBounds>,
    pub all_in: Option<u32>,
}

impl ValidActions {
    pub fn kinds(&self) -> Vec<ActionKind> {
        let mut kinds = Vec::with_capacity(4);
        if self.can_fold {
            kinds.push(ActionKind::Fold);
        }
        if self.can_check {
            kinds.push(ActionKind::Check);
        }
        if self.call.is_some() {
            kinds.push(ActionKind::Call);
        }
        if self.raise.is_some() {
            kinds.push(ActionKind::Raise);
        }
        if self.all_in.is_some() {
            kinds.push(ActionKind::AllIn);
        }
        kinds
    }

    pub fn offers(&self, kind: ActionKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Check if available, otherwise fold. Used for timeouts and rejected decisions.
    pub fn default_action(&self) -> ValidatedAction {
        if self.can_check {
            ValidatedAction::Check
        } else {
            ValidatedAction::Fold
        }
    }
}

/// An action that passed validation, carrying the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ValidatedAction::Fold => ActionKind::Fold,
            ValidatedAction::Check => ActionKind::Check,
            ValidatedAction::Call(_) => ActionKind::Call,
            ValidatedAction::Raise(_) => ActionKind::Raise,
            ValidatedAction::AllIn(_) => ActionKind::AllIn,
        }
    }

    pub fn amount(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(a) | ValidatedAction::Raise(a) | ValidatedAction::AllIn(a) => a,
        }
    }
}

/// Computes what `player` may do against the table's bet.
///
/// * `current_bet_to_match` - highest street bet at the table
/// * `min_raise` - size of the last full raise (the big blind pre-flop)
/// * `can_reopen` - false when the player already acted and only a short
///   all-in has come in since, which allows calling but not re-raising
/// * `opponents_can_respond` - false when every other live player is all-in
///
/// # Examples
///
/// ```
/// use riverstone_engine::player::Player;
/// use riverstone_engine::rules::{valid_actions, RaiseBounds};
///
/// let mut p = Player::new(0, "hero", 1_000);
/// p.bet(10);
/// let va = valid_actions(&p, 30, 20, true, true);
/// assert_eq!(va.call, Some(20));
/// assert_eq!(va.raise, Some(RaiseBounds { min: 40, max: 990 }));
/// assert!(va.can_fold && !va.can_check);
/// ```
pub fn valid_actions(
    player: &Player,
    current_bet_to_match: u32,
    min_raise: u32,
    can_reopen: bool,
    opponents_can_respond: bool,
) -> ValidActions {
    let chips = player.chips();
    let call_amount = current_bet_to_match.saturating_sub(player.current_bet());
    let mut va = ValidActions {
        player_id: player.id,
        call_amount,
        can_fold: false,
        can_check: false,
        call: None,
        raise: None,
        all_in: None,
    };

    if call_amount == 0 {
        va.can_check = true;
    } else {
        va.can_fold = true;
        va.call = Some(call_amount.min(chips));
    }

    if chips > call_amount && can_reopen && opponents_can_respond {
        let min = current_bet_to_match + min_raise - player.current_bet();
        if min <= chips {
            va.raise = Some(RaiseBounds { min, max: chips });
        } else {
            va.all_in = Some(chips);
        }
    }
    va
}

/// Checks a provider's choice against the offered set.
///
/// `amount` is optional for Call and All-In (the offered amount is used) and
/// required for Raise. Any amount given must match the offer or lie inside
/// the raise bounds. Going all-in is also accepted whenever a raise is
/// offered, since the raise maximum is the whole stack.
///
/// ```
/// use riverstone_engine::player::Player;
/// use riverstone_engine::rules::{valid_actions, validate_decision, ActionKind, ValidatedAction};
///
/// let p = Player::new(1, "villain", 500);
/// let va = valid_actions(&p, 20, 20, true, true);
/// assert_eq!(
///     validate_decision(&va, ActionKind::Raise, Some(60)).unwrap(),
///     ValidatedAction::Raise(60)
/// );
/// assert!(validate_decision(&va, ActionKind::Raise, Some(30)).is_err());
/// assert!(validate_decision(&va, ActionKind::Check, None).is_err());
/// ```
pub fn validate_decision(
    valid: &ValidActions,
    action: ActionKind,
    amount: Option<u32>,
) -> Result<ValidatedAction, GameError> {
    let reject = |reason: String| GameError::InvalidAction {
        player_id: valid.player_id,
        reason,
    };
    let exact = |offered: u32| match amount {
        Some(a) if a != offered => Err(reject(format!(
            "{action:?} must move exactly {offered} chips, got {a}"
        ))),
        _ => Ok(offered),
    };

    match action {
        ActionKind::Fold if valid.can_fold => Ok(ValidatedAction::Fold),
        ActionKind::Check if valid.can_check => Ok(ValidatedAction::Check),
        ActionKind::Call => match valid.call {
            Some(offered) => exact(offered).map(ValidatedAction::Call),
            None => Err(reject("nothing to call".into())),
        },
        ActionKind::Raise => {
            let bounds = valid
                .raise
                .ok_or_else(|| reject("raising is not allowed here".into()))?;
            let a = amount.ok_or_else(|| reject("raise needs an amount".into()))?;
            if a < bounds.min || a > bounds.max {
                return Err(reject(format!(
                    "raise of {a} outside [{}, {}]",
                    bounds.min, bounds.max
                )));
            }
            if a == bounds.max {
                Ok(ValidatedAction::AllIn(a))
            } else {
                Ok(ValidatedAction::Raise(a))
            }
        }
        ActionKind::AllIn => {
            let offered = valid
                .all_in
                .or(valid.raise.map(|r| r.max))
                .ok_or_else(|| reject("all-in is not offered".into()))?;
            exact(offered).map(ValidatedAction::AllIn)
        }
        other => Err(reject(format!("{other:?} is not offered"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(chips: u32, current_bet: u32) -> Player {
        let mut p = Player::new(0, "p", chips + current_bet);
        p.bet(current_bet);
        p
    }

    #[test]
    fn checked_to_player_may_check_or_bet() {
        let va = valid_actions(&player(500, 0), 0, 10, true, true);
        assert!(va.can_check);
        assert!(!va.can_fold);
        assert_eq!(va.call, None);
        assert_eq!(va.raise, Some(RaiseBounds { min: 10, max: 500 }));
        assert_eq!(va.default_action(), ValidatedAction::Check);
    }

    #[test]
    fn short_stack_gets_all_in_instead_of_raise() {
        let va = valid_actions(&player(45, 0), 30, 30, true, true);
        assert_eq!(va.call, Some(30));
        assert_eq!(va.raise, None);
        assert_eq!(va.all_in, Some(45));
        assert_eq!(va.default_action(), ValidatedAction::Fold);
    }

    #[test]
    fn call_is_clamped_to_stack() {
        let va = valid_actions(&player(25, 0), 100, 100, true, true);
        assert_eq!(va.call, Some(25));
        assert_eq!(va.all_in, None);
        assert_eq!(va.kinds(), vec![ActionKind::Fold, ActionKind::Call]);
    }

    #[test]
    fn no_reraise_after_short_all_in_or_against_all_ins() {
        let va = valid_actions(&player(500, 100), 130, 100, false, true);
        assert_eq!(va.call, Some(30));
        assert!(va.raise.is_none() && va.all_in.is_none());

        let va = valid_actions(&player(500, 0), 0, 10, true, false);
        assert_eq!(va.kinds(), vec![ActionKind::Check]);
    }

    #[test]
    fn validation_rejects_out_of_set_choices() {
        let va = valid_actions(&player(500, 0), 20, 20, true, true);
        assert!(validate_decision(&va, ActionKind::Call, Some(19)).is_err());
        assert!(validate_decision(&va, ActionKind::Raise, None).is_err());
        assert!(validate_decision(&va, ActionKind::Raise, Some(501)).is_err());
        assert_eq!(
            validate_decision(&va, ActionKind::Call, None).unwrap(),
            ValidatedAction::Call(20)
        );
        assert_eq!(
            validate_decision(&va, ActionKind::AllIn, None).unwrap(),
            ValidatedAction::AllIn(500)
        );
        assert_eq!(
            validate_decision(&va, ActionKind::Raise, Some(500)).unwrap(),
            ValidatedAction::AllIn(500)
        );
    }
}
