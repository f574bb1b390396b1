//! Per-actor turn lifecycle.
//!
//! ```text
//! TurnStart ──Select──▶ AwaitingCommand ──ChooseAttack──▶ SelectingEnemy
//!                          ▲      │                           │
//!                          │      └──Complete(TurnOver)──┐    │
//!                          └──────Cancel / Complete(Continue)─┘
//!                                                        ▼
//!                                                     TurnOver
//! ```
//!
//! `TurnOver` is terminal for the round; [`TurnMachine::begin_turn`] puts the
//! actor back to `TurnStart` when its next turn begins.

use crate::error::{ErrorSeverity, GameError};

/// Phase of an actor's turn.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TurnState {
    /// The actor has not been selected yet this round.
    #[default]
    TurnStart,
    /// The actor is selected and waiting for an ability to be chosen.
    AwaitingCommand,
    /// An attack was chosen and the caller is picking a target.
    SelectingEnemy,
    /// The actor is done for this round.
    TurnOver,
}

impl TurnState {
    pub const ALL: [TurnState; 4] = [
        TurnState::TurnStart,
        TurnState::AwaitingCommand,
        TurnState::SelectingEnemy,
        TurnState::TurnOver,
    ];

    /// Returns the state reached from `from` on `event`, if the transition is defined.
    pub const fn next(from: TurnState, event: TurnEvent) -> Option<TurnState> {
        use TurnEvent::*;
        use TurnState::*;

        match (from, event) {
            (TurnStart, Select) => Some(AwaitingCommand),
            (AwaitingCommand, ChooseAttack) => Some(SelectingEnemy),
            (SelectingEnemy, Cancel) => Some(AwaitingCommand),
            (AwaitingCommand | SelectingEnemy, Complete(TurnOutcome::TurnOver)) => Some(TurnOver),
            (AwaitingCommand | SelectingEnemy, Complete(TurnOutcome::Continue)) => {
                Some(AwaitingCommand)
            }
            _ => None,
        }
    }

    pub const fn can_transition(from: TurnState, event: TurnEvent) -> bool {
        Self::next(from, event).is_some()
    }

    /// Returns true while the actor holds the selection (a command is pending).
    pub const fn is_acting(self) -> bool {
        matches!(self, TurnState::AwaitingCommand | TurnState::SelectingEnemy)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnState::TurnOver)
    }
}

/// Whether an ability ended the actor's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnOutcome {
    /// The actor keeps the selection and may issue another command.
    Continue,
    /// The actor's turn is finished for this round.
    TurnOver,
}

impl TurnOutcome {
    pub const fn is_turn_over(self) -> bool {
        matches!(self, TurnOutcome::TurnOver)
    }
}

/// Inputs that drive the turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnEvent {
    /// The caller selected the actor.
    Select,
    /// An attack-type ability was chosen; target acquisition begins.
    ChooseAttack,
    /// Target acquisition was abandoned.
    Cancel,
    /// An ability finished and reported its outcome.
    Complete(TurnOutcome),
}

impl TurnEvent {
    pub const ALL: [TurnEvent; 5] = [
        TurnEvent::Select,
        TurnEvent::ChooseAttack,
        TurnEvent::Cancel,
        TurnEvent::Complete(TurnOutcome::Continue),
        TurnEvent::Complete(TurnOutcome::TurnOver),
    ];
}

/// Rejected turn transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("cannot apply {event} while in {from}")]
pub struct TransitionError {
    pub from: TurnState,
    pub event: TurnEvent,
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "TURN_ILLEGAL_TRANSITION"
    }
}

/// Holds an actor's current [`TurnState`] and validates every change to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnMachine {
    state: TurnState,
}

impl TurnMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn can_apply(&self, event: TurnEvent) -> bool {
        TurnState::can_transition(self.state, event)
    }

    /// Applies `event`, leaving the state untouched when the transition is illegal.
    pub fn apply(&mut self, event: TurnEvent) -> Result<TurnState, TransitionError> {
        let next = TurnState::next(self.state, event).ok_or(TransitionError {
            from: self.state,
            event,
        })?;
        tracing::trace!(from = %self.state, %event, to = %next, "turn transition");
        self.state = next;
        Ok(next)
    }

    /// Resets to `TurnStart` at the beginning of the actor's next turn.
    pub fn begin_turn(&mut self) {
        self.state = TurnState::TurnStart;
    }
}
