use std::collections::BTreeSet;

use crate::action::{Ability, AbilityContext, AbilityError, ActivationReport, attack_targets};
use crate::cost::CostModel;
use crate::error::GameError;
use crate::pathfinding::PathfindResult;
use crate::state::{
    Actor, ActorId, Controller, Coordinate, Side, TransitionError, TurnEvent, TurnState,
};

use super::{Battle, BattleError};

/// Round and turn methods for Battle.
impl<C: CostModel> Battle<C> {
    /// Starts a round for `side`: its living actors go back to `TurnStart`
    /// with full movement points.
    pub fn begin_round(&mut self, side: Side) {
        self.clear_selection();
        self.active_side = Some(side);

        let mut ready = 0usize;
        for actor in self.roster.values_mut() {
            if actor.side == side && actor.is_alive() {
                actor.begin_turn();
                ready += 1;
            }
        }

        tracing::info!(%side, ready, "round started");
    }

    /// Living actors of the active side that have not been selected yet.
    pub fn pending_actors(&self, controller: Controller) -> impl Iterator<Item = ActorId> + '_ {
        let side = self.active_side;
        self.roster
            .values()
            .filter(move |actor| {
                Some(actor.side) == side
                    && actor.controller == controller
                    && actor.is_alive()
                    && actor.turn_state() == TurnState::TurnStart
                    && self.map.position_of(actor.id).is_some()
            })
            .map(|actor| actor.id)
    }

    /// True when every living actor of the active side has finished its turn.
    pub fn round_complete(&self) -> bool {
        let Some(side) = self.active_side else {
            return false;
        };
        self.roster
            .values()
            .filter(|actor| actor.side == side && actor.is_alive())
            .all(|actor| actor.turn_state().is_terminal())
    }

    pub fn turn_state(&self, id: ActorId) -> Option<TurnState> {
        self.actor(id).map(Actor::turn_state)
    }

    /// Reachability for the selected actor, refreshed after every move.
    pub fn reachability(&self) -> Option<&PathfindResult> {
        self.reachability.as_ref()
    }

    /// Attack targets for the selected actor while it is selecting an enemy.
    pub fn targets(&self) -> &BTreeSet<Coordinate> {
        &self.targets
    }

    /// Abilities the selected actor can use right now.
    pub fn available_abilities(&self) -> Vec<Ability> {
        self.selected
            .and_then(|id| self.actor(id))
            .map(|actor| actor.available_abilities().collect())
            .unwrap_or_default()
    }

    /// Selects `id` to act, on behalf of `controller`.
    ///
    /// The player may only select player actors and the computer driver only
    /// computer actors. Only one actor acts at a time: the current one has to
    /// finish its turn first.
    pub fn select(
        &mut self,
        id: ActorId,
        controller: Controller,
    ) -> Result<&PathfindResult, BattleError> {
        if let Some(current) = self.selected {
            return Err(BattleError::SelectionInProgress { current });
        }
        let active = self.active_side.ok_or(BattleError::NoActiveRound)?;
        let actor = self.actor(id).ok_or(BattleError::ActorNotFound(id))?;

        if actor.side != active {
            return Err(BattleError::WrongSide {
                actor: id,
                side: actor.side,
                active,
            });
        }
        if actor.controller != controller {
            return Err(BattleError::WrongController {
                actor: id,
                expected: actor.controller,
                requested: controller,
            });
        }
        if !actor.is_alive() {
            return Err(BattleError::Defeated(id));
        }
        if !actor.turn.can_apply(TurnEvent::Select) {
            return Err(BattleError::Turn(TransitionError {
                from: actor.turn_state(),
                event: TurnEvent::Select,
            }));
        }

        let reachability = self.pathfinder().reachable_for(actor)?;
        self.actor_mut(id)?.turn.apply(TurnEvent::Select)?;
        self.selected = Some(id);
        self.targets.clear();

        tracing::debug!(
            actor = %id,
            %controller,
            reachable = reachability.len(),
            "actor selected"
        );
        Ok(self.reachability.insert(reachability))
    }

    /// Switches the selected actor to target selection and computes the
    /// attack acquisition set.
    pub fn choose_attack(&mut self) -> Result<&BTreeSet<Coordinate>, BattleError> {
        let id = self.selected.ok_or(BattleError::NoSelection)?;
        let actor = self.actor(id).ok_or(BattleError::ActorNotFound(id))?;
        if !actor.has_ability(Ability::Attack) {
            return Err(BattleError::Ability(AbilityError::NotAvailable {
                actor: id,
                ability: Ability::Attack,
            }));
        }

        let targets = attack_targets(&self.map, &self.roster, actor)?;
        self.actor_mut(id)?.turn.apply(TurnEvent::ChooseAttack)?;

        tracing::debug!(actor = %id, targets = targets.len(), "selecting enemy");
        self.targets = targets;
        Ok(&self.targets)
    }

    /// Backs out of target selection.
    pub fn cancel(&mut self) -> Result<TurnState, BattleError> {
        let id = self.selected.ok_or(BattleError::NoSelection)?;
        let state = self.actor_mut(id)?.turn.apply(TurnEvent::Cancel)?;
        self.targets.clear();
        Ok(state)
    }

    /// Activates `ability` for the selected actor.
    ///
    /// `target` is the destination for `Move` and the enemy cell for
    /// `Attack`. `Attack` is only accepted while selecting an enemy, the
    /// other abilities only while awaiting a command.
    pub fn activate(
        &mut self,
        ability: Ability,
        target: Option<Coordinate>,
    ) -> Result<ActivationReport, BattleError> {
        let id = self.selected.ok_or(BattleError::NoSelection)?;
        let state = self.turn_state(id).ok_or(BattleError::ActorNotFound(id))?;
        let expected = if ability.is_attack() {
            TurnState::SelectingEnemy
        } else {
            TurnState::AwaitingCommand
        };
        if state != expected {
            return Err(BattleError::AbilityNotReady { ability, state });
        }

        let report = {
            let mut context = AbilityContext {
                map: &mut self.map,
                roster: &mut self.roster,
                reachability: self.reachability.as_ref(),
                target,
            };
            ability.activate(id, &mut context).inspect_err(|err| {
                tracing::warn!(actor = %id, %ability, code = err.error_code(), "ability rejected");
            })?
        };

        self.actor_mut(id)?
            .turn
            .apply(TurnEvent::Complete(report.outcome))?;

        if report.outcome.is_turn_over() {
            self.clear_selection();
        } else {
            self.targets.clear();
            self.refresh_selection()?;
        }
        self.refresh_targets();

        tracing::debug!(
            actor = %id,
            %ability,
            outcome = %report.outcome,
            "ability resolved"
        );
        Ok(report)
    }

    fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, BattleError> {
        self.roster
            .get_mut(&id)
            .ok_or(BattleError::ActorNotFound(id))
    }
}
