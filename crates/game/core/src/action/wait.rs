use crate::state::ActorId;

use super::{AbilityContext, AbilityEffect, AbilityError};

/// Ends the turn without touching the map.
pub(super) fn activate(
    actor: ActorId,
    context: &mut AbilityContext<'_>,
) -> Result<AbilityEffect, AbilityError> {
    context.actor(actor)?;
    Ok(AbilityEffect::Waited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Ability, TurnOutcome};
    use crate::map::{GridMap, TileProperties};
    use crate::state::{Actor, Coordinate, Roster};

    #[test]
    fn wait_ends_turn_and_changes_nothing() {
        let mut map = GridMap::new(3, 3, TileProperties::default());
        map.place_actor(ActorId(4), Coordinate::new(1, 1)).unwrap();
        let mut roster = Roster::new();
        roster.insert(
            ActorId(4),
            Actor::new(ActorId(4), "Bob", "badsoldier").with_ability(Ability::Wait),
        );
        let before = (map.clone(), roster.clone());

        let report = Ability::Wait
            .activate(ActorId(4), &mut AbilityContext::new(&mut map, &mut roster))
            .unwrap();

        assert_eq!(report.outcome, TurnOutcome::TurnOver);
        assert_eq!(report.effect, AbilityEffect::Waited);
        assert_eq!((map, roster), before);
    }

    #[test]
    fn wait_needs_the_ability() {
        let mut map = GridMap::new(1, 1, TileProperties::default());
        let mut roster = Roster::new();
        roster.insert(ActorId(4), Actor::new(ActorId(4), "Bob", "badsoldier"));

        let err = Ability::Wait
            .activate(ActorId(4), &mut AbilityContext::new(&mut map, &mut roster))
            .unwrap_err();
        assert_eq!(
            err,
            AbilityError::NotAvailable {
                actor: ActorId(4),
                ability: Ability::Wait
            }
        );

        let err = Ability::Wait
            .activate(ActorId(9), &mut AbilityContext::new(&mut map, &mut roster))
            .unwrap_err();
        assert_eq!(err, AbilityError::ActorNotFound(ActorId(9)));
    }
}
