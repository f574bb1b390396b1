use crate::state::{ActorId, Coordinate};

use super::{Ability, AbilityContext, AbilityEffect, AbilityError, attack_targets};

pub(super) fn activate(
    actor: ActorId,
    context: &mut AbilityContext<'_>,
) -> Result<AbilityEffect, AbilityError> {
    let (target, at, damage) = pre_validate(actor, context)?;
    let defeated = apply(target, at, damage, context)?;

    Ok(AbilityEffect::Attacked {
        target,
        at,
        damage,
        defeated,
    })
}

/// Resolves the target cell to a hostile actor in range.
fn pre_validate(
    actor: ActorId,
    context: &AbilityContext<'_>,
) -> Result<(ActorId, Coordinate, u32), AbilityError> {
    let attacker = context.actor(actor)?;
    let at = context.require_target(Ability::Attack)?;
    let invalid = AbilityError::InvalidTarget {
        ability: Ability::Attack,
        target: at,
    };

    if !attack_targets(context.map, context.roster, attacker)?.contains(&at) {
        return Err(invalid);
    }
    let target = context.map.actor_at(at).ok_or(invalid)?;

    Ok((target, at, attacker.attack.damage))
}

/// Deals damage; a defeated target leaves the map but stays in the roster.
fn apply(
    target: ActorId,
    at: Coordinate,
    damage: u32,
    context: &mut AbilityContext<'_>,
) -> Result<bool, AbilityError> {
    let defeated = context.actor_mut(target)?.take_damage(damage);
    if defeated {
        context.map.remove_actor(at);
        tracing::debug!(%target, %at, "actor defeated");
    }
    Ok(defeated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActivationReport, TurnOutcome};
    use crate::map::{GridMap, TileProperties};
    use crate::state::{Actor, AttackProfile, Roster, Side};

    fn c(column: i32, row: i32) -> Coordinate {
        Coordinate::new(column, row)
    }

    fn duel(enemy_health: u32) -> (GridMap, Roster) {
        let mut map = GridMap::new(4, 4, TileProperties::default());
        let mut roster = Roster::new();
        let hero = Actor::new(ActorId(1), "Hunkenheim", "goodsoldier")
            .with_attack(AttackProfile::new(1, 4))
            .with_abilities(Ability::ALL);
        let enemy = Actor::new(ActorId(2), "Bob", "badsoldier")
            .with_side(Side::Red)
            .with_health(enemy_health);

        map.place_actor(hero.id, c(1, 1)).unwrap();
        map.place_actor(enemy.id, c(1, 2)).unwrap();
        roster.insert(hero.id, hero);
        roster.insert(enemy.id, enemy);
        (map, roster)
    }

    fn strike(
        map: &mut GridMap,
        roster: &mut Roster,
        at: Coordinate,
    ) -> Result<ActivationReport, AbilityError> {
        Ability::Attack.activate(
            ActorId(1),
            &mut AbilityContext::new(map, roster).with_target(at),
        )
    }

    #[test]
    fn attack_damages_target_and_ends_turn() {
        let (mut map, mut roster) = duel(10);
        let report = strike(&mut map, &mut roster, c(1, 2)).unwrap();

        assert_eq!(report.outcome, TurnOutcome::TurnOver);
        assert_eq!(
            report.effect,
            AbilityEffect::Attacked {
                target: ActorId(2),
                at: c(1, 2),
                damage: 4,
                defeated: false,
            }
        );
        assert_eq!(roster[&ActorId(2)].health.current, 6);
        assert_eq!(map.actor_at(c(1, 2)), Some(ActorId(2)));
    }

    #[test]
    fn defeated_target_is_removed_from_map() {
        let (mut map, mut roster) = duel(3);
        let report = strike(&mut map, &mut roster, c(1, 2)).unwrap();

        assert!(matches!(
            report.effect,
            AbilityEffect::Attacked { defeated: true, .. }
        ));
        assert_eq!(map.actor_at(c(1, 2)), None);
        assert_eq!(map.position_of(ActorId(2)), None);
        assert!(!roster[&ActorId(2)].is_alive());
    }

    #[test]
    fn attack_rejects_cells_outside_acquisition_set() {
        let (mut map, mut roster) = duel(10);
        for at in [c(3, 3), c(1, 1), c(2, 1)] {
            let err = strike(&mut map, &mut roster, at).unwrap_err();
            assert_eq!(
                err,
                AbilityError::InvalidTarget {
                    ability: Ability::Attack,
                    target: at
                }
            );
        }
        assert_eq!(roster[&ActorId(2)].health.current, 10);
    }

    #[test]
    fn attack_without_target_is_rejected() {
        let (mut map, mut roster) = duel(10);
        let err = Ability::Attack
            .activate(ActorId(1), &mut AbilityContext::new(&mut map, &mut roster))
            .unwrap_err();
        assert_eq!(
            err,
            AbilityError::MissingTarget {
                ability: Ability::Attack
            }
        );
    }
}
