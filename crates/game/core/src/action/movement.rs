use crate::state::{ActorId, Coordinate};

use super::{Ability, AbilityContext, AbilityEffect, AbilityError};

/// Validated move, ready to apply.
struct PlannedMove {
    origin: Coordinate,
    destination: Coordinate,
    path: Vec<Coordinate>,
    cost: u32,
}

pub(super) fn activate(
    actor: ActorId,
    context: &mut AbilityContext<'_>,
) -> Result<AbilityEffect, AbilityError> {
    let planned = pre_validate(actor, context)?;
    apply(actor, &planned, context)?;
    post_validate(actor, &planned, context)?;

    Ok(AbilityEffect::Moved {
        path: planned.path,
        cost: planned.cost,
    })
}

fn pre_validate(actor: ActorId, context: &AbilityContext<'_>) -> Result<PlannedMove, AbilityError> {
    let acting = context.actor(actor)?;
    let origin = context.map.require_position(actor)?;
    let destination = context.require_target(Ability::Move)?;

    let reachability = context
        .reachability
        .filter(|result| {
            result.origin() == origin
                && result.budget() == acting.movement_points()
                && result.map_revision() == context.map.revision()
        })
        .ok_or(AbilityError::StaleReachability { actor })?;

    if destination == origin {
        return Err(AbilityError::InvalidTarget {
            ability: Ability::Move,
            target: destination,
        });
    }

    let cost = reachability
        .cost_to(destination)
        .ok_or(AbilityError::InvalidTarget {
            ability: Ability::Move,
            target: destination,
        })?;
    if cost > acting.movement_points() {
        return Err(AbilityError::InsufficientMovement {
            needed: cost,
            available: acting.movement_points(),
        });
    }

    let path = reachability.reconstruct_path(destination)?;

    Ok(PlannedMove {
        origin,
        destination,
        path,
        cost,
    })
}

fn apply(
    actor: ActorId,
    planned: &PlannedMove,
    context: &mut AbilityContext<'_>,
) -> Result<(), AbilityError> {
    context.map.move_actor(planned.origin, planned.destination)?;
    context.actor_mut(actor)?.movement.spend(planned.cost);
    Ok(())
}

fn post_validate(
    actor: ActorId,
    planned: &PlannedMove,
    context: &AbilityContext<'_>,
) -> Result<(), AbilityError> {
    let position = context.map.require_position(actor)?;
    debug_assert_eq!(position, planned.destination);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TurnOutcome;
    use crate::cost::TerrainCost;
    use crate::map::{GridMap, MapError, TerrainKind, TileProperties};
    use crate::pathfinding::Pathfinder;
    use crate::state::{Actor, Roster};

    fn c(column: i32, row: i32) -> Coordinate {
        Coordinate::new(column, row)
    }

    fn setup(points: u32) -> (GridMap, Roster) {
        let mut map = GridMap::new(5, 5, TileProperties::from_terrain(TerrainKind::Grass));
        map.set_tile(c(3, 2), TileProperties::from_terrain(TerrainKind::Forest))
            .unwrap();
        map.place_actor(ActorId(1), c(2, 2)).unwrap();

        let mut roster = Roster::new();
        roster.insert(
            ActorId(1),
            Actor::new(ActorId(1), "Hunkenheim", "goodsoldier")
                .with_movement_points(points)
                .with_abilities(Ability::ALL),
        );
        (map, roster)
    }

    #[test]
    fn move_relocates_actor_and_spends_path_cost() {
        let (mut map, mut roster) = setup(4);
        let reach = Pathfinder::new(&map, TerrainCost)
            .reachable_for(&roster[&ActorId(1)])
            .unwrap();

        let report = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster)
                    .with_reachability(&reach)
                    .with_target(c(4, 2)),
            )
            .unwrap();

        assert_eq!(report.outcome, TurnOutcome::Continue);
        let AbilityEffect::Moved { path, cost } = report.effect else {
            panic!("expected a move effect");
        };
        assert_eq!(cost, 3);
        assert_eq!(path.first(), Some(&c(2, 2)));
        assert_eq!(path.last(), Some(&c(4, 2)));
        assert_eq!(map.position_of(ActorId(1)), Some(c(4, 2)));
        assert_eq!(map.actor_at(c(2, 2)), None);
        assert_eq!(roster[&ActorId(1)].movement_points(), 1);
    }

    #[test]
    fn move_rejects_stale_reachability() {
        let (mut map, mut roster) = setup(4);
        let reach = Pathfinder::new(&map, TerrainCost)
            .reachable_for(&roster[&ActorId(1)])
            .unwrap();
        roster.get_mut(&ActorId(1)).unwrap().movement.spend(1);

        let err = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster)
                    .with_reachability(&reach)
                    .with_target(c(2, 3)),
            )
            .unwrap_err();
        assert_eq!(err, AbilityError::StaleReachability { actor: ActorId(1) });
        assert_eq!(map.position_of(ActorId(1)), Some(c(2, 2)));
    }

    #[test]
    fn move_rejects_reachability_from_before_a_map_change() {
        let mut map = GridMap::new(5, 1, TileProperties::new(1));
        map.place_actor(ActorId(1), c(0, 0)).unwrap();
        let mut roster = Roster::new();
        roster.insert(
            ActorId(1),
            Actor::new(ActorId(1), "Hunkenheim", "goodsoldier")
                .with_movement_points(3)
                .with_abilities(Ability::ALL),
        );
        let reach = Pathfinder::new(&map, TerrainCost)
            .reachable_for(&roster[&ActorId(1)])
            .unwrap();
        assert!(reach.contains(c(2, 0)));

        map.set_tile(c(1, 0), TileProperties::impassable()).unwrap();
        let err = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster)
                    .with_reachability(&reach)
                    .with_target(c(2, 0)),
            )
            .unwrap_err();
        assert_eq!(err, AbilityError::StaleReachability { actor: ActorId(1) });

        map.set_tile(c(1, 0), TileProperties::new(1)).unwrap();
        map.place_actor(ActorId(2), c(1, 0)).unwrap();
        let err = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster)
                    .with_reachability(&reach)
                    .with_target(c(2, 0)),
            )
            .unwrap_err();
        assert_eq!(err, AbilityError::StaleReachability { actor: ActorId(1) });
        assert_eq!(map.position_of(ActorId(1)), Some(c(0, 0)));
        assert_eq!(roster[&ActorId(1)].movement_points(), 3);
    }

    #[test]
    fn move_requires_reachability_and_destination() {
        let (mut map, mut roster) = setup(4);
        let err = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster).with_target(c(2, 3)),
            )
            .unwrap_err();
        assert_eq!(err, AbilityError::StaleReachability { actor: ActorId(1) });

        let reach = Pathfinder::new(&map, TerrainCost)
            .reachable_for(&roster[&ActorId(1)])
            .unwrap();
        let err = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster).with_reachability(&reach),
            )
            .unwrap_err();
        assert_eq!(
            err,
            AbilityError::MissingTarget {
                ability: Ability::Move
            }
        );
    }

    #[test]
    fn move_rejects_unreachable_and_own_cell() {
        let (mut map, mut roster) = setup(1);
        let reach = Pathfinder::new(&map, TerrainCost)
            .reachable_for(&roster[&ActorId(1)])
            .unwrap();

        for target in [c(0, 0), c(2, 2), c(3, 2)] {
            let err = Ability::Move
                .activate(
                    ActorId(1),
                    &mut AbilityContext::new(&mut map, &mut roster)
                        .with_reachability(&reach)
                        .with_target(target),
                )
                .unwrap_err();
            assert_eq!(
                err,
                AbilityError::InvalidTarget {
                    ability: Ability::Move,
                    target
                }
            );
        }
    }

    #[test]
    fn move_needs_actor_on_the_map() {
        let (mut map, mut roster) = setup(4);
        let reach = Pathfinder::new(&map, TerrainCost)
            .reachable_for(&roster[&ActorId(1)])
            .unwrap();
        map.remove_actor(c(2, 2));

        let err = Ability::Move
            .activate(
                ActorId(1),
                &mut AbilityContext::new(&mut map, &mut roster)
                    .with_reachability(&reach)
                    .with_target(c(2, 3)),
            )
            .unwrap_err();
        assert_eq!(
            err,
            AbilityError::Map(MapError::NotPlaced { actor: ActorId(1) })
        );
    }
}
