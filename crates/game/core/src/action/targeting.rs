//! Attack target acquisition.

use std::collections::BTreeSet;

use crate::map::{GridMap, MapError};
use crate::state::{Actor, Coordinate, Roster};

/// Cells holding a living hostile actor within `attacker`'s attack range.
///
/// Range is Manhattan distance from the attacker's current position and
/// ignores terrain: a wall between two soldiers does not block a strike.
pub fn attack_targets(
    map: &GridMap,
    roster: &Roster,
    attacker: &Actor,
) -> Result<BTreeSet<Coordinate>, MapError> {
    let origin = map.require_position(attacker.id)?;
    let range = attacker.attack.range;

    let targets = map
        .occupants()
        .filter(|(cell, _)| origin.manhattan_distance(*cell) <= range)
        .filter(|(_, id)| {
            roster
                .get(id)
                .is_some_and(|other| other.is_alive() && attacker.is_hostile_to(other))
        })
        .map(|(cell, _)| cell)
        .collect();

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileProperties;
    use crate::state::{ActorId, AttackProfile, Side};

    fn c(column: i32, row: i32) -> Coordinate {
        Coordinate::new(column, row)
    }

    fn place(map: &mut GridMap, roster: &mut Roster, actor: Actor, at: Coordinate) {
        map.place_actor(actor.id, at).unwrap();
        roster.insert(actor.id, actor);
    }

    #[test]
    fn only_living_hostiles_in_range_are_targets() {
        let mut map = GridMap::new(6, 6, TileProperties::default());
        let mut roster = Roster::new();
        let attacker = Actor::new(ActorId(1), "Hunkenheim", "goodsoldier")
            .with_attack(AttackProfile::new(2, 3));
        place(&mut map, &mut roster, attacker, c(2, 2));
        place(
            &mut map,
            &mut roster,
            Actor::new(ActorId(2), "ally", "goodsoldier"),
            c(2, 3),
        );
        place(
            &mut map,
            &mut roster,
            Actor::new(ActorId(3), "near", "badsoldier").with_side(Side::Red),
            c(3, 3),
        );
        place(
            &mut map,
            &mut roster,
            Actor::new(ActorId(4), "far", "badsoldier").with_side(Side::Red),
            c(5, 5),
        );
        let mut fallen = Actor::new(ActorId(5), "fallen", "badsoldier").with_side(Side::Red);
        fallen.take_damage(100);
        place(&mut map, &mut roster, fallen, c(2, 0));
        place(
            &mut map,
            &mut roster,
            Actor::new(ActorId(6), "edge", "badsoldier").with_side(Side::Red),
            c(0, 2),
        );

        let targets = attack_targets(&map, &roster, &roster[&ActorId(1)]).unwrap();
        assert_eq!(targets, BTreeSet::from([c(3, 3), c(0, 2)]));
    }

    #[test]
    fn unplaced_attacker_is_an_error() {
        let map = GridMap::new(2, 2, TileProperties::default());
        let roster = Roster::new();
        let attacker = Actor::new(ActorId(1), "ghost", "goodsoldier");
        assert_eq!(
            attack_targets(&map, &roster, &attacker),
            Err(MapError::NotPlaced { actor: ActorId(1) })
        );
    }
}
