//! Target validation and highlight computation.
//!
//! The same walk produces both the presentation overlay (which cells light
//! up) and the legality check for `use_ability`, so the two can never
//! disagree.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::ability::{Ability, AbilityKind};
use crate::board::{CellFlags, Coord};
use crate::direction::Direction;
use crate::piece::PieceId;
use crate::state::GameState;

/// Computes the cell flags an ability projects from its owner's position.
///
/// For each vector and direction, cells are walked from range 1 outward.
/// Unless the ability penetrates, the first occupied cell ends targetability
/// beyond it, but that cell itself is still evaluated. A range-0 vector
/// marks the owner's own cell (self-targeting).
pub(crate) fn ability_targets(
    state: &GameState,
    source: PieceId,
    ability: &Ability,
) -> BTreeMap<Coord, CellFlags> {
    let mut targets = BTreeMap::new();
    let Some(piece) = state.piece(source) else {
        return targets;
    };

    let mut mark = |cell: Coord, flags: CellFlags, targets: &mut BTreeMap<Coord, CellFlags>| {
        *targets.entry(cell).or_insert(CellFlags::empty()) |= flags;
    };

    for vector in &ability.vectors {
        for direction in Direction::iter() {
            if !vector.directions.contains_direction(direction) {
                continue;
            }

            // Self-targeting: heals and cures aimed at the owner itself.
            // Deploys need an empty cell, which one's own can never be.
            if vector.range == 0 {
                if !ability.kind.contains(AbilityKind::DEPLOY) {
                    mark(piece.cell, CellFlags::FRIENDLY_TARGET, &mut targets);
                }
                continue;
            }

            let mut made_contact = false;
            for distance in 1..=vector.range as i32 {
                let Some(cell) = state.board.step(piece.cell, direction, distance) else {
                    continue;
                };

                // Beyond the first contact nothing further can be targeted.
                if made_contact && !ability.penetrates {
                    mark(cell, CellFlags::IN_RANGE, &mut targets);
                    continue;
                }

                if ability.kind.contains(AbilityKind::DEPLOY) {
                    if state.board.occupant(cell).is_some() {
                        if !ability.penetrates {
                            made_contact = true;
                        }
                        mark(cell, CellFlags::IN_RANGE, &mut targets);
                    } else {
                        mark(cell, CellFlags::DEPLOYABLE, &mut targets);
                    }
                } else if let Some(occupant) = state.board.occupant(cell) {
                    if !ability.penetrates {
                        made_contact = true;
                    }

                    let same_team = state
                        .piece(occupant)
                        .is_some_and(|other| other.team == piece.team);

                    if ability.kind.contains(AbilityKind::DAMAGE) && !same_team {
                        mark(cell, CellFlags::ENEMY_TARGET, &mut targets);
                    } else if ability.kind.contains(AbilityKind::HEAL) && same_team {
                        mark(cell, CellFlags::FRIENDLY_TARGET, &mut targets);
                    } else {
                        mark(cell, CellFlags::IN_RANGE, &mut targets);
                    }
                } else {
                    mark(cell, CellFlags::IN_RANGE, &mut targets);
                }
            }
        }
    }

    targets
}

/// Cells the piece may move to this turn.
///
/// Range is measured from the committed cell, Speed extends it, occupants
/// and board edges block the walk, and the piece's own (tentative) cell is
/// always re-enterable.
pub(crate) fn movement_range(state: &GameState, piece: PieceId) -> Vec<Coord> {
    let Some(p) = state.piece(piece) else {
        return Vec::new();
    };
    if !p.can_move() {
        return Vec::new();
    }

    let bonus = if p.status.contains(crate::status::StatusFlags::SPEED) {
        state.config.speed_bonus_range
    } else {
        0
    };

    let mut cells = Vec::new();
    for vector in &p.movement_vectors {
        for direction in Direction::iter() {
            if !vector.directions.contains_direction(direction) {
                continue;
            }

            for distance in 1..=(vector.range + bonus) as i32 {
                let Some(cell) = state.board.step(p.committed_cell, direction, distance) else {
                    break;
                };

                match state.board.occupant(cell) {
                    None => cells.push(cell),
                    Some(occupant) if occupant == piece => cells.push(cell),
                    Some(_) => break,
                }
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilitySequence;
    use crate::config::GameConfig;
    use crate::direction::{DirectionSet, Vector};
    use crate::piece::{PieceSpec, Role};
    use crate::status::StatusFlags;
    use crate::team::TeamId;

    fn dummy() -> PieceSpec {
        PieceSpec::new("Dummy", Role::Tank, 100.0, 0.0)
            .with_movement(Vector::new(DirectionSet::LATERAL, 2))
    }

    fn damage_ability(range: u32) -> Ability {
        Ability::new("Zap", AbilityKind::DAMAGE).with_vector(Vector::new(DirectionSet::LATERAL, range))
    }

    #[test]
    fn contact_ends_targetability_beyond_the_first_occupant() {
        let mut state = GameState::new(GameConfig::new());
        let source = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 0))
            .unwrap();
        state
            .spawn(&dummy(), TeamId::Red, Coord::new(3, 2))
            .unwrap();
        state
            .spawn(&dummy(), TeamId::Red, Coord::new(3, 4))
            .unwrap();

        let targets = ability_targets(&state, source, &damage_ability(5));
        assert_eq!(
            targets.get(&Coord::new(3, 2)),
            Some(&CellFlags::ENEMY_TARGET)
        );
        // The piece behind the contact is merely in range.
        assert_eq!(targets.get(&Coord::new(3, 4)), Some(&CellFlags::IN_RANGE));

        let targets = ability_targets(&state, source, &damage_ability(5).penetrating());
        assert_eq!(
            targets.get(&Coord::new(3, 4)),
            Some(&CellFlags::ENEMY_TARGET)
        );
    }

    #[test]
    fn allies_in_a_damage_path_are_in_range_but_not_targets() {
        let mut state = GameState::new(GameConfig::new());
        let source = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 0))
            .unwrap();
        state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 2))
            .unwrap();

        let targets = ability_targets(&state, source, &damage_ability(3));
        assert_eq!(targets.get(&Coord::new(3, 2)), Some(&CellFlags::IN_RANGE));
    }

    #[test]
    fn range_zero_marks_own_cell_for_self_targeting() {
        let mut state = GameState::new(GameConfig::new());
        let source = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 3))
            .unwrap();

        let heal = Ability::new("Mend", AbilityKind::HEAL)
            .with_vector(Vector::new(DirectionSet::UP, 0));
        let targets = ability_targets(&state, source, &heal);
        assert_eq!(
            targets.get(&Coord::new(3, 3)),
            Some(&CellFlags::FRIENDLY_TARGET)
        );

        // A deploy can never aim at the occupied own cell.
        let deploy = Ability::new("Trap", AbilityKind::DEPLOY)
            .with_vector(Vector::new(DirectionSet::UP, 0))
            .with_sequence(AbilitySequence::DeployUnit(Box::new(dummy())));
        assert!(ability_targets(&state, source, &deploy).is_empty());
    }

    #[test]
    fn deploys_mark_empty_cells_and_stop_at_contact() {
        let mut state = GameState::new(GameConfig::new());
        let source = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 0))
            .unwrap();
        state
            .spawn(&dummy(), TeamId::Red, Coord::new(3, 2))
            .unwrap();

        let deploy = Ability::new("Trap", AbilityKind::DEPLOY)
            .with_vector(Vector::new(DirectionSet::LATERAL, 3))
            .with_sequence(AbilitySequence::DeployUnit(Box::new(dummy())));
        let targets = ability_targets(&state, source, &deploy);

        assert_eq!(targets.get(&Coord::new(3, 1)), Some(&CellFlags::DEPLOYABLE));
        assert_eq!(targets.get(&Coord::new(3, 2)), Some(&CellFlags::IN_RANGE));
        assert_eq!(targets.get(&Coord::new(3, 3)), Some(&CellFlags::IN_RANGE));
        assert_eq!(targets.get(&Coord::new(2, 0)), Some(&CellFlags::DEPLOYABLE));
    }

    #[test]
    fn movement_measures_from_the_committed_cell_and_stops_at_occupants() {
        let mut state = GameState::new(GameConfig::new());
        let mover = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 1))
            .unwrap();
        state
            .spawn(&dummy(), TeamId::Red, Coord::new(3, 3))
            .unwrap();

        let cells = movement_range(&state, mover);
        assert!(cells.contains(&Coord::new(3, 2)));
        // Blocked by the occupant at (3,3); nothing beyond it either.
        assert!(!cells.contains(&Coord::new(3, 3)));
        assert!(!cells.contains(&Coord::new(3, 4)));
        // Diagonals are not part of this piece's movement vectors.
        assert!(!cells.contains(&Coord::new(2, 2)));
    }

    #[test]
    fn speed_extends_movement_range() {
        let mut state = GameState::new(GameConfig::new());
        let mover = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 0))
            .unwrap();

        assert!(!movement_range(&state, mover).contains(&Coord::new(3, 3)));

        state
            .piece_mut(mover)
            .unwrap()
            .status
            .insert(StatusFlags::SPEED);
        let cells = movement_range(&state, mover);
        assert!(cells.contains(&Coord::new(3, 3)));
        assert!(cells.contains(&Coord::new(3, 4)));
    }

    #[test]
    fn impaired_pieces_have_no_movement_range() {
        let mut state = GameState::new(GameConfig::new());
        let mover = state
            .spawn(&dummy(), TeamId::Blue, Coord::new(3, 0))
            .unwrap();
        state
            .piece_mut(mover)
            .unwrap()
            .status
            .insert(StatusFlags::FROZEN);

        assert!(movement_range(&state, mover).is_empty());
    }
}
