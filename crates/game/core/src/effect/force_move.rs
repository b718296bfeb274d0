//! Forced movement: knockback, charges, and chain pushes.

use tracing::trace;

use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;
use crate::status::StatusFlags;

use super::aoe_targets;

/// Pushes the target (or the source itself) along the interaction direction,
/// dragging up to `stack_size` pieces along as a chain.
///
/// A push that is blocked outright deals `impact_damage` to the target
/// instead, which is how charge-style abilities convert a pinned target into
/// a bonus hit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceMoveEffect {
    /// Maximum number of cells the moved piece can travel.
    pub distance: u32,
    /// Push every enemy around the target instead of the target alone.
    pub is_aoe: bool,
    /// Maximum number of pieces (target included) moved together.
    pub stack_size: u32,
    /// Move the source itself toward the target (charge) instead of pushing
    /// the target away.
    pub self_target: bool,
    /// Damage dealt to the target when the push is fully blocked.
    pub impact_damage: f32,
}

impl ForceMoveEffect {
    pub fn new(distance: u32) -> Self {
        Self {
            distance,
            is_aoe: false,
            stack_size: 1,
            self_target: false,
            impact_damage: 0.0,
        }
    }

    pub fn aoe(mut self) -> Self {
        self.is_aoe = true;
        self
    }

    pub fn with_stack(mut self, stack_size: u32) -> Self {
        self.stack_size = stack_size.max(1);
        self
    }

    pub fn self_move(mut self) -> Self {
        self.self_target = true;
        self
    }

    pub fn with_impact(mut self, damage: f32) -> Self {
        self.impact_damage = damage;
        self
    }

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: Option<PieceId>,
        direction: Option<Direction>,
    ) {
        let Some(target) = target else { return };
        let Some(direction) = direction else { return };
        if self.distance == 0 {
            return;
        }

        if self.self_target {
            self.charge(ctx, source, target, direction);
        } else if self.is_aoe {
            self.push_surrounding(ctx, source, target, direction);
        } else {
            self.push_single(ctx, source, target, direction);
        }
    }

    /// Plain push of one target (with chain).
    fn push_single(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: PieceId,
        direction: Direction,
    ) {
        if is_immobilized(ctx, target) {
            return;
        }

        let moved = chain_move(ctx, target, self.distance, direction, self.stack_size);
        if !moved && self.impact_damage > 0.0 {
            ctx.damage(source, target, self.impact_damage, false);
        }
    }

    /// AOE mode: every enemy around the target is pushed outward along its
    /// own direction from the center. The center itself does not move.
    fn push_surrounding(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: PieceId,
        _direction: Direction,
    ) {
        let Some(center) = ctx.piece_cell(target) else {
            return;
        };

        for (sub_target, sub_direction) in aoe_targets(ctx.state(), center, self.distance, false) {
            let Some(sub_direction) = sub_direction else {
                continue;
            };
            if ctx.same_team(source, sub_target) || is_immobilized(ctx, sub_target) {
                continue;
            }

            chain_move(ctx, sub_target, self.distance, sub_direction, self.stack_size);
        }
    }

    /// Charge: the source rushes toward the target; if it ends up adjacent,
    /// the target is bumped one cell further, and a fully blocked bump
    /// becomes the impact hit.
    fn charge(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: PieceId,
        direction: Direction,
    ) {
        if !is_immobilized(ctx, source) {
            chain_move(ctx, source, self.distance, direction, self.stack_size);
        }

        let (Some(source_cell), Some(target_cell)) =
            (ctx.piece_cell(source), ctx.piece_cell(target))
        else {
            return;
        };

        // Only a target pinned directly in front of the charger is affected.
        if ctx.state().board.step(source_cell, direction, 1) != Some(target_cell) {
            return;
        }

        let moved = if is_immobilized(ctx, target) {
            false
        } else {
            chain_move(ctx, target, 1, direction, 1)
        };

        if !moved && self.impact_damage > 0.0 {
            ctx.damage(source, target, self.impact_damage, false);
        }
    }
}

fn is_immobilized(ctx: &EffectContext<'_>, piece: PieceId) -> bool {
    ctx.state()
        .piece(piece)
        .is_some_and(|p| p.status.contains(StatusFlags::IMMOBILIZED))
}

/// Resolves a chain push and returns whether the primary target moved.
///
/// 1. Walk from the target along the push direction up to `distance` cells,
///    collecting occupants into a chain capped at `stack_size` pieces
///    (target included), ordered farthest first.
/// 2. The farthest piece travels to the farthest empty in-bounds cell within
///    `distance` steps of its own position (it stays put when immobilized).
/// 3. Every other piece is compacted one cell behind the piece ahead of it,
///    immobilized pieces excepted.
pub(crate) fn chain_move(
    ctx: &mut EffectContext<'_>,
    target: PieceId,
    distance: u32,
    direction: Direction,
    stack_size: u32,
) -> bool {
    let Some(origin) = ctx.piece_cell(target) else {
        return false;
    };
    let stack_size = stack_size.max(1) as usize;

    // Ordered farthest-to-be-pushed first, target last.
    let mut chain = vec![target];
    for step in 1..=distance as i32 {
        if chain.len() >= stack_size {
            break;
        }

        let Some(cell) = ctx.state().board.step(origin, direction, step) else {
            continue;
        };

        if let Some(occupant) = ctx.state().board.occupant(cell) {
            chain.insert(0, occupant);
        }
    }

    let farthest = chain[0];
    let Some(farthest_origin) = ctx.piece_cell(farthest) else {
        return false;
    };

    let farthest_dest = if is_immobilized(ctx, farthest) {
        farthest_origin
    } else {
        frontier(ctx, farthest_origin, direction, distance)
    };

    trace!(
        ?direction,
        chain = chain.len(),
        "resolving forced movement chain"
    );

    let mut destinations = vec![(farthest, farthest_dest)];
    let mut offset = 1;
    for &piece in chain.iter().skip(1) {
        if is_immobilized(ctx, piece) {
            continue;
        }

        let Some(cell) = ctx.state().board.step(farthest_dest, direction, -offset) else {
            continue;
        };

        destinations.push((piece, cell));
        offset += 1;
    }

    let mut target_moved = false;
    for (piece, dest) in destinations {
        let Some(from) = ctx.piece_cell(piece) else {
            continue;
        };
        if dest == from {
            continue;
        }

        ctx.relocate(piece, dest);
        if piece == target {
            target_moved = true;
        }
    }

    target_moved
}

/// Farthest empty, in-bounds cell within `distance` steps of `from`,
/// stopping at the first occupied or out-of-bounds cell.
fn frontier(
    ctx: &EffectContext<'_>,
    from: crate::board::Coord,
    direction: Direction,
    distance: u32,
) -> crate::board::Coord {
    let mut current = from;

    for _ in 0..distance {
        let Some(next) = ctx.state().board.step(current, direction, 1) else {
            break;
        };
        if ctx.state().board.occupant(next).is_some() {
            break;
        }

        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::config::GameConfig;
    use crate::life::PoolKind;
    use crate::piece::{PieceSpec, Role};
    use crate::state::GameState;
    use crate::team::TeamId;

    fn state_with(pieces: &[(TeamId, Coord)]) -> (GameState, Vec<PieceId>) {
        let mut state = GameState::new(GameConfig::new());
        let spec = PieceSpec::new("Dummy", Role::Tank, 100.0, 0.0);

        let ids = pieces
            .iter()
            .map(|&(team, cell)| state.spawn(&spec, team, cell).unwrap())
            .collect();

        (state, ids)
    }

    #[test]
    fn open_push_sends_chain_forward_compacted() {
        // Pusher at (3,0); target A at (3,1), B at (3,2), open cells beyond.
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 1)),
            (TeamId::Red, Coord::new(3, 2)),
        ]);
        let (pusher, a, b) = (ids[0], ids[1], ids[2]);

        let effect = ForceMoveEffect::new(2).with_stack(2);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, pusher, Some(a), Some(Direction::Right));

        // B (farthest) resolves first, A lands one cell behind it.
        assert_eq!(state.piece(b).unwrap().cell, Coord::new(3, 4));
        assert_eq!(state.piece(a).unwrap().cell, Coord::new(3, 3));
        assert_eq!(state.board.occupant(Coord::new(3, 4)), Some(b));
        assert_eq!(state.board.occupant(Coord::new(3, 3)), Some(a));
        assert_eq!(state.board.occupant(Coord::new(3, 1)), None);
        // Forced moves commit immediately.
        assert_eq!(state.piece(a).unwrap().committed_cell, Coord::new(3, 3));
    }

    #[test]
    fn capped_chain_blocked_by_bystander_deals_impact() {
        // A, B, C in a line; stack of 2 leaves C out, and C pins B in place.
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 1)),
            (TeamId::Red, Coord::new(3, 2)),
            (TeamId::Red, Coord::new(3, 3)),
        ]);
        let (pusher, a, b, c) = (ids[0], ids[1], ids[2], ids[3]);

        let effect = ForceMoveEffect::new(2).with_stack(2).with_impact(35.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, pusher, Some(a), Some(Direction::Right));

        // Nobody found room, so nobody moved and no cell is shared.
        assert_eq!(state.piece(a).unwrap().cell, Coord::new(3, 1));
        assert_eq!(state.piece(b).unwrap().cell, Coord::new(3, 2));
        assert_eq!(state.piece(c).unwrap().cell, Coord::new(3, 3));
        // The failed push became the impact hit on the target.
        assert_eq!(
            state.piece(a).unwrap().life.current(PoolKind::Health),
            65.0
        );
        assert_eq!(
            state.piece(b).unwrap().life.current(PoolKind::Health),
            100.0
        );
    }

    #[test]
    fn immobilized_target_does_not_move_and_takes_no_impact() {
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 1)),
        ]);
        let (pusher, target) = (ids[0], ids[1]);
        state
            .piece_mut(target)
            .unwrap()
            .status
            .insert(StatusFlags::IMMOBILIZED);

        let effect = ForceMoveEffect::new(2).with_impact(35.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, pusher, Some(target), Some(Direction::Right));

        assert_eq!(state.piece(target).unwrap().cell, Coord::new(3, 1));
        assert_eq!(
            state.piece(target).unwrap().life.current(PoolKind::Health),
            100.0
        );
    }

    #[test]
    fn immobilized_farthest_piece_pins_the_chain() {
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 1)),
            (TeamId::Red, Coord::new(3, 2)),
        ]);
        let (pusher, a, b) = (ids[0], ids[1], ids[2]);
        state
            .piece_mut(b)
            .unwrap()
            .status
            .insert(StatusFlags::IMMOBILIZED);

        let effect = ForceMoveEffect::new(2).with_stack(2).with_impact(35.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, pusher, Some(a), Some(Direction::Right));

        assert_eq!(state.piece(b).unwrap().cell, Coord::new(3, 2));
        assert_eq!(state.piece(a).unwrap().cell, Coord::new(3, 1));
        assert_eq!(
            state.piece(a).unwrap().life.current(PoolKind::Health),
            65.0
        );
    }

    #[test]
    fn charge_closes_distance_and_bumps_the_target() {
        // Charger at (3,0), enemy at (3,3), room behind the enemy.
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 3)),
        ]);
        let (charger, enemy) = (ids[0], ids[1]);

        let effect = ForceMoveEffect::new(3)
            .with_stack(1)
            .self_move()
            .with_impact(50.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, charger, Some(enemy), Some(Direction::Right));

        // The charger stops short of the enemy, who is bumped one cell.
        assert_eq!(state.piece(charger).unwrap().cell, Coord::new(3, 2));
        assert_eq!(state.piece(enemy).unwrap().cell, Coord::new(3, 4));
        assert_eq!(
            state.piece(enemy).unwrap().life.current(PoolKind::Health),
            100.0
        );
    }

    #[test]
    fn charge_with_stack_room_sweeps_the_target_along() {
        // With chain capacity the enemy is collected and carried to the
        // edge, where the failed bump becomes the impact hit.
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 3)),
        ]);
        let (charger, enemy) = (ids[0], ids[1]);

        let effect = ForceMoveEffect::new(3)
            .with_stack(2)
            .self_move()
            .with_impact(50.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, charger, Some(enemy), Some(Direction::Right));

        assert_eq!(state.piece(enemy).unwrap().cell, Coord::new(3, 5));
        assert_eq!(state.piece(charger).unwrap().cell, Coord::new(3, 4));
        assert_eq!(
            state.piece(enemy).unwrap().life.current(PoolKind::Health),
            50.0
        );
    }

    #[test]
    fn charge_into_pinned_target_deals_impact() {
        // Enemy pinned against another piece: the bump fails, damage lands.
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 3)),
            (TeamId::Red, Coord::new(3, 4)),
        ]);
        let (charger, enemy, wall) = (ids[0], ids[1], ids[2]);

        let effect = ForceMoveEffect::new(3)
            .with_stack(1)
            .self_move()
            .with_impact(50.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, charger, Some(enemy), Some(Direction::Right));

        assert_eq!(state.piece(charger).unwrap().cell, Coord::new(3, 2));
        assert_eq!(state.piece(enemy).unwrap().cell, Coord::new(3, 3));
        assert_eq!(
            state.piece(enemy).unwrap().life.current(PoolKind::Health),
            50.0
        );
        assert_eq!(state.piece(wall).unwrap().cell, Coord::new(3, 4));
    }

    #[test]
    fn board_edge_blocks_the_push() {
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 4)),
            (TeamId::Red, Coord::new(3, 5)),
        ]);
        let (pusher, target) = (ids[0], ids[1]);

        let effect = ForceMoveEffect::new(2).with_impact(35.0);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, pusher, Some(target), Some(Direction::Right));

        assert_eq!(state.piece(target).unwrap().cell, Coord::new(3, 5));
        assert_eq!(
            state.piece(target).unwrap().life.current(PoolKind::Health),
            65.0
        );
    }

    #[test]
    fn missing_direction_or_target_is_a_no_op() {
        let (mut state, ids) = state_with(&[
            (TeamId::Blue, Coord::new(3, 0)),
            (TeamId::Red, Coord::new(3, 1)),
        ]);
        let before = state.clone();

        let effect = ForceMoveEffect::new(2);
        let mut ctx = EffectContext::new(&mut state);
        effect.execute(&mut ctx, ids[0], None, Some(Direction::Right));
        effect.execute(&mut ctx, ids[0], Some(ids[1]), None);

        assert_eq!(state.piece(ids[1]).unwrap().cell, before.piece(ids[1]).unwrap().cell);
    }
}
