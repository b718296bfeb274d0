//! Roster heroes driven through the engine.

use skirmish_core::{
    AbilityOutcome, Coord, Engine, GameConfig, GameState, PieceId, PoolKind, Role, StatusFlags,
    Target, TeamId,
};
use skirmish_content::{spec, HeroName};

fn place(state: &mut GameState, hero: HeroName, team: TeamId, row: i32, col: i32) -> PieceId {
    state
        .spawn(&spec(hero), team, Coord::new(row, col))
        .unwrap()
}

/// Ability indices follow each hero's declaration order.
const ARRYN_BASH: usize = 0;
const KREDIC_FEAR: usize = 1;
const MERCY_HEALING_BEAM: usize = 0;
const KIRI_GRAVITY_WELL: usize = 2;
const MELBRANA_BATTLE_CRY: usize = 2;
const RIVER_DEATH_GRIP: usize = 1;

#[test]
fn bash_knocks_the_target_back_and_bruises_it() {
    let mut state = GameState::new(GameConfig::new());
    let arryn = place(&mut state, HeroName::Arryn, TeamId::Blue, 3, 2);
    let kredic = place(&mut state, HeroName::Kredic, TeamId::Red, 3, 3);

    let mut engine = Engine::new(&mut state);
    let outcome = engine
        .use_ability(arryn, ARRYN_BASH, Target::Piece(kredic))
        .unwrap();
    assert_eq!(outcome, AbilityOutcome::Executed);

    // Knocked one cell away from the bash, then hit for 50 into shields.
    assert_eq!(engine.state().piece(kredic).unwrap().cell, Coord::new(3, 4));
    assert_eq!(
        engine
            .state()
            .piece(kredic)
            .unwrap()
            .life
            .current(PoolKind::Shields),
        25.0
    );
}

#[test]
fn fear_pierces_shields_and_disables() {
    let mut state = GameState::new(GameConfig::new());
    let kredic = place(&mut state, HeroName::Kredic, TeamId::Blue, 3, 2);
    let arryn = place(&mut state, HeroName::Arryn, TeamId::Red, 3, 3);

    let mut engine = Engine::new(&mut state);
    engine
        .use_ability(kredic, KREDIC_FEAR, Target::Piece(arryn))
        .unwrap();

    // Magic damage skipped the shields entirely.
    let target = engine.state().piece(arryn).unwrap();
    assert_eq!(target.life.current(PoolKind::Shields), 50.0);
    assert_eq!(target.life.current(PoolKind::Health), 225.0);
    assert_eq!(target.afflictions.len(), 1);

    // The disable takes hold as the victim's turn begins.
    engine.end_turn();
    let target = engine.state().piece(arryn).unwrap();
    assert!(target.status.contains(StatusFlags::DISABLED));
    assert!(!target.can_use_abilities());
}

#[test]
fn healing_beam_restores_an_ally_over_time() {
    let mut state = GameState::new(GameConfig::new());
    let mercy = place(&mut state, HeroName::Mercy, TeamId::Blue, 2, 3);
    let arryn = place(&mut state, HeroName::Arryn, TeamId::Blue, 3, 3);
    let kredic = place(&mut state, HeroName::Kredic, TeamId::Red, 3, 4);

    let mut engine = Engine::new(&mut state);

    // Blue passes; Kredic stares down Arryn for 25 magic damage.
    engine.end_turn();
    engine
        .use_ability(kredic, KREDIC_FEAR, Target::Piece(arryn))
        .unwrap();
    engine.end_turn();
    assert_eq!(
        engine
            .state()
            .piece(arryn)
            .unwrap()
            .life
            .current(PoolKind::Health),
        225.0
    );

    // Mercy's beam attaches a heal-over-time; it ticks at blue's end of
    // turn and tops Arryn back up.
    engine
        .use_ability(mercy, MERCY_HEALING_BEAM, Target::Piece(arryn))
        .unwrap();
    engine.end_turn();
    assert_eq!(
        engine
            .state()
            .piece(arryn)
            .unwrap()
            .life
            .current(PoolKind::Health),
        250.0
    );
}

#[test]
fn gravity_well_deploys_a_trap_on_the_casters_team() {
    let mut state = GameState::new(GameConfig::new());
    let kiri = place(&mut state, HeroName::Kiri, TeamId::Blue, 3, 1);
    let _kredic = place(&mut state, HeroName::Kredic, TeamId::Red, 0, 5);

    let mut engine = Engine::new(&mut state);
    let outcome = engine
        .use_ability(kiri, KIRI_GRAVITY_WELL, Target::Cell(Coord::new(2, 2)))
        .unwrap();
    assert_eq!(outcome, AbilityOutcome::Executed);

    let trap_id = engine.state().board.occupant(Coord::new(2, 2)).unwrap();
    let trap = engine.state().piece(trap_id).unwrap();
    assert_eq!(trap.name, "Gravity Well");
    assert_eq!(trap.role, Role::Deployable);
    assert_eq!(trap.team, TeamId::Blue);
    assert!(engine.state().team(TeamId::Blue).has_member(trap_id));
}

#[test]
fn battle_cry_makes_an_ally_shrug_off_roots() {
    let mut state = GameState::new(GameConfig::new());
    let melbrana = place(&mut state, HeroName::Melbrana, TeamId::Blue, 3, 2);
    let arryn = place(&mut state, HeroName::Arryn, TeamId::Blue, 3, 3);
    let river = place(&mut state, HeroName::River, TeamId::Red, 3, 4);

    let mut engine = Engine::new(&mut state);

    // Battle Cry attaches Unstoppable; it takes effect at blue's end of
    // turn.
    engine
        .use_ability(melbrana, MELBRANA_BATTLE_CRY, Target::Piece(arryn))
        .unwrap();
    engine.end_turn();
    assert!(engine
        .state()
        .piece(arryn)
        .unwrap()
        .status
        .contains(StatusFlags::UNSTOPPABLE));

    // River roots Arryn, but the root is stripped as blue's turn begins.
    engine
        .use_ability(river, RIVER_DEATH_GRIP, Target::Piece(arryn))
        .unwrap();
    engine.end_turn();

    let target = engine.state().piece(arryn).unwrap();
    assert!(!target.status.contains(StatusFlags::IMMOBILIZED));
    assert!(target.afflictions.is_empty());
    assert!(target.can_move());
}
