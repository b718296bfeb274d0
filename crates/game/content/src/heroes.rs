//! The baseline hero roster.

use skirmish_core::{
    Ability, AbilityKind, AbilitySequence, AoeEffect, CureEffect, DamageEffect, DirectionSet,
    ForceMoveEffect, HealEffect, HealOrDamageEffect, MultitargetEffect, PieceSpec, PrimaryEffect,
    Role, SecondaryEffect, SecondaryKind, StatusFlags, Vector,
};

/// Every playable hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum HeroName {
    // DPS
    River,
    Kiri,
    Kredic,
    // Healers
    Ana,
    Mercy,
    // Tanks
    Arryn,
    Melbrana,
    Elayis,
}

/// Roster options per battlefield role.
pub fn heroes_for_role(role: Role) -> Vec<HeroName> {
    match role {
        Role::Dps => vec![HeroName::River, HeroName::Kiri, HeroName::Kredic],
        Role::Healer => vec![HeroName::Ana, HeroName::Mercy],
        Role::Tank => vec![HeroName::Arryn, HeroName::Melbrana, HeroName::Elayis],
        Role::Deployable => Vec::new(),
    }
}

/// Builds the spec for a hero.
pub fn spec(hero: HeroName) -> PieceSpec {
    match hero {
        HeroName::River => river(),
        HeroName::Kiri => kiri(),
        HeroName::Kredic => kredic(),
        HeroName::Ana => ana(),
        HeroName::Mercy => mercy(),
        HeroName::Arryn => arryn(),
        HeroName::Melbrana => melbrana(),
        HeroName::Elayis => elayis(),
    }
}

fn river() -> PieceSpec {
    PieceSpec::new("River", Role::Dps, 150.0, 25.0)
        .with_movement(Vector::new(DirectionSet::LATERAL, 3))
        .with_movement(Vector::new(DirectionSet::DIAGONAL, 1))
        .with_ability(
            // Medium range polearm thrust with a poison coated tip.
            Ability::new("Poison Jab", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::LATERAL, 2))
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(60.0)))
                .with_secondary(SecondaryEffect::poison()),
        )
        .with_ability(
            // Grapple and dagger strike that seizes the victim's legs.
            Ability::new("Death Grip", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::ALL, 1))
                .with_cooldown(4)
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(90.0)))
                .with_secondary(SecondaryEffect::immobilize()),
        )
        .with_ability(
            // Overloaded energy cell pulsing damage around him for turns.
            Ability::new("Cell Overload", AbilityKind::DAMAGE)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_cooldown(3)
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(30.0).aoe(1)))
                .with_secondary(SecondaryEffect::repeat(
                    PrimaryEffect::Damage(DamageEffect::new(30.0).aoe(1)),
                    3,
                )),
        )
}

fn kiri() -> PieceSpec {
    PieceSpec::new("Kiri", Role::Dps, 150.0, 50.0)
        .with_movement(Vector::new(DirectionSet::ALL, 1))
        .with_ability(
            Ability::new("Fusing Beam", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::LATERAL, 3))
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(70.0))),
        )
        .with_ability(
            // M1 sets fire to the target's clothes; the fire spreads.
            Ability::new("M1", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::ALL, 4))
                .penetrating()
                .with_cooldown(3)
                .with_primary(PrimaryEffect::Aoe(AoeEffect::new(
                    SecondaryEffect::burn(),
                    1,
                    AbilityKind::DAMAGE,
                ))),
        )
        .with_ability(
            Ability::new("Gravity Well", AbilityKind::DEPLOY)
                .with_vector(Vector::new(DirectionSet::ALL, 3))
                .with_cooldown(5)
                .with_sequence(AbilitySequence::DeployUnit(Box::new(gravity_well()))),
        )
        .with_ability(
            Ability::new("Overcharge", AbilityKind::DAMAGE)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::LATERAL, 5))
                .with_primary(PrimaryEffect::Multitarget(MultitargetEffect::primary(
                    PrimaryEffect::Damage(DamageEffect::new(70.0)),
                    5,
                    AbilityKind::DAMAGE,
                )))
                .with_primary(PrimaryEffect::Multitarget(MultitargetEffect::secondary(
                    SecondaryEffect::burn(),
                    5,
                    AbilityKind::DAMAGE,
                ))),
        )
}

/// The trap unit Gravity Well places on the board.
fn gravity_well() -> PieceSpec {
    PieceSpec::new("Gravity Well", Role::Deployable, 10.0, 0.0)
}

fn kredic() -> PieceSpec {
    PieceSpec::new("Kredic", Role::Dps, 75.0, 75.0)
        .with_movement(Vector::new(DirectionSet::ALL, 1))
        .with_ability(
            Ability::new("Fireball", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::ALL, 3))
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(40.0)))
                .with_primary(PrimaryEffect::Aoe(AoeEffect::new(
                    SecondaryEffect::burn(),
                    1,
                    AbilityKind::DAMAGE,
                ))),
        )
        .with_ability(
            // Magic damage straight through shields.
            Ability::new("Fear", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::LATERAL, 1))
                .with_cooldown(3)
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(25.0).magic()))
                .with_secondary(SecondaryEffect::disable()),
        )
        .with_ability(
            Ability::new("Blizzard", AbilityKind::DAMAGE)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::ALL, 2))
                .with_cooldown(3)
                .with_primary(PrimaryEffect::Aoe(AoeEffect::new(
                    SecondaryEffect::freeze(),
                    2,
                    AbilityKind::DAMAGE,
                ))),
        )
}

fn ana() -> PieceSpec {
    PieceSpec::new("Ana", Role::Healer, 50.0, 100.0)
        .with_max_ult_charge(375.0)
        .with_movement(Vector::new(DirectionSet::DIAGONAL, 2))
        .with_movement(Vector::new(DirectionSet::LATERAL, 1))
        .with_ability(
            // Damages an enemy or heals an ally for double.
            Ability::new("Chemical Dart", AbilityKind::DAMAGE.union(AbilityKind::HEAL))
                .with_vector(Vector::new(DirectionSet::DIAGONAL, 3))
                .penetrating()
                .with_primary(PrimaryEffect::HealOrDamage(HealOrDamageEffect::new(40.0))),
        )
        .with_ability(
            Ability::new("Sleep Dart", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::DIAGONAL, 2))
                .with_cooldown(3)
                .with_secondary(SecondaryEffect::sleep()),
        )
        .with_ability(
            // Spreads a curse to the target and its adjacent allies.
            Ability::new("Cursed Touch", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::DIAGONAL, 1))
                .with_cooldown(5)
                .with_primary(PrimaryEffect::Aoe(AoeEffect::new(
                    SecondaryEffect::curse(),
                    1,
                    AbilityKind::DAMAGE,
                ))),
        )
        .with_ability(
            Ability::new("Full Heal", AbilityKind::HEAL)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::ALL, 3))
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_primary(PrimaryEffect::Cure(CureEffect))
                .with_secondary(SecondaryEffect::new(
                    SecondaryKind::Heal(HealEffect::new(1000.0)),
                    2,
                )),
        )
}

fn mercy() -> PieceSpec {
    PieceSpec::new("Mercy", Role::Healer, 25.0, 150.0)
        .with_max_ult_charge(500.0)
        .with_movement(Vector::new(DirectionSet::ALL, 2))
        .with_ability(
            Ability::new("Healing Beam", AbilityKind::HEAL)
                .with_vector(Vector::new(DirectionSet::ALL, 1))
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_secondary(SecondaryEffect::new(
                    SecondaryKind::Heal(HealEffect::new(40.0)),
                    3,
                )),
        )
        .with_ability(
            Ability::new("Cleanse", AbilityKind::HEAL)
                .with_vector(Vector::new(DirectionSet::ALL, 1))
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_cooldown(5)
                .with_primary(PrimaryEffect::Cure(CureEffect)),
        )
        .with_ability(
            // Passive healing pulses around her for several turns.
            Ability::new("Radiance", AbilityKind::HEAL)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_cooldown(4)
                .with_secondary(SecondaryEffect::new(
                    SecondaryKind::Heal(HealEffect::new(100.0).aoe(1)),
                    4,
                )),
        )
}

fn arryn() -> PieceSpec {
    PieceSpec::new("Arryn", Role::Tank, 250.0, 50.0)
        .with_movement(Vector::new(DirectionSet::LATERAL, 2))
        .with_movement(Vector::new(DirectionSet::DIAGONAL, 1))
        .with_ability(
            Ability::new("Bash", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::ALL, 1))
                .with_sequence(AbilitySequence::Immediate)
                .with_primary(PrimaryEffect::ForceMove(ForceMoveEffect::new(1)))
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(50.0))),
        )
        .with_ability(
            Ability::new("Fiery Slash", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::LATERAL, 2))
                .with_cooldown(5)
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(70.0)))
                .with_secondary(SecondaryEffect::burn()),
        )
        .with_ability(
            // Rush an enemy; a pinned target takes the impact instead.
            Ability::new("Charge", AbilityKind::DAMAGE.union(AbilityKind::MOVEMENT))
                .with_vector(Vector::new(DirectionSet::LATERAL, 3))
                .with_cooldown(5)
                .with_sequence(AbilitySequence::Immediate)
                .with_primary(PrimaryEffect::ForceMove(
                    ForceMoveEffect::new(3)
                        .with_stack(2)
                        .self_move()
                        .with_impact(50.0),
                )),
        )
        .with_ability(
            Ability::new("Sonic Boom", AbilityKind::DAMAGE)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_primary(PrimaryEffect::Aoe(AoeEffect::new(
                    SecondaryEffect::stun(),
                    2,
                    AbilityKind::DAMAGE,
                )))
                .with_primary(PrimaryEffect::Damage(
                    DamageEffect::new(20.0).aoe(2).penetrating(),
                ))
                .with_primary(PrimaryEffect::ForceMove(
                    ForceMoveEffect::new(1).aoe().with_stack(2),
                )),
        )
}

fn melbrana() -> PieceSpec {
    PieceSpec::new("Melbrana", Role::Tank, 250.0, 50.0)
        .with_movement(Vector::new(DirectionSet::LATERAL, 2))
        .with_movement(Vector::new(DirectionSet::DIAGONAL, 1))
        .with_ability(
            Ability::new("Sunder", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::ALL, 1))
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(50.0))),
        )
        .with_ability(
            Ability::new("Slam", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::LATERAL, 1))
                .with_cooldown(4)
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(70.0)))
                .with_secondary(SecondaryEffect::stun()),
        )
        .with_ability(
            // Frees an ally of movement impairment and amplifies them.
            Ability::new("Battle Cry", AbilityKind::HEAL)
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_vector(Vector::new(DirectionSet::ALL, 3))
                .penetrating()
                .with_cooldown(7)
                .with_secondary(SecondaryEffect::status(StatusFlags::UNSTOPPABLE, 3))
                .with_secondary(SecondaryEffect::amplify()),
        )
        .with_ability(
            Ability::new("Rampage", AbilityKind::DAMAGE)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::UP, 0))
                .with_cooldown(4)
                .with_secondary(SecondaryEffect::status(StatusFlags::AMPLIFIED, 4))
                .with_secondary(SecondaryEffect::status(StatusFlags::SPEED, 4))
                .with_secondary(SecondaryEffect::status(StatusFlags::IMMORTAL, 4)),
        )
}

fn elayis() -> PieceSpec {
    PieceSpec::new("Elayis", Role::Tank, 200.0, 50.0)
        .with_movement(Vector::new(DirectionSet::DIAGONAL, 3))
        .with_movement(Vector::new(DirectionSet::LATERAL, 2))
        .with_ability(
            Ability::new("Machine Guns", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::ALL, 1))
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(40.0))),
        )
        .with_ability(
            Ability::new("Missiles", AbilityKind::DAMAGE)
                .with_vector(Vector::new(DirectionSet::LATERAL, 1))
                .with_cooldown(3)
                .with_primary(PrimaryEffect::Damage(DamageEffect::new(80.0))),
        )
        .with_ability(
            // Lobbed bomb that levels the target and everything adjacent.
            Ability::new("Bomb", AbilityKind::DAMAGE)
                .ultimate()
                .with_vector(Vector::new(DirectionSet::LATERAL, 4))
                .penetrating()
                .with_cooldown(5)
                .with_primary(PrimaryEffect::Damage(
                    DamageEffect::new(100.0).aoe(1).penetrating(),
                )),
        )
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_hero_builds_a_complete_spec() {
        for hero in HeroName::iter() {
            let spec = spec(hero);

            assert!(spec.health > 0.0, "{hero} must start alive");
            assert!(
                !spec.movement_vectors.is_empty(),
                "{hero} must be able to move"
            );
            assert!(!spec.abilities.is_empty(), "{hero} must have abilities");

            let ultimates = spec.abilities.iter().filter(|a| a.is_ultimate).count();
            assert_eq!(ultimates, 1, "{hero} must have exactly one ultimate");

            for ability in &spec.abilities {
                assert!(
                    !ability.vectors.is_empty(),
                    "{hero}'s {} needs targeting vectors",
                    ability.name
                );
                assert_eq!(
                    ability.remaining_cooldown, 0,
                    "{hero}'s {} must start ready",
                    ability.name
                );
            }
        }
    }

    #[test]
    fn roster_roles_cover_every_hero_once() {
        let mut all: Vec<HeroName> = Role::iter().flat_map(heroes_for_role).collect();
        all.sort_by_key(|hero| *hero as u8);
        let from_iter: Vec<HeroName> = HeroName::iter().collect();

        assert_eq!(all.len(), from_iter.len());
        for hero in from_iter {
            assert!(all.contains(&hero));
        }
    }

    #[test]
    fn deployables_are_not_rostered() {
        assert!(heroes_for_role(Role::Deployable).is_empty());
    }
}
