//! Status condition bitmask.
//!
//! Status flags are advisory tags: they summarize which conditions are
//! currently acting on a piece so that gating checks (can this piece move?
//! use abilities?) are O(1) mask tests. Durations never live here: they
//! live in the secondary effects that *caused* a tag, and the engine
//! recomputes the mask at turn boundaries as the union of the tags
//! contributed by still-active effects.

use bitflags::bitflags;

bitflags! {
    /// Named status conditions a piece can be under.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u16 {
        /// The piece took damage since its last affliction pass.
        const DAMAGED     = 1 << 0;
        /// A heal-over-time curative is active.
        const HEALING     = 1 << 1;
        /// Impairs abilities.
        const DISABLED    = 1 << 2;
        /// Impairs abilities and movement.
        const STUNNED     = 1 << 3;
        /// Reduces movement range.
        const SLOWED      = 1 << 4;
        /// Impairs abilities and movement.
        const SLEEPING    = 1 << 5;
        /// Impairs abilities and movement.
        const FROZEN      = 1 << 6;
        /// Impairs movement.
        const IMMOBILIZED = 1 << 7;
        /// Damage over time.
        const POISONED    = 1 << 8;
        /// Damage over time.
        const BURNING     = 1 << 9;
        /// Dispels and prevents healing.
        const CURSED      = 1 << 10;
        /// Increases damage output.
        const AMPLIFIED   = 1 << 11;
        /// Increases movement range.
        const SPEED       = 1 << 12;
        /// Prevents death.
        const IMMORTAL    = 1 << 13;
        /// Strips and prevents movement impairment.
        const UNSTOPPABLE = 1 << 14;
    }
}

impl StatusFlags {
    /// Tags contributed by buffs.
    pub const CURATIVE: StatusFlags = StatusFlags::HEALING
        .union(StatusFlags::AMPLIFIED)
        .union(StatusFlags::SPEED)
        .union(StatusFlags::IMMORTAL)
        .union(StatusFlags::UNSTOPPABLE);

    /// Tags contributed by debuffs.
    pub const AFFLICTIVE: StatusFlags = StatusFlags::DAMAGED
        .union(StatusFlags::DISABLED)
        .union(StatusFlags::STUNNED)
        .union(StatusFlags::SLOWED)
        .union(StatusFlags::SLEEPING)
        .union(StatusFlags::FROZEN)
        .union(StatusFlags::IMMOBILIZED)
        .union(StatusFlags::POISONED)
        .union(StatusFlags::BURNING)
        .union(StatusFlags::CURSED);

    /// Conditions that interfere with movement.
    pub const MOVEMENT_IMPAIRING: StatusFlags = StatusFlags::STUNNED
        .union(StatusFlags::SLOWED)
        .union(StatusFlags::SLEEPING)
        .union(StatusFlags::FROZEN)
        .union(StatusFlags::IMMOBILIZED);

    /// Conditions that prevent ability use.
    pub const ABILITY_IMPAIRING: StatusFlags = StatusFlags::DISABLED
        .union(StatusFlags::STUNNED)
        .union(StatusFlags::SLEEPING)
        .union(StatusFlags::FROZEN);

    const NAMES: [(StatusFlags, &'static str); 15] = [
        (StatusFlags::DAMAGED, "Damage"),
        (StatusFlags::HEALING, "Heal"),
        (StatusFlags::DISABLED, "Disable"),
        (StatusFlags::STUNNED, "Stun"),
        (StatusFlags::SLOWED, "Slow"),
        (StatusFlags::SLEEPING, "Sleep"),
        (StatusFlags::FROZEN, "Freeze"),
        (StatusFlags::IMMOBILIZED, "Immobilize"),
        (StatusFlags::POISONED, "Poison"),
        (StatusFlags::BURNING, "Burn"),
        (StatusFlags::CURSED, "Curse"),
        (StatusFlags::AMPLIFIED, "Amplify"),
        (StatusFlags::SPEED, "Speed"),
        (StatusFlags::IMMORTAL, "Immortality"),
        (StatusFlags::UNSTOPPABLE, "Unstoppable"),
    ];

    /// Display name for a single-flag value.
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map_or("Unknown", |(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsets_do_not_overlap_curative_and_afflictive() {
        assert!((StatusFlags::CURATIVE & StatusFlags::AFFLICTIVE).is_empty());
    }

    #[test]
    fn movement_impairing_conditions_are_afflictive() {
        assert!(StatusFlags::AFFLICTIVE.contains(StatusFlags::MOVEMENT_IMPAIRING));
        assert!(StatusFlags::AFFLICTIVE.contains(StatusFlags::ABILITY_IMPAIRING));
    }

    #[test]
    fn names_cover_every_flag() {
        for flag in StatusFlags::all().iter() {
            assert_ne!(flag.name(), "Unknown");
        }
    }
}
