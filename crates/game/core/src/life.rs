//! Layered life pools and damage/heal apportionment.
//!
//! A piece's survivability is five ordered pools: over-armor, over-health,
//! armor, shields, health. Damage drains them strictly in that order;
//! healing restores health, shields and armor only. Armor-class pools carry
//! a mitigation multiplier below 1.0: removing one point of such a pool
//! costs `1 / multiplier` raw damage, so armor absorbs at a discount.
//!
//! The component clamps everything and never signals death itself; the
//! piece layer watches [`LifeComponent::total_available`] and handles
//! removal.

use bitflags::bitflags;

use crate::status::StatusFlags;

bitflags! {
    /// Combat-math tags consulted by damage/heal apportionment.
    ///
    /// Derived from the owner's (or instigator's) status flags plus any
    /// effect-supplied extras; the life layer itself knows nothing about
    /// status durations.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct LifeTags: u8 {
        /// Ignores incoming damage entirely.
        const INVULNERABLE = 1 << 0;
        /// Takes 20% more damage.
        const WEAKENED     = 1 << 1;
        /// Takes 20% less damage, receives 20% more healing.
        const FORTIFIED    = 1 << 2;
        /// Health cannot drop below 1.
        const IMMORTAL     = 1 << 3;
        /// Cannot receive healing.
        const CURSED       = 1 << 4;
        /// Deals 20% more damage (instigator-side).
        const AMPLIFIED    = 1 << 5;
    }
}

impl LifeTags {
    /// Projects a status bitmask onto the tags the life math consumes.
    pub fn from_status(status: StatusFlags) -> Self {
        let mut tags = LifeTags::empty();
        if status.contains(StatusFlags::IMMORTAL) {
            tags |= LifeTags::IMMORTAL;
        }
        if status.contains(StatusFlags::CURSED) {
            tags |= LifeTags::CURSED;
        }
        if status.contains(StatusFlags::AMPLIFIED) {
            tags |= LifeTags::AMPLIFIED;
        }
        tags
    }
}

/// The five resource pools, in depletion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolKind {
    OverArmor,
    OverHealth,
    Armor,
    Shields,
    Health,
}

impl PoolKind {
    /// Depletion order for incoming damage.
    pub const DAMAGE_ORDER: [PoolKind; 5] = [
        PoolKind::OverArmor,
        PoolKind::OverHealth,
        PoolKind::Armor,
        PoolKind::Shields,
        PoolKind::Health,
    ];

    /// Restoration order for incoming healing. Over-pools are never restored
    /// by normal healing.
    pub const HEAL_ORDER: [PoolKind; 3] = [PoolKind::Health, PoolKind::Shields, PoolKind::Armor];
}

/// A single resource pool.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    current: f32,
    maximum: f32,
    /// Mitigation multiplier; 1.0 for unmitigated pools, below 1.0 for
    /// armor-class pools.
    multiplier: f32,
}

impl Pool {
    fn new(value: f32, multiplier: f32) -> Self {
        let value = value.max(0.0);
        Self {
            current: value,
            maximum: value,
            multiplier: if multiplier > 0.0 { multiplier } else { 1.0 },
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    fn set_current(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.maximum);
    }

    fn set_maximum(&mut self, value: f32, floor: f32) {
        self.maximum = value.max(floor);
        if self.current > self.maximum {
            self.current = self.maximum;
        }
    }
}

/// Current/maximum values of one pool at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolValues {
    pub current: f32,
    pub maximum: f32,
}

/// Per-pool snapshot used in life-changed event payloads.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifeSnapshot {
    pub over_armor: PoolValues,
    pub over_health: PoolValues,
    pub armor: PoolValues,
    pub shields: PoolValues,
    pub health: PoolValues,
}

impl LifeSnapshot {
    pub fn total(&self) -> f32 {
        self.over_armor.current
            + self.over_health.current
            + self.armor.current
            + self.shields.current
            + self.health.current
    }
}

/// Layered health/shield/armor pools for one piece.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifeComponent {
    over_armor: Pool,
    over_health: Pool,
    armor: Pool,
    shields: Pool,
    health: Pool,
}

impl LifeComponent {
    /// Damage-taken modifier added while [`LifeTags::WEAKENED`] is set.
    pub const WEAKENED_MODIFIER: f32 = 0.2;
    /// Damage-taken modifier subtracted while [`LifeTags::FORTIFIED`] is set.
    pub const FORTIFIED_MODIFIER: f32 = 0.2;
    /// Damage-dealt modifier added while the instigator is amplified.
    pub const AMPLIFIED_MODIFIER: f32 = 0.2;
    /// Healing-received modifier added while [`LifeTags::FORTIFIED`] is set.
    pub const FORTIFIED_HEAL_MODIFIER: f32 = 0.2;
    /// Health a piece is left with when immortality blocks a killing blow.
    pub const IMMORTAL_FLOOR: f32 = 1.0;

    /// Creates a component with full pools. Health is floored at 1 (a piece
    /// must start alive); the over-pools start at 0 and are only granted by
    /// abilities.
    pub fn new(health: f32, shields: f32, armor: f32, armor_mitigation: f32) -> Self {
        Self {
            over_armor: Pool::new(0.0, armor_mitigation),
            over_health: Pool::new(0.0, 1.0),
            armor: Pool::new(armor, armor_mitigation),
            shields: Pool::new(shields, 1.0),
            health: Pool::new(health.max(1.0), 1.0),
        }
    }

    pub fn pool(&self, kind: PoolKind) -> &Pool {
        match kind {
            PoolKind::OverArmor => &self.over_armor,
            PoolKind::OverHealth => &self.over_health,
            PoolKind::Armor => &self.armor,
            PoolKind::Shields => &self.shields,
            PoolKind::Health => &self.health,
        }
    }

    fn pool_mut(&mut self, kind: PoolKind) -> &mut Pool {
        match kind {
            PoolKind::OverArmor => &mut self.over_armor,
            PoolKind::OverHealth => &mut self.over_health,
            PoolKind::Armor => &mut self.armor,
            PoolKind::Shields => &mut self.shields,
            PoolKind::Health => &mut self.health,
        }
    }

    pub fn current(&self, kind: PoolKind) -> f32 {
        self.pool(kind).current()
    }

    pub fn maximum(&self, kind: PoolKind) -> f32 {
        self.pool(kind).maximum()
    }

    /// Sets a pool's current value, clamped to `[0, maximum]`.
    pub fn set_current(&mut self, kind: PoolKind, value: f32) {
        self.pool_mut(kind).set_current(value);
    }

    /// Sets a pool's maximum, clamped to its documented floor (1 for health,
    /// 0 for everything else); current is re-clamped beneath it.
    pub fn set_maximum(&mut self, kind: PoolKind, value: f32) {
        let floor = match kind {
            PoolKind::Health => 1.0,
            _ => 0.0,
        };
        self.pool_mut(kind).set_maximum(value, floor);
    }

    /// Sum of every pool's current value. At or below zero means dead; the
    /// piece layer owns the removal.
    pub fn total_available(&self) -> f32 {
        PoolKind::DAMAGE_ORDER
            .iter()
            .map(|&kind| self.current(kind))
            .sum()
    }

    pub fn snapshot(&self) -> LifeSnapshot {
        let values = |pool: &Pool| PoolValues {
            current: pool.current(),
            maximum: pool.maximum(),
        };

        LifeSnapshot {
            over_armor: values(&self.over_armor),
            over_health: values(&self.over_health),
            armor: values(&self.armor),
            shields: values(&self.shields),
            health: values(&self.health),
        }
    }

    fn damage_multiplier(self_tags: LifeTags, instigator_tags: LifeTags) -> f32 {
        let mut multiplier = 1.0;
        if self_tags.contains(LifeTags::WEAKENED) {
            multiplier += Self::WEAKENED_MODIFIER;
        }
        if self_tags.contains(LifeTags::FORTIFIED) {
            multiplier -= Self::FORTIFIED_MODIFIER;
        }
        if instigator_tags.contains(LifeTags::AMPLIFIED) {
            multiplier += Self::AMPLIFIED_MODIFIER;
        }
        multiplier.max(0.0)
    }

    /// Applies damage across the pools in depletion order and returns the
    /// amount actually absorbed (for feedback and ultimate-charge credit).
    ///
    /// Mitigated pools absorb at a discount: with multiplier `m`, the pool
    /// loses `min(current, remaining * m)` and `remaining` drops by
    /// `lost / m`. Pools already at 0 are skipped. Immortality floors the
    /// health pool at 1 instead of letting it empty.
    pub fn apply_damage(
        &mut self,
        received: f32,
        self_tags: LifeTags,
        instigator_tags: LifeTags,
    ) -> f32 {
        if received <= 0.0 || self_tags.contains(LifeTags::INVULNERABLE) {
            return 0.0;
        }

        let scaled = received * Self::damage_multiplier(self_tags, instigator_tags);
        let remaining = self.deplete(scaled, &PoolKind::DAMAGE_ORDER, self_tags);
        scaled - remaining
    }

    /// Damage that bypasses every pool except health ("magic damage").
    pub fn apply_direct_damage(
        &mut self,
        received: f32,
        self_tags: LifeTags,
        instigator_tags: LifeTags,
    ) -> f32 {
        if received <= 0.0 || self_tags.contains(LifeTags::INVULNERABLE) {
            return 0.0;
        }

        let scaled = received * Self::damage_multiplier(self_tags, instigator_tags);
        let remaining = self.deplete(scaled, &[PoolKind::Health], self_tags);
        scaled - remaining
    }

    fn deplete(&mut self, amount: f32, order: &[PoolKind], self_tags: LifeTags) -> f32 {
        let mut remaining = amount;

        for &kind in order {
            if remaining <= 0.0 {
                break;
            }

            let pool = self.pool_mut(kind);
            if pool.current() <= 0.0 {
                continue;
            }

            let multiplier = pool.multiplier();
            let mut pool_damage = (remaining * multiplier).min(pool.current());

            if kind == PoolKind::Health && self_tags.contains(LifeTags::IMMORTAL) {
                let ceiling = (pool.current() - Self::IMMORTAL_FLOOR).max(0.0);
                pool_damage = pool_damage.min(ceiling);
            }

            pool.set_current(pool.current() - pool_damage);
            remaining -= pool_damage / multiplier;

            if kind == PoolKind::Health && self_tags.contains(LifeTags::IMMORTAL) {
                // Whatever the floor refused is simply lost.
                break;
            }
        }

        remaining.max(0.0)
    }

    /// Restores health, then shields, then armor, and returns the amount
    /// actually healed. A no-op on cursed targets; fortified targets receive
    /// 20% more. Pools at 0 are skipped, and the over-pools are never
    /// restored by normal healing.
    pub fn apply_heal(
        &mut self,
        received: f32,
        self_tags: LifeTags,
        _instigator_tags: LifeTags,
    ) -> f32 {
        if received <= 0.0 || self_tags.contains(LifeTags::CURSED) {
            return 0.0;
        }

        let mut multiplier = 1.0;
        if self_tags.contains(LifeTags::FORTIFIED) {
            multiplier += Self::FORTIFIED_HEAL_MODIFIER;
        }

        let mut remaining = received * multiplier;
        let mut healed = 0.0;

        for &kind in &PoolKind::HEAL_ORDER {
            if remaining <= 0.0 {
                break;
            }

            let pool = self.pool_mut(kind);
            if pool.current() <= 0.0 {
                continue;
            }

            let restored = (pool.maximum() - pool.current()).min(remaining);
            pool.set_current(pool.current() + restored);
            remaining -= restored;
            healed += restored;
        }

        healed
    }
}
