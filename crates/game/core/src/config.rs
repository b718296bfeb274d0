/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Board height in cells.
    pub rows: u32,
    /// Board width in cells.
    pub cols: u32,

    /// Mitigation multiplier for the armor pool. A value below 1.0 means one
    /// point of armor costs `1 / multiplier` raw damage to remove.
    pub armor_mitigation: f32,
    /// Mitigation multiplier for the over-armor pool.
    pub over_armor_mitigation: f32,

    /// Flat ultimate charge granted to every living piece at its own team's
    /// end of turn.
    pub ult_charge_per_turn: f32,
    /// Ultimate charge per point of damage actually dealt.
    pub ult_charge_per_damage: f32,
    /// Ultimate charge per point of healing actually done.
    pub ult_charge_per_heal: f32,

    /// Extra movement range granted by the Speed status.
    pub speed_bonus_range: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of abilities a piece can carry.
    pub const MAX_ABILITIES: usize = 8;
    /// Maximum number of targeting or movement vectors per ability/piece.
    pub const MAX_VECTORS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROWS: u32 = 6;
    pub const DEFAULT_COLS: u32 = 6;
    pub const DEFAULT_ARMOR_MITIGATION: f32 = 0.8;
    pub const DEFAULT_ULT_CHARGE_PER_TURN: f32 = 50.0;
    pub const DEFAULT_ULT_CHARGE_PER_DAMAGE: f32 = 3.0;
    pub const DEFAULT_ULT_CHARGE_PER_HEAL: f32 = 4.0;
    pub const DEFAULT_SPEED_BONUS_RANGE: u32 = 2;

    pub fn new() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            armor_mitigation: Self::DEFAULT_ARMOR_MITIGATION,
            over_armor_mitigation: Self::DEFAULT_ARMOR_MITIGATION,
            ult_charge_per_turn: Self::DEFAULT_ULT_CHARGE_PER_TURN,
            ult_charge_per_damage: Self::DEFAULT_ULT_CHARGE_PER_DAMAGE,
            ult_charge_per_heal: Self::DEFAULT_ULT_CHARGE_PER_HEAL,
            speed_bonus_range: Self::DEFAULT_SPEED_BONUS_RANGE,
        }
    }

    pub fn with_board(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
