use crate::state::Position;

/// Tunable battle rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRules {
    /// Hard cap on rounds; guarantees termination.
    pub max_rounds: u32,
    /// Width and height of the square battle board.
    pub board_size: u32,
    /// Beam power lost per square beyond the first, in percent.
    pub beam_range_dropoff_percent: u32,
    /// Share of a torpedo hit taken by shields while they last, in percent.
    pub torpedo_shield_percent: u32,
    /// Share of maximum stack shields restored per round for regenerating races.
    pub shield_regen_percent: u32,
    /// Start square of each player, in order of first appearance. Wraps
    /// around when more players take part than there are entries.
    pub starting_positions: Vec<Position>,
}

impl BattleRules {
    pub const DEFAULT_MAX_ROUNDS: u32 = 16;
    pub const DEFAULT_BOARD_SIZE: u32 = 10;
    pub const DEFAULT_BEAM_RANGE_DROPOFF_PERCENT: u32 = 10;
    pub const DEFAULT_TORPEDO_SHIELD_PERCENT: u32 = 50;
    pub const DEFAULT_SHIELD_REGEN_PERCENT: u32 = 10;

    pub fn new() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            board_size: Self::DEFAULT_BOARD_SIZE,
            beam_range_dropoff_percent: Self::DEFAULT_BEAM_RANGE_DROPOFF_PERCENT,
            torpedo_shield_percent: Self::DEFAULT_TORPEDO_SHIELD_PERCENT,
            shield_regen_percent: Self::DEFAULT_SHIELD_REGEN_PERCENT,
            starting_positions: Self::default_starting_positions(),
        }
    }

    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    #[must_use]
    pub fn with_starting_positions(mut self, positions: Vec<Position>) -> Self {
        self.starting_positions = positions;
        self
    }

    /// Opposite edges first, then the remaining corners.
    pub fn default_starting_positions() -> Vec<Position> {
        vec![
            Position::new(1, 4),
            Position::new(8, 5),
            Position::new(4, 1),
            Position::new(5, 8),
            Position::new(1, 1),
            Position::new(8, 8),
            Position::new(1, 8),
            Position::new(8, 1),
        ]
    }

    /// Start square for the `slot`-th player to appear.
    pub fn starting_position(&self, slot: usize) -> Position {
        if self.starting_positions.is_empty() {
            return Position::ORIGIN;
        }
        self.starting_positions[slot % self.starting_positions.len()]
    }

    /// Keeps a square on the board.
    pub fn clamp_to_board(&self, position: Position) -> Position {
        let max = self.board_size.saturating_sub(1) as i32;
        Position::new(position.x.clamp(0, max), position.y.clamp(0, max))
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        Self::new()
    }
}
