//! Board geometry.

use crate::state::Position;

/// Chebyshev distance: diagonal steps cost the same as straight ones.
pub fn distance(from: Position, to: Position) -> u32 {
    from.x.abs_diff(to.x).max(from.y.abs_diff(to.y))
}

/// True when `to` lies within `range` squares of `from`.
pub fn in_range(range: u32, from: Position, to: Position) -> bool {
    distance(from, to) <= range
}

/// Moves `from` up to `steps` squares toward `to`, stopping `keep` squares away.
pub fn step_toward(from: Position, to: Position, steps: u32, keep: u32) -> Position {
    let mut current = from;
    for _ in 0..steps {
        if distance(current, to) <= keep {
            break;
        }
        current = Position::new(
            current.x + (to.x - current.x).signum(),
            current.y + (to.y - current.y).signum(),
        );
    }
    current
}

/// Moves `from` up to `steps` squares directly away from `threat`.
///
/// The result may fall off the board; callers clamp it.
pub fn step_away(from: Position, threat: Position, steps: u32) -> Position {
    let mut dx = (from.x - threat.x).signum();
    let mut dy = (from.y - threat.y).signum();
    if dx == 0 && dy == 0 {
        // Sharing a square: retreat toward the low-x edge.
        dx = -1;
        dy = 0;
    }
    let steps = steps as i32;
    Position::new(from.x + dx * steps, from.y + dy * steps)
}

impl Position {
    pub fn distance_to(self, other: Position) -> u32 {
        distance(self, other)
    }
}
