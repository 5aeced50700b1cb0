use crate::maze::{Dir, Grid, Pos, START};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Blocked,
    Moved,
    Arrived,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: START }
    }
}

impl Player {
    /// Walks `steps` unit cells in `dir`, checking every cell on the way.
    /// The stride ends at the first wall or edge. `Arrived` only when the
    /// stride ends on the goal.
    pub fn try_move(&mut self, grid: &Grid, goal: Pos, dir: Dir, steps: u32) -> MoveResult {
        let mut moved = false;
        for _ in 0..steps.max(1) {
            if !can_move(grid, self.pos, dir) {
                break;
            }
            if let Some(next) = grid.neighbor(self.pos, dir) {
                self.pos = next;
                moved = true;
            }
        }

        if moved && self.pos == goal {
            MoveResult::Arrived
        } else if moved {
            MoveResult::Moved
        } else {
            MoveResult::Blocked
        }
    }
}

pub fn can_move(grid: &Grid, pos: Pos, dir: Dir) -> bool {
    grid.neighbor(pos, dir)
        .map(|next| grid.is_path(next))
        .unwrap_or(false)
}
