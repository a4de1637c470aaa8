use std::collections::VecDeque;

use crate::grid::{Bounds, Position};
use Direction::*;

pub const INITIAL_SNAKE_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// True when turning from `self` to `other` would be a full reversal.
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: Direction,
}

impl Snake {
    /// Seeds the snake at the center of the map: a vertical column with
    /// the head on top, already pointed up.
    pub fn new(bounds: Bounds) -> Self {
        let center = bounds.center();
        let body = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| Position::new(center.x, center.y - 2 + i))
            .collect();

        Snake {
            body,
            direction: Up,
            pending: Up,
        }
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Remembers the latest requested turn. Turns only take effect at the
    /// top of a tick, where reversals are discarded.
    pub fn queue_turn(&mut self, direction: Direction) {
        self.pending = direction;
    }

    pub fn apply_pending(&mut self) {
        if !self.direction.is_opposite(self.pending) {
            self.direction = self.pending;
        }
    }

    /// The cell the head moves into next, walls ignored.
    pub fn next_head(&self) -> Position {
        let head = self.head();
        match self.direction {
            Up => Position::new(head.x, head.y - 1),
            Down => Position::new(head.x, head.y + 1),
            Left => Position::new(head.x - 1, head.y),
            Right => Position::new(head.x + 1, head.y),
        }
    }

    /// True when `pos` lands on the body, the tail cell included.
    pub fn collides(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Shifts the body onto `new_head`. Growing keeps the old tail, so
    /// the snake gets longer by one cell.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
impl Snake {
    pub fn from_cells(cells: &[(i32, i32)], direction: Direction) -> Self {
        let body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Snake {
            body,
            direction,
            pending: direction,
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }
}
