//! Map geometry. Positions are signed so a snake in no-clip mode can
//! wander off the map and come back.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// Playable area, the outermost ring of cells being the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Bounds { width, height }
    }

    pub fn square(size: i32) -> Self {
        Bounds::new(size, size)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn on_wall(&self, pos: Position) -> bool {
        pos.x == 0 || pos.x == self.width - 1 || pos.y == 0 || pos.y == self.height - 1
    }

    /// True for cells the renderer can draw, the wall ring included.
    pub fn visible(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Teleports a wall cell to the opposite interior edge and reports
    /// the hit. Anything off the wall ring comes back unchanged.
    ///
    /// Exactly one side is resolved per call, checked in a fixed order:
    /// left, right, top, bottom. A corner cell only gets its x fixed.
    pub fn resolve_wall(&self, pos: Position) -> (Position, bool) {
        let mut resolved = pos;

        if pos.x == 0 {
            resolved.x = self.width - 2;
        } else if pos.x == self.width - 1 {
            resolved.x = 1;
        } else if pos.y == 0 {
            resolved.y = self.height - 2;
        } else if pos.y == self.height - 1 {
            resolved.y = 1;
        } else {
            return (pos, false);
        }

        (resolved, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cells_resolve_to_themselves() {
        let bounds = Bounds::square(30);

        for y in 1..29 {
            for x in 1..29 {
                let pos = Position::new(x, y);
                assert_eq!(bounds.resolve_wall(pos), (pos, false));
            }
        }
    }

    #[test]
    fn wall_cells_teleport_to_the_opposite_edge() {
        let bounds = Bounds::square(30);

        // Corners aside, every ring cell maps strictly inside.
        for x in 1..29 {
            assert_eq!(
                bounds.resolve_wall(Position::new(x, 0)),
                (Position::new(x, 28), true)
            );
            assert_eq!(
                bounds.resolve_wall(Position::new(x, 29)),
                (Position::new(x, 1), true)
            );
        }
        for y in 1..29 {
            assert_eq!(
                bounds.resolve_wall(Position::new(0, y)),
                (Position::new(28, y), true)
            );
            assert_eq!(
                bounds.resolve_wall(Position::new(29, y)),
                (Position::new(1, y), true)
            );
        }
    }

    #[test]
    fn corners_resolve_a_single_axis() {
        let bounds = Bounds::square(30);

        assert_eq!(
            bounds.resolve_wall(Position::new(0, 0)),
            (Position::new(28, 0), true)
        );
        assert_eq!(
            bounds.resolve_wall(Position::new(29, 29)),
            (Position::new(1, 29), true)
        );
    }

    #[test]
    fn off_map_cells_are_not_wall_hits() {
        let bounds = Bounds::square(30);

        for pos in [
            Position::new(-1, 5),
            Position::new(30, 5),
            Position::new(5, -3),
            Position::new(5, 31),
        ] {
            assert_eq!(bounds.resolve_wall(pos), (pos, false));
            assert!(!bounds.on_wall(pos));
        }
    }

    #[test]
    fn visibility_matches_the_map_rectangle() {
        let bounds = Bounds::new(30, 20);

        assert!(bounds.visible(Position::new(0, 0)));
        assert!(bounds.visible(Position::new(29, 19)));
        assert!(!bounds.visible(Position::new(30, 19)));
        assert!(!bounds.visible(Position::new(29, 20)));
        assert!(!bounds.visible(Position::new(-1, 0)));
    }

    #[test]
    fn center_of_the_default_map() {
        assert_eq!(Bounds::square(30).center(), Position::new(15, 15));
    }
}
