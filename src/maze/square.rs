/// The four sides of a square, in clockwise order starting from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Index of the direction into a square's wall array.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 2) % 4]
    }

    /// The direction after a quarter turn to the left.
    pub fn left(self) -> Direction {
        Direction::ALL[(self.index() + 3) % 4]
    }

    /// The direction after a quarter turn to the right.
    pub fn right(self) -> Direction {
        Direction::ALL[(self.index() + 1) % 4]
    }

    /// Whether travelling in this direction changes the x coordinate.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Direction from `from` to the grid-adjacent `to`, if they are adjacent.
    pub fn between(from: (u8, u8), to: (u8, u8)) -> Option<Direction> {
        let dx = to.0 as i16 - from.0 as i16;
        let dy = to.1 as i16 - from.1 as i16;
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// State of one side of a square.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallState {
    /// Not yet decided by the builder.
    #[default]
    Undetermined,
    /// Part of a decorative outline; resolved only after the regular walls run out.
    OutlineBoundary,
    Open,
    Closed,
}

/// Region tag for squares that are excluded from the maze.
pub const RESERVED_REGION: u8 = 0;
/// Region tag for squares of the primary maze.
pub const PRIMARY_REGION: u8 = 1;

/// One cell of the maze.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    walls: [WallState; 4],
    /// Partition tag, see [`RESERVED_REGION`] and [`PRIMARY_REGION`].
    pub region: u8,
    /// Set by solvers once the square has been entered.
    pub visited: bool,
    /// Set by the builder once the square is part of the spanning tree.
    pub connected: bool,
}

impl Default for Square {
    fn default() -> Self {
        Square {
            walls: [WallState::Undetermined; 4],
            region: PRIMARY_REGION,
            visited: false,
            connected: false,
        }
    }
}

impl Square {
    pub fn wall(&self, direction: Direction) -> WallState {
        self.walls[direction.index()]
    }

    pub(crate) fn set_wall(&mut self, direction: Direction, state: WallState) {
        self.walls[direction.index()] = state;
    }

    pub fn is_reserved(&self) -> bool {
        self.region == RESERVED_REGION
    }

    pub fn is_primary(&self) -> bool {
        self.region == PRIMARY_REGION
    }

    /// Number of sides whose wall is closed.
    pub fn closed_walls(&self) -> usize {
        self.walls
            .iter()
            .filter(|&&wall| wall == WallState::Closed)
            .count()
    }

    /// A dead end has at least three closed walls.
    pub fn is_dead_end(&self) -> bool {
        self.closed_walls() >= 3
    }
}
