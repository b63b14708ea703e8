pub mod grid;
pub mod reserve;
pub mod square;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub use grid::Grid;
pub use reserve::{Rect, Reservation, Shape};
pub use square::{Direction, PRIMARY_REGION, RESERVED_REGION, Square, WallState};

use crate::code::{self, CodeVersion};
use crate::error::CodeError;

/// A rectangular maze: its squares, endpoints, chosen travel direction and the random
/// stream it was built from.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    version: &'static CodeVersion,
    seed: u64,
    rng: StdRng,
    start: (u8, u8),
    target: (u8, u8),
    direction: Direction,
    reservations: Vec<Reservation>,
    built: bool,
}

impl Maze {
    /// Margin, in cells, that must separate two reservations.
    pub const RESERVATION_MARGIN: u8 = 2;
    /// Number of placements tried by [`Maze::reserve_random`].
    pub const RESERVATION_ATTEMPTS: usize = 100;

    /// Creates an unbuilt maze. Width and height are clamped into the version's range and
    /// the seed is reduced modulo the version's seed limit, so that [`Maze::code`] always
    /// identifies this exact maze. Without a seed, one is drawn from the process RNG.
    ///
    /// Reservations and outlines can be added before the maze is handed to
    /// [`crate::generators::generate`].
    pub fn new(width: u8, height: u8, version: u8, seed: Option<u64>) -> Result<Self, CodeError> {
        let version = CodeVersion::get(version)?;
        let seed = match seed {
            Some(seed) => seed % version.seed_limit,
            None => rand::rng().random_range(0..version.seed_limit),
        };
        let width = version.clamp_size(width);
        let height = version.clamp_size(height);
        tracing::debug!(
            "[maze] new {}x{} maze, version {}, seed {}",
            width,
            height,
            version.version,
            seed
        );
        Ok(Maze {
            grid: Grid::new(width, height),
            version,
            seed,
            rng: StdRng::seed_from_u64(seed),
            start: (0, 0),
            target: (0, 0),
            direction: Direction::East,
            reservations: Vec::new(),
            built: false,
        })
    }

    /// Creates an unbuilt maze from an identity code. The version is inferred from the
    /// code's length.
    pub fn from_code(code: &str) -> Result<Self, CodeError> {
        let (version, seed, width, height) = code::decode_any(code)?;
        Maze::new(width, height, version.version, Some(seed))
    }

    /// Returns a copy with the same layout and every visited flag cleared.
    pub fn layout_copy(&self) -> Maze {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    /// Returns the width of the maze in squares.
    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    /// Returns the height of the maze in squares.
    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn version(&self) -> &'static CodeVersion {
        self.version
    }

    /// Identity code of this maze.
    pub fn code(&self) -> String {
        code::encode(self.version, self.seed, self.width(), self.height())
    }

    /// The maze's own random stream. Never shared between mazes.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn start(&self) -> (u8, u8) {
        self.start
    }

    pub fn target(&self) -> (u8, u8) {
        self.target
    }

    /// Direction of travel from start towards target.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_endpoints(
        &mut self,
        start: (u8, u8),
        target: (u8, u8),
        direction: Direction,
    ) {
        self.start = start;
        self.target = target;
        self.direction = direction;
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub(crate) fn mark_built(&mut self) {
        self.built = true;
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn is_in_bounds(&self, coord: (u8, u8)) -> bool {
        self.grid.is_in_bounds(coord)
    }

    pub fn neighbor(&self, coord: (u8, u8), direction: Direction) -> Option<(u8, u8)> {
        self.grid.neighbor(coord, direction)
    }

    pub fn wall(&self, coord: (u8, u8), direction: Direction) -> WallState {
        self.grid.wall(coord, direction)
    }

    pub fn is_visited(&self, coord: (u8, u8)) -> bool {
        self.grid[coord].visited
    }

    pub fn set_visited(&mut self, coord: (u8, u8)) {
        self.grid[coord].visited = true;
    }

    /// The maze is solved once the target square has been visited.
    pub fn is_solved(&self) -> bool {
        self.is_visited(self.target)
    }

    /// Clears every visited flag. The layout is left untouched.
    pub fn reset(&mut self) {
        self.grid
            .squares_mut()
            .for_each(|square| square.visited = false);
    }

    /// Reserves a rectangle, excluding its squares from the maze. With a shape, only the
    /// squares it selects are excluded.
    ///
    /// Fails, without reserving anything, when the rectangle is degenerate, does not fit
    /// strictly inside the maze, comes within [`Maze::RESERVATION_MARGIN`] cells of an
    /// earlier reservation, or the maze is already built.
    pub fn reserve(&mut self, x: u8, y: u8, width: u8, height: u8, shape: Option<Shape>) -> bool {
        let rect = Rect::new(x, y, width, height);
        if self.built || rect.is_degenerate() {
            return false;
        }
        if width >= self.width()
            || height >= self.height()
            || x as u16 + width as u16 > self.width() as u16
            || y as u16 + height as u16 > self.height() as u16
        {
            return false;
        }
        if self
            .reservations
            .iter()
            .any(|other| rect.overlaps_with_margin(&other.rect, Self::RESERVATION_MARGIN))
        {
            return false;
        }

        let reservation = Reservation { rect, shape };
        rect.coords()
            .filter(|&coord| reservation.covers(coord))
            .for_each(|coord| self.grid[coord].region = RESERVED_REGION);
        tracing::debug!("[maze] reserved {}", rect);
        self.reservations.push(reservation);
        true
    }

    /// Reserves a `width`x`height` rectangle at a random place at least `border_distance`
    /// cells away from the outer border. Gives up after [`Maze::RESERVATION_ATTEMPTS`]
    /// placements.
    pub fn reserve_random(
        &mut self,
        width: u8,
        height: u8,
        border_distance: u8,
        shape: Option<Shape>,
    ) -> Option<Rect> {
        let max_x = self.width() as i32 - width as i32 - border_distance as i32;
        let max_y = self.height() as i32 - height as i32 - border_distance as i32;
        if max_x < border_distance as i32 || max_y < border_distance as i32 {
            return None;
        }

        for attempt in 0..Self::RESERVATION_ATTEMPTS {
            let x = self.rng.random_range(border_distance as i32..=max_x) as u8;
            let y = self.rng.random_range(border_distance as i32..=max_y) as u8;
            if self.reserve(x, y, width, height, shape.clone()) {
                tracing::debug!(
                    "[maze] random reservation placed after {} attempts",
                    attempt + 1
                );
                return Some(Rect::new(x, y, width, height));
            }
        }
        tracing::debug!(
            "[maze] no room for a {}x{} reservation",
            width,
            height
        );
        None
    }

    /// Marks every wall inside `rect` that separates a square selected by `shape` from one
    /// that is not as an outline wall. The builder joins such walls to the tree last, one
    /// at a time, so each enclosed island gets a single entrance.
    pub fn outline(&mut self, rect: Rect, shape: Shape) -> bool {
        if self.built
            || rect.is_degenerate()
            || rect.x as u16 + rect.width as u16 > self.width() as u16
            || rect.y as u16 + rect.height as u16 > self.height() as u16
        {
            return false;
        }
        let inside = |coord: (u8, u8)| shape(coord.0 - rect.x, coord.1 - rect.y);
        for coord in rect.coords() {
            for direction in [Direction::East, Direction::South] {
                let Some(other) = self.neighbor(coord, direction) else {
                    continue;
                };
                if !rect.contains(other) || inside(coord) == inside(other) {
                    continue;
                }
                if self.grid[coord].is_primary() && self.grid[other].is_primary() {
                    self.grid
                        .set_wall(coord, direction, WallState::OutlineBoundary);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_dimensions_are_clamped() {
        let maze = Maze::new(2, 200, 1, Some(1)).unwrap();
        assert_eq!((maze.width(), maze.height()), (4, 99));
        let maze = Maze::new(60, 60, 0, Some(1)).unwrap();
        assert_eq!((maze.width(), maze.height()), (51, 51));
    }

    #[test]
    fn test_unknown_version() {
        assert!(matches!(
            Maze::new(10, 10, 7, None),
            Err(CodeError::UnknownVersion(7))
        ));
    }

    #[test]
    fn test_seed_reduced_and_code_round_trip() {
        let maze = Maze::new(17, 23, 1, Some(300_000_042)).unwrap();
        assert_eq!(maze.seed(), 42);
        let copy = Maze::from_code(&maze.code()).unwrap();
        assert_eq!(copy.seed(), 42);
        assert_eq!((copy.width(), copy.height()), (17, 23));
    }

    #[test]
    fn test_reserve_marks_region() {
        let mut maze = Maze::new(20, 20, 1, Some(3)).unwrap();
        assert!(maze.reserve(2, 2, 3, 3, None));
        let reserved = maze
            .grid()
            .squares()
            .filter(|square| square.is_reserved())
            .count();
        assert_eq!(reserved, 9);
        assert!(maze.grid()[(4, 4)].is_reserved());
        assert!(!maze.grid()[(5, 4)].is_reserved());
    }

    #[test]
    fn test_reserve_rejects_bad_rectangles() {
        let mut maze = Maze::new(20, 20, 1, Some(3)).unwrap();
        assert!(!maze.reserve(2, 2, 0, 3, None));
        assert!(!maze.reserve(0, 0, 20, 3, None));
        assert!(!maze.reserve(18, 2, 3, 3, None));
        assert!(maze.reserve(2, 2, 3, 3, None));
        // Within the two-cell margin of the first reservation
        assert!(!maze.reserve(6, 2, 3, 3, None));
        assert!(maze.reserve(7, 2, 3, 3, None));
        assert_eq!(maze.reservations().len(), 2);
    }

    #[test]
    fn test_reserve_with_shape() {
        let mut maze = Maze::new(20, 20, 1, Some(3)).unwrap();
        let diagonal: Shape = Arc::new(|x: u8, y: u8| x == y);
        assert!(maze.reserve(5, 5, 4, 4, Some(diagonal)));
        assert!(maze.grid()[(5, 5)].is_reserved());
        assert!(maze.grid()[(8, 8)].is_reserved());
        assert!(!maze.grid()[(6, 5)].is_reserved());
    }

    #[test]
    fn test_reserve_random() {
        let mut maze = Maze::new(30, 30, 1, Some(11)).unwrap();
        let rect = maze.reserve_random(4, 4, 3, None).unwrap();
        assert!(rect.x >= 3 && rect.y >= 3);
        assert!(rect.x + rect.width <= 27 && rect.y + rect.height <= 27);
        assert!(maze.reserve_random(40, 4, 0, None).is_none());
    }

    #[test]
    fn test_reserve_random_gives_up_when_full() {
        let mut maze = Maze::new(10, 10, 1, Some(5)).unwrap();
        assert!(maze.reserve(3, 3, 4, 4, None));
        // Every placement of the second rectangle is too close to the first
        assert!(maze.reserve_random(2, 2, 1, None).is_none());
    }

    #[test]
    fn test_outline_marks_shape_boundary() {
        let mut maze = Maze::new(10, 10, 1, Some(5)).unwrap();
        let inner: Shape = Arc::new(|x: u8, y: u8| (1..3).contains(&x) && (1..3).contains(&y));
        assert!(maze.outline(Rect::new(2, 2, 4, 4), inner));
        assert_eq!(
            maze.wall((3, 3), Direction::West),
            WallState::OutlineBoundary
        );
        assert_eq!(
            maze.wall((2, 3), Direction::East),
            WallState::OutlineBoundary
        );
        assert_eq!(maze.wall((3, 3), Direction::East), WallState::Undetermined);
    }

    #[test]
    fn test_reset_keeps_layout() {
        let mut maze = Maze::new(5, 5, 1, Some(5)).unwrap();
        maze.grid_mut().set_wall((1, 1), Direction::East, WallState::Open);
        maze.set_visited((1, 1));
        let copy = maze.layout_copy();
        assert!(!copy.is_visited((1, 1)));
        assert!(maze.is_visited((1, 1)));
        maze.reset();
        assert!(!maze.is_visited((1, 1)));
        assert_eq!(maze.wall((2, 1), Direction::West), WallState::Open);
    }
}
