use rand::{Rng, rngs::StdRng};

use super::{Choice, Move, Step, Stepper, WallChooser, open_walls};
use crate::error::SolveError;
use crate::maze::Maze;

/// How the flooder picks the frontier square to grow and the wall to grow through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flood {
    /// Always the oldest frontier square, through its first open wall.
    RoundRobin,
    /// A random frontier square, through a random open wall.
    Random,
}

/// Bookkeeping for a square the flooder has entered.
#[derive(Debug, Clone, Copy, Default)]
struct Extension {
    parent: Option<(u8, u8)>,
    /// Number of squares entered from this one.
    branches: u8,
}

/// Grows several paths at once from every square that still has an unexplored exit.
#[derive(Debug, Clone)]
pub struct Flooder {
    flood: Flood,
    frontier: Vec<(u8, u8)>,
    extensions: Vec<Option<Extension>>,
}

impl Flooder {
    pub fn new(flood: Flood) -> Self {
        Flooder {
            flood,
            frontier: Vec::new(),
            extensions: Vec::new(),
        }
    }

    fn choice(&self) -> Choice {
        match self.flood {
            Flood::RoundRobin => Choice::First,
            Flood::Random => Choice::Random,
        }
    }

    /// Number of squares entered from `square` so far.
    pub fn branches(&self, maze: &Maze, square: (u8, u8)) -> u8 {
        self.extensions
            .get(maze.grid().index_of(square))
            .copied()
            .flatten()
            .map_or(0, |extension| extension.branches)
    }

    /// Follows parent links back from `square` and returns the path from the start to it,
    /// or an empty path if the square has not been entered.
    ///
    /// The path is the only one there is, since the maze is a tree.
    pub fn path_from_start(&self, maze: &Maze, square: (u8, u8)) -> Vec<(u8, u8)> {
        let mut path = Vec::new();
        let mut current = Some(square);
        while let Some(coord) = current {
            let Some(extension) = self
                .extensions
                .get(maze.grid().index_of(coord))
                .copied()
                .flatten()
            else {
                return Vec::new();
            };
            path.push(coord);
            current = extension.parent;
        }
        path.reverse();
        path
    }
}

impl Stepper for Flooder {
    fn reset(&mut self, maze: &mut Maze) {
        let start = maze.start();
        self.frontier.clear();
        self.frontier.push(start);
        self.extensions = vec![None; maze.grid().len()];
        self.extensions[maze.grid().index_of(start)] = Some(Extension::default());
        maze.set_visited(start);
    }

    fn advance(&mut self, maze: &mut Maze, rng: &mut StdRng) -> Result<Step, SolveError> {
        if self.frontier.is_empty() {
            return Err(SolveError::Exhausted);
        }
        let index = match self.flood {
            Flood::RoundRobin => 0,
            Flood::Random => rng.random_range(0..self.frontier.len()),
        };
        let square = self.frontier[index];
        let candidates = open_walls(maze, square, true);

        let direction = match candidates.len() {
            0 => {
                self.frontier.remove(index);
                return Ok(Step::Retired {
                    square,
                    dead_end: self.branches(maze, square) == 0,
                });
            }
            // The square leaves the frontier before its last exit is taken, which decides
            // what the round-robin flood looks at next
            1 => {
                self.frontier.remove(index);
                candidates[0]
            }
            _ => self.choice().choose(maze.direction(), &candidates, rng),
        };

        let next = maze
            .neighbor(square, direction)
            .ok_or(SolveError::Exhausted)?;
        self.frontier.push(next);
        maze.set_visited(next);
        let grid = maze.grid();
        if let Some(extension) = self.extensions[grid.index_of(square)].as_mut() {
            extension.branches = extension.branches.saturating_add(1);
        }
        self.extensions[grid.index_of(next)] = Some(Extension {
            parent: Some(square),
            branches: 0,
        });

        Ok(Step::Moved(Move {
            from: square,
            to: next,
            forward: true,
        }))
    }

    fn path(&self, maze: &Maze) -> Vec<(u8, u8)> {
        match self.path_from_start(maze, maze.target()) {
            path if !path.is_empty() => path,
            _ => self
                .frontier
                .last()
                .map(|&square| self.path_from_start(maze, square))
                .unwrap_or_default(),
        }
    }
}
