use rand::{SeedableRng, rngs::StdRng};

use super::{Flood, Flooder, Move, Step, Stepper};
use crate::error::SolveError;
use crate::maze::Maze;

/// Knows the way: replays a path worked out in advance, one square per step, without ever
/// taking a wrong turn.
#[derive(Debug, Clone)]
pub struct MasterSolver {
    path: Vec<(u8, u8)>,
    cursor: usize,
}

impl MasterSolver {
    /// Works out the path by flooding a private copy of the maze's layout. The maze itself
    /// is left untouched.
    pub fn new(maze: &Maze) -> Result<Self, SolveError> {
        let mut copy = maze.layout_copy();
        let mut rng = StdRng::seed_from_u64(maze.seed());
        let mut flooder = Flooder::new(Flood::RoundRobin);
        flooder.reset(&mut copy);
        while !copy.is_solved() {
            flooder.advance(&mut copy, &mut rng)?;
        }
        let path = flooder.path_from_start(&copy, copy.target());
        tracing::debug!(
            "[solver] master path of {} squares for maze {}",
            path.len(),
            maze.code()
        );
        Ok(MasterSolver { path, cursor: 0 })
    }

    /// The whole precomputed path, start first.
    pub fn full_path(&self) -> &[(u8, u8)] {
        &self.path
    }
}

impl Stepper for MasterSolver {
    fn reset(&mut self, maze: &mut Maze) {
        self.cursor = 0;
        if let Some(&first) = self.path.first() {
            maze.set_visited(first);
        }
    }

    fn advance(&mut self, maze: &mut Maze, _rng: &mut StdRng) -> Result<Step, SolveError> {
        let (Some(&from), Some(&to)) = (self.path.get(self.cursor), self.path.get(self.cursor + 1))
        else {
            return Err(SolveError::Exhausted);
        };
        self.cursor += 1;
        maze.set_visited(to);
        Ok(Step::Moved(Move {
            from,
            to,
            forward: true,
        }))
    }

    fn path(&self, _maze: &Maze) -> Vec<(u8, u8)> {
        self.path
            .get(..=self.cursor)
            .map(<[_]>::to_vec)
            .unwrap_or_default()
    }
}
