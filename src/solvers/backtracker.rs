use rand::rngs::StdRng;

use super::{Choice, Move, Step, Stepper, WallChooser, open_walls};
use crate::error::SolveError;
use crate::maze::{Direction, Maze};

/// Walks a single path from the start, backing out of squares with nowhere left to go.
#[derive(Debug, Clone)]
pub struct Backtracker {
    choice: Choice,
    /// The current path, each square with the direction it was entered from.
    stack: Vec<((u8, u8), Direction)>,
}

impl Backtracker {
    pub fn new(choice: Choice) -> Self {
        Backtracker {
            choice,
            stack: Vec::new(),
        }
    }
}

impl Stepper for Backtracker {
    fn reset(&mut self, maze: &mut Maze) {
        self.stack.clear();
        self.stack.push((maze.start(), maze.direction()));
        maze.set_visited(maze.start());
    }

    fn advance(&mut self, maze: &mut Maze, rng: &mut StdRng) -> Result<Step, SolveError> {
        let Some(&(top, heading)) = self.stack.last() else {
            return Err(SolveError::Exhausted);
        };

        let candidates = open_walls(maze, top, true);
        if !candidates.is_empty() {
            let direction = self.choice.choose(heading, &candidates, rng);
            let next = maze
                .neighbor(top, direction)
                .ok_or(SolveError::Exhausted)?;
            maze.set_visited(next);
            self.stack.push((next, direction));
            return Ok(Step::Moved(Move {
                from: top,
                to: next,
                forward: true,
            }));
        }

        // Nothing left to explore here, back out
        self.stack.pop();
        match self.stack.last() {
            Some(&(back, _)) => Ok(Step::Moved(Move {
                from: top,
                to: back,
                forward: false,
            })),
            None => Err(SolveError::Exhausted),
        }
    }

    fn path(&self, _maze: &Maze) -> Vec<(u8, u8)> {
        self.stack.iter().map(|&(square, _)| square).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::new_maze;
    use rand::SeedableRng;

    fn run(choice: Choice, seed: u64) -> (Vec<Step>, Vec<(u8, u8)>) {
        let mut maze = new_maze(16, 12, 1, Some(seed)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut backtracker = Backtracker::new(choice);
        backtracker.reset(&mut maze);
        let mut steps = Vec::new();
        while !maze.is_solved() {
            steps.push(backtracker.advance(&mut maze, &mut rng).unwrap());
        }
        (steps, backtracker.path(&maze))
    }

    #[test]
    fn test_moves_are_adjacent_and_path_is_simple() {
        for choice in [Choice::Random, Choice::LeftHand, Choice::RightHand, Choice::First] {
            let (steps, path) = run(choice, 17);
            for step in &steps {
                let Step::Moved(Move { from, to, .. }) = step else {
                    panic!("backtracker never retires squares");
                };
                assert!(Direction::between(*from, *to).is_some());
            }
            let mut unique = path.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), path.len());
        }
    }

    #[test]
    fn test_backward_moves_return_to_previous_square() {
        let (steps, _) = run(Choice::Random, 3);
        let mut trail = Vec::new();
        for step in steps {
            let Step::Moved(Move { from, to, forward }) = step else {
                continue;
            };
            if forward {
                trail.push(from);
            } else {
                assert_eq!(trail.pop(), Some(to));
            }
        }
    }

    #[test]
    fn test_path_runs_from_start_to_target() {
        let maze = new_maze(16, 12, 1, Some(3)).unwrap();
        let (_, path) = run(Choice::LeftHand, 3);
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.target()));
    }

    #[test]
    fn test_exhausted_without_path() {
        let mut backtracker = Backtracker::new(Choice::First);
        let mut maze = new_maze(5, 5, 1, Some(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            backtracker.advance(&mut maze, &mut rng),
            Err(SolveError::Exhausted)
        );
    }
}
