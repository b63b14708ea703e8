mod backtracker;
mod flooder;
mod master;
mod painter;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub use backtracker::Backtracker;
pub use flooder::{Flood, Flooder};
pub use master::MasterSolver;
pub use painter::{Painter, SolveEvent};

use crate::error::SolveError;
use crate::maze::{Direction, Maze, WallState};

/// A move between two adjacent squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: (u8, u8),
    pub to: (u8, u8),
    /// False when the solver backs out of `from`.
    pub forward: bool,
}

/// Outcome of a single solver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(Move),
    /// A square was dropped from consideration without a move being made.
    Retired { square: (u8, u8), dead_end: bool },
}

/// Directions out of `square` whose wall is open, optionally only those that lead to a
/// square not visited yet.
pub fn open_walls(maze: &Maze, square: (u8, u8), unvisited_only: bool) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| maze.wall(square, direction) == WallState::Open)
        .filter(|&direction| match maze.neighbor(square, direction) {
            Some(next) => !unvisited_only || !maze.is_visited(next),
            None => false,
        })
        .collect()
}

/// Produces the next move of a strategy directly.
pub trait Stepper {
    /// Restores the state before the first step, marking the start square visited.
    fn reset(&mut self, maze: &mut Maze);

    /// Makes one step, marking any newly entered square visited.
    fn advance(&mut self, maze: &mut Maze, rng: &mut StdRng) -> Result<Step, SolveError>;

    /// The squares from the start to the solver's current position.
    fn path(&self, maze: &Maze) -> Vec<(u8, u8)>;
}

/// Picks one wall among the open walls a strategy may take.
pub trait WallChooser {
    /// `candidates` is never empty. `heading` is the direction the solver last moved in.
    fn choose(&self, heading: Direction, candidates: &[Direction], rng: &mut StdRng) -> Direction;
}

/// The ways of choosing among open walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Uniformly at random.
    Random,
    /// The first candidate in north, east, south, west order.
    First,
    /// Keep the left hand on the wall: left, straight, right, back.
    LeftHand,
    /// Keep the right hand on the wall: right, straight, left, back.
    RightHand,
}

impl WallChooser for Choice {
    fn choose(&self, heading: Direction, candidates: &[Direction], rng: &mut StdRng) -> Direction {
        let preference = match self {
            Choice::Random => return candidates[rng.random_range(0..candidates.len())],
            Choice::First => return candidates[0],
            Choice::LeftHand => [
                heading.left(),
                heading,
                heading.right(),
                heading.opposite(),
            ],
            Choice::RightHand => [
                heading.right(),
                heading,
                heading.left(),
                heading.opposite(),
            ],
        };
        preference
            .into_iter()
            .find(|direction| candidates.contains(direction))
            .unwrap_or(candidates[0])
    }
}

/// Solver state, one variant per strategy.
#[derive(Debug, Clone)]
pub enum Strategy {
    Backtracker(Backtracker),
    Flooder(Flooder),
    Master(MasterSolver),
}

impl Stepper for Strategy {
    fn reset(&mut self, maze: &mut Maze) {
        match self {
            Strategy::Backtracker(backtracker) => backtracker.reset(maze),
            Strategy::Flooder(flooder) => flooder.reset(maze),
            Strategy::Master(master) => master.reset(maze),
        }
    }

    fn advance(&mut self, maze: &mut Maze, rng: &mut StdRng) -> Result<Step, SolveError> {
        match self {
            Strategy::Backtracker(backtracker) => backtracker.advance(maze, rng),
            Strategy::Flooder(flooder) => flooder.advance(maze, rng),
            Strategy::Master(master) => master.advance(maze, rng),
        }
    }

    fn path(&self, maze: &Maze) -> Vec<(u8, u8)> {
        match self {
            Strategy::Backtracker(backtracker) => backtracker.path(maze),
            Strategy::Flooder(flooder) => flooder.path(maze),
            Strategy::Master(master) => master.path(maze),
        }
    }
}

/// The available strategies, by name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    #[default]
    RandomBacktracker,
    LeftHandBacktracker,
    RightHandBacktracker,
    RoundRobinFlooder,
    RandomFlooder,
    MasterSolver,
}

impl SolverKind {
    pub const ALL: [SolverKind; 6] = [
        SolverKind::RandomBacktracker,
        SolverKind::LeftHandBacktracker,
        SolverKind::RightHandBacktracker,
        SolverKind::RoundRobinFlooder,
        SolverKind::RandomFlooder,
        SolverKind::MasterSolver,
    ];

    /// Name used to look the strategy up.
    pub fn name(self) -> &'static str {
        match self {
            SolverKind::RandomBacktracker => "RandomBacktracker",
            SolverKind::LeftHandBacktracker => "LeftHandBacktracker",
            SolverKind::RightHandBacktracker => "RightHandBacktracker",
            SolverKind::RoundRobinFlooder => "RoundRobinFlooder",
            SolverKind::RandomFlooder => "RandomFlooder",
            SolverKind::MasterSolver => "MasterSolver",
        }
    }

    /// Strategies that know the way in advance are never picked at random.
    pub fn is_too_smart(self) -> bool {
        matches!(self, SolverKind::MasterSolver)
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<SolverKind> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// A uniformly random strategy that is not too smart.
    pub fn random(rng: &mut StdRng) -> SolverKind {
        let fair = SolverKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_too_smart())
            .collect::<Vec<_>>();
        fair[rng.random_range(0..fair.len())]
    }

    fn strategy(self, maze: &Maze) -> Result<Strategy, SolveError> {
        Ok(match self {
            SolverKind::RandomBacktracker => {
                Strategy::Backtracker(Backtracker::new(Choice::Random))
            }
            SolverKind::LeftHandBacktracker => {
                Strategy::Backtracker(Backtracker::new(Choice::LeftHand))
            }
            SolverKind::RightHandBacktracker => {
                Strategy::Backtracker(Backtracker::new(Choice::RightHand))
            }
            SolverKind::RoundRobinFlooder => Strategy::Flooder(Flooder::new(Flood::RoundRobin)),
            SolverKind::RandomFlooder => Strategy::Flooder(Flooder::new(Flood::Random)),
            SolverKind::MasterSolver => Strategy::Master(MasterSolver::new(maze)?),
        })
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::RandomBacktracker => write!(f, "Random Backtracker"),
            SolverKind::LeftHandBacktracker => write!(f, "Left-Hand Wall Follower"),
            SolverKind::RightHandBacktracker => write!(f, "Right-Hand Wall Follower"),
            SolverKind::RoundRobinFlooder => write!(f, "Round-Robin Flood Fill"),
            SolverKind::RandomFlooder => write!(f, "Random Flood Fill"),
            SolverKind::MasterSolver => write!(f, "Master Solver (knows the way)"),
        }
    }
}

/// A strategy attached to a maze and, optionally, a painter.
///
/// The solver is driven either one [`Solver::step`] at a time, e.g. from an animation
/// timer, or to the end with [`Solver::solve`].
pub struct Solver<'m> {
    maze: &'m mut Maze,
    painter: Option<Box<dyn Painter + 'm>>,
    rng: StdRng,
    kind: SolverKind,
    strategy: Strategy,
    steps: usize,
}

impl<'m> Solver<'m> {
    /// Attaches a strategy to the maze and resets the maze's visited state.
    pub fn new(maze: &'m mut Maze, kind: SolverKind) -> Result<Self, SolveError> {
        let strategy = kind.strategy(maze)?;
        let rng = StdRng::seed_from_u64(maze.seed());
        let mut solver = Solver {
            maze,
            painter: None,
            rng,
            kind,
            strategy,
            steps: 0,
        };
        solver.reset();
        Ok(solver)
    }

    /// Looks a strategy up by name. An absent or unknown name picks a random strategy that
    /// is not too smart, drawn from the maze's own random stream.
    pub fn from_name(maze: &'m mut Maze, name: Option<&str>) -> Result<Self, SolveError> {
        let kind = match name.and_then(SolverKind::parse) {
            Some(kind) => kind,
            None => {
                let kind = SolverKind::random(maze.rng_mut());
                tracing::debug!(
                    "[solver] no strategy named {:?}, picked {}",
                    name,
                    kind.name()
                );
                kind
            }
        };
        Solver::new(maze, kind)
    }

    /// Sends the traversal to `painter` while solving.
    pub fn with_painter(mut self, painter: impl Painter + 'm) -> Self {
        self.painter = Some(Box::new(painter));
        self
    }

    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    pub fn maze(&self) -> &Maze {
        &*self.maze
    }

    /// Number of steps since the last reset.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_solved(&self) -> bool {
        self.maze.is_solved()
    }

    /// Whether there is nothing left to do. Check this before calling [`Solver::step`].
    pub fn is_finished(&self) -> bool {
        self.is_solved()
    }

    /// The squares from the start to the solver's current position.
    pub fn path(&self) -> Vec<(u8, u8)> {
        self.strategy.path(&*self.maze)
    }

    /// Clears the maze's visited state and the strategy's bookkeeping.
    pub fn reset(&mut self) {
        self.maze.reset();
        self.strategy.reset(self.maze);
        self.rng = StdRng::seed_from_u64(self.maze.seed());
        self.steps = 0;
    }

    /// Makes a single step. Calling this once the maze is solved is an error.
    pub fn step(&mut self) -> Result<Step, SolveError> {
        if self.maze.is_solved() {
            return Err(SolveError::AlreadySolved);
        }
        let step = self.strategy.advance(self.maze, &mut self.rng)?;
        self.steps += 1;
        tracing::trace!(
            "[solver] {} step {}: {:?}",
            self.kind.name(),
            self.steps,
            step
        );
        Ok(step)
    }

    /// Steps until the target is visited, forwarding every step to the painter, then
    /// paints the path found. Returns the number of steps taken.
    pub fn solve(&mut self) -> Result<usize, SolveError> {
        let mut taken = 0;
        while !self.is_finished() {
            let step = self.step()?;
            taken += 1;
            let Some(painter) = self.painter.as_mut() else {
                continue;
            };
            match step {
                Step::Moved(Move { from, to, forward }) => {
                    painter.draw_step(from, to, forward);
                    if !forward {
                        painter.draw_dead_square(from);
                    }
                }
                Step::Retired {
                    square,
                    dead_end: true,
                } => painter.draw_dead_square(square),
                Step::Retired { .. } => {}
            }
        }

        let path = self.strategy.path(self.maze);
        if let Some(painter) = self.painter.as_mut() {
            painter.draw_path(&path, true);
        }
        tracing::info!(
            "[solver] {} solved maze {} in {} steps, path length {}",
            self.kind.name(),
            self.maze.code(),
            self.steps,
            path.len()
        );
        Ok(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate, new_maze};
    use crate::maze::Rect;

    #[test]
    fn test_open_walls() {
        let mut maze = Maze::new(4, 4, 1, Some(1)).unwrap();
        maze.grid_mut()
            .set_wall((1, 1), Direction::East, WallState::Open);
        maze.grid_mut()
            .set_wall((1, 1), Direction::North, WallState::Open);
        maze.grid_mut()
            .set_wall((1, 1), Direction::West, WallState::Closed);
        assert_eq!(
            open_walls(&maze, (1, 1), false),
            vec![Direction::North, Direction::East]
        );
        maze.set_visited((2, 1));
        assert_eq!(open_walls(&maze, (1, 1), true), vec![Direction::North]);
        // Open border walls lead nowhere
        maze.grid_mut()
            .set_wall((0, 0), Direction::North, WallState::Open);
        assert!(open_walls(&maze, (0, 0), false).is_empty());
    }

    #[test]
    fn test_wall_follower_choice() {
        let mut rng = StdRng::seed_from_u64(0);
        let candidates = [Direction::North, Direction::East, Direction::South];
        assert_eq!(
            Choice::LeftHand.choose(Direction::East, &candidates, &mut rng),
            Direction::North
        );
        assert_eq!(
            Choice::RightHand.choose(Direction::East, &candidates, &mut rng),
            Direction::South
        );
        assert_eq!(
            Choice::LeftHand.choose(Direction::North, &candidates, &mut rng),
            Direction::North
        );
        assert_eq!(
            Choice::First.choose(Direction::West, &candidates, &mut rng),
            Direction::North
        );
        let picked = Choice::Random.choose(Direction::West, &candidates, &mut rng);
        assert!(candidates.contains(&picked));
    }

    #[test]
    fn test_every_strategy_terminates() {
        for seed in 0..10 {
            for (width, height) in [(4, 4), (12, 9), (33, 33)] {
                let mut maze = new_maze(width, height, 1, Some(seed)).unwrap();
                for kind in SolverKind::ALL {
                    let mut solver = Solver::new(&mut maze, kind).unwrap();
                    let limit = 4 * width as usize * height as usize;
                    let mut steps = 0;
                    while !solver.is_finished() {
                        solver.step().unwrap();
                        steps += 1;
                        assert!(steps <= limit, "{} does not terminate", kind.name());
                    }
                    assert!(solver.is_solved());
                    assert_eq!(solver.steps(), steps);
                }
            }
        }
    }

    #[test]
    fn test_step_after_solved_fails() {
        let mut maze = new_maze(8, 8, 1, Some(3)).unwrap();
        let mut solver = Solver::new(&mut maze, SolverKind::RandomBacktracker).unwrap();
        solver.solve().unwrap();
        assert_eq!(solver.step(), Err(SolveError::AlreadySolved));
        assert_eq!(solver.solve(), Ok(0));
    }

    #[test]
    fn test_reserved_squares_never_visited() {
        for kind in SolverKind::ALL {
            let mut maze = Maze::new(20, 20, 1, Some(42)).unwrap();
            assert!(maze.reserve(2, 2, 3, 3, None));
            generate(&mut maze);
            let mut solver = Solver::new(&mut maze, kind).unwrap();
            solver.solve().unwrap();
            assert!(solver.is_solved());
            for coord in Rect::new(2, 2, 3, 3).coords() {
                assert!(
                    !solver.maze().is_visited(coord),
                    "{} entered {:?}",
                    kind.name(),
                    coord
                );
            }
        }
    }

    #[test]
    fn test_backtracker_and_flooder_both_solve() {
        let mut maze = new_maze(25, 25, 1, Some(2024)).unwrap();

        let (backtracker_steps, backtracker_path) = {
            let mut backtracker = Solver::new(&mut maze, SolverKind::RandomBacktracker).unwrap();
            let steps = backtracker.solve().unwrap();
            assert!(backtracker.is_solved());
            (steps, backtracker.path())
        };
        let (flooder_steps, flooder_path) = {
            let mut flooder = Solver::new(&mut maze, SolverKind::RoundRobinFlooder).unwrap();
            let steps = flooder.solve().unwrap();
            assert!(flooder.is_solved());
            (steps, flooder.path())
        };

        assert!(backtracker_steps > 0 && flooder_steps > 0);
        // In a perfect maze both find the one and only path
        assert_eq!(backtracker_path, flooder_path);
    }

    #[test]
    fn test_reset_allows_solving_again() {
        let mut maze = new_maze(15, 15, 1, Some(8)).unwrap();
        let mut solver = Solver::new(&mut maze, SolverKind::RandomFlooder).unwrap();
        let first = solver.solve().unwrap();
        solver.reset();
        assert!(!solver.is_finished());
        assert_eq!(solver.steps(), 0);
        let start = solver.maze().start();
        assert!(solver.maze().is_visited(start));
        let second = solver.solve().unwrap();
        // Same seed, same run
        assert_eq!(first, second);
    }

    #[test]
    fn test_painter_receives_traversal() {
        let mut maze = new_maze(12, 12, 1, Some(99)).unwrap();
        let (tx, rx) = std::sync::mpsc::channel::<SolveEvent>();
        let mut solver = Solver::new(&mut maze, SolverKind::RandomBacktracker)
            .unwrap()
            .with_painter(tx);
        let taken = solver.solve().unwrap();
        let path = solver.path();
        drop(solver);

        let events = rx.iter().collect::<Vec<_>>();
        let steps = events
            .iter()
            .filter(|event| matches!(event, SolveEvent::Step { .. }))
            .count();
        let backward = events
            .iter()
            .filter(|event| matches!(event, SolveEvent::Step { forward: false, .. }))
            .count();
        let dead = events
            .iter()
            .filter(|event| matches!(event, SolveEvent::DeadSquare(_)))
            .count();
        assert_eq!(steps, taken);
        assert_eq!(dead, backward);
        assert_eq!(
            events.last(),
            Some(&SolveEvent::Path {
                squares: path,
                forward: true
            })
        );
    }

    #[test]
    fn test_factory_lookup() {
        assert_eq!(
            SolverKind::parse("roundrobinflooder"),
            Some(SolverKind::RoundRobinFlooder)
        );
        assert_eq!(SolverKind::parse("Dijkstra"), None);
        assert_eq!(SolverKind::default(), SolverKind::RandomBacktracker);

        let mut maze = new_maze(10, 10, 1, Some(1)).unwrap();
        let solver = Solver::from_name(&mut maze, Some("MasterSolver")).unwrap();
        assert_eq!(solver.kind(), SolverKind::MasterSolver);
    }

    #[test]
    fn test_random_pick_is_never_too_smart() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let kind = SolverKind::random(&mut rng);
            assert!(!kind.is_too_smart());
            seen.insert(kind);
        }
        assert_eq!(seen.len(), SolverKind::ALL.len() - 1);

        let mut maze = new_maze(10, 10, 1, Some(1)).unwrap();
        let solver = Solver::from_name(&mut maze, None).unwrap();
        assert!(!solver.kind().is_too_smart());
    }
}
