pub mod border;
pub mod endpoints;
pub mod spanning_tree;

use crate::error::CodeError;
use crate::maze::Maze;

/// Tunables of maze construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Upper bound on how far, in squares, an endpoint may sit from its border.
    pub max_border_distance: u8,
    /// The maze extent is divided by this to get the width of each border distance draw.
    pub edge_window_divisor: u8,
    /// Probability of rejecting an endpoint candidate whose target is not a dead end.
    pub dead_end_preference: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_border_distance: 4,
            edge_window_divisor: 6,
            dead_end_preference: 0.9,
        }
    }
}

/// Builds a maze with the given dimensions. See [`Maze::new`] for how the arguments are
/// interpreted.
pub fn new_maze(width: u8, height: u8, version: u8, seed: Option<u64>) -> Result<Maze, CodeError> {
    let mut maze = Maze::new(width, height, version, seed)?;
    generate(&mut maze);
    Ok(maze)
}

/// Builds the maze's layout with the default configuration.
pub fn generate(maze: &mut Maze) {
    generate_with(maze, &GeneratorConfig::default());
}

/// Builds the maze's layout: settles reserved squares and the border, carves the spanning
/// tree and places the endpoints. Does nothing for a maze that is already built.
pub fn generate_with(maze: &mut Maze, config: &GeneratorConfig) {
    if maze.is_built() {
        tracing::warn!("[builder] maze {} is already built", maze.code());
        return;
    }

    // Reserved squares must be settled before carving so they are never joined
    border::fix_reservations(maze);
    if border::prune_unreachable(maze) > 0 {
        border::fix_reservations(maze);
    }
    border::fix_border(maze);

    let opened = spanning_tree::carve(maze);
    let rejected = endpoints::place_endpoints(maze, config);
    maze.mark_built();

    tracing::info!(
        "[builder] built {}x{} maze {} with {} passages, {} endpoint rejections",
        maze.width(),
        maze.height(),
        maze.code(),
        opened,
        rejected
    );
}
