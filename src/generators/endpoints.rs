use rand::{Rng, rngs::StdRng};

use super::GeneratorConfig;
use crate::maze::{Direction, Maze};

/// Distance from the border for one endpoint: the sum of three uniform draws over a window
/// that grows with the maze extent, clamped so it never leaves the maze. The sum of draws
/// keeps endpoints close to, but not always on, the border.
fn border_distance(rng: &mut StdRng, extent: u8, config: &GeneratorConfig) -> u8 {
    let divisor = config.edge_window_divisor.max(1) as u16;
    let window = ((extent as u16 + divisor - 1) / divisor).max(1);
    let distance = (0..3)
        .map(|_| rng.random_range(0..window))
        .sum::<u16>()
        .min(config.max_border_distance as u16)
        .min(extent as u16 - 1);
    distance as u8
}

/// Start and target coordinates for a travel direction. Start sits near the border the
/// travel leaves from, target near the opposite one.
fn candidate(
    rng: &mut StdRng,
    width: u8,
    height: u8,
    direction: Direction,
    config: &GeneratorConfig,
) -> ((u8, u8), (u8, u8)) {
    let extent = if direction.is_horizontal() { width } else { height };
    let across = if direction.is_horizontal() { height } else { width };
    let near = border_distance(rng, extent, config);
    let far = extent - 1 - border_distance(rng, extent, config);
    let start_across = rng.random_range(0..across);
    let target_across = rng.random_range(0..across);

    match direction {
        Direction::East => ((near, start_across), (far, target_across)),
        Direction::West => ((far, start_across), (near, target_across)),
        Direction::South => ((start_across, near), (target_across, far)),
        Direction::North => ((start_across, far), (target_across, near)),
    }
}

/// Whether `start` lies strictly behind `target` when travelling in `direction`.
fn is_ordered(start: (u8, u8), target: (u8, u8), direction: Direction) -> bool {
    match direction {
        Direction::East => start.0 < target.0,
        Direction::West => start.0 > target.0,
        Direction::South => start.1 < target.1,
        Direction::North => start.1 > target.1,
    }
}

/// Picks the travel direction, start and target by rejection sampling.
///
/// Candidates are rejected when either endpoint is outside the primary region, when they
/// are not ordered along the travel direction, or, most of the time, when the target is
/// not a dead end.
///
/// Returns the number of rejected candidates.
pub fn place_endpoints(maze: &mut Maze, config: &GeneratorConfig) -> usize {
    let (width, height) = (maze.width(), maze.height());
    let mut rng = maze.rng_mut().clone();
    let mut rejected = 0;

    loop {
        let direction = Direction::ALL[rng.random_range(0..4)];
        let (start, target) = candidate(&mut rng, width, height, direction, config);

        let grid = maze.grid();
        let accepted = grid[start].is_primary()
            && grid[target].is_primary()
            && is_ordered(start, target, direction)
            && (grid[target].is_dead_end() || !rng.random_bool(config.dead_end_preference));

        if accepted {
            tracing::debug!(
                "[builder] endpoints {:?} -> {:?} heading {} after {} rejections",
                start,
                target,
                direction,
                rejected
            );
            maze.set_endpoints(start, target, direction);
            *maze.rng_mut() = rng;
            return rejected;
        }
        rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_border_distance_bounds() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for extent in [4u8, 10, 50, 99] {
            for _ in 0..200 {
                let distance = border_distance(&mut rng, extent, &config);
                assert!(distance <= config.max_border_distance);
                assert!(distance < extent);
            }
        }
    }

    #[test]
    fn test_border_distance_on_small_maze_is_border() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        // A window of one leaves no room to move off the border
        assert_eq!(border_distance(&mut rng, 5, &config), 0);
    }

    #[test]
    fn test_candidate_ordering() {
        assert!(is_ordered((0, 3), (5, 1), Direction::East));
        assert!(!is_ordered((5, 3), (5, 1), Direction::East));
        assert!(is_ordered((2, 7), (2, 0), Direction::North));
        assert!(!is_ordered((2, 0), (2, 7), Direction::North));
    }
}
