use rand::Rng;

use crate::maze::{Direction, Grid, Maze, WallState};

/// Carves a spanning tree over every non-reserved square with a randomized, stack-based
/// walk over the undetermined walls.
///
/// Each popped square closes the undetermined walls that lead back into the tree or into
/// another region, then opens one of the remaining ones at random and continues from the
/// square behind it. Outline walls are set aside and only reactivated, one random wall at
/// a time, when the stack runs dry.
///
/// Returns the number of walls opened.
pub fn carve(maze: &mut Maze) -> usize {
    let candidates = maze
        .grid()
        .coords()
        .filter(|&coord| maze.grid()[coord].is_primary())
        .collect::<Vec<_>>();
    if candidates.is_empty() {
        return 0;
    }

    let mut rng = maze.rng_mut().clone();
    let root = candidates[rng.random_range(0..candidates.len())];
    let grid = maze.grid_mut();
    grid[root].connected = true;

    let mut stack = vec![root];
    let mut outline: Vec<((u8, u8), Direction)> = Vec::new();
    let mut opened = 0;

    loop {
        while let Some(square) = stack.pop() {
            let unresolved = resolve_walls(grid, square, &mut outline);
            if unresolved.is_empty() {
                continue;
            }
            if unresolved.len() > 1 {
                // Come back later for the remaining walls
                stack.push(square);
            }

            let direction = unresolved[rng.random_range(0..unresolved.len())];
            let Some(next) = grid.neighbor(square, direction) else {
                continue;
            };
            grid.set_wall(square, direction, WallState::Open);
            grid[next].connected = true;
            stack.push(next);
            opened += 1;
        }

        // Walls resolved since they were set aside no longer count
        outline.retain(|&(coord, direction)| {
            grid.wall(coord, direction) == WallState::OutlineBoundary
        });
        if outline.is_empty() {
            break;
        }
        let (coord, direction) = outline.swap_remove(rng.random_range(0..outline.len()));
        tracing::trace!(
            "[builder] reactivating outline wall {:?} {}",
            coord,
            direction
        );
        grid.set_wall(coord, direction, WallState::Undetermined);
        stack.push(coord);
    }

    *maze.rng_mut() = rng;
    opened
}

/// Closes the undetermined walls of `square` that lead to a connected square or to another
/// region, sets aside its outline walls, and returns the directions that are still open
/// for carving.
fn resolve_walls(
    grid: &mut Grid,
    square: (u8, u8),
    outline: &mut Vec<((u8, u8), Direction)>,
) -> Vec<Direction> {
    let mut unresolved = Vec::with_capacity(4);
    for direction in Direction::ALL {
        let Some(next) = grid.neighbor(square, direction) else {
            continue;
        };
        match grid.wall(square, direction) {
            WallState::Undetermined => {
                if grid[next].connected || grid[next].region != grid[square].region {
                    grid.set_wall(square, direction, WallState::Closed);
                } else {
                    unresolved.push(direction);
                }
            }
            WallState::OutlineBoundary => {
                if !outline.contains(&(square, direction)) {
                    outline.push((square, direction));
                }
            }
            WallState::Open | WallState::Closed => {}
        }
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::border::{fix_border, fix_reservations};

    #[test]
    fn test_carve_opens_one_wall_per_extra_square() {
        let mut maze = Maze::new(8, 6, 1, Some(9)).unwrap();
        fix_border(&mut maze);
        assert_eq!(carve(&mut maze), 8 * 6 - 1);
        assert!(maze.grid().squares().all(|square| square.connected));
        // Nothing left undecided
        for coord in maze.grid().coords() {
            for direction in Direction::ALL {
                assert!(matches!(
                    maze.wall(coord, direction),
                    WallState::Open | WallState::Closed
                ));
            }
        }
    }

    #[test]
    fn test_carve_skips_reserved_squares() {
        let mut maze = Maze::new(12, 12, 1, Some(4)).unwrap();
        assert!(maze.reserve(4, 4, 3, 3, None));
        fix_reservations(&mut maze);
        fix_border(&mut maze);
        assert_eq!(carve(&mut maze), 12 * 12 - 9 - 1);
        assert!(!maze.grid()[(5, 5)].connected);
    }

    #[test]
    fn test_carve_is_reproducible() {
        let build = || {
            let mut maze = Maze::new(15, 15, 1, Some(77)).unwrap();
            fix_border(&mut maze);
            carve(&mut maze);
            maze.grid()
                .coords()
                .map(|coord| maze.wall(coord, Direction::East))
                .collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
