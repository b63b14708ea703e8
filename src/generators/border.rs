use std::collections::VecDeque;

use crate::maze::{Direction, Maze, RESERVED_REGION, WallState};

/// Demotes primary squares that cannot reach the largest primary component to reserved
/// squares. Reservations can cut off pockets near the border, and those pockets would
/// otherwise never join the spanning tree.
///
/// Returns the number of demoted squares.
pub fn prune_unreachable(maze: &mut Maze) -> usize {
    let grid = maze.grid();
    let mut component = vec![usize::MAX; grid.len()];
    let mut sizes: Vec<usize> = Vec::new();

    for root in grid.coords() {
        if !grid[root].is_primary() || component[grid.index_of(root)] != usize::MAX {
            continue;
        }
        let id = sizes.len();
        let mut size = 0;
        let mut queue = VecDeque::from([root]);
        component[grid.index_of(root)] = id;
        while let Some(coord) = queue.pop_front() {
            size += 1;
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(coord, direction) else {
                    continue;
                };
                let passable = grid.wall(coord, direction) != WallState::Closed;
                if passable
                    && grid[next].is_primary()
                    && component[grid.index_of(next)] == usize::MAX
                {
                    component[grid.index_of(next)] = id;
                    queue.push_back(next);
                }
            }
        }
        sizes.push(size);
    }

    let Some(largest) = (0..sizes.len()).max_by_key(|&id| (sizes[id], std::cmp::Reverse(id)))
    else {
        return 0;
    };

    let demoted = grid
        .coords()
        .filter(|&coord| grid[coord].is_primary() && component[grid.index_of(coord)] != largest)
        .collect::<Vec<_>>();
    for &coord in &demoted {
        maze.grid_mut()[coord].region = RESERVED_REGION;
    }
    if !demoted.is_empty() {
        tracing::debug!(
            "[builder] demoted {} squares cut off from the main region",
            demoted.len()
        );
    }
    demoted.len()
}

/// Settles every wall touching a reserved square: open between two reserved squares,
/// closed between a reserved square and any other region.
pub fn fix_reservations(maze: &mut Maze) {
    let grid = maze.grid_mut();
    let reserved = grid
        .coords()
        .filter(|&coord| grid[coord].is_reserved())
        .collect::<Vec<_>>();
    for coord in reserved {
        for direction in Direction::ALL {
            let Some(other) = grid.neighbor(coord, direction) else {
                continue;
            };
            let state = if grid[other].is_reserved() {
                WallState::Open
            } else {
                WallState::Closed
            };
            grid.set_wall(coord, direction, state);
        }
    }
}

/// Closes every wall on the outer border, except those of reserved squares, which are
/// left open.
pub fn fix_border(maze: &mut Maze) {
    let grid = maze.grid_mut();
    let border = grid
        .coords()
        .flat_map(|coord| Direction::ALL.map(|direction| (coord, direction)))
        .filter(|&(coord, direction)| grid.is_boundary(coord, direction))
        .collect::<Vec<_>>();
    for (coord, direction) in border {
        let state = if grid[coord].is_reserved() {
            WallState::Open
        } else {
            WallState::Closed
        };
        grid.set_wall(coord, direction, state);
    }
}
