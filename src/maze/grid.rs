use super::square::{Direction, Square, WallState};

/// Flat storage of the maze squares. Neighbors are found by index arithmetic
/// instead of links between squares.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Box<[Square]>,
    width: u8,
    height: u8,
}

impl Grid {
    pub fn new(width: u8, height: u8) -> Self {
        let data = vec![Square::default(); width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn is_in_bounds(&self, coord: (u8, u8)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Whether the wall on `direction` of `coord` lies on the outer border.
    pub fn is_boundary(&self, coord: (u8, u8), direction: Direction) -> bool {
        self.neighbor(coord, direction).is_none()
    }

    fn ravel_index(&self, x: u8, y: u8) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Coordinates of the square for a raveled index.
    pub fn unravel_index(&self, index: usize) -> (u8, u8) {
        let width = self.width as usize;
        ((index % width) as u8, (index / width) as u8)
    }

    /// Raveled index of a coordinate, for side tables kept parallel to the grid.
    pub fn index_of(&self, coord: (u8, u8)) -> usize {
        self.ravel_index(coord.0, coord.1)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The grid-adjacent coordinate on `direction`, or `None` past the border.
    pub fn neighbor(&self, coord: (u8, u8), direction: Direction) -> Option<(u8, u8)> {
        let (x, y) = coord;
        let next = match direction {
            // Wrapping underflow lands on u8::MAX, which is never in bounds
            Direction::North => (x, y.wrapping_sub(1)),
            Direction::East => (x.checked_add(1)?, y),
            Direction::South => (x, y.checked_add(1)?),
            Direction::West => (x.wrapping_sub(1), y),
        };
        self.is_in_bounds(next).then_some(next)
    }

    /// Sets the wall on `direction` of `coord`, and the matching wall of the neighbor
    /// across it, so both sides always agree.
    pub fn set_wall(&mut self, coord: (u8, u8), direction: Direction, state: WallState) {
        self[coord].set_wall(direction, state);
        if let Some(other) = self.neighbor(coord, direction) {
            self[other].set_wall(direction.opposite(), state);
        }
    }

    pub fn wall(&self, coord: (u8, u8), direction: Direction) -> WallState {
        self[coord].wall(direction)
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (u8, u8)> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.data.iter()
    }

    pub fn squares_mut(&mut self) -> impl Iterator<Item = &mut Square> {
        self.data.iter_mut()
    }
}

impl std::ops::Index<(u8, u8)> for Grid {
    type Output = Square;

    fn index(&self, index: (u8, u8)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl std::ops::IndexMut<(u8, u8)> for Grid {
    fn index_mut(&mut self, index: (u8, u8)) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(5, 4);
        grid[(2, 3)].visited = true;
        assert!(grid[(2, 3)].visited);
        assert_eq!(grid.index_of((2, 3)), 17);
        assert_eq!(grid.unravel_index(17), (2, 3));
        assert_eq!(grid.len(), 20);
    }

    #[test]
    fn test_neighbors_at_border() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.neighbor((0, 0), Direction::North), None);
        assert_eq!(grid.neighbor((0, 0), Direction::West), None);
        assert_eq!(grid.neighbor((0, 0), Direction::East), Some((1, 0)));
        assert_eq!(grid.neighbor((0, 0), Direction::South), Some((0, 1)));
        assert_eq!(grid.neighbor((2, 2), Direction::East), None);
        assert_eq!(grid.neighbor((2, 2), Direction::South), None);
        assert!(grid.is_boundary((2, 1), Direction::East));
        assert!(!grid.is_boundary((1, 1), Direction::East));
    }

    #[test]
    fn test_set_wall_is_symmetric() {
        let mut grid = Grid::new(3, 3);
        grid.set_wall((1, 1), Direction::East, WallState::Open);
        assert_eq!(grid.wall((1, 1), Direction::East), WallState::Open);
        assert_eq!(grid.wall((2, 1), Direction::West), WallState::Open);

        // Border walls have no partner
        grid.set_wall((0, 0), Direction::North, WallState::Closed);
        assert_eq!(grid.wall((0, 0), Direction::North), WallState::Closed);
    }

    #[test]
    fn test_coords_row_major() {
        let grid = Grid::new(2, 2);
        let coords = grid.coords().collect::<Vec<_>>();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
