use std::fmt;

use crossterm::style::{Color, StyledContent, Stylize};

use crate::maze::{Direction, Maze, WallState};

/// The width of each rendered cell, in character widths.
pub const CELL_WIDTH: usize = 2;

/// What one cell of the rendered picture shows. The picture has a cell for every square
/// and one for every wall and wall corner between them.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Gap,
    Square,
    Visited,
    Start,
    Target,
    Reserved,
}

impl Glyph {
    fn styled(self) -> StyledContent<&'static str> {
        match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Gap => "  ".with(Color::Reset),
            Glyph::Square => "  ".with(Color::Reset),
            Glyph::Visited => "* ".with(Color::Blue),
            Glyph::Start => "🟩".with(Color::Green),
            Glyph::Target => "🟥".with(Color::Red),
            Glyph::Reserved => "░░".with(Color::DarkGrey),
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = self.styled();

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                CELL_WIDTH,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

fn square_glyph(maze: &Maze, coord: (u8, u8)) -> Glyph {
    let square = &maze.grid()[coord];
    if square.is_reserved() {
        Glyph::Reserved
    } else if coord == maze.start() && maze.is_built() {
        Glyph::Start
    } else if coord == maze.target() && maze.is_built() {
        Glyph::Target
    } else if square.visited {
        Glyph::Visited
    } else {
        Glyph::Square
    }
}

fn wall_glyph(maze: &Maze, coord: (u8, u8), direction: Direction) -> Glyph {
    match maze.wall(coord, direction) {
        WallState::Open => {
            let both_reserved = maze
                .neighbor(coord, direction)
                .is_none_or(|other| maze.grid()[other].is_reserved())
                && maze.grid()[coord].is_reserved();
            if both_reserved {
                Glyph::Reserved
            } else {
                Glyph::Gap
            }
        }
        _ => Glyph::Wall,
    }
}

impl fmt::Display for Maze {
    /// Draws the maze on a `(2w + 1) x (2h + 1)` picture of cells, walls and corners.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = (self.width(), self.height());
        for y in 0..height {
            // Walls above the row
            for x in 0..width {
                write!(f, "{}", Glyph::Wall)?;
                write!(f, "{}", wall_glyph(self, (x, y), Direction::North))?;
            }
            writeln!(f, "{}", Glyph::Wall)?;

            write!(f, "{}", wall_glyph(self, (0, y), Direction::West))?;
            for x in 0..width {
                write!(f, "{}", square_glyph(self, (x, y)))?;
                write!(f, "{}", wall_glyph(self, (x, y), Direction::East))?;
            }
            writeln!(f)?;
        }
        for x in 0..width {
            write!(f, "{}", Glyph::Wall)?;
            write!(f, "{}", wall_glyph(self, (x, height - 1), Direction::South))?;
        }
        writeln!(f, "{}", Glyph::Wall)
    }
}
