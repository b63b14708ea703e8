use std::sync::Arc;

/// Inclusion predicate for a reserved rectangle, called with coordinates relative to the
/// rectangle's top-left corner.
pub type Shape = Arc<dyn Fn(u8, u8) -> bool + Send + Sync>;

/// An axis-aligned rectangle of squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Rect {
    pub fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, coord: (u8, u8)) -> bool {
        let (x, y) = (coord.0 as u16, coord.1 as u16);
        x >= self.x as u16
            && y >= self.y as u16
            && x < self.x as u16 + self.width as u16
            && y < self.y as u16 + self.height as u16
    }

    /// Checks whether this rectangle, grown by `margin` cells on every side, overlaps `other`.
    pub fn overlaps_with_margin(&self, other: &Rect, margin: u8) -> bool {
        let margin = margin as i32;
        let (left, top) = (self.x as i32 - margin, self.y as i32 - margin);
        let right = self.x as i32 + self.width as i32 + margin;
        let bottom = self.y as i32 + self.height as i32 + margin;
        left < other.x as i32 + other.width as i32
            && (other.x as i32) < right
            && top < other.y as i32 + other.height as i32
            && (other.y as i32) < bottom
    }

    /// Coordinates covered by the rectangle, in row-major order. Squares past `u8::MAX`
    /// are dropped.
    pub fn coords(&self) -> impl Iterator<Item = (u8, u8)> + use<> {
        let (x, y) = (self.x as u16, self.y as u16);
        let right = (x + self.width as u16).min(u8::MAX as u16 + 1);
        let bottom = (y + self.height as u16).min(u8::MAX as u16 + 1);
        (y..bottom).flat_map(move |cy| (x..right).map(move |cx| (cx as u8, cy as u8)))
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// A reserved rectangle together with the optional shape that selects which of its
/// squares are actually excluded from the maze.
#[derive(Clone)]
pub struct Reservation {
    pub rect: Rect,
    pub shape: Option<Shape>,
}

impl Reservation {
    /// Whether the square at `coord` is taken by this reservation.
    pub fn covers(&self, coord: (u8, u8)) -> bool {
        if !self.rect.contains(coord) {
            return false;
        }
        match &self.shape {
            Some(shape) => shape(coord.0 - self.rect.x, coord.1 - self.rect.y),
            None => true,
        }
    }
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation")
            .field("rect", &self.rect)
            .field("shaped", &self.shape.is_some())
            .finish()
    }
}
