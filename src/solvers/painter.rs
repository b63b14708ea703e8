use std::sync::mpsc::Sender;

/// Receives the traversal of a solver, e.g. to animate it.
pub trait Painter {
    /// The solver moved between two adjacent squares. `forward` is false when it backs out.
    fn draw_step(&mut self, from: (u8, u8), to: (u8, u8), forward: bool);

    /// A whole path of squares, from the start onwards.
    fn draw_path(&mut self, squares: &[(u8, u8)], forward: bool) {
        squares
            .windows(2)
            .for_each(|pair| self.draw_step(pair[0], pair[1], forward));
    }

    /// A square that turned out to lead nowhere.
    fn draw_dead_square(&mut self, _square: (u8, u8)) {}
}

/// A traversal event, as sent over a channel by the [`Painter`] impl for [`Sender`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveEvent {
    Step {
        from: (u8, u8),
        to: (u8, u8),
        forward: bool,
    },
    Path {
        squares: Vec<(u8, u8)>,
        forward: bool,
    },
    DeadSquare((u8, u8)),
}

impl Painter for Sender<SolveEvent> {
    fn draw_step(&mut self, from: (u8, u8), to: (u8, u8), forward: bool) {
        // A dropped receiver only means nobody is watching any more
        let _ = self.send(SolveEvent::Step { from, to, forward });
    }

    fn draw_path(&mut self, squares: &[(u8, u8)], forward: bool) {
        let _ = self.send(SolveEvent::Path {
            squares: squares.to_vec(),
            forward,
        });
    }

    fn draw_dead_square(&mut self, square: (u8, u8)) {
        let _ = self.send(SolveEvent::DeadSquare(square));
    }
}
