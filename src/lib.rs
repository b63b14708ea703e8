//! Perfect maze generation with step-by-step solvers.
//!
//! A [`maze::Maze`] is built into a spanning tree by [`generators::generate`], then a
//! [`solvers::Solver`] walks it from start to target one step at a time, reporting every
//! move to an optional [`solvers::Painter`].

pub mod code;
pub mod error;
pub mod generators;
pub mod maze;
pub mod render;
pub mod solvers;
