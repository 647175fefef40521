//! Errors surfaced by the automaton engine.

use thiserror::Error;

/// The only failure the engine reports: a strict lookup outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// `cell_at` was asked for a coordinate outside `[0, x_max) x [0, y_max)`.
    #[error("{{x:{x}, y:{y}}} out of range")]
    OutOfRange { x: i64, y: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
