/// A starting pattern: the set of live cells plus its bounding box size.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: i64,
    pub height: i64,
    pub cells: Vec<(i64, i64)>,
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(i64, i64)>) -> Self {
        let span = |axis: fn(&(i64, i64)) -> i64| {
            let min = cells.iter().map(axis).min();
            let max = cells.iter().map(axis).max();
            min.zip(max).map_or(0, |(lo, hi)| hi - lo + 1)
        };
        let (width, height) = (span(|p| p.0), span(|p| p.1));
        Self { name, description, width, height, cells }
    }

    /// Top-left corner of the bounding box.
    pub fn origin(&self) -> (i64, i64) {
        let x = self.cells.iter().map(|p| p.0).min().unwrap_or(0);
        let y = self.cells.iter().map(|p| p.1).min().unwrap_or(0);
        (x, y)
    }

    /// The same pattern moved by `(dx, dy)`.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            cells: self.cells.iter().map(|(x, y)| (x + dx, y + dy)).collect(),
            ..self.clone()
        }
    }

    /// Pattern moved so its bounding box sits in the middle of `x_max` by `y_max`.
    pub fn centered(&self, x_max: i64, y_max: i64) -> Self {
        let (ox, oy) = self.origin();
        self.offset((x_max - self.width) / 2 - ox, (y_max - self.height) / 2 - oy)
    }

    /// Live cell positions, ready for [`seed`](super::rules::seed).
    pub fn points(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells.iter().copied()
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (5, 1),
                (6, 2), (7, 2),
                (5, 3), (6, 3),
            ],
        )
    }

    /// Blinker - period 2 oscillator, vertical phase
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![
                (1, 0),
                (1, 1),
                (1, 2),
            ],
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations)
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah - stabilizes at gen 1103",
            vec![
                (10, 11), (10, 12),
                (11, 10), (11, 11),
                (12, 11),
            ],
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            "Oscillator (period 2)",
            vec![
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }
}
