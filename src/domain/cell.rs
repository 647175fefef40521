/// Cell is one grid position with a double-buffered state.
///
/// Grid cells are owned by the [`Automaton`](super::Automaton) and never move.
/// Boundary policies may also manufacture free-standing cells to stand in for
/// an out-of-range neighbor; those report `is_boundary() == true` and are
/// never part of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<S> {
    x: i64,
    y: i64,
    is_boundary: bool,
    pub(crate) state: [S; 2],
    pub(crate) neighbors: Vec<Neighbor<S>>,
}

impl<S: Clone + Default> Cell<S> {
    /// A grid cell with both slots at the default state and no neighbors yet.
    pub(crate) fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            is_boundary: false,
            state: [S::default(), S::default()],
            neighbors: Vec::new(),
        }
    }
}

impl<S: Clone> Cell<S> {
    /// A synthetic cell with both buffer slots pinned to `state`.
    pub fn boundary(x: i64, y: i64, state: S) -> Self {
        Self {
            x,
            y,
            is_boundary: true,
            state: [state.clone(), state],
            neighbors: Vec::new(),
        }
    }
}

impl<S> Cell<S> {
    pub const fn x(&self) -> i64 {
        self.x
    }

    pub const fn y(&self) -> i64 {
        self.y
    }

    pub const fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub const fn is_boundary(&self) -> bool {
        self.is_boundary
    }

    /// State held in buffer slot `index` (0 or 1).
    #[inline]
    pub fn state(&self, index: usize) -> &S {
        &self.state[index & 1]
    }

    /// Cached Moore neighborhood, row-major around the cell, self excluded.
    /// Empty for synthetic cells and for grid cells before caching.
    pub fn neighbor_entries(&self) -> &[Neighbor<S>] {
        &self.neighbors
    }
}

/// One entry of a cell's cached neighborhood.
#[derive(Clone, Debug, PartialEq)]
pub enum Neighbor<S> {
    /// A live grid cell, addressed by its ordinal in the automaton's arena.
    /// Wrap-resolved neighbors land here too.
    Grid(usize),
    /// A synthetic snapshot produced by the boundary policy when the cache was
    /// built. It is never refreshed; re-resolve its position to get a current
    /// value.
    Boundary(Box<Cell<S>>),
}

impl<S> Neighbor<S> {
    pub const fn is_boundary(&self) -> bool {
        matches!(self, Neighbor::Boundary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_starts_default() {
        let cell: Cell<i32> = Cell::new(3, 4);
        assert_eq!(cell.position(), (3, 4));
        assert!(!cell.is_boundary());
        assert_eq!(*cell.state(0), 0);
        assert_eq!(*cell.state(1), 0);
        assert!(cell.neighbor_entries().is_empty());
    }

    #[test]
    fn test_boundary_cell_pins_both_slots() {
        let cell = Cell::boundary(-1, 2, 7u8);
        assert!(cell.is_boundary());
        assert_eq!(*cell.state(0), 7);
        assert_eq!(*cell.state(1), 7);
    }

    #[test]
    fn test_neighbor_kind() {
        assert!(!Neighbor::<bool>::Grid(0).is_boundary());
        assert!(Neighbor::Boundary(Box::new(Cell::boundary(0, -1, false))).is_boundary());
    }
}
