//! The double-buffered automaton engine.
//!
//! Every cell carries two state slots. A generation reads slot `read_index`
//! of every cell and writes slot `write_index`, then the two indices swap.
//! Cells are evaluated in parallel with rayon; the collect at the end of the
//! fan-out is the barrier that keeps a half-written buffer from ever being
//! read.

use std::borrow::Cow;

use log::{debug, trace, warn};
use rayon::prelude::*;

use super::{BoundaryPolicy, Cell, Error, Neighbor, Overflow, PixelBuffer, Result, Rgba};

/// Computes a cell's next state from the automaton's read buffer.
pub type RuleFn<S> = Box<dyn Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync>;

/// Maps a state to a display color.
pub type ColorFn<S> = Box<dyn Fn(&S) -> Rgba + Send + Sync>;

/// Extents at or above this collapse to an empty automaton.
pub const MAX_EXTENT: i64 = i32::MAX as i64;

/// A rectangular cellular automaton over an arbitrary state type.
///
/// Cells live in a flat arena ordered by `x * y_max + y`, so `(x, y)` lookup
/// is O(1). The grid is never reshaped after construction.
pub struct Automaton<S: Clone> {
    x_max: i64,
    y_max: i64,
    read_index: usize,
    write_index: usize,
    generation: u64,
    cells: Vec<Cell<S>>,
    rule: RuleFn<S>,
    color: ColorFn<S>,
    boundary: Box<dyn BoundaryPolicy<S>>,
}

impl<S: Clone + Default + Send + Sync> Automaton<S> {
    /// Build an automaton, fill buffer 0 with `init`, then cache every cell's
    /// neighborhood through `boundary`.
    ///
    /// Negative extents, extents of [`MAX_EXTENT`] or more, or a zero extent
    /// on either axis produce an empty 0x0 automaton.
    pub fn new<R, C, B, I>(x_max: i64, y_max: i64, rule: R, color: C, boundary: B, init: I) -> Self
    where
        R: Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync + 'static,
        C: Fn(&S) -> Rgba + Send + Sync + 'static,
        B: BoundaryPolicy<S> + 'static,
        I: Fn(&Cell<S>, &Automaton<S>) -> S + Sync,
    {
        let (x_max, y_max) = clamp_extents::<S>(x_max, y_max);
        let cells = (0..x_max)
            .flat_map(|x| (0..y_max).map(move |y| Cell::new(x, y)))
            .collect();

        let mut automaton = Self {
            x_max,
            y_max,
            read_index: 0,
            write_index: 1,
            generation: 0,
            cells,
            rule: Box::new(rule),
            color: Box::new(color),
            boundary: Box::new(boundary),
        };

        let initial = automaton.evaluate(&init);
        automaton.commit(automaton.read_index, initial);
        automaton.cache_neighbors();

        debug!(
            "built {}x{} automaton ({} cells, {} boundary)",
            automaton.x_max,
            automaton.y_max,
            automaton.cells.len(),
            automaton.boundary.name()
        );
        automaton
    }

    /// Advance one generation.
    ///
    /// The rule sees only the read buffer; results land in the write buffer
    /// and the indices swap once every cell has been written.
    pub fn step(&mut self) {
        let next = self.evaluate(&self.rule);
        self.commit(self.write_index, next);
        self.swap_read_write();
        self.generation += 1;
        trace!("generation {} complete", self.generation);
    }

    /// Advance `n` generations back to back.
    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Strict lookup. Never consults the boundary policy.
    pub fn cell_at(&self, x: i64, y: i64) -> Result<&Cell<S>> {
        if Overflow::of(x, y, self.x_max, self.y_max).any() {
            return Err(Error::OutOfRange { x, y });
        }
        Ok(&self.cells[self.ordinal(x, y)])
    }

    /// Tolerant lookup: in-range coordinates return the grid cell, anything
    /// else is handed to the boundary policy.
    pub fn bounding(&self, x: i64, y: i64) -> Cow<'_, Cell<S>> {
        let overflow = Overflow::of(x, y, self.x_max, self.y_max);
        if overflow.any() {
            self.boundary.resolve(self, x, y, overflow)
        } else {
            Cow::Borrowed(&self.cells[self.ordinal(x, y)])
        }
    }

    /// `(read_index, write_index)`; always complementary.
    pub const fn read_write_indices(&self) -> (usize, usize) {
        (self.read_index, self.write_index)
    }

    /// The current (readable) state of `cell`.
    #[inline]
    pub fn state<'a>(&self, cell: &'a Cell<S>) -> &'a S {
        cell.state(self.read_index)
    }

    /// `cell`'s neighborhood exactly as cached at construction. Synthetic
    /// boundary entries hold whatever the policy returned back then.
    pub fn cached_neighbors<'a>(&'a self, cell: &'a Cell<S>) -> impl Iterator<Item = &'a Cell<S>> {
        cell.neighbors.iter().map(move |n| match n {
            Neighbor::Grid(i) => &self.cells[*i],
            Neighbor::Boundary(c) => c.as_ref(),
        })
    }

    /// `cell`'s neighborhood with every boundary entry re-resolved through the
    /// policy, so randomized policies draw again. Grid entries are borrowed
    /// and always current.
    pub fn neighbors<'a>(&'a self, cell: &'a Cell<S>) -> impl Iterator<Item = Cow<'a, Cell<S>>> {
        cell.neighbors.iter().map(move |n| match n {
            Neighbor::Grid(i) => Cow::Borrowed(&self.cells[*i]),
            Neighbor::Boundary(c) => self.bounding(c.x(), c.y()),
        })
    }

    /// Project the read buffer through the color function.
    pub fn render(&self) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.width(), self.height());
        self.render_into(&mut buffer);
        buffer
    }

    /// Like [`render`](Self::render), reusing `buffer`'s allocation.
    pub fn render_into(&self, buffer: &mut PixelBuffer) {
        let (width, height) = (self.width(), self.height());
        buffer.reshape(width, height);
        buffer
            .pixels_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(p, pixel)| {
                let (x, y) = (p % width, p / width);
                *pixel = (self.color)(self.cells[x * height + y].state(self.read_index));
            });
    }

    /// Grid extents `(x_max, y_max)`.
    pub const fn extents(&self) -> (i64, i64) {
        (self.x_max, self.y_max)
    }

    pub const fn width(&self) -> usize {
        self.x_max as usize
    }

    pub const fn height(&self) -> usize {
        self.y_max as usize
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All grid cells, ordered by `x` then `y`.
    pub fn cells(&self) -> &[Cell<S>] {
        &self.cells
    }

    /// Generations stepped since construction.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn boundary_name(&self) -> &'static str {
        self.boundary.name()
    }

    #[inline]
    const fn ordinal(&self, x: i64, y: i64) -> usize {
        (x * self.y_max + y) as usize
    }

    fn evaluate<F>(&self, f: &F) -> Vec<S>
    where
        F: Fn(&Cell<S>, &Automaton<S>) -> S + Sync + ?Sized,
    {
        self.cells.par_iter().map(|cell| f(cell, self)).collect()
    }

    fn commit(&mut self, index: usize, states: Vec<S>) {
        self.cells
            .par_iter_mut()
            .zip(states)
            .for_each(|(cell, state)| cell.state[index] = state);
    }

    fn swap_read_write(&mut self) {
        std::mem::swap(&mut self.read_index, &mut self.write_index);
    }

    fn cache_neighbors(&mut self) {
        let neighborhoods: Vec<Vec<Neighbor<S>>> = self
            .cells
            .par_iter()
            .map(|cell| self.resolve_neighborhood(cell))
            .collect();
        self.cells
            .par_iter_mut()
            .zip(neighborhoods)
            .for_each(|(cell, neighbors)| cell.neighbors = neighbors);
    }

    fn resolve_neighborhood(&self, cell: &Cell<S>) -> Vec<Neighbor<S>> {
        let (cx, cy) = cell.position();
        let mut result = Vec::with_capacity(8);
        for x in cx - 1..=cx + 1 {
            for y in cy - 1..=cy + 1 {
                if (x, y) == (cx, cy) {
                    continue;
                }
                let neighbor = match self.bounding(x, y) {
                    Cow::Borrowed(c) if !c.is_boundary() && self.cell_at(c.x(), c.y()).is_ok() => {
                        Neighbor::Grid(self.ordinal(c.x(), c.y()))
                    }
                    resolved => Neighbor::Boundary(Box::new(resolved.into_owned())),
                };
                result.push(neighbor);
            }
        }
        result
    }
}

/// Largest cell count whose arena fits in a single allocation.
fn max_cells<S>() -> usize {
    isize::MAX as usize / std::mem::size_of::<Cell<S>>().max(1)
}

fn clamp_extents<S>(x_max: i64, y_max: i64) -> (i64, i64) {
    let valid = |v: i64| (0..MAX_EXTENT).contains(&v);
    let fits = || {
        (x_max as usize)
            .checked_mul(y_max as usize)
            .is_some_and(|cells| cells <= max_cells::<S>())
    };
    if !valid(x_max) || !valid(y_max) || !fits() {
        warn!("extents {x_max}x{y_max} out of range; building an empty automaton");
        return (0, 0);
    }
    if x_max == 0 || y_max == 0 {
        return (0, 0);
    }
    (x_max, y_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fixed, Random, Void, Wrap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TEST_SIZE: i64 = 10;

    /// Init: each cell starts as `x * 100 + y`.
    fn coordinate_init(cell: &Cell<i64>, _: &Automaton<i64>) -> i64 {
        cell.x() * 100 + cell.y()
    }

    fn identity<B: BoundaryPolicy<i64> + 'static>(size: i64, boundary: B) -> Automaton<i64> {
        Automaton::new(
            size,
            size,
            |cell: &Cell<i64>, ca: &Automaton<i64>| *ca.state(cell),
            |_: &i64| Rgba::WHITE,
            boundary,
            coordinate_init,
        )
    }

    #[test]
    fn test_new_fills_read_buffer() {
        let ca = identity(TEST_SIZE, Wrap);
        assert_eq!(ca.len(), 100);
        assert_eq!(ca.read_write_indices(), (0, 1));
        for cell in ca.cells() {
            assert_eq!(*ca.state(cell), cell.x() * 100 + cell.y());
            assert_eq!(*cell.state(1), 0);
        }
    }

    #[test]
    fn test_step_applies_rule_and_swaps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut ca = Automaton::new(
            TEST_SIZE,
            TEST_SIZE,
            move |cell: &Cell<i64>, ca: &Automaton<i64>| {
                counter.fetch_add(1, Ordering::Relaxed);
                ca.state(cell) + 1
            },
            |_: &i64| Rgba::BLACK,
            Void,
            coordinate_init,
        );

        ca.step();
        assert_eq!(calls.load(Ordering::Relaxed), 100);
        assert_eq!(ca.read_write_indices(), (1, 0));
        assert_eq!(ca.generation(), 1);
        for cell in ca.cells() {
            assert_eq!(*ca.state(cell), cell.x() * 100 + cell.y() + 1);
        }
    }

    #[test]
    fn test_step_reads_pre_step_snapshot() {
        // Each cell takes the sum of its wrapped neighbors. If any cell saw a
        // neighbor's new value the totals would drift from the expected ones.
        let mut ca = Automaton::new(
            4,
            4,
            |cell: &Cell<i64>, ca: &Automaton<i64>| ca.neighbors(cell).map(|n| *ca.state(&n)).sum(),
            |_: &i64| Rgba::BLACK,
            Wrap,
            |_: &Cell<i64>, _: &Automaton<i64>| 1,
        );
        ca.step();
        assert!(ca.cells().iter().all(|c| *ca.state(c) == 8));
        ca.step();
        assert!(ca.cells().iter().all(|c| *ca.state(c) == 64));
    }

    #[test]
    fn test_two_steps_restore_indices() {
        let mut ca = identity(3, Wrap);
        let before = ca.read_write_indices();
        ca.steps(2);
        assert_eq!(ca.read_write_indices(), before);
    }

    #[test]
    fn test_cell_at_bounds() {
        let ca = identity(TEST_SIZE, Wrap);
        for x in -2..TEST_SIZE + 2 {
            for y in -2..TEST_SIZE + 2 {
                let inside = (0..TEST_SIZE).contains(&x) && (0..TEST_SIZE).contains(&y);
                match ca.cell_at(x, y) {
                    Ok(cell) => {
                        assert!(inside);
                        assert_eq!(cell.position(), (x, y));
                    }
                    Err(err) => {
                        assert!(!inside);
                        assert_eq!(err, Error::OutOfRange { x, y });
                    }
                }
            }
        }
    }

    #[test]
    fn test_bounding_in_range_matches_cell_at() {
        let ca = identity(4, Fixed::new(-1));
        let cell = ca.bounding(2, 3);
        assert!(std::ptr::eq(cell.as_ref(), ca.cell_at(2, 3).unwrap()));
        assert_eq!(*ca.bounding(4, 0).state(0), -1);
    }

    #[test]
    fn test_interior_neighbors_are_the_surrounding_eight() {
        let ca = identity(5, Void);
        let cell = ca.cell_at(2, 2).unwrap();
        let mut positions: Vec<_> = ca.cached_neighbors(cell).map(|n| n.position()).collect();
        assert_eq!(positions.len(), 8);
        positions.sort();
        positions.dedup();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
        assert!(cell.neighbor_entries().iter().all(|n| !n.is_boundary()));
    }

    #[test]
    fn test_neighbor_order_is_x_then_y() {
        let ca = identity(5, Void);
        let interior = ca.cell_at(2, 2).unwrap();
        let positions: Vec<_> = ca.cached_neighbors(interior).map(|n| n.position()).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)]
        );

        let edge = ca.cell_at(0, 2).unwrap();
        let positions: Vec<_> = ca.cached_neighbors(edge).map(|n| n.position()).collect();
        assert_eq!(
            positions,
            vec![(-1, 1), (-1, 2), (-1, 3), (0, 1), (0, 3), (1, 1), (1, 2), (1, 3)]
        );
        let synthetic: Vec<bool> = edge.neighbor_entries().iter().map(|n| n.is_boundary()).collect();
        assert_eq!(synthetic, vec![true, true, true, false, false, false, false, false]);
    }

    #[test]
    fn test_clamp_extents_bounds_the_arena() {
        assert_eq!(clamp_extents::<i64>(MAX_EXTENT - 1, MAX_EXTENT - 1), (0, 0));
        assert_eq!(clamp_extents::<i64>(-1, 4), (0, 0));
        assert_eq!(clamp_extents::<i64>(4, 0), (0, 0));
        assert_eq!(clamp_extents::<i64>(3, 4), (3, 4));
    }

    #[test]
    fn test_edge_neighbors_depend_on_policy() {
        let wrapped = identity(5, Wrap);
        let corner = wrapped.cell_at(0, 0).unwrap();
        assert!(corner.neighbor_entries().iter().all(|n| !n.is_boundary()));
        assert!(wrapped.cached_neighbors(corner).any(|n| n.position() == (4, 4)));

        let void = identity(5, Void);
        let corner = void.cell_at(0, 0).unwrap();
        let synthetic = corner.neighbor_entries().iter().filter(|n| n.is_boundary()).count();
        assert_eq!(synthetic, 5);
    }

    #[test]
    fn test_cached_boundary_snapshot_is_stale_until_refreshed() {
        let ca = Automaton::new(
            3,
            3,
            |cell: &Cell<u8>, ca: &Automaton<u8>| *ca.state(cell),
            |_: &u8| Rgba::BLACK,
            Random,
            |_: &Cell<u8>, _: &Automaton<u8>| 0,
        );
        let corner = ca.cell_at(0, 0).unwrap();
        let cached: Vec<u8> = ca.cached_neighbors(corner).map(|n| *ca.state(n)).collect();
        for _ in 0..10 {
            let again: Vec<u8> = ca.cached_neighbors(corner).map(|n| *ca.state(n)).collect();
            assert_eq!(cached, again);
        }

        let mut seen = [false; 2];
        for _ in 0..200 {
            for n in ca.neighbors(corner).filter(|n| n.is_boundary()) {
                seen[*ca.state(&n) as usize] = true;
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_render_visits_every_cell() {
        let ca = Automaton::new(
            3,
            2,
            |cell: &Cell<i64>, ca: &Automaton<i64>| *ca.state(cell),
            |s: &i64| Rgba::opaque(*s as u8, 0, 0),
            Void,
            |cell: &Cell<i64>, _: &Automaton<i64>| cell.x() * 10 + cell.y(),
        );
        let image = ca.render();
        assert_eq!(image.dimensions(), (3, 2));
        for x in 0..3 {
            for y in 0..2 {
                let expected = Rgba::opaque((x * 10 + y) as u8, 0, 0);
                assert_eq!(image.get(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn test_render_into_reuses_and_reshapes() {
        let ca = identity(2, Wrap);
        let mut buffer = PixelBuffer::new(7, 7);
        ca.render_into(&mut buffer);
        assert_eq!(buffer.dimensions(), (2, 2));
        assert!(buffer.pixels().iter().all(|p| *p == Rgba::WHITE));
    }

    #[test]
    fn test_degenerate_extents_collapse() {
        let huge = MAX_EXTENT - 1;
        for (x, y) in [(-3, 5), (5, -3), (0, 5), (MAX_EXTENT, 1), (huge, huge), (i64::MAX, i64::MAX)] {
            let mut ca = Automaton::new(
                x,
                y,
                |cell: &Cell<i64>, ca: &Automaton<i64>| *ca.state(cell),
                |_: &i64| Rgba::WHITE,
                Wrap,
                coordinate_init,
            );
            assert!(ca.is_empty());
            assert_eq!(ca.extents(), (0, 0));
            ca.step();
            let image = ca.render();
            assert_eq!(image.dimensions(), (0, 0));
            assert!(ca.cell_at(0, 0).is_err());
        }
    }
}
