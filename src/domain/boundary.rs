//! Boundary policies: what a neighbor lookup sees past the edge of the grid.
//!
//! The automaton consults its policy from [`Automaton::bounding`] whenever a
//! coordinate falls outside `[0, x_max) x [0, y_max)`. A policy either
//! redirects the lookup to a live grid cell (`Wrap`) or manufactures a
//! synthetic cell that stands in for the missing neighbor.

use std::borrow::Cow;

use rand::Rng;

use super::{Automaton, Cell};

/// Which bounds a coordinate violates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Overflow {
    pub x_low: bool,
    pub x_high: bool,
    pub y_low: bool,
    pub y_high: bool,
}

impl Overflow {
    /// Compare `(x, y)` against the extents `x_max` by `y_max`.
    pub const fn of(x: i64, y: i64, x_max: i64, y_max: i64) -> Self {
        Self {
            x_low: x < 0,
            x_high: x > x_max - 1,
            y_low: y < 0,
            y_high: y > y_max - 1,
        }
    }

    /// True when at least one bound is violated.
    pub const fn any(self) -> bool {
        self.x_low || self.x_high || self.y_low || self.y_high
    }
}

/// State types with a "dead" and a "live" encoding.
///
/// Needed by the fixed and randomized policies, which have to produce a
/// concrete state without knowing what the type means.
pub trait TwoState: Sized {
    fn dead() -> Self;
    fn live() -> Self;

    /// A fair coin flip between the two encodings.
    fn coin_flip() -> Self {
        if rand::rng().random_bool(0.5) {
            Self::live()
        } else {
            Self::dead()
        }
    }
}

impl TwoState for bool {
    fn dead() -> Self {
        false
    }

    fn live() -> Self {
        true
    }
}

impl TwoState for u8 {
    fn dead() -> Self {
        0
    }

    fn live() -> Self {
        1
    }
}

impl TwoState for i32 {
    fn dead() -> Self {
        0
    }

    fn live() -> Self {
        1
    }
}

/// Resolves out-of-range neighbor lookups.
///
/// Implementations must be total: every out-of-range coordinate gets a cell,
/// even on an empty automaton.
pub trait BoundaryPolicy<S: Clone>: Send + Sync {
    /// Short name for logs and the front end.
    fn name(&self) -> &'static str;

    fn resolve<'a>(
        &self,
        automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        overflow: Overflow,
    ) -> Cow<'a, Cell<S>>;
}

impl<S: Clone, P: BoundaryPolicy<S> + ?Sized> BoundaryPolicy<S> for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn resolve<'a>(
        &self,
        automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        overflow: Overflow,
    ) -> Cow<'a, Cell<S>> {
        (**self).resolve(automaton, x, y, overflow)
    }
}

/// Toroidal topology: a coordinate past one edge lands on the opposite edge.
///
/// The result borrows the real grid cell, so its state is always current.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wrap;

impl<S: Clone + Default + Send + Sync> BoundaryPolicy<S> for Wrap {
    fn name(&self) -> &'static str {
        "wrap"
    }

    fn resolve<'a>(
        &self,
        automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        overflow: Overflow,
    ) -> Cow<'a, Cell<S>> {
        let (x_max, y_max) = automaton.extents();
        let wrap = |v: i64, max: i64, low: bool, high: bool| match (low, high) {
            (true, _) => max - 1,
            (_, true) => 0,
            _ => v,
        };
        let wx = wrap(x, x_max, overflow.x_low, overflow.x_high);
        let wy = wrap(y, y_max, overflow.y_low, overflow.y_high);

        match automaton.cell_at(wx, wy) {
            Ok(cell) => Cow::Borrowed(cell),
            // Nothing to wrap onto in an empty grid.
            Err(_) => Cow::Owned(Cell::boundary(x, y, S::default())),
        }
    }
}

/// Empty space: a synthetic cell holding the state type's default value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Void;

impl<S: Clone + Default + Send + Sync> BoundaryPolicy<S> for Void {
    fn name(&self) -> &'static str {
        "void"
    }

    fn resolve<'a>(
        &self,
        _automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        _overflow: Overflow,
    ) -> Cow<'a, Cell<S>> {
        Cow::Owned(Cell::boundary(x, y, S::default()))
    }
}

/// A synthetic cell pinned to one constant state forever.
#[derive(Clone, Debug)]
pub struct Fixed<S> {
    state: S,
    name: &'static str,
}

impl<S> Fixed<S> {
    pub fn new(state: S) -> Self {
        Self { state, name: "fixed" }
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S: TwoState> Fixed<S> {
    pub fn dead() -> Self {
        Self { state: S::dead(), name: "dead" }
    }

    pub fn live() -> Self {
        Self { state: S::live(), name: "live" }
    }
}

impl<S: Clone + Send + Sync> BoundaryPolicy<S> for Fixed<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn resolve<'a>(
        &self,
        _automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        _overflow: Overflow,
    ) -> Cow<'a, Cell<S>> {
        Cow::Owned(Cell::boundary(x, y, self.state.clone()))
    }
}

/// A fresh coin flip on every call.
///
/// A neighbor cached at construction keeps the flip it was built with; only a
/// new call to the policy draws again.
#[derive(Clone, Copy, Debug, Default)]
pub struct Random;

impl<S: Clone + TwoState + Send + Sync> BoundaryPolicy<S> for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn resolve<'a>(
        &self,
        _automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        _overflow: Overflow,
    ) -> Cow<'a, Cell<S>> {
        Cow::Owned(Cell::boundary(x, y, S::coin_flip()))
    }
}

/// Like [`Random`], but only below the bottom edge (`y` too high).
/// Every other violation is dead.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomBottom;

impl<S: Clone + TwoState + Send + Sync> BoundaryPolicy<S> for RandomBottom {
    fn name(&self) -> &'static str {
        "random-bottom"
    }

    fn resolve<'a>(
        &self,
        _automaton: &'a Automaton<S>,
        x: i64,
        y: i64,
        overflow: Overflow,
    ) -> Cow<'a, Cell<S>> {
        let state = if overflow.y_high { S::coin_flip() } else { S::dead() };
        Cow::Owned(Cell::boundary(x, y, state))
    }
}
