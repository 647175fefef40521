//! Strategies shipped with the engine: life-like rules, colors and initial
//! fills.
//!
//! Rules returned from here count neighbors through
//! [`Automaton::neighbors`], which re-resolves boundary entries every
//! generation. Interior neighbors are read straight from the live grid.

use std::collections::HashSet;

use rand::Rng;

use super::{Automaton, Cell, Rgba, TwoState};

/// Trait for life-like (outer totalistic) rules.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Whether a cell is alive next generation
    fn evolve(&self, alive: bool, live_neighbors: u8) -> bool;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }

    fn evolve(&self, alive: bool, live_neighbors: u8) -> bool {
        (**self).evolve(alive, live_neighbors)
    }
}

/// Conway's Game of Life (B3/S23)
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    fn name(&self) -> &'static str {
        "Conway"
    }

    fn description(&self) -> &'static str {
        "B3/S23 - Classic"
    }

    fn evolve(&self, alive: bool, live_neighbors: u8) -> bool {
        Life::from(alive).evolve(live_neighbors).is_alive()
    }
}

/// HighLife (B36/S23), home of the replicator
#[derive(Clone, Copy, Debug, Default)]
pub struct HighLifeRule;

impl Rule for HighLifeRule {
    fn name(&self) -> &'static str {
        "HighLife"
    }

    fn description(&self) -> &'static str {
        "B36/S23 - Replicators"
    }

    fn evolve(&self, alive: bool, live_neighbors: u8) -> bool {
        matches!((alive, live_neighbors), (true, 2 | 3) | (false, 3 | 6))
    }
}

/// Seeds (B2/S): nothing survives
#[derive(Clone, Copy, Debug, Default)]
pub struct SeedsRule;

impl Rule for SeedsRule {
    fn name(&self) -> &'static str {
        "Seeds"
    }

    fn description(&self) -> &'static str {
        "B2/S - Exploding"
    }

    fn evolve(&self, alive: bool, live_neighbors: u8) -> bool {
        !alive && live_neighbors == 2
    }
}

/// Day & Night (B3678/S34678)
#[derive(Clone, Copy, Debug, Default)]
pub struct DayAndNightRule;

impl Rule for DayAndNightRule {
    fn name(&self) -> &'static str {
        "Day&Night"
    }

    fn description(&self) -> &'static str {
        "B3678/S34678"
    }

    fn evolve(&self, alive: bool, live_neighbors: u8) -> bool {
        match (alive, live_neighbors) {
            (true, 3 | 4 | 6 | 7 | 8) => true,
            (false, 3 | 6 | 7 | 8) => true,
            _ => false,
        }
    }
}

/// Two-state cell for life-like automata.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Life {
    #[default]
    Dead,
    Alive,
}

impl Life {
    pub const fn is_alive(self) -> bool {
        matches!(self, Life::Alive)
    }

    /// Conway's rules:
    /// 1. Live cell with 2-3 neighbors survives
    /// 2. Dead cell with exactly 3 neighbors becomes alive
    /// 3. All other cases result in death
    pub const fn evolve(self, neighbors: u8) -> Self {
        match (self, neighbors) {
            (Life::Alive, 2 | 3) => Life::Alive,
            (Life::Dead, 3) => Life::Alive,
            _ => Life::Dead,
        }
    }
}

impl From<bool> for Life {
    fn from(alive: bool) -> Self {
        if alive { Life::Alive } else { Life::Dead }
    }
}

impl TwoState for Life {
    fn dead() -> Self {
        Life::Dead
    }

    fn live() -> Self {
        Life::Alive
    }
}

/// Rule closure for any life-like `rule` over a two-state type.
pub fn totalistic<S, R>(rule: R) -> impl Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync + 'static
where
    S: TwoState + Clone + Default + PartialEq + Send + Sync + 'static,
    R: Rule + 'static,
{
    move |cell: &Cell<S>, ca: &Automaton<S>| {
        let live = S::live();
        let alive = |c: &Cell<S>| *ca.state(c) == live;
        let live_neighbors = ca.neighbors(cell).filter(|n| alive(&**n)).count() as u8;
        if rule.evolve(alive(cell), live_neighbors) {
            S::live()
        } else {
            S::dead()
        }
    }
}

/// Conway's Life over a two-state type.
pub fn life_rule<S>() -> impl Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync + 'static
where
    S: TwoState + Clone + Default + PartialEq + Send + Sync + 'static,
{
    totalistic(ConwayRule)
}

/// White for live cells, black for everything else.
pub fn life_color<S>() -> impl Fn(&S) -> Rgba + Send + Sync + 'static
where
    S: TwoState + PartialEq + Send + Sync + 'static,
{
    let live = S::live();
    move |state: &S| if *state == live { Rgba::WHITE } else { Rgba::BLACK }
}

/// Random opaque color; channels are drawn from `0..255`.
pub fn random_color() -> Rgba {
    let mut rng = rand::rng();
    Rgba::opaque(rng.random_range(0..255), rng.random_range(0..255), rng.random_range(0..255))
}

/// Rule for a field of noise: every cell draws a fresh color each generation.
pub fn random_color_rule() -> impl Fn(&Cell<Rgba>, &Automaton<Rgba>) -> Rgba + Send + Sync + 'static {
    |_: &Cell<Rgba>, _: &Automaton<Rgba>| random_color()
}

/// Colors are their own display value.
pub fn identity_color() -> impl Fn(&Rgba) -> Rgba + Send + Sync + 'static {
    |color: &Rgba| *color
}

/// Init: alive exactly at `points`, dead elsewhere.
pub fn seed<S, P>(points: P) -> impl Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync
where
    S: TwoState + Clone + 'static,
    P: IntoIterator<Item = (i64, i64)>,
{
    let alive: HashSet<(i64, i64)> = points.into_iter().collect();
    move |cell: &Cell<S>, _: &Automaton<S>| {
        if alive.contains(&cell.position()) {
            S::live()
        } else {
            S::dead()
        }
    }
}

/// Init: an independent coin flip per cell.
pub fn coin_flip<S>() -> impl Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync + 'static
where
    S: TwoState + Clone + 'static,
{
    |_: &Cell<S>, _: &Automaton<S>| S::coin_flip()
}

/// Init: every cell starts in `state`.
pub fn uniform<S>(state: S) -> impl Fn(&Cell<S>, &Automaton<S>) -> S + Send + Sync + 'static
where
    S: Clone + Send + Sync + 'static,
{
    move |_: &Cell<S>, _: &Automaton<S>| state.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fixed, Void, Wrap, presets};

    fn alive_positions<S: TwoState + Clone + Default + PartialEq + Send + Sync>(ca: &Automaton<S>) -> Vec<(i64, i64)> {
        let live = S::live();
        let mut alive: Vec<_> = ca
            .cells()
            .iter()
            .filter(|c| *ca.state(c) == live)
            .map(|c| c.position())
            .collect();
        alive.sort();
        alive
    }

    #[test]
    fn test_underpopulation() {
        assert_eq!(Life::Alive.evolve(0), Life::Dead);
        assert_eq!(Life::Alive.evolve(1), Life::Dead);
    }

    #[test]
    fn test_survival() {
        assert_eq!(Life::Alive.evolve(2), Life::Alive);
        assert_eq!(Life::Alive.evolve(3), Life::Alive);
    }

    #[test]
    fn test_overpopulation() {
        assert_eq!(Life::Alive.evolve(4), Life::Dead);
        assert_eq!(Life::Alive.evolve(8), Life::Dead);
    }

    #[test]
    fn test_reproduction() {
        assert_eq!(Life::Dead.evolve(3), Life::Alive);
        assert_eq!(Life::Dead.evolve(2), Life::Dead);
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = HighLifeRule;
        assert!(rule.evolve(false, 6));
        assert!(rule.evolve(false, 3));
        assert!(!ConwayRule.evolve(false, 6));
    }

    #[test]
    fn test_seeds_always_dies() {
        let rule = SeedsRule;
        assert!(!rule.evolve(true, 2));
        assert!(!rule.evolve(true, 8));
        assert!(rule.evolve(false, 2));
        assert!(!rule.evolve(false, 3));
    }

    #[test]
    fn test_boxed_rule_delegates() {
        let rule: Box<dyn Rule> = Box::new(DayAndNightRule);
        assert_eq!(rule.name(), "Day&Night");
        assert_eq!(rule.description(), "B3678/S34678");
        assert!(rule.evolve(true, 4));
        assert!(!rule.evolve(false, 4));
    }

    #[test]
    fn test_blinker_oscillates_on_wrap_grid() {
        let vertical = vec![(2, 1), (2, 2), (2, 3)];
        let horizontal = vec![(1, 2), (2, 2), (3, 2)];
        let mut ca = Automaton::new(
            5,
            5,
            life_rule::<i32>(),
            life_color::<i32>(),
            Wrap,
            seed::<i32, _>(presets::blinker().offset(1, 1).points()),
        );
        assert_eq!(alive_positions(&ca), vertical);

        ca.step();
        assert_eq!(alive_positions(&ca), horizontal);

        ca.step();
        assert_eq!(alive_positions(&ca), vertical);
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        let mut ca = Automaton::new(5, 5, life_rule::<i32>(), life_color::<i32>(), Fixed::dead(), uniform::<i32>(0));
        ca.step();
        assert!(alive_positions(&ca).is_empty());
    }

    #[test]
    fn test_live_border_feeds_corners() {
        // A live border gives the corner cell 5 live neighbors and each
        // edge cell 3, so the rim is born around an empty interior.
        let mut ca = Automaton::new(
            3,
            3,
            life_rule::<Life>(),
            life_color::<Life>(),
            Fixed::live(),
            uniform(Life::Dead),
        );
        ca.step();
        let alive = alive_positions(&ca);
        assert!(!alive.contains(&(0, 0)));
        assert!(alive.contains(&(1, 0)));
        assert!(alive.contains(&(0, 1)));
        assert!(!alive.contains(&(1, 1)));
    }

    #[test]
    fn test_block_is_still_life_in_void() {
        let mut ca = Automaton::new(
            4,
            4,
            life_rule::<bool>(),
            life_color::<bool>(),
            Void,
            seed::<bool, _>(presets::block().offset(1, 1).points()),
        );
        let before = alive_positions(&ca);
        ca.steps(3);
        assert_eq!(alive_positions(&ca), before);
    }

    #[test]
    fn test_glider_returns_shifted_after_four_generations() {
        let glider = presets::glider();
        let mut ca = Automaton::new(
            12,
            12,
            life_rule::<u8>(),
            life_color::<u8>(),
            Wrap,
            seed::<u8, _>(glider.points()),
        );
        ca.steps(4);
        let mut expected: Vec<_> = glider.offset(1, 1).points().collect();
        expected.sort();
        assert_eq!(alive_positions(&ca), expected);
    }

    #[test]
    fn test_random_color_field_is_opaque() {
        let mut ca = Automaton::new(
            6,
            6,
            random_color_rule(),
            identity_color(),
            Void,
            |_: &Cell<Rgba>, _: &Automaton<Rgba>| random_color(),
        );
        ca.step();
        let image = ca.render();
        assert_eq!(image.dimensions(), (6, 6));
        assert!(image.pixels().iter().all(|p| p.a == 255 && p.r < 255 && p.g < 255 && p.b < 255));
    }

    #[test]
    fn test_life_color() {
        let color = life_color::<bool>();
        assert_eq!(color(&true), Rgba::WHITE);
        assert_eq!(color(&false), Rgba::BLACK);
    }

    #[test]
    fn test_coin_flip_init_is_two_state() {
        let ca = Automaton::new(8, 8, life_rule::<i32>(), life_color::<i32>(), Wrap, coin_flip::<i32>());
        assert!(ca.cells().iter().all(|c| matches!(*ca.state(c), 0 | 1)));
    }
}
