//! Front-end settings, parsed from the command line.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::application::Engine;
use crate::domain::{
    Automaton, BoundaryPolicy, Cell, ConwayRule, DayAndNightRule, Fixed, HighLifeRule, Life, Random,
    Pattern, RandomBottom, Rgba, Rule, SeedsRule, TwoState, Void, Wrap, presets, rules,
};

/// Largest grid extent the viewer accepts (texture sizes are 16-bit).
pub const MAX_VIEW_EXTENT: i64 = 4096;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about = "Double-buffered cellular automaton viewer")]
pub struct Settings {
    /// Grid width in cells
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(1..=MAX_VIEW_EXTENT))]
    pub width: i64,

    /// Grid height in cells
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(1..=MAX_VIEW_EXTENT))]
    pub height: i64,

    /// What neighbors past the grid edge look like
    #[arg(long, value_enum, default_value_t = BoundaryKind::Wrap)]
    pub boundary: BoundaryKind,

    /// Life-like rule for two-state seeds
    #[arg(long, value_enum, default_value_t = RuleKind::Conway)]
    pub rule: RuleKind,

    /// Starting pattern
    #[arg(long, value_enum, default_value_t = Seed::RPentomino)]
    pub pattern: Seed,

    /// Screen pixels per cell
    #[arg(long, default_value_t = 4.0)]
    pub scale: f32,

    /// Generations per second while playing
    #[arg(long, default_value_t = 10.0)]
    pub speed: f32,

    /// Start playing immediately
    #[arg(long)]
    pub playing: bool,

    /// Log verbosity
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            boundary: BoundaryKind::Wrap,
            rule: RuleKind::Conway,
            pattern: Seed::RPentomino,
            scale: 4.0,
            speed: 10.0,
            playing: false,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BoundaryKind {
    Wrap,
    Void,
    Dead,
    Live,
    Random,
    RandomBottom,
}

impl BoundaryKind {
    pub fn policy<S>(self) -> Box<dyn BoundaryPolicy<S>>
    where
        S: TwoState + Clone + Default + Send + Sync + 'static,
    {
        match self {
            BoundaryKind::Wrap => Box::new(Wrap),
            BoundaryKind::Void => Box::new(Void),
            BoundaryKind::Dead => Box::new(Fixed::<S>::dead()),
            BoundaryKind::Live => Box::new(Fixed::<S>::live()),
            BoundaryKind::Random => Box::new(Random),
            BoundaryKind::RandomBottom => Box::new(RandomBottom),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuleKind {
    Conway,
    HighLife,
    Seeds,
    DayAndNight,
}

impl RuleKind {
    pub fn rule(self) -> Box<dyn Rule> {
        match self {
            RuleKind::Conway => Box::new(ConwayRule),
            RuleKind::HighLife => Box::new(HighLifeRule),
            RuleKind::Seeds => Box::new(SeedsRule),
            RuleKind::DayAndNight => Box::new(DayAndNightRule),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Seed {
    Blinker,
    Glider,
    RPentomino,
    Toad,
    Beacon,
    /// Every cell a coin flip
    Random,
    /// Random colors redrawn every generation
    Colors,
}

impl Seed {
    /// The preset behind this seed; `None` for the randomized seeds.
    pub fn pattern(self) -> Option<Pattern> {
        match self {
            Seed::Blinker => Some(presets::blinker()),
            Seed::Glider => Some(presets::glider()),
            Seed::RPentomino => Some(presets::r_pentomino()),
            Seed::Toad => Some(presets::toad()),
            Seed::Beacon => Some(presets::beacon()),
            Seed::Random | Seed::Colors => None,
        }
    }
}

impl Settings {
    /// One-line summary of the rule, boundary and seed, for the status line.
    pub fn describe(&self) -> String {
        let seed = match (self.pattern, self.pattern.pattern()) {
            (_, Some(pattern)) => format!("{} ({})", pattern.name, pattern.description),
            (Seed::Colors, None) => return "random colors".to_owned(),
            (_, None) => "random soup".to_owned(),
        };
        let rule = self.rule.rule();
        format!(
            "{} {}; {} boundary; {}",
            rule.name(),
            rule.description(),
            self.boundary.policy::<Life>().name(),
            seed
        )
    }

    /// Build the automaton these settings describe.
    pub fn build(&self) -> Box<dyn Engine> {
        let (width, height) = (self.width, self.height);
        match self.pattern.pattern() {
            Some(pattern) => Box::new(Automaton::new(
                width,
                height,
                rules::totalistic::<Life, _>(self.rule.rule()),
                rules::life_color::<Life>(),
                self.boundary.policy::<Life>(),
                rules::seed::<Life, _>(pattern.centered(width, height).points()),
            )),
            None if self.pattern == Seed::Colors => Box::new(Automaton::new(
                width,
                height,
                rules::random_color_rule(),
                rules::identity_color(),
                Void,
                |_: &Cell<Rgba>, _: &Automaton<Rgba>| rules::random_color(),
            )),
            None => Box::new(Automaton::new(
                width,
                height,
                rules::totalistic::<Life, _>(self.rule.rule()),
                rules::life_color::<Life>(),
                self.boundary.policy::<Life>(),
                rules::coin_flip::<Life>(),
            )),
        }
    }
}
