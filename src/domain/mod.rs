mod automaton;
mod boundary;
mod cell;
mod error;
mod image;
mod patterns;
pub mod rules;

pub use automaton::{Automaton, ColorFn, MAX_EXTENT, RuleFn};
pub use boundary::{BoundaryPolicy, Fixed, Overflow, Random, RandomBottom, TwoState, Void, Wrap};
pub use cell::{Cell, Neighbor};
pub use error::{Error, Result};
pub use image::{PixelBuffer, Rgba};
pub use patterns::{Pattern, presets};
pub use rules::{ConwayRule, DayAndNightRule, HighLifeRule, Life, Rule, SeedsRule};
