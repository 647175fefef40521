// Domain layer - automaton engine and strategies
pub mod domain;

// Application layer - pacing and settings
pub mod application;
pub mod config;

// Infrastructure layer - logging, rendering, input
pub mod logging;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Automaton, Cell, Error, Neighbor, PixelBuffer, Rgba, Pattern, presets};
pub use application::{Engine, Simulation};
pub use config::Settings;
