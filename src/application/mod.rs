mod simulation;

pub use simulation::{Engine, Simulation};
