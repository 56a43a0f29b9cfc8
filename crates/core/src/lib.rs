#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod time;

pub use generator::{Generation, Origin, ProblemGenerator, RandomSource, ScriptedSource};
pub use time::Clock;
