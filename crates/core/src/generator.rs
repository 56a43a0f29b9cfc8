//! Level-driven problem generation.
//!
//! Every level is sampled from its [`LevelSpec`]. Draws that violate the
//! level's constraints are rejected and redrawn, up to a fixed number of
//! attempts; past that the level's fallback problem is returned so
//! generation always terminates.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::model::{Draw, Level, LevelChoice, LevelSpec, Problem, RemainderPolicy};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Returns a value in `range`, both ends inclusive.
    fn next_in(&mut self, range: RangeInclusive<u32>) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        (**self).next_in(range)
    }
}

/// Replays a fixed sequence of values, clamped into each requested range.
///
/// Once the script runs dry every draw returns the low end of its range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        let (low, high) = (*range.start(), *range.end());
        self.values
            .pop_front()
            .map_or(low, |value| value.clamp(low, high))
    }
}

/// Outcome of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub problem: Problem,
    /// Draws consumed, including the accepted one.
    pub attempts: u32,
    pub origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Drawn,
    /// Retries ran out; the level's fixed fallback was used.
    LevelFallback,
    /// The requested level does not exist; `Problem::default_problem` was used.
    UnknownLevel,
}

/// Produces problems for a level from a random source.
#[derive(Debug, Clone, Copy)]
pub struct ProblemGenerator {
    max_attempts: u32,
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemGenerator {
    /// Upper bound on rejected draws before falling back.
    pub const MAX_ATTEMPTS: u32 = 64;

    #[must_use]
    pub fn new() -> Self {
        Self {
            max_attempts: Self::MAX_ATTEMPTS,
        }
    }

    /// Override the retry bound. Zero is treated as one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Generate a problem for a validated level.
    pub fn generate<R: RandomSource + ?Sized>(&self, level: Level, rng: &mut R) -> Problem {
        self.generate_detailed(level, rng).problem
    }

    /// Generate a problem and report how it was obtained.
    pub fn generate_detailed<R: RandomSource + ?Sized>(
        &self,
        level: Level,
        rng: &mut R,
    ) -> Generation {
        let spec = level.spec();
        for attempt in 1..=self.max_attempts {
            if let Some(problem) = draw_once(&spec, rng) {
                return Generation {
                    problem,
                    attempts: attempt,
                    origin: Origin::Drawn,
                };
            }
        }
        Generation {
            problem: spec.fallback,
            attempts: self.max_attempts,
            origin: Origin::LevelFallback,
        }
    }

    /// Generate for a session's level.
    ///
    /// Unknown level numbers yield 10 ÷ 2 without touching `rng`.
    pub fn generate_for<R: RandomSource + ?Sized>(
        &self,
        choice: LevelChoice,
        rng: &mut R,
    ) -> Generation {
        match choice {
            LevelChoice::Known(level) => self.generate_detailed(level, rng),
            LevelChoice::Unknown(_) => Generation {
                problem: Problem::default_problem(),
                attempts: 0,
                origin: Origin::UnknownLevel,
            },
        }
    }
}

fn draw_once<R: RandomSource + ?Sized>(spec: &LevelSpec, rng: &mut R) -> Option<Problem> {
    let problem = match &spec.draw {
        Draw::Product {
            divisor,
            quotient,
            dividend,
        } => {
            let b = rng.next_in(divisor.clone());
            if b == 0 {
                return None;
            }
            // Narrow the quotient so that q * b stays inside the dividend range.
            let q_low = (*quotient.start()).max(dividend.start().div_ceil(b));
            let q_high = (*quotient.end()).min(dividend.end() / b);
            if q_low > q_high {
                return None;
            }
            let q = rng.next_in(q_low..=q_high);
            Problem::new(q.checked_mul(b)?, b).ok()?
        }
        Draw::Quotient {
            divisor,
            dividend,
            dividend_exceeds_divisor,
        } => {
            let b = rng.next_in(divisor.clone());
            let a = rng.next_in(dividend.clone());
            if *dividend_exceeds_divisor && a <= b {
                return None;
            }
            Problem::new(a, b).ok()?
        }
    };

    match spec.remainder {
        RemainderPolicy::Required if !problem.has_remainder() => None,
        RemainderPolicy::Exact if problem.has_remainder() => None,
        _ => Some(problem),
    }
}
