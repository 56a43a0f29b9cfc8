use std::fmt;

use thiserror::Error;

/// Symbol rendered between dividend and divisor.
pub const DIVISION_OPERATOR: char = '÷';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("divisor must be positive")]
    ZeroDivisor,
}

/// A single division exercise.
///
/// Always satisfies `dividend == divisor * quotient + remainder` with
/// `remainder < divisor`; fields are private and `new` is the only
/// constructor, so the relation cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Problem {
    dividend: u32,
    divisor: u32,
    quotient: u32,
    remainder: u32,
}

impl Problem {
    /// Build a problem by dividing `dividend` by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::ZeroDivisor` if `divisor` is zero.
    pub fn new(dividend: u32, divisor: u32) -> Result<Self, ProblemError> {
        if divisor == 0 {
            return Err(ProblemError::ZeroDivisor);
        }
        Ok(Self {
            dividend,
            divisor,
            quotient: dividend / divisor,
            remainder: dividend % divisor,
        })
    }

    /// Problem used when a level cannot be resolved: 10 ÷ 2.
    #[must_use]
    pub const fn default_problem() -> Self {
        Self {
            dividend: 10,
            divisor: 2,
            quotient: 5,
            remainder: 0,
        }
    }

    #[must_use]
    pub fn dividend(&self) -> u32 {
        self.dividend
    }

    #[must_use]
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    #[must_use]
    pub fn quotient(&self) -> u32 {
        self.quotient
    }

    #[must_use]
    pub fn remainder(&self) -> u32 {
        self.remainder
    }

    #[must_use]
    pub fn operator(&self) -> char {
        DIVISION_OPERATOR
    }

    #[must_use]
    pub fn has_remainder(&self) -> bool {
        self.remainder != 0
    }

    /// True when the given quotient/remainder pair solves this problem.
    #[must_use]
    pub fn is_solved_by(&self, quotient: u32, remainder: u32) -> bool {
        self.quotient == quotient && self.remainder == remainder
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::default_problem()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.dividend, DIVISION_OPERATOR, self.divisor)
    }
}
