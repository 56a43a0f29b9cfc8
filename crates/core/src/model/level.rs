use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Problem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("level {level} is not available in the {variant} variant (1-{max})")]
    OutOfRange {
        level: u8,
        variant: Variant,
        max: u8,
    },

    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

/// Which level table is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Seven tiers; a remainder is forced from level 3 upward.
    #[default]
    Standard,
    /// Six tiers; remainders are allowed but never forced.
    Classic,
}

impl Variant {
    #[must_use]
    pub const fn max_level(self) -> u8 {
        match self {
            Variant::Standard => 7,
            Variant::Classic => 6,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Classic => "classic",
        }
    }

    /// All levels offered by this variant, lowest first.
    pub fn levels(self) -> impl Iterator<Item = Level> {
        (1..=self.max_level()).map(move |number| Level {
            number,
            variant: self,
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Variant::Standard),
            "classic" => Ok(Variant::Classic),
            other => Err(LevelError::UnknownVariant(other.to_string())),
        }
    }
}

/// How a level treats the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Always divides evenly; the remainder field is hidden.
    Exact,
    /// Whatever the draw produces, zero included.
    Any,
    /// Draws are rejected until the remainder is non-zero.
    Required,
}

impl RemainderPolicy {
    #[must_use]
    pub const fn accepts_remainder_input(self) -> bool {
        !matches!(self, RemainderPolicy::Exact)
    }
}

/// How operands are drawn for a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    /// Pick divisor and quotient, multiply for the dividend. The dividend must
    /// land in `dividend`.
    Product {
        divisor: RangeInclusive<u32>,
        quotient: RangeInclusive<u32>,
        dividend: RangeInclusive<u32>,
    },
    /// Pick divisor and dividend independently and divide.
    Quotient {
        divisor: RangeInclusive<u32>,
        dividend: RangeInclusive<u32>,
        dividend_exceeds_divisor: bool,
    },
}

/// Static description of one difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec {
    pub label: &'static str,
    pub draw: Draw,
    pub remainder: RemainderPolicy,
    /// Returned when rejection sampling runs out of attempts.
    pub fallback: Problem,
}

/// A difficulty tier validated against its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level {
    number: u8,
    variant: Variant,
}

impl Level {
    /// Validate a level number for the given variant.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::OutOfRange` when `number` is zero or above the
    /// variant's highest tier.
    pub fn new(number: u8, variant: Variant) -> Result<Self, LevelError> {
        let max = variant.max_level();
        if number == 0 || number > max {
            return Err(LevelError::OutOfRange {
                level: number,
                variant,
                max,
            });
        }
        Ok(Self { number, variant })
    }

    #[must_use]
    pub fn number(&self) -> u8 {
        self.number
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    #[must_use]
    pub fn remainder_policy(&self) -> RemainderPolicy {
        self.spec().remainder
    }

    /// Whether the answer pad exposes a remainder field at this level.
    #[must_use]
    pub fn accepts_remainder(&self) -> bool {
        self.remainder_policy().accepts_remainder_input()
    }

    /// Full generation parameters for this tier.
    #[must_use]
    pub fn spec(&self) -> LevelSpec {
        match self.variant {
            Variant::Standard => standard_spec(self.number),
            Variant::Classic => classic_spec(self.number),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lv.{}", self.number)
    }
}

// Both tables are only reached through `Level::spec`, which guarantees the
// number is in range; the trailing arm covers the top tier.

fn standard_spec(number: u8) -> LevelSpec {
    match number {
        1 => single_digit_tables(),
        2 => two_digit_exact(),
        3 => LevelSpec {
            label: "2-digit ÷ 1-digit, with remainder",
            draw: Draw::Quotient {
                divisor: 2..=9,
                dividend: 10..=99,
                dividend_exceeds_divisor: false,
            },
            remainder: RemainderPolicy::Required,
            fallback: fallback(50, 7),
        },
        4 => LevelSpec {
            label: "3-digit ÷ 1-digit, with remainder",
            draw: Draw::Quotient {
                divisor: 2..=9,
                dividend: 100..=999,
                dividend_exceeds_divisor: false,
            },
            remainder: RemainderPolicy::Required,
            fallback: fallback(100, 3),
        },
        5 => LevelSpec {
            label: "2-digit ÷ 2-digit, with remainder",
            draw: Draw::Quotient {
                divisor: 10..=98,
                dividend: 10..=99,
                dividend_exceeds_divisor: true,
            },
            remainder: RemainderPolicy::Required,
            fallback: fallback(99, 10),
        },
        6 => LevelSpec {
            label: "3-digit ÷ 2-digit, with remainder",
            draw: Draw::Quotient {
                divisor: 10..=99,
                dividend: 100..=999,
                dividend_exceeds_divisor: false,
            },
            remainder: RemainderPolicy::Required,
            fallback: fallback(100, 11),
        },
        _ => LevelSpec {
            label: "3-digit ÷ 3-digit, with remainder",
            draw: Draw::Quotient {
                divisor: 100..=998,
                dividend: 100..=999,
                dividend_exceeds_divisor: true,
            },
            remainder: RemainderPolicy::Required,
            fallback: fallback(999, 100),
        },
    }
}

fn classic_spec(number: u8) -> LevelSpec {
    match number {
        1 => single_digit_tables(),
        2 => two_digit_exact(),
        3 => LevelSpec {
            label: "2-digit ÷ 1-digit",
            draw: Draw::Quotient {
                divisor: 2..=9,
                dividend: 10..=99,
                dividend_exceeds_divisor: false,
            },
            remainder: RemainderPolicy::Any,
            fallback: fallback(50, 7),
        },
        4 => LevelSpec {
            label: "3-digit ÷ 1-digit, no remainder",
            draw: Draw::Product {
                divisor: 2..=9,
                quotient: 12..=499,
                dividend: 100..=999,
            },
            remainder: RemainderPolicy::Exact,
            fallback: fallback(120, 4),
        },
        5 => LevelSpec {
            label: "3-digit ÷ 1-digit",
            draw: Draw::Quotient {
                divisor: 2..=9,
                dividend: 100..=999,
                dividend_exceeds_divisor: false,
            },
            remainder: RemainderPolicy::Any,
            fallback: fallback(100, 3),
        },
        _ => LevelSpec {
            label: "3-digit ÷ 2-digit",
            draw: Draw::Quotient {
                divisor: 10..=99,
                dividend: 100..=999,
                dividend_exceeds_divisor: false,
            },
            remainder: RemainderPolicy::Any,
            fallback: fallback(100, 11),
        },
    }
}

fn single_digit_tables() -> LevelSpec {
    LevelSpec {
        label: "1-digit ÷ 1-digit",
        draw: Draw::Product {
            divisor: 1..=9,
            quotient: 1..=9,
            dividend: 1..=81,
        },
        remainder: RemainderPolicy::Exact,
        fallback: fallback(8, 2),
    }
}

fn two_digit_exact() -> LevelSpec {
    LevelSpec {
        label: "2-digit ÷ 1-digit",
        draw: Draw::Product {
            divisor: 2..=9,
            quotient: 10..=49,
            dividend: 10..=99,
        },
        remainder: RemainderPolicy::Exact,
        fallback: fallback(20, 2),
    }
}

fn fallback(dividend: u32, divisor: u32) -> Problem {
    Problem::new(dividend, divisor).unwrap_or_default()
}
