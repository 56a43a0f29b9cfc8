
use crate::model::Problem;

/// Longest digit string either answer field accepts.
pub const MAX_ANSWER_DIGITS: usize = 5;

/// Which answer field receives keypad input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Field {
    #[default]
    Quotient,
    Remainder,
}

/// Result shown after a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// Digits typed so far for the current problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerEntry {
    quotient: String,
    remainder: String,
    focused: Field,
    remainder_enabled: bool,
}

impl AnswerEntry {
    #[must_use]
    pub fn new(remainder_enabled: bool) -> Self {
        Self {
            remainder_enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn quotient_text(&self) -> &str {
        &self.quotient
    }

    #[must_use]
    pub fn remainder_text(&self) -> &str {
        &self.remainder
    }

    #[must_use]
    pub fn focused(&self) -> Field {
        self.focused
    }

    #[must_use]
    pub fn remainder_enabled(&self) -> bool {
        self.remainder_enabled
    }

    /// Move keypad focus. The remainder field can only be focused when enabled.
    pub fn focus(&mut self, field: Field) -> bool {
        if field == Field::Remainder && !self.remainder_enabled {
            return false;
        }
        self.focused = field;
        true
    }

    /// Append a digit to the focused field.
    ///
    /// Returns false when the digit is not 0-9 or the field is full.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let target = self.focused_text_mut();
        if target.len() >= MAX_ANSWER_DIGITS {
            return false;
        }
        target.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last digit of the focused field.
    pub fn backspace(&mut self) -> bool {
        self.focused_text_mut().pop().is_some()
    }

    /// Clear both fields. Focus is left where it was.
    pub fn clear(&mut self) {
        self.quotient.clear();
        self.remainder.clear();
    }

    /// Submission needs at least one quotient digit.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.quotient.is_empty()
    }

    /// Compare the typed answer against a problem.
    ///
    /// A blank remainder counts as zero. Anything that does not parse is a
    /// mismatch rather than an error.
    #[must_use]
    pub fn matches(&self, problem: &Problem) -> bool {
        let Ok(quotient) = self.quotient.parse::<u32>() else {
            return false;
        };
        let remainder = if self.remainder.is_empty() {
            0
        } else {
            match self.remainder.parse::<u32>() {
                Ok(value) => value,
                Err(_) => return false,
            }
        };
        problem.is_solved_by(quotient, remainder)
    }

    fn focused_text_mut(&mut self) -> &mut String {
        match self.focused {
            Field::Quotient => &mut self.quotient,
            Field::Remainder => &mut self.remainder,
        }
    }
}
