use std::mem;

use crate::generator::{Generation, ProblemGenerator, RandomSource};
use crate::model::{AnswerEntry, Feedback, Field, Level, Problem, Variant};

/// The level a session was opened with.
///
/// Numbers that do not name a level are kept as-is; such sessions always
/// serve `Problem::default_problem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelChoice {
    Known(Level),
    Unknown(u8),
}

impl LevelChoice {
    #[must_use]
    pub fn resolve(number: u8, variant: Variant) -> Self {
        Level::new(number, variant).map_or(LevelChoice::Unknown(number), LevelChoice::Known)
    }

    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            LevelChoice::Known(level) => level.number(),
            LevelChoice::Unknown(number) => *number,
        }
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        match self {
            LevelChoice::Known(level) => Some(*level),
            LevelChoice::Unknown(_) => None,
        }
    }

    #[must_use]
    pub fn accepts_remainder(&self) -> bool {
        self.level().is_some_and(|level| level.accepts_remainder())
    }
}

impl From<Level> for LevelChoice {
    fn from(level: Level) -> Self {
        LevelChoice::Known(level)
    }
}

/// Where the current round stands. Each state owns the typed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    Entering(AnswerEntry),
    CorrectShown(AnswerEntry),
    IncorrectShown(AnswerEntry),
}

impl RoundState {
    #[must_use]
    pub fn entry(&self) -> &AnswerEntry {
        match self {
            RoundState::Entering(entry)
            | RoundState::CorrectShown(entry)
            | RoundState::IncorrectShown(entry) => entry,
        }
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        match self {
            RoundState::Entering(_) => Feedback::None,
            RoundState::CorrectShown(_) => Feedback::Correct,
            RoundState::IncorrectShown(_) => Feedback::Incorrect,
        }
    }
}

/// Result of pressing submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// Nothing to check: the quotient is blank or feedback is already showing.
    Ignored,
}

/// One sitting at a single level: the current problem, the typed answer and
/// the running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillSession {
    level: LevelChoice,
    problem: Problem,
    state: RoundState,
    score: u32,
    attempts: u32,
}

impl DrillSession {
    /// Start a session with a freshly generated problem.
    ///
    /// The `Generation` reports how that first problem was obtained.
    pub fn start<R: RandomSource + ?Sized>(
        level: impl Into<LevelChoice>,
        generator: &ProblemGenerator,
        rng: &mut R,
    ) -> (Self, Generation) {
        let level = level.into();
        let generation = generator.generate_for(level, rng);
        (Self::with_problem(level, generation.problem), generation)
    }

    /// Start a session on a known problem.
    #[must_use]
    pub fn with_problem(level: impl Into<LevelChoice>, problem: Problem) -> Self {
        let level = level.into();
        Self {
            level,
            problem,
            state: RoundState::Entering(AnswerEntry::new(level.accepts_remainder())),
            score: 0,
            attempts: 0,
        }
    }

    #[must_use]
    pub fn level(&self) -> LevelChoice {
        self.level
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn entry(&self) -> &AnswerEntry {
        self.state.entry()
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.state.feedback()
    }

    /// Correct answers given in this session.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Submissions made against the current problem.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(&self.state, RoundState::Entering(entry) if entry.can_submit())
    }

    pub fn press_digit(&mut self, digit: u8) -> bool {
        match &mut self.state {
            RoundState::Entering(entry) => entry.push_digit(digit),
            _ => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        match &mut self.state {
            RoundState::Entering(entry) => entry.backspace(),
            _ => false,
        }
    }

    pub fn clear_entry(&mut self) {
        if let RoundState::Entering(entry) = &mut self.state {
            entry.clear();
        }
    }

    pub fn focus(&mut self, field: Field) -> bool {
        match &mut self.state {
            RoundState::Entering(entry) => entry.focus(field),
            _ => false,
        }
    }

    /// Check the typed answer against the current problem.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }
        let entry = self.take_entry();
        self.attempts = self.attempts.saturating_add(1);
        if entry.matches(&self.problem) {
            self.score = self.score.saturating_add(1);
            self.state = RoundState::CorrectShown(entry);
            SubmitOutcome::Correct
        } else {
            self.state = RoundState::IncorrectShown(entry);
            SubmitOutcome::Incorrect
        }
    }

    /// Dismiss "incorrect" feedback and retry the same problem.
    pub fn acknowledge(&mut self) -> bool {
        if !matches!(self.state, RoundState::IncorrectShown(_)) {
            return false;
        }
        let entry = self.take_entry();
        self.state = RoundState::Entering(entry);
        true
    }

    /// After a correct answer, move on to a new problem at the same level.
    ///
    /// Returns `None` without drawing when no correct answer is showing.
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        generator: &ProblemGenerator,
        rng: &mut R,
    ) -> Option<Generation> {
        if !matches!(self.state, RoundState::CorrectShown(_)) {
            return None;
        }
        let generation = generator.generate_for(self.level, rng);
        self.replace_problem(generation.problem);
        Some(generation)
    }

    /// Swap in a new problem and reset the answer, keeping the score.
    pub fn replace_problem(&mut self, problem: Problem) {
        self.problem = problem;
        self.attempts = 0;
        self.state = RoundState::Entering(AnswerEntry::new(self.level.accepts_remainder()));
    }

    fn take_entry(&mut self) -> AnswerEntry {
        let placeholder = RoundState::Entering(AnswerEntry::default());
        match mem::replace(&mut self.state, placeholder) {
            RoundState::Entering(entry)
            | RoundState::CorrectShown(entry)
            | RoundState::IncorrectShown(entry) => entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Origin, ScriptedSource};

    fn session(level: u8, dividend: u32, divisor: u32) -> DrillSession {
        DrillSession::with_problem(
            Level::new(level, Variant::Standard).unwrap(),
            Problem::new(dividend, divisor).unwrap(),
        )
    }

    #[test]
    fn correct_answer_scores_once() {
        let mut drill = session(1, 28, 4);
        drill.press_digit(7);
        assert_eq!(drill.submit(), SubmitOutcome::Correct);
        assert_eq!(drill.feedback(), Feedback::Correct);
        assert_eq!(drill.score(), 1);
        // Feedback is showing, so a second submit is ignored.
        assert_eq!(drill.submit(), SubmitOutcome::Ignored);
        assert_eq!(drill.score(), 1);
    }

    #[test]
    fn submit_requires_quotient_digits() {
        let mut drill = session(3, 50, 7);
        drill.focus(Field::Remainder);
        drill.press_digit(1);
        assert!(!drill.can_submit());
        assert_eq!(drill.submit(), SubmitOutcome::Ignored);
        assert_eq!(drill.feedback(), Feedback::None);
    }

    #[test]
    fn wrong_remainder_is_incorrect_and_retryable() {
        let mut drill = session(3, 50, 7);
        drill.press_digit(7);
        drill.focus(Field::Remainder);
        drill.press_digit(0);
        assert_eq!(drill.submit(), SubmitOutcome::Incorrect);
        assert_eq!(drill.score(), 0);

        // Keypad is locked while feedback is showing.
        assert!(!drill.press_digit(5));
        assert!(drill.acknowledge());
        assert_eq!(drill.problem(), &Problem::new(50, 7).unwrap());
        assert_eq!(drill.entry().remainder_text(), "0");

        drill.backspace();
        drill.press_digit(1);
        assert_eq!(drill.submit(), SubmitOutcome::Correct);
        assert_eq!(drill.score(), 1);
        assert_eq!(drill.attempts(), 2);
    }

    #[test]
    fn advance_only_after_correct() {
        let generator = ProblemGenerator::new();
        let mut rng = ScriptedSource::new([3, 6]);
        let mut drill = session(1, 28, 4);
        assert_eq!(drill.advance(&generator, &mut rng), None);
        assert_eq!(rng.remaining(), 2);

        drill.press_digit(7);
        drill.submit();
        let generation = drill.advance(&generator, &mut rng).unwrap();
        assert_eq!(generation.attempts, 1);
        assert_eq!(drill.problem(), &Problem::new(18, 3).unwrap());
        assert_eq!(drill.feedback(), Feedback::None);
        assert_eq!(drill.entry().quotient_text(), "");
        assert_eq!(drill.entry().focused(), Field::Quotient);
        assert_eq!(drill.score(), 1);
        assert_eq!(drill.attempts(), 0);
    }

    #[test]
    fn acknowledge_is_a_no_op_without_incorrect_feedback() {
        let mut drill = session(1, 28, 4);
        assert!(!drill.acknowledge());
        drill.press_digit(7);
        drill.submit();
        assert!(!drill.acknowledge());
        assert_eq!(drill.feedback(), Feedback::Correct);
    }

    #[test]
    fn clear_resets_both_fields() {
        let mut drill = session(4, 100, 3);
        drill.press_digit(3);
        drill.focus(Field::Remainder);
        drill.press_digit(1);
        drill.clear_entry();
        assert_eq!(drill.entry().quotient_text(), "");
        assert_eq!(drill.entry().remainder_text(), "");
    }

    #[test]
    fn unknown_levels_keep_serving_the_default_problem() {
        let generator = ProblemGenerator::new();
        let mut rng = ScriptedSource::new([3, 6]);
        let (mut drill, generation) = DrillSession::start(
            LevelChoice::resolve(9, Variant::Standard),
            &generator,
            &mut rng,
        );
        assert_eq!(generation.origin, Origin::UnknownLevel);
        assert_eq!(drill.level(), LevelChoice::Unknown(9));
        assert_eq!(drill.problem(), &Problem::default_problem());
        assert!(!drill.entry().remainder_enabled());

        drill.press_digit(5);
        assert_eq!(drill.submit(), SubmitOutcome::Correct);
        assert!(drill.advance(&generator, &mut rng).is_some());
        assert_eq!(drill.problem(), &Problem::default_problem());
        assert_eq!(rng.remaining(), 2);
    }

    #[test]
    fn exact_levels_hide_the_remainder_field() {
        let mut drill = session(2, 24, 2);
        assert!(!drill.entry().remainder_enabled());
        assert!(!drill.focus(Field::Remainder));
    }
}
