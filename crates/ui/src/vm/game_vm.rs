use drill_core::model::{DrillSession, Feedback, Field, LevelChoice};

pub const FEEDBACK_CORRECT: &str = "Correct! 🎉";
pub const FEEDBACK_INCORRECT: &str = "Not quite... 😢";

/// Keypad digits in on-screen order.
pub const KEYPAD_DIGITS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(u8),
    Backspace,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameIntent {
    Key(KeypadKey),
    Focus(Field),
    Submit,
    Next,
    Retry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameVm {
    pub level_title: String,
    pub level_label: &'static str,
    pub dividend: u32,
    pub divisor: u32,
    pub operator: char,
    pub quotient_text: String,
    pub remainder_text: String,
    pub show_remainder: bool,
    pub focused: Field,
    pub feedback: Feedback,
    pub can_submit: bool,
    pub score: u32,
}

impl GameVm {
    #[must_use]
    pub fn keypad_locked(&self) -> bool {
        self.feedback != Feedback::None
    }

    #[must_use]
    pub fn answer_box_class(&self, field: Field) -> &'static str {
        match (field, self.focused == field && !self.keypad_locked()) {
            (Field::Quotient, true) => "answer-box quotient focused",
            (Field::Quotient, false) => "answer-box quotient",
            (Field::Remainder, true) => "answer-box remainder focused",
            (Field::Remainder, false) => "answer-box remainder",
        }
    }
}

#[must_use]
pub fn map_game(session: &DrillSession) -> GameVm {
    let entry = session.entry();
    let problem = session.problem();
    let level_label = match session.level() {
        LevelChoice::Known(level) => level.label(),
        LevelChoice::Unknown(_) => "Practice",
    };
    GameVm {
        level_title: format!("Lv.{}", session.level().number()),
        level_label,
        dividend: problem.dividend(),
        divisor: problem.divisor(),
        operator: problem.operator(),
        quotient_text: entry.quotient_text().to_string(),
        remainder_text: entry.remainder_text().to_string(),
        show_remainder: entry.remainder_enabled(),
        focused: entry.focused(),
        feedback: session.feedback(),
        can_submit: session.can_submit(),
        score: session.score(),
    }
}

/// Map a keyboard key name to an intent. Enter follows the visible button.
#[must_use]
pub fn intent_from_keyboard(key: &str, feedback: Feedback) -> Option<GameIntent> {
    match key {
        "Enter" => Some(match feedback {
            Feedback::None => GameIntent::Submit,
            Feedback::Correct => GameIntent::Next,
            Feedback::Incorrect => GameIntent::Retry,
        }),
        "Backspace" => Some(GameIntent::Key(KeypadKey::Backspace)),
        "Delete" => Some(GameIntent::Key(KeypadKey::Clear)),
        "ArrowLeft" => Some(GameIntent::Focus(Field::Quotient)),
        "ArrowRight" => Some(GameIntent::Focus(Field::Remainder)),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => ch
                    .to_digit(10)
                    .and_then(|digit| u8::try_from(digit).ok())
                    .map(|digit| GameIntent::Key(KeypadKey::Digit(digit))),
                _ => None,
            }
        }
    }
}

/// Apply the intents that only touch the typed answer.
///
/// Returns `false` for intents that need the drill service.
pub fn apply_local_intent(session: &mut DrillSession, intent: GameIntent) -> bool {
    match intent {
        GameIntent::Key(KeypadKey::Digit(digit)) => session.press_digit(digit),
        GameIntent::Key(KeypadKey::Backspace) => session.backspace(),
        GameIntent::Key(KeypadKey::Clear) => {
            session.clear_entry();
            true
        }
        GameIntent::Focus(field) => session.focus(field),
        GameIntent::Retry => session.acknowledge(),
        GameIntent::Submit | GameIntent::Next => false,
    }
}
