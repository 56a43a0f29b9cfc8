mod calendar_vm;
mod game_vm;
mod level_vm;

pub use calendar_vm::{CalendarCellVm, CalendarVm, WEEKDAY_HEADERS, map_calendar};
pub use game_vm::{
    FEEDBACK_CORRECT, FEEDBACK_INCORRECT, GameIntent, GameVm, KEYPAD_DIGITS, KeypadKey,
    apply_local_intent, intent_from_keyboard, map_game,
};
pub use level_vm::{LevelCardVm, map_level_cards};
