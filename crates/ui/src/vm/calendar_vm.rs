use chrono::Datelike;
use drill_core::model::DailyProgress;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarCellVm {
    Blank,
    Day {
        day: u32,
        count: u32,
        stamped: bool,
        is_today: bool,
    },
}

impl CalendarCellVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            CalendarCellVm::Blank => "cal-cell blank",
            CalendarCellVm::Day {
                stamped: true,
                is_today: true,
                ..
            } => "cal-cell stamped today",
            CalendarCellVm::Day { stamped: true, .. } => "cal-cell stamped",
            CalendarCellVm::Day { is_today: true, .. } => "cal-cell today",
            CalendarCellVm::Day { .. } => "cal-cell",
        }
    }
}

/// Stamp calendar for the month containing today.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarVm {
    pub title: String,
    /// Whole weeks, padded with blanks on both ends.
    pub cells: Vec<CalendarCellVm>,
    pub today_label: String,
    pub goal_met_today: bool,
    pub remaining_label: Option<String>,
    pub streak_label: String,
    pub stamps_label: String,
}

#[must_use]
pub fn map_calendar(progress: &DailyProgress) -> CalendarVm {
    let month = progress.current_month();
    let title = progress.today().date().format("%B %Y").to_string();

    let mut cells = Vec::with_capacity(42);
    for _ in 0..month.leading_blanks {
        cells.push(CalendarCellVm::Blank);
    }
    for day in &month.days {
        cells.push(CalendarCellVm::Day {
            day: day.day.date().day(),
            count: day.count,
            stamped: day.stamped,
            is_today: day.is_today,
        });
    }
    while cells.len() % WEEKDAY_HEADERS.len() != 0 {
        cells.push(CalendarCellVm::Blank);
    }

    let remaining = progress.remaining_today();
    let streak = progress.current_streak();
    CalendarVm {
        title,
        cells,
        today_label: format!(
            "Today: {} / {}",
            progress.today_count(),
            progress.daily_goal()
        ),
        goal_met_today: progress.goal_met_today(),
        remaining_label: (remaining > 0).then(|| format!("{remaining} more to get today's stamp")),
        streak_label: if streak == 1 {
            "Streak: 1 day".to_string()
        } else {
            format!("Streak: {streak} days")
        },
        stamps_label: format!("Stamps this month: {}", month.stamped_days()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drill_core::model::DayKey;

    fn day(m: u32, d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2023, m, d).unwrap())
    }

    #[test]
    fn pads_the_grid_to_whole_weeks() {
        // 2023-11-01 is a Wednesday.
        let progress = DailyProgress::new([], day(11, 14), 10);
        let vm = map_calendar(&progress);
        assert_eq!(vm.title, "November 2023");
        assert_eq!(vm.cells.len(), 35);
        assert!(vm.cells[..3].iter().all(|cell| *cell == CalendarCellVm::Blank));
        assert_eq!(
            vm.cells[3],
            CalendarCellVm::Day {
                day: 1,
                count: 0,
                stamped: false,
                is_today: false
            }
        );
        assert_eq!(vm.cells.last(), Some(&CalendarCellVm::Blank));
    }

    #[test]
    fn labels_follow_progress() {
        let progress = DailyProgress::new(
            [(day(11, 12), 10), (day(11, 13), 11), (day(11, 14), 4)],
            day(11, 14),
            10,
        );
        let vm = map_calendar(&progress);
        assert_eq!(vm.today_label, "Today: 4 / 10");
        assert!(!vm.goal_met_today);
        assert_eq!(vm.remaining_label.as_deref(), Some("6 more to get today's stamp"));
        assert_eq!(vm.streak_label, "Streak: 2 days");
        assert_eq!(vm.stamps_label, "Stamps this month: 2");

        let today = vm
            .cells
            .iter()
            .find(|cell| matches!(cell, CalendarCellVm::Day { is_today: true, .. }))
            .unwrap();
        assert_eq!(today.class(), "cal-cell today");
    }

    #[test]
    fn goal_met_today_drops_the_reminder() {
        let progress = DailyProgress::new([(day(11, 14), 3)], day(11, 14), 3);
        let vm = map_calendar(&progress);
        assert!(vm.goal_met_today);
        assert_eq!(vm.remaining_label, None);
        assert_eq!(vm.streak_label, "Streak: 1 day");
    }
}
