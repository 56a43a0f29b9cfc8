use dioxus::prelude::*;

use crate::vm::{CalendarCellVm, CalendarVm, WEEKDAY_HEADERS};

#[component]
pub fn StampCalendar(vm: CalendarVm) -> Element {
    let today_class = if vm.goal_met_today {
        "cal-today goal-met"
    } else {
        "cal-today"
    };
    rsx! {
        section { class: "stamp-calendar",
            header { class: "cal-header",
                h3 { "{vm.title}" }
                span { class: "cal-streak", "{vm.streak_label}" }
            }
            div { class: today_class,
                span { "{vm.today_label}" }
                if let Some(remaining) = vm.remaining_label.as_ref() {
                    span { class: "cal-remaining", "{remaining}" }
                }
            }
            div { class: "cal-grid",
                for name in WEEKDAY_HEADERS {
                    span { class: "cal-weekday", "{name}" }
                }
                for (idx, cell) in vm.cells.iter().enumerate() {
                    CalendarCell { key: "{idx}", cell: cell.clone() }
                }
            }
            p { class: "cal-stamps", "{vm.stamps_label}" }
        }
    }
}

#[component]
fn CalendarCell(cell: CalendarCellVm) -> Element {
    let class = cell.class();
    match cell {
        CalendarCellVm::Blank => rsx! { span { class } },
        CalendarCellVm::Day {
            day,
            count,
            stamped,
            ..
        } => rsx! {
            span { class, title: "{count}",
                span { class: "cal-day", "{day}" }
                if stamped {
                    span { class: "cal-stamp", "⭐" }
                }
            }
        },
    }
}
