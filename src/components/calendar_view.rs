//! Calendar Component
//!
//! Month grid with per-day indicators and the task list of the selected
//! day.

use chrono::{Datelike, Days, NaiveDate};
use leptos::prelude::*;

use taskirra_core::calendar::{tasks_for_date, DaySummary, MonthSummary};
use taskirra_core::clock::{Clock, SystemClock};
use taskirra_core::dates::{add_months_overflowing, format_date, month_bounds};
use taskirra_core::Task;

use crate::commands::use_commands;
use crate::context::{use_app_context, FormMode};
use crate::store::{use_app_store, AppStateStoreFields};

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Cells of a Sunday-first month grid; `None` pads before the 1st and after the last day
fn month_grid(any_day: NaiveDate) -> Vec<Option<NaiveDate>> {
    let Some((first, last)) = month_bounds(any_day) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(first.iter_days().take_while(|d| *d <= last).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

fn previous_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_sub_days(Days::new(1))
        .and_then(|d| d.with_day(1))
        .unwrap_or(first)
}

fn next_month(first: NaiveDate) -> NaiveDate {
    add_months_overflowing(first, 1).unwrap_or(first)
}

#[component]
pub fn CalendarView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let commands = use_commands();

    let today = SystemClock.today();
    let first_of = |d: NaiveDate| d.with_day(1).unwrap_or(d);
    let month = RwSignal::new(first_of(today));
    let selected = RwSignal::new(today);

    let summary = Memo::new(move |_| MonthSummary::compute(&store.tasks().read(), month.get(), SystemClock.today()));
    let day_tasks = Memo::new(move |_| {
        tasks_for_date(&store.tasks().read(), selected.get())
            .into_iter()
            .cloned()
            .collect::<Vec<Task>>()
    });

    let day_cell = move |cell: Option<NaiveDate>| {
        let Some(date) = cell else {
            return view! { <div class="calendar-day empty"></div> }.into_any();
        };
        let info = move || DaySummary::compute(&store.tasks().read(), date, SystemClock.today());
        let class = move || {
            let s = info();
            let mut class = String::from("calendar-day");
            if date == SystemClock.today() {
                class.push_str(" today");
            }
            if selected.get() == date {
                class.push_str(" selected");
            }
            if s.has_overdue {
                class.push_str(" has-overdue");
            } else if s.all_done() {
                class.push_str(" all-done");
            }
            class
        };
        view! {
            <div class=class on:click=move |_| selected.set(date)>
                <div class="calendar-day-number">{date.day()}</div>
                {move || {
                    let s = info();
                    (s.total > 0).then(|| view! {
                        <div class="calendar-day-indicators">
                            <span class="badge bg-primary">{s.total}</span>
                            {(s.high_priority_pending > 0).then(|| view! {
                                <span class="badge bg-danger" title="High priority">{s.high_priority_pending}</span>
                            })}
                            {(s.completed > 0).then(|| view! {
                                <span class="badge bg-success" title="Completed">{s.completed}</span>
                            })}
                        </div>
                    })
                }}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="calendar-view">
            <div class="view-header d-flex justify-content-between align-items-center mb-3">
                <h2 class="view-title mb-0">{move || month.get().format("%B %Y").to_string()}</h2>
                <div class="btn-group">
                    <button class="btn btn-outline-secondary" aria-label="Previous month" on:click=move |_| month.update(|m| *m = previous_month(*m))>
                        <i class="bi bi-chevron-left"></i>
                    </button>
                    <button class="btn btn-outline-secondary" on:click=move |_| {
                        let today = SystemClock.today();
                        month.set(first_of(today));
                        selected.set(today);
                    }>"Today"</button>
                    <button class="btn btn-outline-secondary" aria-label="Next month" on:click=move |_| month.update(|m| *m = next_month(*m))>
                        <i class="bi bi-chevron-right"></i>
                    </button>
                </div>
            </div>

            <div class="calendar-summary d-flex gap-3 mb-3 text-muted">
                <span>{move || format!("{} tasks", summary.get().total)}</span>
                <span class="text-success">{move || format!("{} completed", summary.get().completed)}</span>
                <span class="text-warning">{move || format!("{} pending", summary.get().pending)}</span>
                <span class="text-danger">{move || format!("{} overdue", summary.get().overdue)}</span>
            </div>

            <div class="calendar-grid">
                {WEEKDAY_HEADERS.iter().map(|d| view! { <div class="calendar-weekday">{*d}</div> }).collect_view()}
                {move || month_grid(month.get()).into_iter().map(day_cell).collect_view()}
            </div>

            <div class="calendar-day-tasks mt-4">
                <h5>{move || format!("Tasks for {}", format_date(selected.get()))}</h5>
                <Show
                    when=move || !day_tasks.read().is_empty()
                    fallback=|| view! { <p class="text-muted">"No tasks due on this day"</p> }
                >
                    <ul class="list-group">
                        <For
                            each=move || day_tasks.get()
                            key=|t| (t.id.clone(), t.updated_at, t.status)
                            children=move |task| {
                                let id_toggle = task.id.clone();
                                let id_edit = task.id.clone();
                                let id_delete = task.id.clone();
                                let done = task.is_done();
                                view! {
                                    <li class="list-group-item d-flex align-items-center gap-2">
                                        <input
                                            type="checkbox"
                                            class="form-check-input"
                                            prop:checked=done
                                            on:change=move |_| commands.toggle_complete(&id_toggle)
                                        />
                                        <span class=if done { "flex-grow-1 text-decoration-line-through text-muted" } else { "flex-grow-1" }>
                                            {task.title.clone()}
                                        </span>
                                        <span class=format!("badge priority-badge priority-{}", task.priority.as_str())>{task.priority.label()}</span>
                                        <button class="btn btn-sm btn-link" aria-label="Edit task" on:click=move |_| ctx.open_form(FormMode::Edit(id_edit.clone()))>
                                            <i class="bi bi-pencil"></i>
                                        </button>
                                        <button class="btn btn-sm btn-link text-danger" aria-label="Delete task" on:click=move |_| commands.delete_task(&id_delete)>
                                            <i class="bi bi-trash"></i>
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>
        </div>
    }
}
