//! Task List Component
//!
//! The tasks tab: heading, quick summary, filter progress, bulk actions and
//! the filtered list itself.

use leptos::prelude::*;

use taskirra_core::analytics::{progress_percent, DashboardStats};
use taskirra_core::clock::{Clock, SystemClock};
use taskirra_core::{FilterBucket, Task, TaskFilter};

use crate::commands::use_commands;
use crate::components::TaskItem;
use crate::context::{use_app_context, FormMode};
use crate::store::{use_app_store, AppStateStoreFields};

fn bucket_title(bucket: FilterBucket) -> &'static str {
    match bucket {
        FilterBucket::All => "All Tasks",
        FilterBucket::Today => "Today's Tasks",
        FilterBucket::Week => "This Week",
        FilterBucket::Overdue => "Overdue Tasks",
        FilterBucket::Important => "Important Tasks",
        FilterBucket::Completed => "Completed Tasks",
    }
}

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let commands = use_commands();

    let filtered = Memo::new(move |_| {
        let filter = ctx.filter.get();
        filter.apply_cloned(&store.tasks().read(), SystemClock.today())
    });
    let stats = Memo::new(move |_| DashboardStats::compute(&store.tasks().read(), SystemClock.today()));
    let has_tasks = move || !store.tasks().read().is_empty();

    let subtitle = move || {
        let count = filtered.read().len();
        let noun = if count == 1 { "task" } else { "tasks" };
        let query = ctx.filter.read().query.clone();
        if query.trim().is_empty() {
            format!("{} {}", count, noun)
        } else {
            format!("{} {} matching \"{}\"", count, noun, query)
        }
    };

    let all_selected = move || {
        let selected = ctx.selected.read();
        let shown = filtered.read();
        !shown.is_empty() && shown.iter().all(|t| selected.contains(&t.id))
    };

    let toggle_all = move |_: web_sys::Event| {
        if all_selected() {
            ctx.clear_selection();
        } else {
            ctx.selected.set(filtered.get_untracked().into_iter().map(|t| t.id).collect());
        }
    };

    // (task, previous id, next id) within the visible list
    let rows = move || {
        let tasks: Vec<Task> = filtered.get();
        let ids: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
        tasks
            .into_iter()
            .enumerate()
            .map(|(i, task)| {
                let prev = i.checked_sub(1).map(|p| ids[p].clone());
                let next = ids.get(i + 1).cloned();
                (task, prev, next)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="tab-content">
            <div class="task-header">
                <div>
                    <h2 class="fw-bold">{move || bucket_title(ctx.filter.read().bucket)}</h2>
                    <p class="text-muted">{subtitle}</p>
                </div>
                <button class="btn btn-primary" on:click=move |_| ctx.open_form(FormMode::New)>
                    <i class="bi bi-plus-lg me-1"></i>" New Task"
                </button>
            </div>

            <Show when=has_tasks>
                <div class="alert alert-light border quick-summary" role="alert">
                    <span class="fw-semibold">
                        <i class="bi bi-info-circle-fill text-primary me-2"></i>"Quick Summary"
                    </span>
                    <span><i class="bi bi-clock text-warning me-1"></i><strong>{move || stats.get().today}</strong>" due today"</span>
                    <span><i class="bi bi-exclamation-triangle text-danger me-1"></i><strong>{move || stats.get().overdue}</strong>" overdue"</span>
                    <span><i class="bi bi-star-fill text-warning me-1"></i><strong>{move || stats.get().high_priority}</strong>" high priority"</span>
                </div>

                <div class="filter-progress">
                    <div class="progress">
                        <div class="progress-bar" style:width=move || format!("{}%", progress_percent(filtered.read().iter()))></div>
                    </div>
                    <small class="text-muted">{move || format!("{}% complete", progress_percent(filtered.read().iter()))}</small>
                </div>
            </Show>

            <Show when=move || !filtered.read().is_empty()>
                <div class="bulk-bar">
                    <div class="form-check">
                        <input class="form-check-input" type="checkbox" id="selectAll" prop:checked=all_selected on:change=toggle_all />
                        <label class="form-check-label" for="selectAll">
                            {move || format!("Select All ({} selected)", ctx.selected.read().len())}
                        </label>
                    </div>
                    <Show when=move || !ctx.selected.read().is_empty()>
                        <div class="bulk-actions">
                            <button class="btn btn-sm btn-success" on:click=move |_| commands.complete_selected()>
                                <i class="bi bi-check-all me-1"></i>"Complete"
                            </button>
                            <button class="btn btn-sm btn-danger" on:click=move |_| commands.delete_selected()>
                                <i class="bi bi-trash me-1"></i>"Delete"
                            </button>
                            <button class="btn btn-sm btn-outline-secondary" on:click=move |_| ctx.clear_selection()>
                                "Clear"
                            </button>
                        </div>
                    </Show>
                </div>
            </Show>

            {move || {
                if !filtered.read().is_empty() {
                    view! {
                        <div class="task-list">
                            <For
                                each=rows
                                key=|(task, prev, next)| {
                                    // Every mutation bumps updated_at, so it stands in for the content
                                    (task.id.clone(), task.updated_at, task.order, task.status, prev.clone(), next.clone())
                                }
                                children=move |(task, prev, next)| view! {
                                    <TaskItem task=task prev_id=prev next_id=next />
                                }
                            />
                        </div>
                    }.into_any()
                } else if has_tasks() {
                    view! {
                        <div class="empty-state">
                            <div class="empty-state-icon"><i class="bi bi-search"></i></div>
                            <h3 class="empty-state-title">"No tasks found"</h3>
                            <p class="empty-state-description">"No tasks match your current filters"</p>
                            <button class="btn btn-outline-primary" on:click=move |_| ctx.filter.set(TaskFilter::default())>
                                <i class="bi bi-x-circle me-2"></i>"Clear Filters"
                            </button>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="empty-state">
                            <div class="empty-state-icon"><i class="bi bi-clipboard-check"></i></div>
                            <h3 class="empty-state-title">"No tasks yet"</h3>
                            <p class="empty-state-description">"Create your first task to get started and stay organized"</p>
                            <div class="empty-state-action">
                                <button class="btn btn-primary btn-lg me-2" on:click=move |_| ctx.open_form(FormMode::New)>
                                    <i class="bi bi-plus-lg me-2"></i>"Create Your First Task"
                                </button>
                                <button class="btn btn-outline-primary btn-lg" on:click=move |_| commands.load_demo_data()>
                                    <i class="bi bi-box-seam me-2"></i>"Load Demo Data"
                                </button>
                            </div>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
