//! Task Item Component
//!
//! One row of the task list: selection box, completion box, title, meta
//! badges and the row actions.

use leptos::prelude::*;

use taskirra_core::clock::{Clock, SystemClock};
use taskirra_core::dates::format_date;
use taskirra_core::{Priority, Status, Task};

use crate::commands::use_commands;
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, FormMode};
use crate::store::{use_app_store, AppStateStoreFields};

fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "danger",
        Priority::Medium => "warning",
        Priority::Low => "secondary",
    }
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Todo => "bi bi-circle",
        Status::InProgress => "bi bi-arrow-repeat",
        Status::Done => "bi bi-check-circle-fill",
    }
}

/// Task row; `prev_id`/`next_id` are the neighbours used by the move buttons
#[component]
pub fn TaskItem(
    task: Task,
    prev_id: Option<String>,
    next_id: Option<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let commands = use_commands();

    let id = task.id.clone();
    let is_done = task.is_done();
    let overdue = task.is_overdue(SystemClock.today());
    let (sub_done, sub_total) = task.subtask_progress();
    let sub_percent = task.subtask_percent();

    let project_id = task.project_id.clone();
    let project = move || {
        let pid = project_id.as_deref()?;
        store
            .projects()
            .read()
            .iter()
            .find(|p| p.id == pid)
            .map(|p| (p.name.clone(), p.color.clone()))
    };

    let is_selected = {
        let id = id.clone();
        move || ctx.selected.read().iter().any(|s| s == &id)
    };

    let row_class = format!(
        "task-item hover-lift priority-{} status-{}{}",
        task.priority.as_str(),
        task.status.as_str(),
        if overdue { " overdue" } else { "" }
    );

    let id_select = id.clone();
    let id_toggle = id.clone();
    let id_edit = id.clone();
    let id_delete = id.clone();

    view! {
        <div class=row_class>
            <div class="task-row">
                <div class="task-move">
                    {prev_id.map(|target| {
                        let id = id.clone();
                        view! {
                            <button class="move-btn" title="Move up" on:click=move |_| commands.move_task(&id, &target)>
                                <i class="bi bi-chevron-up"></i>
                            </button>
                        }
                    })}
                    {next_id.map(|target| {
                        let id = id.clone();
                        view! {
                            <button class="move-btn" title="Move down" on:click=move |_| commands.move_task(&id, &target)>
                                <i class="bi bi-chevron-down"></i>
                            </button>
                        }
                    })}
                </div>

                <div class="form-check">
                    <input
                        class="form-check-input"
                        type="checkbox"
                        title="Select"
                        prop:checked=is_selected
                        on:change=move |_| ctx.toggle_selected(&id_select)
                    />
                </div>

                <div class="form-check">
                    <input
                        class="form-check-input task-checkbox"
                        type="checkbox"
                        title="Complete"
                        prop:checked=is_done
                        on:change=move |_| commands.toggle_complete(&id_toggle)
                    />
                </div>

                <div class="task-content">
                    <h5 class={if is_done { "task-title text-decoration-line-through text-muted" } else { "task-title" }}>
                        <i class=status_icon(task.status)></i>
                        " "
                        {task.title.clone()}
                    </h5>

                    {task.description.clone().map(|d| view! { <p class="text-muted small">{d}</p> })}

                    {(sub_total > 0).then(|| view! {
                        <div class="subtask-progress">
                            <small class="text-muted">
                                <i class="bi bi-list-check me-1"></i>
                                {format!("Subtasks {}/{}", sub_done, sub_total)}
                            </small>
                            <div class="progress">
                                <div class="progress-bar" style:width={format!("{}%", sub_percent)}></div>
                            </div>
                        </div>
                    })}

                    <div class="task-meta">
                        <span class={format!("badge bg-{}", priority_color(task.priority))}>
                            {task.priority.as_str()}
                        </span>
                        {task.due_date.map(|due| view! {
                            <span class={if overdue { "task-due text-danger" } else { "task-due" }}>
                                <i class="bi bi-calendar3 me-1"></i>
                                {format_date(due)}
                                {overdue.then_some(" (Overdue)")}
                            </span>
                        })}
                        {task.recurring.as_ref().map(|rule| view! {
                            <span class="task-recurring" title="Recurring">
                                <i class="bi bi-arrow-repeat me-1"></i>
                                {rule.freq.as_str()}
                            </span>
                        })}
                        {move || project().map(|(name, color)| view! {
                            <span class="task-project">
                                <span class="project-dot" style:background-color=color></span>
                                {name}
                            </span>
                        })}
                        {task.tags.iter().map(|tag| view! { <span class="task-tag">"#" {tag.clone()}</span> }).collect_view()}
                    </div>
                </div>

                <div class="task-actions">
                    <button class="btn btn-sm btn-link" title="Edit" on:click=move |_| ctx.open_form(FormMode::Edit(id_edit.clone()))>
                        <i class="bi bi-pencil"></i>
                    </button>
                    <DeleteConfirmButton
                        button_class="btn btn-sm btn-link text-danger"
                        title="Delete task"
                        on_confirm=move |_| commands.delete_task(&id_delete)
                    />
                </div>
            </div>
        </div>
    }
}
