//! Task Form Component
//!
//! Modal for creating and editing tasks. The form keeps its own field
//! signals and builds a `TaskDraft` on submit; validation happens in the
//! core store and its message is shown under the title field.

use chrono::NaiveDate;
use leptos::prelude::*;

use taskirra_core::domain::{parse_tags, MAX_TITLE_LEN};
use taskirra_core::projects::active_projects;
use taskirra_core::{Frequency, Priority, Recurring, Status, Task, TaskDraft};

use crate::commands::use_commands;
use crate::components::SubtaskList;
use crate::context::{use_app_context, FormMode};
use crate::store::{use_app_store, AppStateStoreFields};

/// Form field values as the inputs hold them
#[derive(Debug, Clone, Default)]
struct FormFields {
    title: String,
    description: String,
    due_date: String,
    priority: String,
    status: String,
    tags: String,
    project_id: String,
    freq: String,
    interval: String,
}

impl FormFields {
    fn blank() -> Self {
        Self {
            priority: Priority::default().as_str().to_string(),
            status: Status::default().as_str().to_string(),
            interval: "1".to_string(),
            ..Default::default()
        }
    }

    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            priority: task.priority.as_str().to_string(),
            status: task.status.as_str().to_string(),
            tags: task.tags.join(", "),
            project_id: task.project_id.clone().unwrap_or_default(),
            freq: task.recurring.as_ref().map(|r| r.freq.as_str().to_string()).unwrap_or_default(),
            interval: task
                .recurring
                .as_ref()
                .map(|r| r.interval.to_string())
                .unwrap_or_else(|| "1".to_string()),
        }
    }

    fn to_draft(&self) -> TaskDraft {
        let recurring = self.freq.parse::<Frequency>().ok().map(|freq| {
            Recurring::new(freq, self.interval.trim().parse().unwrap_or(1))
        });
        TaskDraft {
            title: self.title.trim().to_string(),
            description: Some(self.description.trim().to_string()).filter(|d| !d.is_empty()),
            priority: self.priority.parse().unwrap_or_default(),
            status: self.status.parse().unwrap_or_default(),
            due_date: NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").ok(),
            tags: parse_tags(&self.tags),
            project_id: Some(self.project_id.clone()).filter(|p| !p.is_empty()),
            subtasks: Vec::new(),
            recurring,
        }
    }
}

#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let commands = use_commands();

    let fields = RwSignal::new(FormFields::blank());
    let (error, set_error) = signal::<Option<String>>(None);
    let projects = Memo::new(move |_| active_projects(&store.projects().read()));

    // Reset the fields whenever the form opens
    Effect::new(move |_| {
        let mode = ctx.form.get();
        let next = match &mode {
            Some(FormMode::Edit(id)) => store
                .tasks()
                .read_untracked()
                .iter()
                .find(|t| &t.id == id)
                .map(FormFields::from_task)
                .unwrap_or_else(FormFields::blank),
            _ => FormFields::blank(),
        };
        fields.set(next);
        set_error.set(None);
    });

    let editing_id = move || match ctx.form.get() {
        Some(FormMode::Edit(id)) => Some(id),
        _ => None,
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let editing = editing_id();
        let mut draft = fields.get_untracked().to_draft();
        if let Some(id) = &editing {
            // Subtasks were saved as they were edited
            draft.subtasks = store
                .tasks()
                .read_untracked()
                .iter()
                .find(|t| &t.id == id)
                .map(|t| t.subtasks.clone())
                .unwrap_or_default();
        }
        match commands.save_task(editing, draft) {
            Ok(()) => set_error.set(None),
            Err(message) => set_error.set(Some(message)),
        }
    };

    // Two-way binding helpers for the plain text/select fields
    let bind = move |get: fn(&FormFields) -> &String, set: fn(&mut FormFields, String)| {
        (
            move || get(&fields.read()).clone(),
            move |ev: web_sys::Event| {
                let value = event_target_value(&ev);
                fields.update(|f| set(f, value));
            },
        )
    };

    let (title, on_title) = bind(|f| &f.title, |f, v| f.title = v);
    let (description, on_description) = bind(|f| &f.description, |f, v| f.description = v);
    let (due_date, on_due_date) = bind(|f| &f.due_date, |f, v| f.due_date = v);
    let (priority, on_priority) = bind(|f| &f.priority, |f, v| f.priority = v);
    let (status, on_status) = bind(|f| &f.status, |f, v| f.status = v);
    let (tags, on_tags) = bind(|f| &f.tags, |f, v| f.tags = v);
    let (project_id, on_project_id) = bind(|f| &f.project_id, |f, v| f.project_id = v);
    let (freq, on_freq) = bind(|f| &f.freq, |f, v| f.freq = v);
    let (interval, on_interval) = bind(|f| &f.interval, |f, v| f.interval = v);

    view! {
        <Show when=move || ctx.form.read().is_some()>
            <div class="modal fade show d-block" tabindex="-1" on:click=move |ev| {
                // Backdrop click closes
                if ev.target() == ev.current_target() {
                    ctx.close_form();
                }
            }>
                <div class="modal-dialog modal-dialog-centered modal-lg">
                    <form class="modal-content" on:submit=on_submit>
                        <div class="modal-header">
                            <h5 class="modal-title">
                                {move || if editing_id().is_some() {
                                    view! { <i class="bi bi-pencil-fill me-2"></i>"Edit Task" }.into_any()
                                } else {
                                    view! { <i class="bi bi-plus-circle-fill me-2"></i>"New Task" }.into_any()
                                }}
                            </h5>
                            <button type="button" class="btn-close" aria-label="Close" on:click=move |_| ctx.close_form()></button>
                        </div>

                        <div class="modal-body">
                            <div class="mb-3">
                                <label class="form-label">"Title"</label>
                                <input
                                    type="text"
                                    class=move || if error.get().is_some() { "form-control is-invalid" } else { "form-control" }
                                    maxlength=MAX_TITLE_LEN.to_string()
                                    prop:value=title
                                    on:input=move |ev| {
                                        set_error.set(None);
                                        on_title(ev);
                                    }
                                />
                                {move || error.get().map(|e| view! { <div class="invalid-feedback">{e}</div> })}
                            </div>

                            <div class="mb-3">
                                <label class="form-label">"Description"</label>
                                <textarea class="form-control" rows="3" prop:value=description on:input=on_description></textarea>
                            </div>

                            <div class="row">
                                <div class="col mb-3">
                                    <label class="form-label">"Due Date"</label>
                                    <input type="date" class="form-control" prop:value=due_date on:input=on_due_date />
                                </div>
                                <div class="col mb-3">
                                    <label class="form-label">"Priority"</label>
                                    <select class="form-select" prop:value=priority on:change=on_priority>
                                        <option value="low">"Low"</option>
                                        <option value="medium">"Medium"</option>
                                        <option value="high">"High"</option>
                                    </select>
                                </div>
                                <div class="col mb-3">
                                    <label class="form-label">"Status"</label>
                                    <select class="form-select" prop:value=status on:change=on_status>
                                        <option value="todo">"To Do"</option>
                                        <option value="in-progress">"In Progress"</option>
                                        <option value="done">"Done"</option>
                                    </select>
                                </div>
                            </div>

                            <div class="mb-3">
                                <label class="form-label">"Tags"</label>
                                <input type="text" class="form-control" placeholder="work, urgent" prop:value=tags on:input=on_tags />
                            </div>

                            <div class="row">
                                <div class="col mb-3">
                                    <label class="form-label">"Project"</label>
                                    <select class="form-select" prop:value=project_id on:change=on_project_id>
                                        <option value="">"No Project"</option>
                                        <For
                                            each=move || projects.get()
                                            key=|p| (p.id.clone(), p.name.clone())
                                            children=|p| view! { <option value=p.id.clone()>{p.name.clone()}</option> }
                                        />
                                    </select>
                                </div>
                                <div class="col mb-3">
                                    <label class="form-label">"Repeat"</label>
                                    <select class="form-select" prop:value=freq on:change=on_freq>
                                        <option value="">"None"</option>
                                        <option value="daily">"Daily"</option>
                                        <option value="weekly">"Weekly"</option>
                                        <option value="monthly">"Monthly"</option>
                                    </select>
                                </div>
                                <Show when=move || !fields.read().freq.is_empty()>
                                    <div class="col mb-3">
                                        <label class="form-label">"Every"</label>
                                        <input type="number" min="1" class="form-control" prop:value=interval on:input=on_interval />
                                    </div>
                                </Show>
                            </div>

                            {move || editing_id().map(|id| view! { <SubtaskList task_id=id /> })}
                        </div>

                        <div class="modal-footer">
                            <button type="button" class="btn btn-outline-secondary" on:click=move |_| ctx.close_form()>"Cancel"</button>
                            <button type="submit" class="btn btn-primary">
                                {move || if editing_id().is_some() { "Update Task" } else { "Create Task" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
