//! Projects Component
//!
//! Project cards with progress, the project form, and the tasks that
//! belong to no project.

use leptos::prelude::*;

use taskirra_core::clock::{Clock, SystemClock};
use taskirra_core::domain::MAX_NAME_LEN;
use taskirra_core::projects::{split_projects, unassigned_tasks, ProjectStats};
use taskirra_core::{FilterBucket, Project, ProjectDraft, Task};

use crate::commands::use_commands;
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, FormMode, Tab};
use crate::store::{use_app_store, AppStateStoreFields};

const ICON_CHOICES: [&str; 8] = [
    "bi-folder",
    "bi-briefcase",
    "bi-person",
    "bi-heart-pulse",
    "bi-book",
    "bi-house",
    "bi-code-slash",
    "bi-cart",
];

#[component]
fn ProjectCard(project: Project, editing: RwSignal<Option<Option<String>>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let commands = use_commands();

    let id = project.id.clone();
    let stats = {
        let id = id.clone();
        Memo::new(move |_| ProjectStats::compute(&id, &store.tasks().read(), SystemClock.today()))
    };
    let archived = project.archived;
    let color = project.color.clone();

    let id_view = id.clone();
    let id_edit = id.clone();
    let id_archive = id.clone();
    let id_delete = id;

    view! {
        <div class="col-md-6 col-xl-4">
            <div class=if archived { "card project-card h-100 opacity-75" } else { "card project-card h-100" }
                style=format!("border-top: 4px solid {}", project.color)>
                <div class="card-body">
                    <div class="d-flex align-items-center mb-2">
                        <i class=format!("bi {} fs-4 me-2", project.icon) style=format!("color: {}", project.color)></i>
                        <h5 class="card-title mb-0 flex-grow-1">{project.name.clone()}</h5>
                        {archived.then(|| view! { <span class="badge bg-secondary">"Archived"</span> })}
                    </div>
                    {(!project.description.is_empty()).then(|| view! {
                        <p class="card-text text-muted small">{project.description.clone()}</p>
                    })}

                    <div class="d-flex justify-content-between small mb-1">
                        <span>{move || {
                            let s = stats.get();
                            format!("{} of {} tasks", s.completed, s.total)
                        }}</span>
                        <span>{move || format!("{}%", stats.get().progress())}</span>
                    </div>
                    <div class="progress mb-2" style="height: 6px">
                        <div class="progress-bar" style=move || format!("width: {}%; background-color: {}", stats.get().progress(), color)></div>
                    </div>
                    <Show when=move || { stats.get().overdue > 0 }>
                        <small class="text-danger">
                            <i class="bi bi-exclamation-triangle-fill me-1"></i>
                            {move || format!("{} overdue", stats.get().overdue)}
                        </small>
                    </Show>
                </div>
                <div class="card-footer d-flex gap-2">
                    <button class="btn btn-sm btn-outline-primary" on:click=move |_| {
                        ctx.filter.update(|f| {
                            f.project_id = Some(id_view.clone());
                            f.bucket = FilterBucket::All;
                        });
                        ctx.active_tab.set(Tab::Tasks);
                    }>"View Tasks"</button>
                    <button class="btn btn-sm btn-outline-secondary" title="Edit" on:click=move |_| editing.set(Some(Some(id_edit.clone())))>
                        <i class="bi bi-pencil"></i>
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" title=if archived { "Unarchive" } else { "Archive" }
                        on:click=move |_| commands.set_project_archived(&id_archive, !archived)>
                        <i class=if archived { "bi bi-box-arrow-up" } else { "bi bi-archive" }></i>
                    </button>
                    <DeleteConfirmButton
                        button_class="btn btn-sm btn-outline-danger ms-auto"
                        title="Delete project"
                        on_confirm=Callback::new(move |_| commands.delete_project(&id_delete))
                    />
                </div>
            </div>
        </div>
    }
}

/// Inline create/edit form; `editing` is `Some(None)` for a new project
#[component]
fn ProjectForm(editing: RwSignal<Option<Option<String>>>) -> impl IntoView {
    let store = use_app_store();
    let commands = use_commands();

    let draft = RwSignal::new(ProjectDraft::new(""));
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let next = match editing.get() {
            Some(Some(id)) => store
                .projects()
                .read_untracked()
                .iter()
                .find(|p| p.id == id)
                .map(|p| ProjectDraft {
                    name: p.name.clone(),
                    description: p.description.clone(),
                    color: p.color.clone(),
                    icon: p.icon.clone(),
                })
                .unwrap_or_else(|| ProjectDraft::new("")),
            _ => ProjectDraft::new(""),
        };
        draft.set(next);
        set_error.set(None);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let target = editing.get_untracked().flatten();
        let mut value = draft.get_untracked();
        value.name = value.name.trim().to_string();
        value.description = value.description.trim().to_string();
        match commands.save_project(target, value) {
            Ok(()) => editing.set(None),
            Err(message) => set_error.set(Some(message)),
        }
    };

    view! {
        <form class="card mb-4" on:submit=on_submit>
            <div class="card-body">
                <h5 class="card-title">
                    {move || if matches!(editing.get(), Some(Some(_))) { "Edit Project" } else { "New Project" }}
                </h5>
                <div class="row g-3">
                    <div class="col-md-6">
                        <label class="form-label">"Name"</label>
                        <input
                            type="text"
                            class=move || if error.get().is_some() { "form-control is-invalid" } else { "form-control" }
                            maxlength=MAX_NAME_LEN.to_string()
                            prop:value=move || draft.read().name.clone()
                            on:input=move |ev| {
                                set_error.set(None);
                                draft.update(|d| d.name = event_target_value(&ev));
                            }
                        />
                        {move || error.get().map(|e| view! { <div class="invalid-feedback">{e}</div> })}
                    </div>
                    <div class="col-md-3">
                        <label class="form-label">"Color"</label>
                        <input
                            type="color"
                            class="form-control form-control-color"
                            prop:value=move || draft.read().color.clone()
                            on:input=move |ev| draft.update(|d| d.color = event_target_value(&ev))
                        />
                    </div>
                    <div class="col-md-3">
                        <label class="form-label">"Icon"</label>
                        <select
                            class="form-select"
                            prop:value=move || draft.read().icon.clone()
                            on:change=move |ev| draft.update(|d| d.icon = event_target_value(&ev))
                        >
                            {ICON_CHOICES.iter().map(|icon| view! {
                                <option value=*icon>{icon.trim_start_matches("bi-").to_string()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="col-12">
                        <label class="form-label">"Description"</label>
                        <textarea
                            class="form-control"
                            rows="2"
                            prop:value=move || draft.read().description.clone()
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                    </div>
                </div>
            </div>
            <div class="card-footer d-flex justify-content-end gap-2">
                <button type="button" class="btn btn-outline-secondary" on:click=move |_| editing.set(None)>"Cancel"</button>
                <button type="submit" class="btn btn-primary">
                    {move || if matches!(editing.get(), Some(Some(_))) { "Update Project" } else { "Create Project" }}
                </button>
            </div>
        </form>
    }
}

#[component]
pub fn ProjectsView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(None::<Option<String>>);

    let split = Memo::new(move |_| {
        let projects = store.projects().read();
        let (active, archived) = split_projects(&projects);
        (
            active.into_iter().cloned().collect::<Vec<Project>>(),
            archived.into_iter().cloned().collect::<Vec<Project>>(),
        )
    });
    let loose = Memo::new(move |_| {
        unassigned_tasks(&store.tasks().read())
            .into_iter()
            .cloned()
            .collect::<Vec<Task>>()
    });

    let card_key = |p: &Project| (p.id.clone(), p.name.clone(), p.color.clone(), p.icon.clone(), p.archived);

    view! {
        <div class="projects-view">
            <div class="view-header d-flex justify-content-between align-items-center mb-4">
                <div>
                    <h2 class="view-title">"Projects"</h2>
                    <p class="text-muted mb-0">"Organize tasks into projects"</p>
                </div>
                <button class="btn btn-primary" on:click=move |_| editing.set(Some(None))>
                    <i class="bi bi-plus-lg me-1"></i>"New Project"
                </button>
            </div>

            <Show when=move || editing.read().is_some()>
                <ProjectForm editing=editing />
            </Show>

            <Show
                when=move || !split.read().0.is_empty()
                fallback=|| view! {
                    <div class="empty-state text-center py-4">
                        <i class="bi bi-folder2-open fs-1 text-muted"></i>
                        <p class="text-muted">"No projects yet"</p>
                    </div>
                }
            >
                <div class="row g-3 mb-4">
                    <For
                        each=move || split.get().0
                        key=card_key
                        children=move |p| view! { <ProjectCard project=p editing=editing /> }
                    />
                </div>
            </Show>

            <Show when=move || !split.read().1.is_empty()>
                <h5 class="mt-4">"Archived"</h5>
                <div class="row g-3 mb-4">
                    <For
                        each=move || split.get().1
                        key=card_key
                        children=move |p| view! { <ProjectCard project=p editing=editing /> }
                    />
                </div>
            </Show>

            <Show when=move || !loose.read().is_empty()>
                <h5 class="mt-4">{move || format!("Unassigned Tasks ({})", loose.read().len())}</h5>
                <ul class="list-group">
                    <For
                        each=move || loose.get()
                        key=|t| (t.id.clone(), t.updated_at)
                        children=move |t| {
                            let id = t.id.clone();
                            view! {
                                <li class="list-group-item d-flex align-items-center">
                                    <span class=if t.is_done() { "flex-grow-1 text-decoration-line-through text-muted" } else { "flex-grow-1" }>
                                        {t.title.clone()}
                                    </span>
                                    <button class="btn btn-sm btn-link" title="Edit" on:click=move |_| ctx.open_form(FormMode::Edit(id.clone()))>
                                        <i class="bi bi-pencil"></i>
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
