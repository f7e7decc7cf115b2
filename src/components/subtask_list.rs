//! Subtask List Component
//!
//! Checklist editor shown in the task form while editing an existing task.
//! Changes are saved immediately.

use leptos::prelude::*;

use crate::commands::use_commands;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SubtaskList(task_id: String) -> impl IntoView {
    let store = use_app_store();
    let commands = use_commands();
    let (new_title, set_new_title) = signal(String::new());

    let subtasks = {
        let task_id = task_id.clone();
        move || {
            store
                .tasks()
                .read()
                .iter()
                .find(|t| t.id == task_id)
                .map(|t| t.subtasks.clone())
                .unwrap_or_default()
        }
    };
    let subtasks = Memo::new(move |_| subtasks());

    let add = {
        let task_id = task_id.clone();
        move || {
            let title = new_title.get_untracked();
            if title.trim().is_empty() {
                return;
            }
            commands.add_subtask(&task_id, &title);
            set_new_title.set(String::new());
        }
    };
    let add_on_click = add.clone();

    view! {
        <div class="subtask-list">
            <label class="form-label">
                {move || {
                    let list = subtasks.read();
                    format!("Subtasks ({}/{})", list.iter().filter(|s| s.done).count(), list.len())
                }}
            </label>

            <For
                each=move || subtasks.get()
                key=|sub| (sub.id.clone(), sub.done, sub.title.clone())
                children=move |sub| {
                    let toggle_ids = (task_id.clone(), sub.id.clone());
                    let delete_ids = (task_id.clone(), sub.id.clone());
                    view! {
                        <div class="subtask-item">
                            <input
                                class="form-check-input"
                                type="checkbox"
                                prop:checked=sub.done
                                on:change=move |_| commands.toggle_subtask(&toggle_ids.0, &toggle_ids.1)
                            />
                            <span class=if sub.done { "text-decoration-line-through text-muted" } else { "" }>
                                {sub.title.clone()}
                            </span>
                            <button
                                type="button"
                                class="btn btn-sm btn-link text-danger"
                                on:click=move |_| commands.delete_subtask(&delete_ids.0, &delete_ids.1)
                            >
                                <i class="bi bi-x"></i>
                            </button>
                        </div>
                    }
                }
            />

            <div class="subtask-add">
                <input
                    type="text"
                    class="form-control form-control-sm"
                    placeholder="Add a subtask..."
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add();
                        }
                    }
                />
                <button type="button" class="btn btn-sm btn-outline-primary" on:click=move |_| add_on_click()>
                    <i class="bi bi-plus"></i>
                </button>
            </div>
        </div>
    }
}
