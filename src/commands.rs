//! Store Commands
//!
//! Every user action goes through here: mutate the core store, push a fresh
//! snapshot into the reactive store, and report the outcome with a toast.

use chrono::Utc;
use leptos::prelude::*;
use taskirra_core::backup::backup_file_name;
use taskirra_core::{DomainError, ProjectDraft, Status, TaskDraft, TaskFilter, TaskStore, Theme};

use crate::browser;
use crate::context::{use_app_context, AppContext, ToastKind, UndoAction};
use crate::storage::BrowserStorage;
use crate::store::{use_app_store, use_backend, AppState, AppStateStoreFields, AppStore, Backend};

/// Message shown under a form field; validation errors show bare
fn form_error(e: DomainError) -> String {
    match e {
        DomainError::InvalidInput(message) => message,
        other => other.to_string(),
    }
}

/// Handle bundling everything a command touches
#[derive(Clone, Copy)]
pub struct Commands {
    backend: Backend,
    store: AppStore,
    ctx: AppContext,
}

/// Grab the command handle while a component is being built
pub fn use_commands() -> Commands {
    Commands {
        backend: use_backend(),
        store: use_app_store(),
        ctx: use_app_context(),
    }
}

impl Commands {
    /// Run `f` against the core store and refresh the snapshot
    fn run<R>(&self, f: impl FnOnce(&mut TaskStore<BrowserStorage>) -> R) -> Option<R> {
        let result = self.backend.try_update_value(f);
        if result.is_none() {
            log::error!("commands: store was disposed");
        }
        self.sync();
        result
    }

    fn sync(&self) {
        let Some(snapshot) = self.backend.try_with_value(AppState::from_backend) else {
            return;
        };
        let AppState { tasks, projects, settings } = snapshot;
        self.store.tasks().set(tasks);
        self.store.projects().set(projects);
        self.store.settings().set(settings);
    }

    /// Recurring sweep after anything that can complete a task
    fn sweep_recurring(&self) -> usize {
        self.run(|s| s.generate_recurring()).unwrap_or(0)
    }

    fn toast(&self, message: impl Into<String>, kind: ToastKind) {
        self.ctx.show_toast(message, kind, None);
    }

    // ========================
    // Tasks
    // ========================

    /// Save the task form; the error text is shown inside the form
    pub fn save_task(&self, editing: Option<String>, draft: TaskDraft) -> Result<(), String> {
        let result = match &editing {
            Some(id) => self.run(|s| s.update_task(id, draft).map(|_| ())),
            None => self.run(|s| s.create_task(draft).map(|_| ())),
        };
        match result {
            Some(Ok(())) => {
                self.sweep_recurring();
                self.ctx.close_form();
                let message = if editing.is_some() {
                    "Task updated successfully"
                } else {
                    "Task created successfully"
                };
                self.toast(message, ToastKind::Success);
                Ok(())
            }
            Some(Err(e)) => Err(form_error(e)),
            None => Err("Store unavailable".to_string()),
        }
    }

    pub fn toggle_complete(&self, id: &str) {
        match self.run(|s| s.toggle_complete(id)) {
            Some(Ok(Status::Done)) => {
                let created = self.sweep_recurring();
                let message = if created > 0 {
                    format!("Task completed! {} recurring task(s) created", created)
                } else {
                    "Task completed!".to_string()
                };
                self.ctx
                    .show_toast(message, ToastKind::Success, Some(UndoAction::Complete(id.to_string())));
            }
            Some(Ok(_)) => self.toast("Task marked as incomplete", ToastKind::Info),
            Some(Err(e)) => log::warn!("commands: toggle {}: {}", id, e),
            None => {}
        }
    }

    pub fn delete_task(&self, id: &str) {
        match self.run(|s| s.delete_task(id)) {
            Some(Ok(task)) => {
                self.ctx.selected.update(|ids| ids.retain(|i| i != id));
                self.ctx
                    .show_toast("Task deleted", ToastKind::Danger, Some(UndoAction::Restore(vec![task])));
            }
            Some(Err(e)) => log::warn!("commands: delete {}: {}", id, e),
            None => {}
        }
    }

    /// Revert the action attached to the current toast
    pub fn undo(&self, action: UndoAction) {
        match action {
            UndoAction::Complete(id) => {
                if let Some(Err(e)) = self.run(|s| s.undo_complete(&id)) {
                    log::warn!("commands: undo {}: {}", id, e);
                }
                self.toast("Task marked as incomplete", ToastKind::Info);
            }
            UndoAction::Restore(tasks) => {
                let message = if tasks.len() == 1 { "Task restored" } else { "Tasks restored" };
                self.run(|s| s.restore_tasks(tasks));
                self.toast(message, ToastKind::Success);
            }
        }
    }

    pub fn complete_selected(&self) {
        let ids = self.ctx.selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        self.run(|s| s.complete_tasks(&ids));
        self.sweep_recurring();
        self.ctx.clear_selection();
        self.toast(format!("{} tasks marked as complete", ids.len()), ToastKind::Success);
    }

    pub fn delete_selected(&self) {
        let ids = self.ctx.selected.get_untracked();
        if ids.is_empty() || !browser::confirm(&format!("Delete {} tasks? This action can be undone.", ids.len())) {
            return;
        }
        let Some(removed) = self.run(|s| s.delete_tasks(&ids)) else {
            return;
        };
        self.ctx.clear_selection();
        self.ctx.show_toast(
            format!("{} tasks deleted", removed.len()),
            ToastKind::Danger,
            Some(UndoAction::Restore(removed)),
        );
    }

    /// Move a task to where `target_id` currently sits in the full list
    pub fn move_task(&self, id: &str, target_id: &str) {
        let positions = self.backend.try_with_value(|s| {
            let index_of = |wanted: &str| s.tasks().iter().position(|t| t.id == wanted);
            index_of(id).zip(index_of(target_id))
        });
        let Some(Some((from, to))) = positions else {
            return;
        };
        match self.run(|s| s.move_task(from, to)) {
            Some(Ok(())) => self.toast("Tasks reordered", ToastKind::Info),
            Some(Err(e)) => log::warn!("commands: move {}: {}", id, e),
            None => {}
        }
    }

    // ========================
    // Subtasks
    // ========================

    pub fn add_subtask(&self, task_id: &str, title: &str) {
        if let Some(Err(e)) = self.run(|s| s.add_subtask(task_id, title)) {
            log::warn!("commands: add subtask to {}: {}", task_id, e);
        }
    }

    pub fn toggle_subtask(&self, task_id: &str, subtask_id: &str) {
        if let Some(Err(e)) = self.run(|s| s.toggle_subtask(task_id, subtask_id)) {
            log::warn!("commands: toggle subtask {}: {}", subtask_id, e);
        }
    }

    pub fn delete_subtask(&self, task_id: &str, subtask_id: &str) {
        if let Some(Err(e)) = self.run(|s| s.delete_subtask(task_id, subtask_id)) {
            log::warn!("commands: delete subtask {}: {}", subtask_id, e);
        }
    }

    // ========================
    // Projects
    // ========================

    pub fn save_project(&self, editing: Option<String>, draft: ProjectDraft) -> Result<(), String> {
        let result = match &editing {
            Some(id) => self.run(|s| s.update_project(id, draft).map(|_| ())),
            None => self.run(|s| s.create_project(draft).map(|_| ())),
        };
        match result {
            Some(Ok(())) => {
                let message = if editing.is_some() {
                    "Project updated successfully"
                } else {
                    "Project created successfully"
                };
                self.toast(message, ToastKind::Success);
                Ok(())
            }
            Some(Err(e)) => Err(form_error(e)),
            None => Err("Store unavailable".to_string()),
        }
    }

    pub fn set_project_archived(&self, id: &str, archived: bool) {
        if let Some(Err(e)) = self.run(|s| s.set_project_archived(id, archived)) {
            log::warn!("commands: archive {}: {}", id, e);
        }
    }

    pub fn delete_project(&self, id: &str) {
        match self.run(|s| s.delete_project(id)) {
            Some(Ok(_)) => {
                self.ctx.filter.update(|f| {
                    if f.project_id.as_deref() == Some(id) {
                        f.project_id = None;
                    }
                });
                self.toast("Project deleted", ToastKind::Danger);
            }
            Some(Err(e)) => log::warn!("commands: delete project {}: {}", id, e),
            None => {}
        }
    }

    // ========================
    // Settings and data
    // ========================

    pub fn toggle_theme(&self) {
        let theme = self.run(|s| {
            s.update_settings(|settings| {
                settings.theme = match settings.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
            })
            .theme
        });
        if let Some(theme) = theme {
            browser::apply_theme(theme);
        }
    }

    pub fn export_data(&self) {
        let now = Utc::now();
        let exported = self.backend.try_with_value(|s| s.export(now));
        match exported {
            Some(Ok(json)) => match browser::download_json(&backup_file_name(now.date_naive()), &json) {
                Ok(()) => self.toast("Data exported successfully", ToastKind::Success),
                Err(e) => {
                    log::error!("commands: export download failed: {:?}", e);
                    self.toast("Failed to export data", ToastKind::Danger);
                }
            },
            Some(Err(e)) => log::error!("commands: export failed: {}", e),
            None => {}
        }
    }

    pub fn import_data(&self, json: &str) {
        match self.run(|s| s.import(json)) {
            Some(Ok(())) => {
                self.sweep_recurring();
                if let Some(theme) = self.backend.try_with_value(|s| s.settings().theme) {
                    browser::apply_theme(theme);
                }
                self.ctx.clear_selection();
                self.toast("Data imported successfully", ToastKind::Success);
            }
            _ => self.toast("Failed to import data. Invalid file format.", ToastKind::Danger),
        }
    }

    pub fn reset_data(&self) {
        if !browser::confirm("Are you sure you want to delete all data? This cannot be undone.") {
            return;
        }
        self.run(|s| s.reset());
        self.ctx.clear_selection();
        self.ctx.filter.set(TaskFilter::default());
        self.toast("All data has been reset", ToastKind::Warning);
    }

    pub fn load_demo_data(&self) {
        self.run(|s| s.load_demo_data());
        self.sweep_recurring();
        if let Some(theme) = self.backend.try_with_value(|s| s.settings().theme) {
            browser::apply_theme(theme);
        }
        self.toast("Demo data loaded successfully", ToastKind::Success);
    }
}
