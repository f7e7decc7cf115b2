//! Application Context
//!
//! UI state shared via Leptos Context API: the open tab, the filter, the
//! task selection, the task form and the toast.

use std::fmt;
use std::str::FromStr;

use leptos::prelude::*;
use taskirra_core::{Task, TaskFilter};

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Tasks,
    Projects,
    Calendar,
    Dashboard,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Tasks, Tab::Projects, Tab::Calendar, Tab::Dashboard, Tab::Analytics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Tasks => "tasks",
            Tab::Calendar => "calendar",
            Tab::Dashboard => "dashboard",
            Tab::Analytics => "analytics",
            Tab::Projects => "projects",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Tasks => "Tasks",
            Tab::Calendar => "Calendar",
            Tab::Dashboard => "Dashboard",
            Tab::Analytics => "Analytics",
            Tab::Projects => "Projects",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Tasks => "bi bi-list-task",
            Tab::Calendar => "bi bi-calendar3",
            Tab::Dashboard => "bi bi-bar-chart-fill",
            Tab::Analytics => "bi bi-graph-up-arrow",
            Tab::Projects => "bi bi-folder",
        }
    }
}

impl FromStr for Tab {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which task the form is editing
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    New,
    Edit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Info => "toast toast-info",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Danger => "toast toast-danger",
        }
    }
}

/// What the toast's Undo button reverts
#[derive(Debug, Clone, PartialEq)]
pub enum UndoAction {
    /// Set a just-completed task back to todo
    Complete(String),
    /// Reinsert deleted tasks
    Restore(Vec<Task>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    /// Distinguishes toasts so a stale timer never hides a newer one
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub undo: Option<UndoAction>,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub active_tab: RwSignal<Tab>,
    pub filter: RwSignal<TaskFilter>,
    /// Ids of tasks ticked for bulk actions
    pub selected: RwSignal<Vec<String>>,
    /// Task form visibility and target
    pub form: RwSignal<Option<FormMode>>,
    pub toast: RwSignal<Option<ToastMessage>>,
    toast_counter: StoredValue<u64>,
}

impl AppContext {
    pub fn new(active_tab: Tab) -> Self {
        Self {
            active_tab: RwSignal::new(active_tab),
            filter: RwSignal::new(TaskFilter::default()),
            selected: RwSignal::new(Vec::new()),
            form: RwSignal::new(None),
            toast: RwSignal::new(None),
            toast_counter: StoredValue::new(0),
        }
    }

    /// Show a toast, replacing any current one; returns its id
    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind, undo: Option<UndoAction>) -> u64 {
        self.toast_counter.update_value(|n| *n += 1);
        let id = self.toast_counter.get_value();
        self.toast.set(Some(ToastMessage {
            id,
            message: message.into(),
            kind,
            undo,
        }));
        id
    }

    /// Hide the toast if it is still the one with `id`
    pub fn dismiss_toast(&self, id: u64) {
        if self.toast.with_untracked(|t| t.as_ref().is_some_and(|t| t.id == id)) {
            self.toast.set(None);
        }
    }

    pub fn open_form(&self, mode: FormMode) {
        self.form.set(Some(mode));
    }

    pub fn close_form(&self) {
        self.form.set(None);
    }

    pub fn toggle_selected(&self, id: &str) {
        self.selected.update(|ids| {
            if let Some(pos) = ids.iter().position(|i| i == id) {
                ids.remove(pos);
            } else {
                ids.push(id.to_string());
            }
        });
    }

    pub fn clear_selection(&self) {
        self.selected.set(Vec::new());
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
