//! Taskirra App
//!
//! Opens the persisted store, provides the shared state, and lays out the
//! header, sidebar and tabbed main area.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use taskirra_core::{StoreConfig, SystemClock, TaskStore};

use crate::browser;
use crate::components::{
    AnalyticsView, CalendarView, DashboardView, Header, ProjectsView, Sidebar, TabBar, TaskForm, TaskList, Toast,
};
use crate::context::{use_app_context, AppContext, Tab};
use crate::storage::{load_preference, BrowserStorage, ACTIVE_TAB_KEY};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let mut backend = TaskStore::open(
        Rc::new(BrowserStorage::local()),
        &StoreConfig::default(),
        Box::new(SystemClock),
    );

    // Catch up on recurring instances missed while the app was closed
    let generated = backend.generate_recurring();
    if generated > 0 {
        log::info!("app: generated {} recurring tasks on start", generated);
    }
    browser::apply_theme(backend.settings().theme);

    let active_tab = load_preference(ACTIVE_TAB_KEY)
        .and_then(|raw| raw.parse::<Tab>().ok())
        .unwrap_or_default();

    // Provide context to all children
    provide_context(Store::new(AppState::from_backend(&backend)));
    provide_context(StoredValue::new_local(backend));
    provide_context(AppContext::new(active_tab));

    view! {
        <div class="app-container">
            <Header />
            <div class="app-body">
                <Sidebar />
                <main class="app-main">
                    <TabBar />
                    <TabContent />
                </main>
            </div>
            <TaskForm />
            <Toast />
        </div>
    }
}

#[component]
fn TabContent() -> impl IntoView {
    let ctx = use_app_context();

    move || match ctx.active_tab.get() {
        Tab::Tasks => view! { <TaskList /> }.into_any(),
        Tab::Projects => view! { <ProjectsView /> }.into_any(),
        Tab::Calendar => view! { <CalendarView /> }.into_any(),
        Tab::Dashboard => view! { <DashboardView /> }.into_any(),
        Tab::Analytics => view! { <AnalyticsView /> }.into_any(),
    }
}
