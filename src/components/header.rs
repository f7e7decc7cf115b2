//! Header Component
//!
//! Brand, search box, theme toggle and the data menu (export, import,
//! demo data, reset).

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use taskirra_core::Theme;

use crate::browser;
use crate::commands::use_commands;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let commands = use_commands();
    let (menu_open, set_menu_open) = signal(false);

    let is_dark = move || store.settings().read().theme == Theme::Dark;

    let on_import = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        set_menu_open.set(false);
        spawn_local(async move {
            match browser::read_selected_file(&input).await {
                Ok(Some(text)) => commands.import_data(&text),
                Ok(None) => {}
                Err(e) => {
                    log::error!("header: could not read import file: {:?}", e);
                    commands.import_data("");
                }
            }
            // Allow picking the same file again
            input.set_value("");
        });
    };

    view! {
        <header class="app-header">
            <div class="brand">
                <i class="bi bi-check2-square"></i>
                <span class="brand-name">"Taskirra"</span>
            </div>

            <div class="header-search">
                <i class="bi bi-search"></i>
                <input
                    type="text"
                    placeholder="Search tasks..."
                    prop:value=move || ctx.filter.read().query.clone()
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        ctx.filter.update(|f| f.query = query);
                    }
                />
            </div>

            <div class="header-actions">
                <div class="dropdown">
                    <button
                        class="btn btn-outline-secondary"
                        title="Data"
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        <i class="bi bi-three-dots-vertical"></i>
                    </button>
                    <Show when=move || menu_open.get()>
                        <div class="dropdown-menu show">
                            <button class="dropdown-item" on:click=move |_| {
                                set_menu_open.set(false);
                                commands.export_data();
                            }>
                                <i class="bi bi-download me-2"></i>"Export Data"
                            </button>
                            <label class="dropdown-item">
                                <i class="bi bi-upload me-2"></i>"Import Data"
                                <input type="file" accept=".json" class="d-none" on:change=on_import />
                            </label>
                            <button class="dropdown-item" on:click=move |_| {
                                set_menu_open.set(false);
                                commands.load_demo_data();
                            }>
                                <i class="bi bi-stars me-2"></i>"Load Demo Data"
                            </button>
                            <button class="dropdown-item text-danger" on:click=move |_| {
                                set_menu_open.set(false);
                                commands.reset_data();
                            }>
                                <i class="bi bi-trash me-2"></i>"Reset All Data"
                            </button>
                        </div>
                    </Show>
                </div>

                <button
                    class="btn btn-outline-secondary theme-toggle"
                    title=move || if is_dark() { "Switch to light mode" } else { "Switch to dark mode" }
                    on:click=move |_| commands.toggle_theme()
                >
                    <i class=move || if is_dark() { "bi bi-sun" } else { "bi bi-moon" }></i>
                </button>
            </div>
        </header>
    }
}
