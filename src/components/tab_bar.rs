//! Tab Bar Component
//!
//! Switches between the top-level views and remembers the choice across
//! reloads.

use leptos::prelude::*;

use crate::context::{use_app_context, Tab};
use crate::storage::{save_preference, ACTIVE_TAB_KEY};

#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = use_app_context();

    Effect::new(move |_| {
        save_preference(ACTIVE_TAB_KEY, ctx.active_tab.get().as_str());
    });

    view! {
        <nav class="tab-bar">
            {Tab::ALL.into_iter().map(|tab| {
                let tab_class = move || {
                    if ctx.active_tab.get() == tab { "tab-btn active" } else { "tab-btn" }
                };
                view! {
                    <button class=tab_class on:click=move |_| ctx.active_tab.set(tab)>
                        <i class=tab.icon()></i>
                        <span>{tab.label()}</span>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
