//! Delete Confirm Button Component
//!
//! Two-step delete used by task rows and project cards: the trash button
//! turns into an inline "Delete?" prompt with confirm and cancel buttons.

use leptos::prelude::*;

/// Trash button that asks before calling `on_confirm`
///
/// # Arguments
/// * `button_class` - classes of the trash button
/// * `title` - tooltip and accessible label, e.g. "Delete task"
/// * `on_confirm` - runs once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "Delete".to_string())] title: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let asking = RwSignal::new(false);

    move || {
        if asking.get() {
            view! {
                <span class="delete-confirm btn-group btn-group-sm" role="group">
                    <span class="delete-confirm-text align-self-center me-1">"Delete?"</span>
                    <button
                        type="button"
                        class="btn btn-danger"
                        aria-label="Confirm delete"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            asking.set(false);
                            on_confirm.run(());
                        }
                    >
                        <i class="bi bi-check-lg"></i>
                    </button>
                    <button
                        type="button"
                        class="btn btn-outline-secondary"
                        aria-label="Cancel delete"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            asking.set(false);
                        }
                    >
                        <i class="bi bi-x-lg"></i>
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    type="button"
                    class=button_class.clone()
                    title=title.clone()
                    aria-label=title.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        asking.set(true);
                    }
                >
                    <i class="bi bi-trash"></i>
                </button>
            }
            .into_any()
        }
    }
}
