//! Toast Component
//!
//! One notification at a time, auto-dismissed after a few seconds, with an
//! optional Undo button.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::use_commands;
use crate::context::use_app_context;

/// How long a toast stays up
pub const TOAST_DURATION_MS: u32 = 5000;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app_context();
    let commands = use_commands();

    // Each new toast schedules its own dismissal
    Effect::new(move |_| {
        if let Some(id) = ctx.toast.with(|t| t.as_ref().map(|t| t.id)) {
            spawn_local(async move {
                TimeoutFuture::new(TOAST_DURATION_MS).await;
                ctx.dismiss_toast(id);
            });
        }
    });

    move || {
        ctx.toast.get().map(|toast| {
            let id = toast.id;
            let undo = toast.undo.clone();
            view! {
                <div class=toast.kind.class() role="alert" aria-live="polite">
                    <span class="toast-message">{toast.message.clone()}</span>
                    {undo.map(|action| view! {
                        <button
                            class="btn btn-sm btn-link toast-undo"
                            on:click=move |_| {
                                ctx.dismiss_toast(id);
                                commands.undo(action.clone());
                            }
                        >
                            "Undo"
                        </button>
                    })}
                    <button class="btn-close" aria-label="Close" on:click=move |_| ctx.dismiss_toast(id)></button>
                </div>
            }
        })
    }
}
