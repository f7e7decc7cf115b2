//! Sidebar Component
//!
//! Bucket filters with live counts, priority filter, tag cloud and the
//! project filter.

use leptos::prelude::*;

use taskirra_core::clock::{Clock, SystemClock};
use taskirra_core::filter::all_tags;
use taskirra_core::projects::active_projects;
use taskirra_core::{FilterBucket, FilterCounts, Priority};

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

fn bucket_icon(bucket: FilterBucket) -> &'static str {
    match bucket {
        FilterBucket::All => "bi bi-list-task sidebar-nav-icon",
        FilterBucket::Today => "bi bi-calendar-day sidebar-nav-icon",
        FilterBucket::Week => "bi bi-calendar-week sidebar-nav-icon",
        FilterBucket::Overdue => "bi bi-exclamation-triangle-fill sidebar-nav-icon",
        FilterBucket::Important => "bi bi-star-fill sidebar-nav-icon",
        FilterBucket::Completed => "bi bi-check-circle-fill sidebar-nav-icon",
    }
}

fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "badge bg-danger sidebar-nav-icon priority-dot",
        Priority::Medium => "badge bg-warning sidebar-nav-icon priority-dot",
        Priority::Low => "badge bg-secondary sidebar-nav-icon priority-dot",
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let counts = Memo::new(move |_| FilterCounts::compute(&store.tasks().read(), SystemClock.today()));
    let tags = Memo::new(move |_| all_tags(&store.tasks().read()));
    let projects = Memo::new(move |_| active_projects(&store.projects().read()));

    view! {
        <aside class="app-sidebar" role="navigation" aria-label="Task filters and categories">
            <nav class="sidebar-nav">
                <div class="sidebar-section-title">"Filters"</div>
                {FilterBucket::ALL.into_iter().map(|bucket| {
                    let is_active = move || ctx.filter.read().bucket == bucket;
                    view! {
                        <div
                            class=move || if is_active() { "sidebar-nav-item active" } else { "sidebar-nav-item" }
                            on:click=move |_| ctx.filter.update(|f| f.bucket = bucket)
                        >
                            <i class=bucket_icon(bucket)></i>
                            <span class="sidebar-nav-label">{bucket.label()}</span>
                            <span class="sidebar-nav-badge">{move || counts.get().get(bucket)}</span>
                        </div>
                    }
                }).collect_view()}

                <div class="sidebar-section-title">
                    "Priority"
                    <Show when=move || ctx.filter.read().priority.is_some()>
                        <button class="btn btn-sm btn-link clear-btn" on:click=move |_| ctx.filter.update(|f| f.priority = None)>
                            "Clear"
                        </button>
                    </Show>
                </div>
                {Priority::ALL.into_iter().map(|priority| {
                    let is_active = move || ctx.filter.read().priority == Some(priority);
                    view! {
                        <div
                            class=move || if is_active() { "sidebar-nav-item active" } else { "sidebar-nav-item" }
                            on:click=move |_| ctx.filter.update(|f| {
                                f.priority = if f.priority == Some(priority) { None } else { Some(priority) };
                            })
                        >
                            <span class=priority_badge(priority)></span>
                            <span class="sidebar-nav-label">{priority.label()}</span>
                        </div>
                    }
                }).collect_view()}

                <div class="sidebar-section-title">
                    "Tags"
                    <Show when=move || ctx.filter.read().tag.is_some()>
                        <button class="btn btn-sm btn-link clear-btn" on:click=move |_| ctx.filter.update(|f| f.tag = None)>
                            "Clear"
                        </button>
                    </Show>
                </div>
                <Show
                    when=move || !tags.read().is_empty()
                    fallback=|| view! { <p class="px-3 small text-muted">"No tags yet"</p> }
                >
                    <div class="tag-cloud">
                        <For
                            each=move || tags.get()
                            key=|tag| tag.clone()
                            children=move |tag| {
                                let value = tag.clone();
                                let is_active = {
                                    let tag = tag.clone();
                                    move || ctx.filter.read().tag.as_deref() == Some(tag.as_str())
                                };
                                view! {
                                    <span
                                        class=move || if is_active() { "task-tag active" } else { "task-tag" }
                                        on:click=move |_| {
                                            let value = value.clone();
                                            ctx.filter.update(|f| {
                                                f.tag = if f.tag.as_deref() == Some(value.as_str()) { None } else { Some(value) };
                                            });
                                        }
                                    >
                                        "#" {tag}
                                    </span>
                                }
                            }
                        />
                    </div>
                </Show>

                <div class="sidebar-section-title">
                    "Projects"
                    <Show when=move || ctx.filter.read().project_id.is_some()>
                        <button class="btn btn-sm btn-link clear-btn" on:click=move |_| ctx.filter.update(|f| f.project_id = None)>
                            "Clear"
                        </button>
                    </Show>
                </div>
                <For
                    each=move || projects.get()
                    key=|project| (project.id.clone(), project.name.clone(), project.color.clone())
                    children=move |project| {
                        let id = project.id.clone();
                        let is_active = {
                            let id = id.clone();
                            move || ctx.filter.read().project_id.as_deref() == Some(id.as_str())
                        };
                        view! {
                            <div
                                class=move || if is_active() { "sidebar-nav-item active" } else { "sidebar-nav-item" }
                                on:click=move |_| {
                                    let id = id.clone();
                                    ctx.filter.update(|f| {
                                        f.project_id = if f.project_id.as_deref() == Some(id.as_str()) { None } else { Some(id) };
                                    });
                                }
                            >
                                <span class="project-dot" style:background-color=project.color.clone()></span>
                                <span class="sidebar-nav-label">{project.name.clone()}</span>
                            </div>
                        }
                    }
                />
            </nav>
        </aside>
    }
}
