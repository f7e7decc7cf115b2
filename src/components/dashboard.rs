//! Dashboard Component
//!
//! Headline numbers, status distribution and completion trends.

use chrono::Local;
use leptos::prelude::*;

use taskirra_core::analytics::{
    last_seven_days, progress_percent, status_breakdown, weekly_trend, DashboardStats, DayCount, WeekTrend,
};
use taskirra_core::clock::{Clock, SystemClock};

use crate::store::{use_app_store, AppStateStoreFields};

/// Bar size style relative to the largest value
fn bar_style(property: &str, value: usize, max: usize) -> String {
    let pct = if max == 0 { 0 } else { value * 100 / max };
    format!("{}: {}%", property, pct)
}

#[component]
fn StatCard(label: &'static str, icon: &'static str, tone: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="col-6 col-md-4 col-xl-2">
            <div class="card stat-card h-100">
                <div class="card-body">
                    <div class=format!("stat-icon text-{}", tone)><i class=format!("bi {}", icon)></i></div>
                    <div class="stat-value">{move || value.get()}</div>
                    <div class="stat-label text-muted">{label}</div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardView() -> impl IntoView {
    let store = use_app_store();

    let stats = Memo::new(move |_| DashboardStats::compute(&store.tasks().read(), SystemClock.today()));
    let progress = Memo::new(move |_| progress_percent(store.tasks().read().iter()));
    let breakdown = Memo::new(move |_| status_breakdown(&store.tasks().read()));
    let trend = Memo::new(move |_| weekly_trend(&store.tasks().read(), &Local::now()));
    let week = Memo::new(move |_| last_seven_days(&store.tasks().read(), &Local::now()));

    let stat = move |pick: fn(&DashboardStats) -> usize| Signal::derive(move || pick(&stats.get()));

    view! {
        <div class="dashboard-view">
            <div class="view-header mb-4">
                <h2 class="view-title">"Dashboard Overview"</h2>
                <p class="text-muted">"Track your productivity and task completion"</p>
            </div>

            <div class="card mb-4">
                <div class="card-body">
                    <div class="d-flex justify-content-between mb-2">
                        <h5 class="card-title mb-0">"Overall Progress"</h5>
                        <span class="fw-bold">{move || format!("{}%", progress.get())}</span>
                    </div>
                    <div class="progress" style="height: 12px">
                        <div class="progress-bar bg-success" role="progressbar" style=move || format!("width: {}%", progress.get())></div>
                    </div>
                    <small class="text-muted">
                        {move || {
                            let s = stats.get();
                            format!("{} of {} tasks completed", s.completed, s.total)
                        }}
                    </small>
                </div>
            </div>

            <div class="row g-3 mb-4">
                <StatCard label="Total Tasks" icon="bi-list-task" tone="primary" value=stat(|s| s.total) />
                <StatCard label="Completed" icon="bi-check-circle-fill" tone="success" value=stat(|s| s.completed) />
                <StatCard label="Pending" icon="bi-hourglass-split" tone="warning" value=stat(|s| s.pending) />
                <StatCard label="Due Today" icon="bi-calendar-day" tone="info" value=stat(|s| s.today) />
                <StatCard label="This Week" icon="bi-calendar-week" tone="secondary" value=stat(|s| s.this_week) />
                <StatCard label="Overdue" icon="bi-exclamation-triangle-fill" tone="danger" value=stat(|s| s.overdue) />
            </div>

            <div class="row g-3">
                <div class="col-lg-4">
                    <div class="card h-100">
                        <div class="card-body">
                            <h5 class="card-title">"Task Distribution"</h5>
                            {move || {
                                let b = breakdown.get();
                                let total = b.total();
                                [
                                    ("To Do", b.todo, "bg-secondary"),
                                    ("In Progress", b.in_progress, "bg-info"),
                                    ("Done", b.done, "bg-success"),
                                ]
                                    .into_iter()
                                    .map(|(label, count, tone)| view! {
                                        <div class="mb-3">
                                            <div class="d-flex justify-content-between">
                                                <span>{label}</span>
                                                <span class="text-muted">{count}</span>
                                            </div>
                                            <div class="progress" style="height: 8px">
                                                <div class=format!("progress-bar {}", tone) style=bar_style("width", count, total)></div>
                                            </div>
                                        </div>
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </div>
                </div>

                <div class="col-lg-4">
                    <div class="card h-100">
                        <div class="card-body">
                            <h5 class="card-title">"Weekly Trend"</h5>
                            <For
                                each=move || trend.get()
                                key=|w: &WeekTrend| (w.start, w.completed, w.total)
                                children=|w| view! {
                                    <div class="mb-3">
                                        <div class="d-flex justify-content-between">
                                            <small>{w.label()}</small>
                                            <small class="text-muted">{format!("{}/{} ({}%)", w.completed, w.total, w.percent())}</small>
                                        </div>
                                        <div class="progress" style="height: 8px">
                                            <div class="progress-bar" style=format!("width: {}%", w.percent())></div>
                                        </div>
                                    </div>
                                }
                            />
                        </div>
                    </div>
                </div>

                <div class="col-lg-4">
                    <div class="card h-100">
                        <div class="card-body">
                            <h5 class="card-title">"Last 7 Days"</h5>
                            <div class="d-flex align-items-end justify-content-between week-chart">
                                {move || {
                                    let days = week.get();
                                    let max = days.iter().map(|d| d.count).max().unwrap_or(0);
                                    days.into_iter()
                                        .map(|d: DayCount| view! {
                                            <div class="week-chart-col text-center" title=format!("{}: {}", d.display_date(), d.count)>
                                                <div class="week-chart-bar bg-primary" style=bar_style("height", d.count, max)></div>
                                                <small class="text-muted">{d.day_name()}</small>
                                            </div>
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
