//! Analytics Component
//!
//! Completion heatmap, streaks, productivity patterns and breakdowns.

use chrono::Local;
use leptos::prelude::*;

use taskirra_core::analytics::{
    average_completion_days, heatmap, priority_completion, productivity_by_time, productivity_by_weekday, streaks,
    tag_frequency, weekday_name, TimeOfDay,
};

use crate::store::{use_app_store, AppStateStoreFields};

fn time_of_day_name(bucket: TimeOfDay) -> &'static str {
    match bucket {
        TimeOfDay::Morning => "Morning",
        TimeOfDay::Afternoon => "Afternoon",
        TimeOfDay::Evening => "Evening",
        TimeOfDay::Night => "Night",
    }
}

fn percent_of(value: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        value * 100 / max
    }
}

/// Labelled horizontal bar
#[component]
fn BarRow(label: String, value: usize, max: usize, #[prop(optional)] detail: Option<String>) -> impl IntoView {
    view! {
        <div class="analytics-bar mb-2">
            <div class="d-flex justify-content-between">
                <small>{label}</small>
                <small class="text-muted">{detail.unwrap_or_else(|| value.to_string())}</small>
            </div>
            <div class="progress" style="height: 6px">
                <div class="progress-bar" style=format!("width: {}%", percent_of(value, max))></div>
            </div>
        </div>
    }
}

#[component]
pub fn AnalyticsView() -> impl IntoView {
    let store = use_app_store();

    let days = Memo::new(move |_| heatmap(&store.tasks().read(), &Local::now()));
    let streak = Memo::new(move |_| streaks(&days.get()));
    let by_weekday = Memo::new(move |_| productivity_by_weekday(&store.tasks().read(), &Local));
    let by_time = Memo::new(move |_| productivity_by_time(&store.tasks().read(), &Local));
    let tags = Memo::new(move |_| tag_frequency(&store.tasks().read()));
    let rates = Memo::new(move |_| priority_completion(&store.tasks().read()));
    let avg_days = Memo::new(move |_| average_completion_days(&store.tasks().read()));

    view! {
        <div class="analytics-view">
            <div class="view-header mb-4">
                <h2 class="view-title">"Analytics"</h2>
                <p class="text-muted">"Insights into your productivity patterns"</p>
            </div>

            <div class="row g-3 mb-4">
                <div class="col-md-3">
                    <div class="card stat-card h-100"><div class="card-body">
                        <div class="stat-icon text-warning"><i class="bi bi-fire"></i></div>
                        <div class="stat-value">{move || streak.get().current}</div>
                        <div class="stat-label text-muted">"Current Streak (days)"</div>
                    </div></div>
                </div>
                <div class="col-md-3">
                    <div class="card stat-card h-100"><div class="card-body">
                        <div class="stat-icon text-success"><i class="bi bi-trophy-fill"></i></div>
                        <div class="stat-value">{move || streak.get().best}</div>
                        <div class="stat-label text-muted">"Best Streak (days)"</div>
                    </div></div>
                </div>
                <div class="col-md-3">
                    <div class="card stat-card h-100"><div class="card-body">
                        <div class="stat-icon text-primary"><i class="bi bi-calendar-check"></i></div>
                        <div class="stat-value">
                            {move || {
                                let (day, count) = by_weekday.get().most_productive();
                                if count == 0 { "-".to_string() } else { weekday_name(day).to_string() }
                            }}
                        </div>
                        <div class="stat-label text-muted">"Most Productive Day"</div>
                    </div></div>
                </div>
                <div class="col-md-3">
                    <div class="card stat-card h-100"><div class="card-body">
                        <div class="stat-icon text-info"><i class="bi bi-clock-history"></i></div>
                        <div class="stat-value">
                            {move || {
                                let (bucket, count) = by_time.get().most_productive();
                                if count == 0 { "-".to_string() } else { time_of_day_name(bucket).to_string() }
                            }}
                        </div>
                        <div class="stat-label text-muted">"Most Productive Time"</div>
                    </div></div>
                </div>
            </div>

            <div class="card mb-4">
                <div class="card-body">
                    <h5 class="card-title">"Activity (last 90 days)"</h5>
                    <div class="heatmap">
                        {move || days.get().into_iter().map(|d| view! {
                            <div
                                class=format!("heatmap-cell intensity-{}", d.intensity())
                                title=format!("{}: {} completed", d.display_date(), d.count)
                            ></div>
                        }).collect_view()}
                    </div>
                    <div class="heatmap-legend d-flex align-items-center gap-1 mt-2">
                        <small class="text-muted">"Less"</small>
                        {(0..=4u8).map(|i| view! { <div class=format!("heatmap-cell intensity-{}", i)></div> }).collect_view()}
                        <small class="text-muted">"More"</small>
                    </div>
                </div>
            </div>

            <div class="row g-3">
                <div class="col-lg-6">
                    <div class="card h-100"><div class="card-body">
                        <h5 class="card-title">"Completions by Weekday"</h5>
                        {move || {
                            let stats = by_weekday.get();
                            let max = stats.counts.iter().copied().max().unwrap_or(0);
                            stats.entries()
                                .map(|(day, count)| view! { <BarRow label=weekday_name(day).to_string() value=count max=max /> })
                                .collect_view()
                        }}
                    </div></div>
                </div>
                <div class="col-lg-6">
                    <div class="card h-100"><div class="card-body">
                        <h5 class="card-title">"Completions by Time of Day"</h5>
                        {move || {
                            let stats = by_time.get();
                            let max = stats.counts.iter().copied().max().unwrap_or(0);
                            TimeOfDay::ALL.into_iter()
                                .map(|bucket| {
                                    let label = format!("{} ({})", time_of_day_name(bucket), bucket.label());
                                    view! { <BarRow label=label value=stats.count(bucket) max=max /> }
                                })
                                .collect_view()
                        }}
                    </div></div>
                </div>
                <div class="col-lg-6">
                    <div class="card h-100"><div class="card-body">
                        <h5 class="card-title">"Top Tags"</h5>
                        <Show
                            when=move || !tags.read().is_empty()
                            fallback=|| view! { <p class="text-muted">"No tags yet"</p> }
                        >
                            {move || {
                                let ranked = tags.get();
                                let max = ranked.first().map(|(_, c)| *c).unwrap_or(0);
                                ranked.into_iter()
                                    .map(|(tag, count)| view! { <BarRow label=format!("#{}", tag) value=count max=max /> })
                                    .collect_view()
                            }}
                        </Show>
                    </div></div>
                </div>
                <div class="col-lg-6">
                    <div class="card h-100"><div class="card-body">
                        <h5 class="card-title">"Completion by Priority"</h5>
                        {move || rates.get().into_iter().map(|rate| {
                            let detail = format!("{}/{} ({}%)", rate.completed, rate.total, rate.percent());
                            view! {
                                <BarRow label=rate.priority.label().to_string() value=rate.percent() as usize max=100 detail=detail />
                            }
                        }).collect_view()}
                        <hr />
                        <div class="d-flex justify-content-between">
                            <span>"Average time to complete"</span>
                            <strong>
                                {move || match avg_days.get() {
                                    1 => "1 day".to_string(),
                                    n => format!("{} days", n),
                                }}
                            </strong>
                        </div>
                    </div></div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(3, 0), 0);
        assert_eq!(percent_of(3, 6), 50);
    }
}
