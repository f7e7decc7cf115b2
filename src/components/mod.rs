//! UI Components
//!
//! Reusable Leptos components.

mod analytics_view;
mod calendar_view;
mod dashboard;
mod delete_confirm_button;
mod header;
mod projects_view;
mod sidebar;
mod subtask_list;
mod tab_bar;
mod task_form;
mod task_item;
mod task_list;
mod toast;

pub use analytics_view::AnalyticsView;
pub use calendar_view::CalendarView;
pub use dashboard::DashboardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use header::Header;
pub use projects_view::ProjectsView;
pub use sidebar::Sidebar;
pub use subtask_list::SubtaskList;
pub use tab_bar::TabBar;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
pub use task_list::TaskList;
pub use toast::Toast;
