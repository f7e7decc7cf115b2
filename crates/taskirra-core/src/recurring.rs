//! Recurring Task Generator
//!
//! When a recurring task is completed, a successor occurrence is produced
//! with the due date moved forward by the task's frequency rule. The rule
//! itself lives on the task (`recurring`); nothing else is persisted.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::clock::IdGenerator;
use crate::dates::add_months_overflowing;
use crate::domain::{Frequency, Status, Task};

/// Next due date for a recurring task, `None` without a rule or due date
pub fn generate_next_occurrence(task: &Task) -> Option<NaiveDate> {
    let rule = task.recurring.as_ref()?;
    let due = task.due_date?;
    let interval = rule.effective_interval();

    match rule.freq {
        Frequency::Daily => due.checked_add_days(Days::new(interval as u64)),
        Frequency::Weekly => due.checked_add_days(Days::new(7 * interval as u64)),
        Frequency::Monthly => add_months_overflowing(due, interval),
    }
}

/// Completed recurring tasks whose next occurrence can be computed
pub fn should_generate_next(task: &Task) -> bool {
    task.recurring.is_some() && task.status == Status::Done && generate_next_occurrence(task).is_some()
}

/// Successor of `original`: fresh id, back to todo, due on the next occurrence
pub fn create_recurring_task(original: &Task, id: String, now: DateTime<Utc>) -> Option<Task> {
    let next_date = generate_next_occurrence(original)?;

    let mut next = original.clone();
    next.id = id;
    next.status = Status::Todo;
    next.due_date = Some(next_date);
    next.order = original.order + 1;
    next.created_at = Some(now);
    next.updated_at = Some(now);
    if let Some(rule) = next.recurring.as_mut() {
        rule.next_date = Some(next_date);
    }
    Some(next)
}

/// A pending todo with this title and due date already exists
///
/// Matching is by title, due date and todo status only, so two unrelated
/// recurring tasks that share a title suppress each other.
fn occurrence_exists(tasks: &[Task], candidate: &Task) -> bool {
    tasks.iter().any(|t| {
        t.title == candidate.title && t.due_date == candidate.due_date && t.status == Status::Todo
    })
}

/// Sweep the list and build every missing successor occurrence.
///
/// Returned tasks are meant to be appended to the list. Only the tasks
/// already in `tasks` are checked for duplicates.
pub fn collect_due_occurrences(tasks: &[Task], ids: &IdGenerator, now: DateTime<Utc>) -> Vec<Task> {
    let mut created: Vec<Task> = Vec::new();

    for task in tasks.iter().filter(|t| should_generate_next(t)) {
        let Some(next) = create_recurring_task(task, ids.next_id(now), now) else {
            continue;
        };
        if occurrence_exists(tasks, &next) {
            continue;
        }
        log::debug!("recurring: '{}' next due {:?}", next.title, next.due_date);
        created.push(next);
    }

    created
}
