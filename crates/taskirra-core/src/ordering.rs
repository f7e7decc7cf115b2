//! Ordered Task List
//!
//! Display order lives in each task's `order` field. Every structural change
//! goes through [`OrderedList`], which reassigns `order` densely as 1..N.

use crate::domain::{DomainError, DomainResult, Task};

/// A task sequence whose `order` fields mirror list positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedList {
    tasks: Vec<Task>,
}

impl OrderedList {
    /// Wrap tasks as-is, without touching `order`
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Tasks sorted by their current `order` (stable for ties)
    pub fn sorted(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|t| t.order);
        Self { tasks }
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_vec(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Assign `order = 1..N` following list position
    pub fn reindex(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index as i64 + 1;
        }
    }

    /// Move the task at `from` to position `to`, then reindex
    pub fn move_item(&mut self, from: usize, to: usize) -> DomainResult<()> {
        let len = self.tasks.len();
        if from >= len || to >= len {
            return Err(DomainError::InvalidInput(format!(
                "move {} -> {} out of range for {} tasks",
                from, to, len
            )));
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.reindex();
        Ok(())
    }

    /// Rearrange to follow `ids`, then reindex.
    ///
    /// `ids` must name every task exactly once.
    pub fn reorder_by_ids(&mut self, ids: &[String]) -> DomainResult<()> {
        if ids.len() != self.tasks.len() {
            return Err(DomainError::InvalidInput(format!(
                "reorder expects {} ids, got {}",
                self.tasks.len(),
                ids.len()
            )));
        }
        let mut positions = Vec::with_capacity(ids.len());
        let mut taken = vec![false; self.tasks.len()];
        for id in ids {
            let pos = self
                .tasks
                .iter()
                .position(|t| &t.id == id)
                .filter(|&pos| !taken[pos])
                .ok_or_else(|| DomainError::InvalidInput(format!("unknown or repeated task id {}", id)))?;
            taken[pos] = true;
            positions.push(pos);
        }

        let mut slots: Vec<Option<Task>> = std::mem::take(&mut self.tasks).into_iter().map(Some).collect();
        self.tasks = positions.into_iter().filter_map(|pos| slots[pos].take()).collect();
        self.reindex();
        Ok(())
    }

    /// Put previously removed tasks back and re-sort by `order`.
    ///
    /// Used to undo deletes: restored tasks keep their old `order`, so they
    /// land at their original relative position.
    pub fn restore(&mut self, removed: Vec<Task>) {
        self.tasks.extend(removed);
        self.tasks.sort_by_key(|t| t.order);
    }
}

impl From<Vec<Task>> for OrderedList {
    fn from(tasks: Vec<Task>) -> Self {
        Self::new(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> OrderedList {
        let tasks = (1..=n)
            .map(|i| {
                let mut t = Task::new(i.to_string(), format!("Task {}", i));
                t.order = (i as i64) * 10;
                t
            })
            .collect();
        OrderedList::new(tasks)
    }

    fn orders(list: &OrderedList) -> Vec<i64> {
        list.as_slice().iter().map(|t| t.order).collect()
    }

    fn ids(list: &OrderedList) -> Vec<&str> {
        list.as_slice().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_reindex_is_dense() {
        let mut l = list(5);
        l.reindex();
        assert_eq!(orders(&l), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_move_item() {
        let mut l = list(4);
        l.move_item(0, 2).unwrap();
        assert_eq!(ids(&l), vec!["2", "3", "1", "4"]);
        assert_eq!(orders(&l), vec![1, 2, 3, 4]);

        assert!(l.move_item(0, 4).is_err());
    }

    #[test]
    fn test_reorder_by_ids() {
        let mut l = list(3);
        let wanted: Vec<String> = ["3", "1", "2"].iter().map(|s| s.to_string()).collect();
        l.reorder_by_ids(&wanted).unwrap();
        assert_eq!(ids(&l), vec!["3", "1", "2"]);
        assert_eq!(orders(&l), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_rejects_bad_ids() {
        let mut l = list(3);
        let dup: Vec<String> = ["1", "1", "2"].iter().map(|s| s.to_string()).collect();
        assert!(l.reorder_by_ids(&dup).is_err());
        assert_eq!(l.len(), 3);

        let short: Vec<String> = vec!["1".to_string()];
        assert!(l.reorder_by_ids(&short).is_err());
    }

    #[test]
    fn test_restore_returns_to_original_position() {
        let mut l = list(4);
        l.reindex();
        let removed = l.as_slice()[1].clone();
        let mut remaining = l.clone().into_vec();
        remaining.retain(|t| t.id != removed.id);

        let mut after = OrderedList::new(remaining);
        after.restore(vec![removed]);
        assert_eq!(ids(&after), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sorted() {
        let mut tasks = list(3).into_vec();
        tasks.reverse();
        assert_eq!(ids(&OrderedList::sorted(tasks)), vec!["1", "2", "3"]);
    }
}
