use serde::{Deserialize, Serialize};

use crate::id::make_id;
use crate::task::TaskId;

pub type ListId = String;

pub const DEFAULT_LIST_TITLE: &str = "New List";

/// An ordered column. `task_ids` is the display order, top to bottom;
/// entries are unique and each one keys a task in the board map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub task_ids: Vec<TaskId>,
}

impl List {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: make_id("list"),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Rename to the trimmed text; empty or whitespace-only input keeps
    /// the previous title.
    pub fn rename(&mut self, new_title: &str) {
        let trimmed = new_title.trim();
        if !trimmed.is_empty() {
            self.title = trimmed.to_string();
        }
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }

    pub fn index_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    /// Insert at `index` clamped to the current sequence bounds.
    pub fn insert_clamped(&mut self, index: usize, task_id: TaskId) {
        let index = index.min(self.task_ids.len());
        self.task_ids.insert(index, task_id);
    }

    /// Remove the id if present, returning its old position.
    pub fn remove(&mut self, task_id: &str) -> Option<usize> {
        let index = self.index_of(task_id)?;
        self.task_ids.remove(index);
        Some(index)
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}
