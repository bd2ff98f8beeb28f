use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::make_id;
use crate::list::ListId;

pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn cycle(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A work item. The id is immutable after creation; everything else is
/// replaced wholesale by edit submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl Task {
    pub fn new(form: TaskForm) -> Self {
        Self {
            id: make_id("task"),
            title: form.title,
            description: form.description,
            due_date: form.due_date,
            priority: form.priority,
        }
    }

    /// Apply an edit submission, preserving the id.
    pub fn apply(&mut self, form: TaskForm) {
        self.title = form.title;
        self.description = form.description;
        self.due_date = form.due_date;
        self.priority = form.priority;
    }
}

/// Normalized editor output: title trimmed and non-empty, description
/// trimmed with empty collapsed to absent, due date already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl TaskForm {
    /// Build a form from raw field text. Returns `None` when the trimmed
    /// title is empty, in which case submission is suppressed.
    pub fn new(title: &str, description: &str, due_date: &str, priority: Priority) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let description = description.trim();
        Some(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            due_date: parse_due_date(due_date),
            priority,
        })
    }

    pub fn titled(title: &str) -> Option<Self> {
        Self::new(title, "", "", Priority::default())
    }
}

/// Unparseable input is treated as "no due date" rather than an error;
/// validation failures never surface past the editor boundary.
fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// What an editor submission asks the board to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    Create { list_id: ListId, form: TaskForm },
    Update { task_id: TaskId, form: TaskForm },
}
