use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::list::{List, DEFAULT_LIST_TITLE};
use crate::task::{Task, TaskForm, TaskId, TaskIntent};

/// The aggregate root: ordered columns plus a normalized task map.
///
/// All mutation goes through `&mut self` methods, so no caller can hold a
/// stale alias while an operation is in flight. Unknown ids are silent
/// no-ops throughout; references only go stale within the same session,
/// and the worst outcome of acting on one is nothing happening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    pub lists: Vec<List>,
    pub tasks: HashMap<TaskId, Task>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seeded demo board shown when a fresh session starts.
    pub fn sample() -> Self {
        let mut board = Self::new();
        board.lists = vec![
            List::new("To Do"),
            List::new("In Progress"),
            List::new("Done"),
        ];
        let today = Utc::now().date_naive();
        let seeds = [
            (
                "Set up project structure",
                "Initialize repo, linting, and base UI.",
                1,
                crate::Priority::High,
            ),
            (
                "Create board components",
                "List, card, and board with drag-and-drop.",
                2,
                crate::Priority::Medium,
            ),
            (
                "Polish styles",
                "Apply design tokens and micro-interactions.",
                3,
                crate::Priority::Low,
            ),
        ];
        for (title, description, days, priority) in seeds {
            let due = (today + Duration::days(days)).format("%Y-%m-%d").to_string();
            if let Some(form) = TaskForm::new(title, description, &due, priority) {
                let target = board.lists[0].id.clone();
                board.create_task(&target, form);
            }
        }
        board
    }

    // --- lists ---

    /// Append a new empty list with the default title.
    pub fn add_list(&mut self) -> &List {
        self.lists.push(List::new(DEFAULT_LIST_TITLE));
        self.lists.last().expect("list just pushed")
    }

    pub fn rename_list(&mut self, list_id: &str, new_title: &str) {
        if let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) {
            list.rename(new_title);
        }
    }

    /// Remove the list and every task it referenced.
    pub fn delete_list(&mut self, list_id: &str) {
        let Some(index) = self.lists.iter().position(|l| l.id == list_id) else {
            return;
        };
        let list = self.lists.remove(index);
        for task_id in &list.task_ids {
            self.tasks.remove(task_id);
        }
    }

    // --- tasks ---

    /// Store a new task and append it to the target list. The record is
    /// kept even when the target list has vanished; it is simply left
    /// unattached, which the projection ignores.
    pub fn create_task(&mut self, target_list_id: &str, form: TaskForm) -> TaskId {
        let task = Task::new(form);
        let id = task.id.clone();
        self.tasks.insert(id.clone(), task);
        if let Some(list) = self.lists.iter_mut().find(|l| l.id == target_list_id) {
            list.task_ids.push(id.clone());
        }
        id
    }

    /// Replace the stored task's fields, keeping id and list membership.
    pub fn update_task(&mut self, task_id: &str, form: TaskForm) {
        if let Some(task) = self.tasks.get_mut(task_id) {
            task.apply(form);
        }
    }

    /// Remove the task record and strip its id from whichever list holds
    /// it. Membership is exclusive, but stripping scans every list so a
    /// board that somehow violated that still converges.
    pub fn delete_task(&mut self, task_id: &str) {
        self.tasks.remove(task_id);
        for list in &mut self.lists {
            list.task_ids.retain(|id| id != task_id);
        }
    }

    /// Route an editor submission.
    pub fn submit(&mut self, intent: TaskIntent) {
        match intent {
            TaskIntent::Create { list_id, form } => {
                self.create_task(&list_id, form);
            }
            TaskIntent::Update { task_id, form } => {
                self.update_task(&task_id, form);
            }
        }
    }

    // --- reordering ---

    /// Relocate `task_id` to `destination_index` within its own list.
    /// The index is interpreted against the pre-removal sequence, so
    /// passing the list length appends.
    pub fn reorder_within_list(&mut self, list_id: &str, task_id: &str, destination_index: usize) {
        let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) else {
            return;
        };
        if list.remove(task_id).is_none() {
            return;
        }
        list.insert_clamped(destination_index, task_id.to_string());
    }

    /// Remove `task_id` from the source list and insert it into the
    /// destination. `None` for the index means the target position could
    /// not be resolved; the task is appended.
    pub fn move_across_lists(
        &mut self,
        task_id: &str,
        source_list_id: &str,
        destination_list_id: &str,
        destination_index: Option<usize>,
    ) {
        if source_list_id == destination_list_id {
            return;
        }
        // Both ends must resolve before anything is touched.
        let Some(source) = self.lists.iter().position(|l| l.id == source_list_id) else {
            return;
        };
        let Some(destination) = self.lists.iter().position(|l| l.id == destination_list_id)
        else {
            return;
        };
        if self.lists[source].remove(task_id).is_none() {
            return;
        }
        let index = destination_index.unwrap_or(self.lists[destination].len());
        self.lists[destination].insert_clamped(index, task_id.to_string());
    }

    // --- reads ---

    pub fn find_list_by_task(&self, task_id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.contains(task_id))
    }

    pub fn get_list(&self, list_id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn get_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListId;
    use crate::Priority;

    fn titled(title: &str) -> TaskForm {
        TaskForm::titled(title).unwrap()
    }

    /// Build a board with one list per entry, each holding tasks with the
    /// given titles; returns (board, list ids, task ids per list).
    fn board_with(columns: &[&[&str]]) -> (Board, Vec<ListId>, Vec<Vec<TaskId>>) {
        let mut board = Board::new();
        let mut list_ids = Vec::new();
        let mut task_ids = Vec::new();
        for tasks in columns {
            let list_id = board.add_list().id.clone();
            let ids: Vec<TaskId> = tasks
                .iter()
                .map(|title| board.create_task(&list_id, titled(title)))
                .collect();
            list_ids.push(list_id);
            task_ids.push(ids);
        }
        (board, list_ids, task_ids)
    }

    /// Exclusivity and referential integrity over the whole board.
    fn assert_invariants(board: &Board) {
        let mut seen = std::collections::HashSet::new();
        for list in &board.lists {
            for task_id in &list.task_ids {
                assert!(
                    seen.insert(task_id.clone()),
                    "task {} appears in more than one list",
                    task_id
                );
                assert!(
                    board.tasks.contains_key(task_id),
                    "list {} references unknown task {}",
                    list.id,
                    task_id
                );
            }
        }
    }

    #[test]
    fn test_add_list_appends_with_default_title() {
        let mut board = Board::new();
        board.add_list();
        let id = board.add_list().id.clone();
        assert_eq!(board.lists.len(), 2);
        assert_eq!(board.lists[1].id, id);
        assert_eq!(board.lists[1].title, "New List");
        assert!(board.lists[1].is_empty());
    }

    #[test]
    fn test_rename_list_unknown_id_is_noop() {
        let (mut board, lists, _) = board_with(&[&[]]);
        board.rename_list("list_missing", "Ghost");
        assert_eq!(board.get_list(&lists[0]).unwrap().title, "New List");
    }

    #[test]
    fn test_rename_list_empty_input_keeps_title() {
        let (mut board, lists, _) = board_with(&[&[]]);
        board.rename_list(&lists[0], "Backlog");
        board.rename_list(&lists[0], "   ");
        assert_eq!(board.get_list(&lists[0]).unwrap().title, "Backlog");
    }

    #[test]
    fn test_delete_list_cascades_exactly_its_tasks() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"], &["x"]]);
        board.delete_list(&lists[0]);
        assert_eq!(board.lists.len(), 1);
        for id in &tasks[0] {
            assert!(!board.tasks.contains_key(id));
        }
        // the other list's task survives
        assert!(board.tasks.contains_key(&tasks[1][0]));
        assert_invariants(&board);
    }

    #[test]
    fn test_delete_list_unknown_id_is_noop() {
        let (mut board, _, _) = board_with(&[&["a"]]);
        board.delete_list("list_missing");
        assert_eq!(board.lists.len(), 1);
        assert_eq!(board.tasks.len(), 1);
    }

    #[test]
    fn test_create_task_appends_to_target() {
        let (mut board, lists, _) = board_with(&[&["a"]]);
        let id = board.create_task(&lists[0], titled("T"));
        let list = board.get_list(&lists[0]).unwrap();
        assert_eq!(list.task_ids.last(), Some(&id));
        let task = board.get_task(&id).unwrap();
        assert_eq!(task.title, "T");
        assert_eq!(task.priority, Priority::Medium);
        assert_invariants(&board);
    }

    #[test]
    fn test_create_task_vanished_list_stores_unattached() {
        let mut board = Board::new();
        let id = board.create_task("list_gone", titled("orphan"));
        assert!(board.tasks.contains_key(&id));
        assert!(board.find_list_by_task(&id).is_none());
    }

    #[test]
    fn test_update_task_preserves_membership() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"]]);
        board.update_task(
            &tasks[0][0],
            TaskForm::new("renamed", "d", "2026-03-04", Priority::High).unwrap(),
        );
        let task = board.get_task(&tasks[0][0]).unwrap();
        assert_eq!(task.title, "renamed");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(
            board.find_list_by_task(&tasks[0][0]).map(|l| l.id.clone()),
            Some(lists[0].clone())
        );
        assert_eq!(board.get_list(&lists[0]).unwrap().index_of(&tasks[0][0]), Some(0));
    }

    #[test]
    fn test_update_task_unknown_id_is_noop() {
        let (mut board, _, _) = board_with(&[&["a"]]);
        board.update_task("task_missing", titled("x"));
        assert_eq!(board.tasks.len(), 1);
    }

    #[test]
    fn test_delete_task_strips_list_membership() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b", "c"]]);
        board.delete_task(&tasks[0][1]);
        assert!(!board.tasks.contains_key(&tasks[0][1]));
        let list = board.get_list(&lists[0]).unwrap();
        assert_eq!(list.task_ids, vec![tasks[0][0].clone(), tasks[0][2].clone()]);
        assert_invariants(&board);
    }

    #[test]
    fn test_reorder_within_list_to_front() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b", "c"]]);
        board.reorder_within_list(&lists[0], &tasks[0][2], 0);
        let list = board.get_list(&lists[0]).unwrap();
        assert_eq!(
            list.task_ids,
            vec![tasks[0][2].clone(), tasks[0][0].clone(), tasks[0][1].clone()]
        );
    }

    #[test]
    fn test_reorder_within_list_is_a_permutation_at_every_index() {
        let (board, lists, tasks) = board_with(&[&["a", "b", "c", "d"]]);
        for moved in &tasks[0] {
            for index in 0..=tasks[0].len() {
                let mut b = board.clone();
                b.reorder_within_list(&lists[0], moved, index);
                let after = &b.get_list(&lists[0]).unwrap().task_ids;
                assert_eq!(after.len(), tasks[0].len());
                let mut sorted_after = after.clone();
                sorted_after.sort();
                let mut sorted_before = tasks[0].clone();
                sorted_before.sort();
                assert_eq!(sorted_after, sorted_before);
                assert_invariants(&b);
            }
        }
    }

    #[test]
    fn test_reorder_within_list_unknown_task_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"]]);
        board.reorder_within_list(&lists[0], "task_missing", 0);
        assert_eq!(board.get_list(&lists[0]).unwrap().task_ids, tasks[0]);
    }

    #[test]
    fn test_move_across_lists_at_index() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"], &["x", "y"]]);
        board.move_across_lists(&tasks[0][1], &lists[0], &lists[1], Some(0));
        assert_eq!(board.get_list(&lists[0]).unwrap().task_ids, vec![tasks[0][0].clone()]);
        assert_eq!(
            board.get_list(&lists[1]).unwrap().task_ids,
            vec![tasks[0][1].clone(), tasks[1][0].clone(), tasks[1][1].clone()]
        );
        assert_invariants(&board);
    }

    #[test]
    fn test_move_across_lists_unresolved_index_appends() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"], &["x"]]);
        board.move_across_lists(&tasks[0][0], &lists[0], &lists[1], None);
        assert_eq!(board.get_list(&lists[0]).unwrap().task_ids, vec![tasks[0][1].clone()]);
        assert_eq!(
            board.get_list(&lists[1]).unwrap().task_ids,
            vec![tasks[1][0].clone(), tasks[0][0].clone()]
        );
    }

    #[test]
    fn test_move_across_lists_missing_destination_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a"]]);
        board.move_across_lists(&tasks[0][0], &lists[0], "list_missing", None);
        assert_eq!(board.get_list(&lists[0]).unwrap().task_ids, tasks[0]);
    }

    #[test]
    fn test_move_across_lists_task_not_in_source_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a"], &["x"]]);
        board.move_across_lists(&tasks[1][0], &lists[0], &lists[1], Some(0));
        assert_eq!(board.get_list(&lists[1]).unwrap().task_ids, tasks[1]);
        assert_invariants(&board);
    }

    #[test]
    fn test_submit_create_and_update() {
        let (mut board, lists, _) = board_with(&[&[]]);
        board.submit(TaskIntent::Create {
            list_id: lists[0].clone(),
            form: titled("created"),
        });
        let id = board.get_list(&lists[0]).unwrap().task_ids[0].clone();
        board.submit(TaskIntent::Update {
            task_id: id.clone(),
            form: titled("edited"),
        });
        assert_eq!(board.get_task(&id).unwrap().title, "edited");
    }

    #[test]
    fn test_exclusivity_survives_an_operation_mix() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b", "c"], &["x"]]);
        board.move_across_lists(&tasks[0][0], &lists[0], &lists[1], Some(0));
        board.reorder_within_list(&lists[1], &tasks[1][0], 0);
        board.delete_task(&tasks[0][1]);
        board.create_task(&lists[1], titled("fresh"));
        board.rename_list(&lists[0], "Now");
        assert_invariants(&board);
    }

    #[test]
    fn test_sample_board_shape() {
        let board = Board::sample();
        assert_eq!(board.lists.len(), 3);
        assert_eq!(board.lists[0].len(), 3);
        assert!(board.lists[1].is_empty());
        assert_eq!(board.tasks.len(), 3);
        assert_invariants(&board);
        for task in board.tasks.values() {
            assert!(task.due_date.is_some());
        }
    }
}
