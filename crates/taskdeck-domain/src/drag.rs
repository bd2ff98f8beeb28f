use crate::board::Board;
use crate::list::ListId;
use crate::task::TaskId;

/// What the pointer (or keyboard) is over when a drag ends: a specific
/// task, or the list container itself, which means "append here".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Task(TaskId),
    Container(ListId),
}

/// The drag gesture state machine: Idle, or holding a lifted task.
///
/// The interpreter works purely on discrete identifiers; whatever surface
/// produces a start and an end event drives the same reorder logic, with
/// no pixel geometry involved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: TaskId,
    },
}

impl DragState {
    /// Lift a task. Unknown ids are ignored and the state stays Idle;
    /// nothing on the board changes until the drop.
    pub fn start(&mut self, board: &Board, task_id: &str) {
        if board.get_task(task_id).is_some() {
            *self = DragState::Dragging {
                task_id: task_id.to_string(),
            };
        }
    }

    /// Drop the lifted task on `over`, translating the gesture into a
    /// board mutation. Whatever happens, the state returns to Idle.
    pub fn finish(&mut self, board: &mut Board, over: Option<DropTarget>) {
        let DragState::Dragging { task_id } = std::mem::take(self) else {
            return;
        };
        let Some(over) = over else {
            return;
        };
        // A task deleted mid-drag no longer belongs to any list; bail out.
        let Some(source_id) = board.find_list_by_task(&task_id).map(|l| l.id.clone()) else {
            return;
        };
        let destination_id = match &over {
            DropTarget::Container(list_id) => {
                if board.get_list(list_id).is_none() {
                    return;
                }
                list_id.clone()
            }
            DropTarget::Task(over_id) => {
                let Some(list) = board.find_list_by_task(over_id) else {
                    return;
                };
                list.id.clone()
            }
        };

        if source_id == destination_id {
            let Some(list) = board.get_list(&destination_id) else {
                return;
            };
            let index = match &over {
                DropTarget::Container(_) => list.len(),
                DropTarget::Task(over_id) => match list.index_of(over_id) {
                    Some(index) => index,
                    None => return,
                },
            };
            board.reorder_within_list(&destination_id, &task_id, index);
        } else {
            let Some(destination) = board.get_list(&destination_id) else {
                return;
            };
            let index = match &over {
                DropTarget::Container(_) => destination.len(),
                // Falls back to the front when the over-task is missing
                // from the destination, matching the original gesture
                // handling (`max(indexOf, 0)`).
                DropTarget::Task(over_id) => destination.index_of(over_id).unwrap_or(0),
            };
            board.move_across_lists(&task_id, &source_id, &destination_id, Some(index));
        }
    }

    /// Abort the gesture without mutating anything.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    /// The lifted task, for the presentation layer to highlight.
    pub fn active(&self) -> Option<&str> {
        match self {
            DragState::Dragging { task_id } => Some(task_id),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskForm;

    fn board_with(columns: &[&[&str]]) -> (Board, Vec<ListId>, Vec<Vec<TaskId>>) {
        let mut board = Board::new();
        let mut list_ids = Vec::new();
        let mut task_ids = Vec::new();
        for tasks in columns {
            let list_id = board.add_list().id.clone();
            let ids = tasks
                .iter()
                .map(|t| board.create_task(&list_id, TaskForm::titled(t).unwrap()))
                .collect();
            list_ids.push(list_id);
            task_ids.push(ids);
        }
        (board, list_ids, task_ids)
    }

    fn order(board: &Board, list_id: &str) -> Vec<TaskId> {
        board.get_list(list_id).unwrap().task_ids.clone()
    }

    #[test]
    fn test_start_records_active_task() {
        let (board, _, tasks) = board_with(&[&["a"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][0]);
        assert_eq!(drag.active(), Some(tasks[0][0].as_str()));
    }

    #[test]
    fn test_start_unknown_task_stays_idle() {
        let (board, _, _) = board_with(&[&["a"]]);
        let mut drag = DragState::default();
        drag.start(&board, "task_missing");
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_cancel_clears_without_mutation() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][0]);
        drag.cancel();
        assert_eq!(drag, DragState::Idle);
        drag.finish(&mut board, Some(DropTarget::Container(lists[0].clone())));
        assert_eq!(order(&board, &lists[0]), tasks[0]);
    }

    #[test]
    fn test_drop_with_no_target_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][1]);
        drag.finish(&mut board, None);
        assert_eq!(drag, DragState::Idle);
        assert_eq!(order(&board, &lists[0]), tasks[0]);
    }

    #[test]
    fn test_same_list_reorder_onto_task() {
        // ["a","b","c"], drop "c" on "a" -> ["c","a","b"]
        let (mut board, lists, tasks) = board_with(&[&["a", "b", "c"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][2]);
        drag.finish(&mut board, Some(DropTarget::Task(tasks[0][0].clone())));
        assert_eq!(
            order(&board, &lists[0]),
            vec![tasks[0][2].clone(), tasks[0][0].clone(), tasks[0][1].clone()]
        );
    }

    #[test]
    fn test_same_list_drop_on_container_appends() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b", "c"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][0]);
        drag.finish(&mut board, Some(DropTarget::Container(lists[0].clone())));
        assert_eq!(
            order(&board, &lists[0]),
            vec![tasks[0][1].clone(), tasks[0][2].clone(), tasks[0][0].clone()]
        );
    }

    #[test]
    fn test_cross_list_drop_on_container_appends() {
        // source ["a","b"], destination ["x"]; drop "a" on the container
        let (mut board, lists, tasks) = board_with(&[&["a", "b"], &["x"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][0]);
        drag.finish(&mut board, Some(DropTarget::Container(lists[1].clone())));
        assert_eq!(order(&board, &lists[0]), vec![tasks[0][1].clone()]);
        assert_eq!(
            order(&board, &lists[1]),
            vec![tasks[1][0].clone(), tasks[0][0].clone()]
        );
    }

    #[test]
    fn test_cross_list_drop_onto_task_inserts_before_it() {
        // source ["a","b"], destination ["x","y"]; drop "b" on "x"
        let (mut board, lists, tasks) = board_with(&[&["a", "b"], &["x", "y"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][1]);
        drag.finish(&mut board, Some(DropTarget::Task(tasks[1][0].clone())));
        assert_eq!(order(&board, &lists[0]), vec![tasks[0][0].clone()]);
        assert_eq!(
            order(&board, &lists[1]),
            vec![tasks[0][1].clone(), tasks[1][0].clone(), tasks[1][1].clone()]
        );
    }

    #[test]
    fn test_task_deleted_mid_drag_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"], &["x"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][0]);
        board.delete_task(&tasks[0][0]);
        let before = board.clone();
        drag.finish(&mut board, Some(DropTarget::Container(lists[1].clone())));
        assert_eq!(drag, DragState::Idle);
        assert_eq!(order(&board, &lists[0]), order(&before, &lists[0]));
        assert_eq!(order(&board, &lists[1]), order(&before, &lists[1]));
    }

    #[test]
    fn test_over_task_resolving_nowhere_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a", "b"]]);
        let mut drag = DragState::default();
        drag.start(&board, &tasks[0][0]);
        drag.finish(&mut board, Some(DropTarget::Task("task_missing".to_string())));
        assert_eq!(order(&board, &lists[0]), tasks[0]);
    }

    #[test]
    fn test_finish_while_idle_is_noop() {
        let (mut board, lists, tasks) = board_with(&[&["a"]]);
        let mut drag = DragState::default();
        drag.finish(&mut board, Some(DropTarget::Container(lists[0].clone())));
        assert_eq!(order(&board, &lists[0]), tasks[0]);
    }
}
