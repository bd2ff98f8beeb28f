use crate::board::Board;
use crate::list::List;
use crate::task::Task;

/// One rendered column: the list plus its tasks in display order.
///
/// A pure projection over (lists, tasks); ids that no longer resolve to a
/// task record are skipped rather than rendered as holes.
#[derive(Debug)]
pub struct ListView<'a> {
    pub list: &'a List,
    pub tasks: Vec<&'a Task>,
}

impl Board {
    /// Project every list into its ordered column of full task records.
    pub fn views(&self) -> Vec<ListView<'_>> {
        self.lists
            .iter()
            .map(|list| ListView {
                list,
                tasks: list
                    .task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect(),
            })
            .collect()
    }
}
