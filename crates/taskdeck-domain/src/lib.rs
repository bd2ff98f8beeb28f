pub mod board;
pub mod drag;
pub mod id;
pub mod list;
pub mod task;
pub mod view;

pub use board::Board;
pub use drag::{DragState, DropTarget};
pub use id::make_id;
pub use list::{List, ListId};
pub use task::{Priority, Task, TaskForm, TaskId, TaskIntent};
pub use view::ListView;
