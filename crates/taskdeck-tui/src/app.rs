use std::io;

use anyhow::Result;
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use taskdeck_auth::User;
use taskdeck_core::InputState;
use taskdeck_domain::{
    Board, DragState, DropTarget, List, ListId, Priority, TaskForm, TaskId, TaskIntent,
};

use crate::events::{Event, EventHandler};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Board,
    TaskForm,
    RenameList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    DueDate,
    Priority,
}

impl Default for FormField {
    fn default() -> Self {
        FormField::Title
    }
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::DueDate,
            FormField::DueDate => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::DueDate => FormField::Description,
            FormField::Priority => FormField::DueDate,
        }
    }
}

/// The modal task editor: raw field buffers plus which field has focus.
/// Normalization happens only at submit, through `TaskForm::new`.
#[derive(Debug, Default)]
pub struct FormState {
    pub editing: Option<TaskId>,
    pub target_list: Option<ListId>,
    pub field: FormField,
    pub title: InputState,
    pub description: InputState,
    pub due_date: InputState,
    pub priority: Priority,
}

impl FormState {
    pub fn create(target_list: ListId) -> Self {
        Self {
            target_list: Some(target_list),
            ..Default::default()
        }
    }

    pub fn edit(task: &taskdeck_domain::Task) -> Self {
        Self {
            editing: Some(task.id.clone()),
            target_list: None,
            field: FormField::Title,
            title: InputState::with_text(&task.title),
            description: InputState::with_text(task.description.as_deref().unwrap_or("")),
            due_date: InputState::with_text(
                &task
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            priority: task.priority,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn active_input(&mut self) -> Option<&mut InputState> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority => None,
        }
    }

    /// Normalize the buffers into an intent; `None` when the title is
    /// empty, which suppresses the submission.
    pub fn intent(&self) -> Option<TaskIntent> {
        let form = TaskForm::new(
            &self.title.text(),
            &self.description.text(),
            &self.due_date.text(),
            self.priority,
        )?;
        match &self.editing {
            Some(task_id) => Some(TaskIntent::Update {
                task_id: task_id.clone(),
                form,
            }),
            None => Some(TaskIntent::Create {
                list_id: self.target_list.clone()?,
                form,
            }),
        }
    }
}

/// Board position: which column, and which task within it. `task: None`
/// on a non-empty list means "below the tasks" — the container itself,
/// so a drop there appends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub list: usize,
    pub task: Option<usize>,
}

pub struct App {
    pub should_quit: bool,
    pub mode: Mode,
    pub board: Board,
    pub drag: DragState,
    pub cursor: Cursor,
    pub form: FormState,
    pub rename: InputState,
    pub user: Option<User>,
    pub status: Option<String>,
}

impl App {
    pub fn new(user: Option<User>) -> Self {
        Self::with_board(Board::sample(), user)
    }

    pub fn with_board(board: Board, user: Option<User>) -> Self {
        let cursor = Cursor {
            list: 0,
            task: board.lists.first().and_then(|l| (!l.is_empty()).then_some(0)),
        };
        Self {
            should_quit: false,
            mode: Mode::Board,
            board,
            drag: DragState::default(),
            cursor,
            form: FormState::default(),
            rename: InputState::new(),
            user,
            status: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        let mut events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;
            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::Resize) | Some(Event::Tick) => {}
                None => break,
            }
        }

        events.stop();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // --- cursor ---

    pub fn current_list(&self) -> Option<&List> {
        self.board.lists.get(self.cursor.list)
    }

    pub fn task_under_cursor(&self) -> Option<TaskId> {
        let list = self.current_list()?;
        let index = self.cursor.task?;
        list.task_ids.get(index).cloned()
    }

    /// Where a drop right now would land: the hovered task, or the
    /// hovered column's container when below the tasks or on an empty
    /// column.
    pub fn hover_target(&self) -> Option<DropTarget> {
        let list = self.current_list()?;
        match self.task_under_cursor() {
            Some(task_id) => Some(DropTarget::Task(task_id)),
            None => Some(DropTarget::Container(list.id.clone())),
        }
    }

    fn move_list(&mut self, delta: isize) {
        if self.board.lists.is_empty() {
            return;
        }
        let last = self.board.lists.len() - 1;
        let next = self.cursor.list.saturating_add_signed(delta).min(last);
        self.cursor.list = next;
        let len = self.board.lists[next].len();
        self.cursor.task = if len == 0 {
            None
        } else {
            Some(self.cursor.task.unwrap_or(0).min(len - 1))
        };
    }

    fn move_task(&mut self, delta: isize) {
        let Some(list) = self.current_list() else {
            return;
        };
        let len = list.len();
        if len == 0 {
            self.cursor.task = None;
            return;
        }
        self.cursor.task = match (self.cursor.task, delta) {
            (Some(i), 1) if i + 1 < len => Some(i + 1),
            // Past the last task: hover the container itself.
            (Some(_), 1) => None,
            (Some(i), _) => Some(i.saturating_sub(1)),
            (None, -1) => Some(len - 1),
            (None, _) => None,
        };
    }

    /// Keep the cursor inside the board after a mutation.
    fn clamp_cursor(&mut self) {
        if self.board.lists.is_empty() {
            self.cursor = Cursor::default();
            return;
        }
        self.cursor.list = self.cursor.list.min(self.board.lists.len() - 1);
        let len = self.board.lists[self.cursor.list].len();
        self.cursor.task = match self.cursor.task {
            Some(i) if len > 0 => Some(i.min(len - 1)),
            Some(_) => None,
            None => None,
        };
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // --- key dispatch ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Board => self.handle_board_key(key),
            Mode::TaskForm => self.handle_form_key(key),
            Mode::RenameList => self.handle_rename_key(key),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Left | KeyCode::Char('h') => self.move_list(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_list(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_task(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_task(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.grab_or_drop(),
            KeyCode::Esc => {
                if self.drag.active().is_some() {
                    self.drag.cancel();
                    self.set_status("Drag cancelled");
                }
            }
            KeyCode::Char('n') => {
                if let Some(list) = self.current_list() {
                    self.form = FormState::create(list.id.clone());
                    self.mode = Mode::TaskForm;
                }
            }
            KeyCode::Char('e') => {
                if let Some(task) = self
                    .task_under_cursor()
                    .and_then(|id| self.board.get_task(&id))
                {
                    self.form = FormState::edit(task);
                    self.mode = Mode::TaskForm;
                }
            }
            KeyCode::Char('d') => {
                if let Some(task_id) = self.task_under_cursor() {
                    self.board.delete_task(&task_id);
                    self.clamp_cursor();
                    self.set_status("Task deleted");
                }
            }
            KeyCode::Char('N') => {
                self.board.add_list();
                self.cursor.list = self.board.lists.len() - 1;
                self.cursor.task = None;
                self.set_status("List created");
            }
            KeyCode::Char('r') => {
                if let Some(title) = self.current_list().map(|l| l.title.clone()) {
                    self.rename.set(&title);
                    self.mode = Mode::RenameList;
                }
            }
            KeyCode::Char('D') => {
                if let Some(list_id) = self.current_list().map(|l| l.id.clone()) {
                    self.board.delete_list(&list_id);
                    self.clamp_cursor();
                    self.set_status("List deleted");
                }
            }
            _ => {}
        }
    }

    /// Space toggles the gesture: lift the task under the cursor, or drop
    /// the lifted one onto the current hover target.
    fn grab_or_drop(&mut self) {
        if self.drag.active().is_some() {
            let over = self.hover_target();
            tracing::debug!(?over, "dropping task");
            self.drag.finish(&mut self.board, over);
            self.clamp_cursor();
            self.set_status("Task moved");
        } else if let Some(task_id) = self.task_under_cursor() {
            self.drag.start(&self.board, &task_id);
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Board;
            }
            KeyCode::Tab => self.form.field = self.form.field.next(),
            KeyCode::BackTab => self.form.field = self.form.field.prev(),
            KeyCode::Enter => match self.form.intent() {
                Some(intent) => {
                    let edited = matches!(intent, TaskIntent::Update { .. });
                    self.board.submit(intent);
                    self.mode = Mode::Board;
                    self.clamp_cursor();
                    self.set_status(if edited { "Task updated" } else { "Task created" });
                }
                None => self.set_status("Title is required"),
            },
            code => {
                if self.form.field == FormField::Priority {
                    if matches!(
                        code,
                        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                    ) {
                        self.form.priority = self.form.priority.cycle();
                    }
                    return;
                }
                let Some(input) = self.form.active_input() else {
                    return;
                };
                match code {
                    KeyCode::Char(c) => input.insert_char(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_home(),
                    KeyCode::End => input.move_end(),
                    _ => {}
                }
            }
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.rename.clear();
                self.mode = Mode::Board;
            }
            KeyCode::Enter => {
                if let Some(list_id) = self.current_list().map(|l| l.id.clone()) {
                    let title = self.rename.take();
                    self.board.rename_list(&list_id, &title);
                }
                self.mode = Mode::Board;
            }
            KeyCode::Char(c) => self.rename.insert_char(c),
            KeyCode::Backspace => self.rename.backspace(),
            KeyCode::Delete => self.rename.delete(),
            KeyCode::Left => self.rename.move_left(),
            KeyCode::Right => self.rename.move_right(),
            KeyCode::Home => self.rename.move_home(),
            KeyCode::End => self.rename.move_end(),
            _ => {}
        }
    }
}
