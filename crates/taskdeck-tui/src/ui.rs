use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use taskdeck_domain::Priority;

use crate::app::{App, FormField, Mode};

pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_board(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    match app.mode {
        Mode::TaskForm => render_task_form(app, frame),
        Mode::RenameList => render_rename_popup(app, frame),
        Mode::Board => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let who = app
        .user
        .as_ref()
        .map(|u| format!("{} <{}>", u.name, u.email))
        .unwrap_or_else(|| "offline".to_string());
    let line = Line::from(vec![
        Span::styled(" taskdeck ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("— {} lists — {}", app.board.lists.len(), who)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn priority_marker(priority: Priority) -> Span<'static> {
    match priority {
        Priority::High => Span::styled("↑", Style::default().fg(Color::Red)),
        Priority::Medium => Span::styled("→", Style::default().fg(Color::Yellow)),
        Priority::Low => Span::styled("↓", Style::default().fg(Color::Green)),
    }
}

fn render_board(app: &App, frame: &mut Frame, area: Rect) {
    let views = app.board.views();
    if views.is_empty() {
        let hint = Paragraph::new("No lists. Press N to create one.")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    }

    let count = views.len() as u32;
    let columns = Layout::horizontal(
        views
            .iter()
            .map(|_| Constraint::Ratio(1, count))
            .collect::<Vec<_>>(),
    )
    .split(area);

    for (col, view) in views.iter().enumerate() {
        let is_current = col == app.cursor.list;
        let border_style = if is_current {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let mut items: Vec<ListItem> = view
            .tasks
            .iter()
            .enumerate()
            .map(|(row, task)| {
                let lifted = app.drag.active() == Some(task.id.as_str());
                let hovered =
                    is_current && app.cursor.task == Some(row) && app.mode == Mode::Board;
                let mut spans = vec![priority_marker(task.priority), Span::raw(" ")];
                if lifted {
                    spans.push(Span::styled("⇅ ", Style::default().fg(Color::Magenta)));
                }
                spans.push(Span::raw(task.title.clone()));
                if let Some(due) = task.due_date {
                    spans.push(Span::styled(
                        format!("  {}", due.format("%Y-%m-%d")),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                let mut style = Style::default();
                if lifted {
                    style = style.add_modifier(Modifier::ITALIC | Modifier::DIM);
                }
                if hovered {
                    style = style.bg(Color::DarkGray);
                }
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        // Hovering the container itself: show where an appended drop lands.
        if is_current && app.cursor.task.is_none() && app.drag.active().is_some() {
            items.push(
                ListItem::new("⋯ drop here")
                    .style(Style::default().fg(Color::Magenta).bg(Color::DarkGray)),
            );
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ({}) ", view.list.title, view.tasks.len()));
        frame.render_widget(List::new(items).block(block), columns[col]);
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Board => {
            if app.drag.active().is_some() {
                "move: ←↓↑→  drop: space  cancel: esc"
            } else {
                "move: ←↓↑→  grab: space  new/edit/del task: n/e/d  list: N/r/D  quit: q"
            }
        }
        Mode::TaskForm => "next field: tab  submit: enter  close: esc",
        Mode::RenameList => "submit: enter  close: esc",
    };
    let line = match &app.status {
        Some(status) => Line::from(vec![
            Span::styled(
                format!("{}  ", status),
                Style::default().fg(Color::Green),
            ),
            Span::styled(hints, Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn field_block(title: &str, active: bool) -> Block<'_> {
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", title))
}

fn render_task_form(app: &App, frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let title = if app.form.is_edit() {
        " Edit task "
    } else {
        " Create task "
    };
    let outer = Block::default().borders(Borders::ALL).title(title);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(inner);

    let field = app.form.field;
    frame.render_widget(
        Paragraph::new(app.form.title.text())
            .block(field_block("Title", field == FormField::Title)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(app.form.description.text())
            .block(field_block("Description", field == FormField::Description)),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(app.form.due_date.text()).block(field_block(
            "Due date (YYYY-MM-DD)",
            field == FormField::DueDate,
        )),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(format!("‹ {} ›", app.form.priority.label()))
            .block(field_block("Priority", field == FormField::Priority)),
        rows[3],
    );
}

fn render_rename_popup(app: &App, frame: &mut Frame) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(app.rename.text())
            .block(Block::default().borders(Borders::ALL).title(" Rename list ")),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}
