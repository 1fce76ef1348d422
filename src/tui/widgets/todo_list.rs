use crate::tui::App;
use crate::tui::widgets::list::{render_detail, render_list, truncate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListItem;

pub fn render_todo_list(f: &mut Frame, area: Rect, app: &mut App) {
    let max_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .todos
        .items()
        .iter()
        .map(|todo| {
            let mark = if todo.done { "✓" } else { "○" };
            ListItem::new(truncate(&format!("{} {}", mark, todo.text), max_width))
        })
        .collect();

    let title = format!("Todos ({} left)", app.todos.remaining());
    render_list(f, area, title, items, &mut app.todo_state, &app.config);
}

pub fn render_todo_summary(f: &mut Frame, area: Rect, app: &App) {
    let total = app.todos.len();
    let done = total - app.todos.remaining();
    let lines = if total == 0 {
        vec![
            Line::from("Nothing to do yet."),
            Line::from(""),
            Line::from(format!("Press {} to add a todo.", app.config.key_bindings.new)),
        ]
    } else {
        vec![
            Line::from(format!("{} of {} done", done, total)),
            Line::from(""),
            Line::from("Todos last until you quit."),
        ]
    };
    render_detail(f, area, "Today", lines, &app.config);
}
