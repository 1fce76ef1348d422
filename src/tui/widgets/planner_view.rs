use crate::planner::format_display_date;
use crate::tui::App;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::list::{render_detail, render_list, truncate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

/// Upcoming planned dates listed in the detail pane.
const UPCOMING_LIMIT: usize = 7;

pub fn render_planner(f: &mut Frame, area: Rect, app: &mut App) {
    let date_key = app.selected_date_key();
    let read_only = app.selected_date_is_read_only();
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .planner
        .tasks_for(&date_key)
        .iter()
        .map(|task| {
            let expanded = app.expanded_task.as_deref() == Some(task.id.as_str());
            let marker = if expanded { "▾" } else { "▸" };
            let mut lines = vec![Line::from(truncate(
                &format!("{} {}", marker, task.title),
                max_width,
            ))];
            if expanded && !task.description.is_empty() {
                lines.push(Line::from(truncate(
                    &format!("   {}", task.description),
                    max_width,
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut title = format_display_date(&date_key);
    if date_key == app.today.format("%Y-%m-%d").to_string() {
        title.push_str(" (today)");
    } else if read_only {
        title.push_str(" (read-only)");
    }
    render_list(f, area, title, items, &mut app.task_state, &app.config);
}

pub fn render_planner_detail(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let accent = parse_color(&active_theme.unlocked);
    let today_key = app.today.format("%Y-%m-%d").to_string();

    let mut lines = vec![Line::from(Span::styled(
        "Upcoming",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let upcoming: Vec<&str> = app
        .planner
        .dates_with_tasks()
        .filter(|date| *date >= today_key.as_str())
        .take(UPCOMING_LIMIT)
        .collect();
    if upcoming.is_empty() {
        lines.push(Line::from("  nothing planned"));
    }
    for date in upcoming {
        let count = app.planner.tasks_for(date).len();
        let style = if date == app.selected_date_key() {
            Style::default().fg(accent)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {}  {} task{}", format_display_date(date), count, if count == 1 { "" } else { "s" }),
            style,
        )));
    }

    if app.selected_date_is_read_only() {
        lines.push(Line::from(""));
        lines.push(Line::from("Past days can be browsed and cleaned up, not planned."));
    }

    render_detail(f, area, "Calendar", lines, &app.config);
}
