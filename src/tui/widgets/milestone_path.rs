use crate::tui::App;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::list::{render_detail, render_list};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

pub fn render_milestone_path(f: &mut Frame, area: Rect, app: &mut App) {
    let active_theme = app.config.get_active_theme();
    let unlocked_color = parse_color(&active_theme.unlocked);

    let items: Vec<ListItem> = app
        .path
        .nodes()
        .iter()
        .map(|node| {
            // Zig-zag the path a little
            let indent = match node.day % 4 {
                1 => "",
                2 | 0 => "  ",
                _ => "    ",
            };
            let (icon, style) = if node.unlocked {
                ("★", Style::default().fg(unlocked_color))
            } else {
                ("·", Style::default().add_modifier(Modifier::DIM))
            };
            let mut spans = vec![Span::styled(
                format!("{}{} Day {}", indent, icon, node.day),
                style,
            )];
            if node.day == app.current_day {
                spans.push(Span::styled(
                    "  ← today",
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!("Journey ({} days shown)", app.path.len());
    render_list(f, area, title, items, &mut app.path_state, &app.config);
}

pub fn render_milestone_summary(f: &mut Frame, area: Rect, app: &App) {
    let kb = &app.config.key_bindings;
    let last = app.progress.last_completed_day();
    let mut lines = vec![
        Line::from(format!("Journey day: {}", app.current_day)),
        Line::from(format!("Completed through: day {}", last)),
        Line::from(""),
    ];
    if app.current_day > last {
        lines.push(Line::from(format!(
            "Press {} when today's task is done.",
            kb.complete_day
        )));
    } else {
        lines.push(Line::from("Today's task is done. See you tomorrow!"));
    }
    lines.push(Line::from(format!(
        "Press {} on a ★ day to open its reward.",
        kb.select
    )));
    render_detail(f, area, "Progress", lines, &app.config);
}
