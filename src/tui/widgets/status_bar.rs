use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&str>,
    key_hints: &[String],
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let max_width = area.width as usize;

    let (content, style) = match message {
        Some(msg) => {
            let highlight_bg = parse_color(&active_theme.highlight_bg);
            let style = Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD);
            (truncate(msg, max_width), style)
        }
        None => {
            let style = Style::default()
                .fg(parse_color(&active_theme.fg))
                .bg(parse_color(&active_theme.bg));
            (fit_hints(key_hints, max_width), style)
        }
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(ELLIPSIS.len());
    text.chars().take(keep).collect::<String>() + ELLIPSIS
}

/// Join as many hints as fit in `max_width`, ending in "..." when some were dropped.
fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let mut line = String::new();
    for (i, hint) in key_hints.iter().enumerate() {
        let sep = if i == 0 { "" } else { SEPARATOR };
        let needed = line.chars().count() + sep.chars().count() + hint.chars().count();
        if needed > max_width {
            if line.is_empty() {
                return truncate(hint, max_width);
            }
            if line.chars().count() + ELLIPSIS.len() > max_width {
                let keep = max_width.saturating_sub(ELLIPSIS.len());
                line = line.chars().take(keep).collect();
            }
            line.push_str(ELLIPSIS);
            return line;
        }
        line.push_str(sep);
        line.push_str(hint);
    }
    line
}
