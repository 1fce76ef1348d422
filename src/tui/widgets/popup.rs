use crate::Config;
use crate::tui::app::InputTarget;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Centered rect using a percentage of the available rect
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Centered rect with a fixed height
fn fixed_height_popup(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn popup_block<'a>(title: &'a str, config: &Config) -> Block<'a> {
    let active_theme = config.get_active_theme();
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(parse_color(&active_theme.fg))
                .bg(parse_color(&active_theme.bg)),
        )
}

pub fn render_input_prompt(
    f: &mut Frame,
    area: Rect,
    target: InputTarget,
    input: &str,
    config: &Config,
) {
    let popup = fixed_height_popup(area, 60, 3);
    f.render_widget(Clear, popup);

    // Keep the tail of long input visible
    let inner_width = popup.width.saturating_sub(2) as usize;
    let char_count = input.chars().count();
    let visible: String = input
        .chars()
        .skip(char_count.saturating_sub(inner_width.saturating_sub(1)))
        .collect();
    let cursor_offset = visible.chars().count() as u16;

    let paragraph = Paragraph::new(visible).block(popup_block(target.prompt(), config));
    f.render_widget(paragraph, popup);
    f.set_cursor_position(Position::new(popup.x + 1 + cursor_offset, popup.y + 1));
}

pub fn render_confirm_logout(f: &mut Frame, area: Rect, config: &Config) {
    let popup = fixed_height_popup(area, 50, 6);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Log out and forget this profile?"),
        Line::from(""),
        Line::from("y / Enter: log out    n / Esc: cancel"),
    ];
    let paragraph = Paragraph::new(lines)
        .block(popup_block("Logout", config))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}

pub fn render_reward(f: &mut Frame, area: Rect, day: u32, config: &Config) {
    let active_theme = config.get_active_theme();
    let accent = parse_color(&active_theme.unlocked);
    let popup = fixed_height_popup(area, 50, 7);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            format!("Day {} reward", day),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("🎁  A treat for your pet!"),
        Line::from(""),
        Line::from(Span::styled(
            " Collect ",
            Style::default()
                .fg(get_contrast_text_color(accent))
                .bg(accent),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(popup_block("Milestone", config))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup);
}
