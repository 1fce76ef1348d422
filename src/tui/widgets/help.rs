use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup::popup_area;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&active_theme.fg))
        .bg(parse_color(&active_theme.bg));

    let popup = popup_area(area, 60, 80);
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(style),
        )
        .style(style)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup);
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Switch tabs\n", kb.tab_left, kb.tab_right));
    text.push_str("  1-5: Jump to tab\n");
    text.push_str(&format!("  {} / {}: Move up/down\n", kb.list_up, kb.list_down));
    text.push_str(&format!("  {}: Select\n\n", kb.select));

    text.push_str("Todos:\n");
    text.push_str(&format!("  {}: New todo\n", kb.new));
    text.push_str(&format!("  {}: Mark done / not done\n", kb.toggle));
    text.push_str(&format!("  {}: Delete\n\n", kb.delete));

    text.push_str("Planner:\n");
    text.push_str(&format!("  {} / {}: Previous / next day\n", kb.prev_day, kb.next_day));
    text.push_str(&format!("  {}: Back to today\n", kb.jump_today));
    text.push_str(&format!("  {}: Plan a task (today or later)\n", kb.new));
    text.push_str(&format!("  {}: Show description\n", kb.toggle));
    text.push_str(&format!("  {}: Delete task\n\n", kb.delete));

    text.push_str("Milestones:\n");
    text.push_str(&format!("  {}: Complete today's task\n", kb.complete_day));
    text.push_str(&format!("  {}: Open an unlocked reward\n\n", kb.select));

    text.push_str("Pet Shop:\n");
    text.push_str(&format!("  {} / {}: Switch shelf (or swipe)\n", kb.prev_day, kb.next_day));
    text.push_str(&format!("  {}: Preview pet\n\n", kb.select));

    text.push_str("Settings:\n");
    text.push_str(&format!("  {}: Edit field / cycle choice\n", kb.select));
    text.push_str(&format!("  {} / {}: Volume\n", kb.volume_down, kb.volume_up));
    text.push_str("  Esc: Close a prompt\n\n");

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", kb.quit));
    text.push_str(&format!("  {}: Show/hide help\n", kb.help));

    text
}
