use crate::tui::app::{Mode, Tab};
use crate::tui::widgets::{
    color::parse_color,
    help::render_help,
    milestone_path::{render_milestone_path, render_milestone_summary},
    pet_shop::{render_pet_preview, render_pet_shop},
    planner_view::{render_planner, render_planner_detail},
    popup::{render_confirm_logout, render_input_prompt, render_reward},
    settings_view::{render_profile_card, render_settings},
    status_bar::render_status_bar,
    tabs::render_tabs,
    todo_list::{render_todo_list, render_todo_summary},
};
use crate::tui::{App, Layout};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let area = f.area();
    let active_theme = app.config.get_active_theme();
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("ZenPets")
        .title_alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(parse_color(&active_theme.fg))
                .bg(parse_color(&active_theme.bg)),
        );
    f.render_widget(outer_block, area);

    render_tabs(f, layout.tabs_area, app.current_tab, &app.config);

    match app.current_tab {
        Tab::Todos => {
            render_todo_list(f, layout.list_area, app);
            render_todo_summary(f, layout.detail_area, app);
        }
        Tab::Planner => {
            render_planner(f, layout.list_area, app);
            render_planner_detail(f, layout.detail_area, app);
        }
        Tab::Milestones => {
            render_milestone_path(f, layout.list_area, app);
            render_milestone_summary(f, layout.detail_area, app);
        }
        Tab::PetShop => {
            render_pet_shop(f, layout.list_area, app);
            render_pet_preview(f, layout.detail_area, app);
        }
        Tab::Settings => {
            render_settings(f, layout.list_area, app);
            render_profile_card(f, layout.detail_area, app);
        }
    }

    // Overlays go on top of the normal content
    match app.mode {
        Mode::Help => render_help(f, area, &app.config),
        Mode::Input(target) => render_input_prompt(f, area, target, &app.input, &app.config),
        Mode::ConfirmLogout => render_confirm_logout(f, area, &app.config),
        Mode::Reward => {
            if let Some(day) = app.path.selected() {
                render_reward(f, area, day, &app.config);
            }
        }
        Mode::View => {}
    }

    let key_hints = match app.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", app.config.key_bindings.help)],
        Mode::Input(_) => vec!["Enter: Save".to_string(), "Esc: Cancel".to_string()],
        Mode::ConfirmLogout => vec!["y: Log out".to_string(), "n: Cancel".to_string()],
        Mode::Reward => vec!["Enter: Collect".to_string()],
        Mode::View => app.key_hints(),
    };
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_deref(),
        &key_hints,
        &app.config,
    );
}
