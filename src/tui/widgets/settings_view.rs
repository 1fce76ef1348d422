use crate::settings::{
    AVATARS, BACKGROUNDS, DEFAULT_AVATAR, DEFAULT_BACKGROUND, MAX_VOLUME, catalog_name,
};
use crate::tui::App;
use crate::tui::app::SettingsItem;
use crate::tui::widgets::list::{render_detail, render_list, truncate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListItem;

/// Width of a volume slider in cells
const SLIDER_WIDTH: usize = 10;

pub fn render_settings(f: &mut Frame, area: Rect, app: &mut App) {
    let max_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .map(|item| ListItem::new(truncate(&setting_line(app, *item), max_width)))
        .collect();

    let title = if app.profile.is_dirty() {
        "Settings (unsaved)".to_string()
    } else {
        "Settings".to_string()
    };
    render_list(f, area, title, items, &mut app.settings_state, &app.config);
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn setting_line(app: &App, item: SettingsItem) -> String {
    let record = app.profile.record();
    match item {
        SettingsItem::Username => format!("Username     {}", or_placeholder(&record.username)),
        SettingsItem::Email => format!("Email        {}", or_placeholder(&record.email)),
        SettingsItem::Mobile => format!("Mobile       {}", or_placeholder(&record.mobile)),
        SettingsItem::Verify => {
            let state = if record.verified { "verified" } else { "not verified" };
            format!("Verify       {}", state)
        }
        SettingsItem::Avatar => format!(
            "Avatar       {}",
            catalog_name(&AVATARS, record.avatar_index, DEFAULT_AVATAR)
        ),
        SettingsItem::Background => format!(
            "Background   {}",
            catalog_name(&BACKGROUNDS, record.background_index, DEFAULT_BACKGROUND)
        ),
        SettingsItem::Volume(channel) => {
            let level = app.sounds.get(channel);
            format!("{:<12} {} {:>3}", channel.label(), slider(level), level)
        }
        SettingsItem::Logout => "Log out".to_string(),
    }
}

fn slider(level: u8) -> String {
    let filled = usize::from(level) * SLIDER_WIDTH / usize::from(MAX_VOLUME);
    format!("{}{}", "█".repeat(filled), "░".repeat(SLIDER_WIDTH - filled))
}

pub fn render_profile_card(f: &mut Frame, area: Rect, app: &App) {
    let record = app.profile.record();
    let name = if record.username.is_empty() {
        "Guest"
    } else {
        record.username.as_str()
    };
    let lines = vec![
        Line::from(format!("Hi, {}!", name)),
        Line::from(""),
        Line::from(format!(
            "Avatar: {}",
            catalog_name(&AVATARS, record.avatar_index, DEFAULT_AVATAR)
        )),
        Line::from(format!(
            "Background: {}",
            catalog_name(&BACKGROUNDS, record.background_index, DEFAULT_BACKGROUND)
        )),
        Line::from(if record.verified {
            "Contact details verified"
        } else {
            "Contact details not verified"
        }),
    ];
    render_detail(f, area, "Profile", lines, &app.config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_fills_in_tenths() {
        assert_eq!(slider(0), "░░░░░░░░░░");
        assert_eq!(slider(50), "█████░░░░░");
        assert_eq!(slider(100), "██████████");
        assert_eq!(slider(59), "█████░░░░░");
    }
}
