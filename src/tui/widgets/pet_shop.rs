use crate::petshop::ShopTab;
use crate::tui::App;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::list::{render_detail, render_list};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListItem, Paragraph};

pub fn render_pet_shop(f: &mut Frame, area: Rect, app: &mut App) {
    let [shelf_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

    render_shelves(f, shelf_area, app);

    let items: Vec<ListItem> = app
        .shop_tab
        .items()
        .iter()
        .map(|pet| {
            ListItem::new(format!(
                "{} {:<8} {:<6} {:>5}",
                pet.emoji,
                pet.name,
                pet.rarity.label(),
                pet.price
            ))
        })
        .collect();

    let title = if items.is_empty() {
        format!("{} - coming soon", app.shop_tab.label())
    } else {
        app.shop_tab.label().to_string()
    };
    render_list(f, list_area, title, items, &mut app.pet_state, &app.config);
}

fn render_shelves(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let selected = Style::default()
        .fg(get_contrast_text_color(highlight_bg))
        .bg(highlight_bg);

    let spans: Vec<Span> = ShopTab::ALL
        .iter()
        .flat_map(|tab| {
            let style = if *tab == app.shop_tab {
                selected
            } else {
                Style::default()
            };
            [Span::styled(format!(" {} ", tab.label()), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_pet_preview(f: &mut Frame, area: Rect, app: &App) {
    let pet = app
        .preview_pet
        .and_then(|index| app.shop_tab.items().get(index));
    let lines = match pet {
        Some(pet) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("   {}", pet.emoji),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("{} ({})", pet.name, pet.rarity.label())),
            Line::from(format!("Price: {} coins", pet.price)),
        ],
        None => vec![Line::from(format!(
            "Press {} on a pet to preview it.",
            app.config.key_bindings.select
        ))],
    };
    render_detail(f, area, "Preview", lines, &app.config);
}
