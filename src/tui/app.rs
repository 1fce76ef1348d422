use chrono::{Days, NaiveDate};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::Config;
use crate::milestone::{MilestonePath, MilestoneProgress, current_journey_day};
use crate::petshop::ShopTab;
use crate::planner::TaskPlanner;
use crate::profile::{ProfileSession, ProfileStore};
use crate::settings::{AVATARS, BACKGROUNDS, SoundChannel, SoundLevels, cycle_index};
use crate::store::SharedStore;
use crate::todo::TodoList;
use crate::tui::error::TuiError;
use crate::utils::{ParsedKeyBinding, parse_key_binding, today};

/// Scrolling within this many nodes of the end of the path loads the next page.
const LOAD_MORE_THRESHOLD: usize = 5;

/// Volume step for one key press.
const VOLUME_STEP: i16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Todos,
    Planner,
    Milestones,
    PetShop,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Todos,
        Tab::Planner,
        Tab::Milestones,
        Tab::PetShop,
        Tab::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Todos => "Todos",
            Tab::Planner => "Planner",
            Tab::Milestones => "Milestones",
            Tab::PetShop => "Pet Shop",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    NewTodo,
    TaskTitle,
    TaskDescription,
    Username,
    Email,
    Mobile,
    Otp,
}

impl InputTarget {
    pub fn prompt(self) -> &'static str {
        match self {
            InputTarget::NewTodo => "New todo",
            InputTarget::TaskTitle => "Task name",
            InputTarget::TaskDescription => "Description (optional)",
            InputTarget::Username => "Username",
            InputTarget::Email => "Email",
            InputTarget::Mobile => "Mobile",
            InputTarget::Otp => "Enter verification code",
        }
    }

    /// Profile fields are applied on every keystroke rather than on Enter.
    fn is_live_profile_field(self) -> bool {
        matches!(self, InputTarget::Username | InputTarget::Email | InputTarget::Mobile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Input(InputTarget),
    Help,
    ConfirmLogout,
    Reward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Username,
    Email,
    Mobile,
    Verify,
    Avatar,
    Background,
    Volume(SoundChannel),
    Logout,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 11] = [
        SettingsItem::Username,
        SettingsItem::Email,
        SettingsItem::Mobile,
        SettingsItem::Verify,
        SettingsItem::Avatar,
        SettingsItem::Background,
        SettingsItem::Volume(SoundChannel::Music),
        SettingsItem::Volume(SoundChannel::Sound),
        SettingsItem::Volume(SoundChannel::PetSound),
        SettingsItem::Volume(SoundChannel::Notification),
        SettingsItem::Logout,
    ];
}

/// Config key bindings, parsed once at startup.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub quit: ParsedKeyBinding,
    pub tab_left: ParsedKeyBinding,
    pub tab_right: ParsedKeyBinding,
    pub list_up: ParsedKeyBinding,
    pub list_down: ParsedKeyBinding,
    pub new: ParsedKeyBinding,
    pub delete: ParsedKeyBinding,
    pub select: ParsedKeyBinding,
    pub toggle: ParsedKeyBinding,
    pub help: ParsedKeyBinding,
    pub complete_day: ParsedKeyBinding,
    pub prev_day: ParsedKeyBinding,
    pub next_day: ParsedKeyBinding,
    pub jump_today: ParsedKeyBinding,
    pub volume_up: ParsedKeyBinding,
    pub volume_down: ParsedKeyBinding,
}

impl Bindings {
    pub fn from_config(config: &Config) -> Result<Self, TuiError> {
        let kb = &config.key_bindings;
        let parse = |s: &str| parse_key_binding(s).map_err(TuiError::KeyBindingError);
        Ok(Self {
            quit: parse(&kb.quit)?,
            tab_left: parse(&kb.tab_left)?,
            tab_right: parse(&kb.tab_right)?,
            list_up: parse(&kb.list_up)?,
            list_down: parse(&kb.list_down)?,
            new: parse(&kb.new)?,
            delete: parse(&kb.delete)?,
            select: parse(&kb.select)?,
            toggle: parse(&kb.toggle)?,
            help: parse(&kb.help)?,
            complete_day: parse(&kb.complete_day)?,
            prev_day: parse(&kb.prev_day)?,
            next_day: parse(&kb.next_day)?,
            jump_today: parse(&kb.jump_today)?,
            volume_up: parse(&kb.volume_up)?,
            volume_down: parse(&kb.volume_down)?,
        })
    }
}

pub struct App {
    pub config: Config,
    pub bindings: Bindings,
    pub current_tab: Tab,
    pub mode: Mode,
    pub input: String,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub should_quit: bool,

    pub todos: TodoList,
    pub todo_state: ListState,

    pub planner: TaskPlanner,
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    pub task_state: ListState,
    pub expanded_task: Option<String>,
    pending_title: Option<String>,

    pub progress: MilestoneProgress,
    pub path: MilestonePath,
    pub path_state: ListState,
    pub current_day: u32,

    pub shop_tab: ShopTab,
    pub pet_state: ListState,
    pub preview_pet: Option<usize>,
    drag_origin: Option<u16>,

    pub profile: ProfileSession,
    pub sounds: SoundLevels,
    pub settings_state: ListState,

    store: SharedStore,
}

impl App {
    pub fn new(config: Config, store: SharedStore) -> Result<Self, TuiError> {
        Self::with_today(config, store, today())
    }

    pub fn with_today(config: Config, store: SharedStore, today: NaiveDate) -> Result<Self, TuiError> {
        let bindings = Bindings::from_config(&config)?;
        let current_day = current_journey_day(&store, config.current_day_override, today);
        let progress = MilestoneProgress::load(store.clone());
        let path = MilestonePath::new(
            &progress,
            config.milestone_initial_nodes,
            config.milestone_page_size,
        );
        let planner = TaskPlanner::load(store.clone());
        let profile = ProfileSession::mount(
            ProfileStore::new(store.clone()),
            config.profile_save_policy,
        );

        Ok(Self {
            bindings,
            current_tab: Tab::Todos,
            mode: Mode::View,
            input: String::new(),
            status_message: None,
            status_message_time: None,
            should_quit: false,
            todos: TodoList::new(),
            todo_state: ListState::default(),
            planner,
            today,
            selected_date: today,
            task_state: ListState::default(),
            expanded_task: None,
            pending_title: None,
            progress,
            path,
            path_state: ListState::default().with_selected(Some(0)),
            current_day,
            shop_tab: ShopTab::default(),
            pet_state: ListState::default().with_selected(Some(0)),
            preview_pet: None,
            drag_origin: None,
            profile,
            sounds: SoundLevels::default(),
            settings_state: ListState::default().with_selected(Some(0)),
            store,
            config,
        })
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_message_timeout(&mut self) {
        let timeout = Duration::from_secs(self.config.status_timeout_secs);
        if self
            .status_message_time
            .is_some_and(|shown| shown.elapsed() >= timeout)
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }

    /// Called once per loop iteration so a session left open past midnight
    /// moves on to the new day.
    pub fn tick(&mut self) {
        self.refresh_today(today());
    }

    pub fn refresh_today(&mut self, now: NaiveDate) {
        if now == self.today {
            return;
        }
        tracing::info!(from = %self.today, to = %now, "date changed");
        // An open prompt keeps its date, so the add is checked against the new day
        if self.mode == Mode::View && self.selected_date == self.today {
            self.set_selected_date(now);
        }
        self.today = now;
        self.current_day = current_journey_day(&self.store, self.config.current_day_override, now);
    }

    pub fn selected_date_key(&self) -> String {
        self.selected_date.format("%Y-%m-%d").to_string()
    }

    pub fn selected_date_is_read_only(&self) -> bool {
        self.planner
            .is_read_only(&self.selected_date_key(), self.today)
    }

    // --- tabs -------------------------------------------------------------

    pub fn select_tab(&mut self, tab: Tab) {
        if self.current_tab == Tab::Settings && tab != Tab::Settings {
            self.profile.commit();
        }
        self.current_tab = tab;
    }

    pub fn next_tab(&mut self) {
        let next = Tab::ALL[(self.current_tab.index() + 1) % Tab::ALL.len()];
        self.select_tab(next);
    }

    pub fn previous_tab(&mut self) {
        let len = Tab::ALL.len();
        let prev = Tab::ALL[(self.current_tab.index() + len - 1) % len];
        self.select_tab(prev);
    }

    // --- list movement ----------------------------------------------------

    fn list_len(&self) -> usize {
        match self.current_tab {
            Tab::Todos => self.todos.len(),
            Tab::Planner => self.planner.tasks_for(&self.selected_date_key()).len(),
            Tab::Milestones => self.path.len(),
            Tab::PetShop => self.shop_tab.items().len(),
            Tab::Settings => SettingsItem::ALL.len(),
        }
    }

    fn current_list_state(&mut self) -> &mut ListState {
        match self.current_tab {
            Tab::Todos => &mut self.todo_state,
            Tab::Planner => &mut self.task_state,
            Tab::Milestones => &mut self.path_state,
            Tab::PetShop => &mut self.pet_state,
            Tab::Settings => &mut self.settings_state,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list_len();
        let state = self.current_list_state();
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0).min(len - 1);
        let next = current.saturating_add_signed(delta).min(len - 1);
        state.select(Some(next));

        if self.current_tab == Tab::Milestones && next + LOAD_MORE_THRESHOLD >= len {
            self.path.load_more(&self.progress);
        }
    }

    fn selected_index(&self) -> Option<usize> {
        let state = match self.current_tab {
            Tab::Todos => &self.todo_state,
            Tab::Planner => &self.task_state,
            Tab::Milestones => &self.path_state,
            Tab::PetShop => &self.pet_state,
            Tab::Settings => &self.settings_state,
        };
        state.selected().filter(|i| *i < self.list_len())
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len();
        let state = self.current_list_state();
        match state.selected() {
            _ if len == 0 => state.select(None),
            Some(i) if i >= len => state.select(Some(len - 1)),
            None => state.select(Some(0)),
            _ => {}
        }
    }

    // --- input prompts ----------------------------------------------------

    pub fn start_input(&mut self, target: InputTarget) {
        self.input = match target {
            InputTarget::Username => self.profile.record().username.clone(),
            InputTarget::Email => self.profile.record().email.clone(),
            InputTarget::Mobile => self.profile.record().mobile.clone(),
            _ => String::new(),
        };
        self.mode = Mode::Input(target);
    }

    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
        self.apply_live_edit();
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
        self.apply_live_edit();
    }

    fn apply_live_edit(&mut self) {
        let Mode::Input(target) = self.mode else {
            return;
        };
        match target {
            InputTarget::Username => self.profile.set_username(&self.input),
            InputTarget::Email => self.profile.set_email(&self.input),
            InputTarget::Mobile => self.profile.set_mobile(&self.input),
            _ => {}
        }
    }

    pub fn submit_input(&mut self) {
        let Mode::Input(target) = self.mode else {
            return;
        };
        let text = std::mem::take(&mut self.input);
        self.mode = Mode::View;

        match target {
            InputTarget::NewTodo => {
                if self.todos.add_todo(&text).is_some() {
                    self.todo_state.select(Some(self.todos.len() - 1));
                }
            }
            InputTarget::TaskTitle => {
                if text.trim().is_empty() {
                    self.set_status("Task name required");
                    self.mode = Mode::Input(InputTarget::TaskTitle);
                } else {
                    self.pending_title = Some(text);
                    self.mode = Mode::Input(InputTarget::TaskDescription);
                }
            }
            InputTarget::TaskDescription => {
                let title = self.pending_title.take().unwrap_or_default();
                let date_key = self.selected_date_key();
                match self.planner.add_task(&date_key, &title, &text, self.today) {
                    Ok(_) => {
                        let count = self.planner.tasks_for(&date_key).len();
                        self.task_state.select(Some(count - 1));
                        self.set_status("Task added");
                    }
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            InputTarget::Username | InputTarget::Email | InputTarget::Mobile => {
                self.profile.commit();
            }
            InputTarget::Otp => match self.profile.confirm_otp(&text) {
                Ok(()) => self.set_status("Verified"),
                Err(e) => self.set_status(e.to_string()),
            },
        }
    }

    pub fn cancel_input(&mut self) {
        if let Mode::Input(target) = self.mode {
            if target.is_live_profile_field() {
                self.profile.commit();
            }
        }
        self.pending_title = None;
        self.input.clear();
        self.mode = Mode::View;
    }

    // --- tab actions ------------------------------------------------------

    /// The "new" key: add a todo or plan a task for the selected date.
    pub fn start_new(&mut self) {
        match self.current_tab {
            Tab::Todos => self.start_input(InputTarget::NewTodo),
            Tab::Planner => {
                if self.selected_date_is_read_only() {
                    self.set_status("Past days are read-only");
                } else {
                    self.start_input(InputTarget::TaskTitle);
                }
            }
            _ => {}
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.current_tab {
            Tab::Todos => {
                let id = self.todos.items()[index].id;
                self.todos.delete_todo(id);
            }
            Tab::Planner => {
                let date_key = self.selected_date_key();
                let id = self.planner.tasks_for(&date_key)[index].id.clone();
                self.planner.delete_task(&date_key, &id);
                if self.expanded_task.as_deref() == Some(id.as_str()) {
                    self.expanded_task = None;
                }
            }
            _ => return,
        }
        self.clamp_selection();
    }

    /// The "toggle" key: tick a todo or expand a planned task.
    pub fn toggle_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.current_tab {
            Tab::Todos => {
                let id = self.todos.items()[index].id;
                self.todos.toggle_todo(id);
            }
            Tab::Planner => {
                let id = self.planner.tasks_for(&self.selected_date_key())[index].id.clone();
                self.expanded_task = if self.expanded_task.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    Some(id)
                };
            }
            _ => {}
        }
    }

    /// The "select" key.
    pub fn activate_selected(&mut self) {
        match self.current_tab {
            Tab::Todos | Tab::Planner => self.toggle_selected(),
            Tab::Milestones => {
                let Some(index) = self.selected_index() else {
                    return;
                };
                let day = self.path.nodes()[index].day;
                if self.path.select(day) {
                    self.mode = Mode::Reward;
                } else {
                    self.set_status(format!("Day {} is still locked", day));
                }
            }
            Tab::PetShop => {
                let index = self.selected_index();
                self.preview_pet = if self.preview_pet == index { None } else { index };
            }
            Tab::Settings => self.activate_setting(),
        }
    }

    fn activate_setting(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match SettingsItem::ALL[index] {
            SettingsItem::Username => self.start_input(InputTarget::Username),
            SettingsItem::Email => self.start_input(InputTarget::Email),
            SettingsItem::Mobile => self.start_input(InputTarget::Mobile),
            SettingsItem::Verify => {
                if self.profile.record().verified {
                    self.set_status("Already verified");
                } else {
                    self.start_input(InputTarget::Otp);
                }
            }
            SettingsItem::Avatar => {
                let next = cycle_index(self.profile.record().avatar_index, AVATARS.len());
                if let Err(e) = self.profile.set_avatar(next) {
                    self.set_status(e.to_string());
                }
            }
            SettingsItem::Background => {
                let next = cycle_index(self.profile.record().background_index, BACKGROUNDS.len());
                if let Err(e) = self.profile.set_background(next) {
                    self.set_status(e.to_string());
                }
            }
            SettingsItem::Volume(_) => {}
            SettingsItem::Logout => self.mode = Mode::ConfirmLogout,
        }
    }

    pub fn adjust_volume(&mut self, up: bool) {
        if self.current_tab != Tab::Settings {
            return;
        }
        if let Some(SettingsItem::Volume(channel)) =
            self.selected_index().map(|i| SettingsItem::ALL[i])
        {
            let delta = if up { VOLUME_STEP } else { -VOLUME_STEP };
            self.sounds.adjust(channel, delta);
        }
    }

    pub fn confirm_logout(&mut self) {
        self.profile.logout();
        self.mode = Mode::View;
        self.set_status("Logged out");
    }

    pub fn collect_reward(&mut self) {
        if let Some(day) = self.path.collect_reward() {
            self.set_status(format!("Day {} reward collected", day));
        }
        self.mode = Mode::View;
    }

    pub fn complete_today(&mut self) {
        if self.path.complete_today(&mut self.progress, self.current_day) {
            self.set_status(format!("Day {} complete!", self.current_day));
        } else {
            self.set_status("Today's task is already done");
        }
    }

    // --- planner dates / shop tabs -----------------------------------------

    fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.expanded_task = None;
        self.task_state = ListState::default();
        self.clamp_selection();
    }

    pub fn shift_selected_date(&mut self, forward: bool) {
        let days = Days::new(1);
        let shifted = if forward {
            self.selected_date.checked_add_days(days)
        } else {
            self.selected_date.checked_sub_days(days)
        };
        if let Some(date) = shifted {
            self.set_selected_date(date);
        }
    }

    pub fn jump_to_today(&mut self) {
        self.set_selected_date(self.today);
    }

    pub fn shift_shop_tab(&mut self, forward: bool) {
        self.shop_tab = if forward {
            self.shop_tab.next()
        } else {
            self.shop_tab.previous()
        };
        self.preview_pet = None;
        self.pet_state = ListState::default();
        self.clamp_selection();
    }

    pub fn begin_drag(&mut self, column: u16) {
        self.drag_origin = Some(column);
    }

    /// A horizontal drag across the shop switches shelves.
    pub fn end_drag(&mut self, column: u16) {
        let Some(origin) = self.drag_origin.take() else {
            return;
        };
        if self.current_tab != Tab::PetShop {
            return;
        }
        let dx = i32::from(column) - i32::from(origin);
        let swiped = self.shop_tab.after_swipe(dx);
        if swiped != self.shop_tab {
            self.shop_tab = swiped;
            self.preview_pet = None;
            self.pet_state = ListState::default();
            self.clamp_selection();
        }
    }

    /// Key hints for the status bar
    pub fn key_hints(&self) -> Vec<String> {
        let kb = &self.config.key_bindings;
        let mut hints = vec![
            format!("{}/{}: tabs", kb.tab_left, kb.tab_right),
            format!("{}/{}: move", kb.list_up, kb.list_down),
        ];
        match self.current_tab {
            Tab::Todos => {
                hints.push(format!("{}: new", kb.new));
                hints.push(format!("{}: done", kb.toggle));
                hints.push(format!("{}: delete", kb.delete));
            }
            Tab::Planner => {
                hints.push(format!("{}/{}: day", kb.prev_day, kb.next_day));
                hints.push(format!("{}: today", kb.jump_today));
                hints.push(format!("{}: add", kb.new));
                hints.push(format!("{}: delete", kb.delete));
            }
            Tab::Milestones => {
                hints.push(format!("{}: complete today", kb.complete_day));
                hints.push(format!("{}: reward", kb.select));
            }
            Tab::PetShop => {
                hints.push(format!("{}/{}: shelf", kb.prev_day, kb.next_day));
                hints.push(format!("{}: preview", kb.select));
            }
            Tab::Settings => {
                hints.push(format!("{}: edit", kb.select));
                hints.push(format!("{}/{}: volume", kb.volume_down, kb.volume_up));
            }
        }
        hints.push(format!("{}: help", kb.help));
        hints.push(format!("{}: quit", kb.quit));
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileRecord;
    use crate::profile::ProfileStore;
    use crate::store::MemoryStore;
    use crate::utils::parse_date;

    fn app_with(config: Config) -> (App, SharedStore) {
        let store: SharedStore = MemoryStore::shared();
        let today = parse_date("2025-06-10").unwrap();
        let app = App::with_today(config, store.clone(), today).unwrap();
        (app, store)
    }

    fn app() -> (App, SharedStore) {
        app_with(Config::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    #[test]
    fn adding_a_todo_through_the_prompt() {
        let (mut app, _) = app();
        app.start_new();
        assert_eq!(app.mode, Mode::Input(InputTarget::NewTodo));
        type_text(&mut app, "  wash bowl ");
        app.submit_input();

        assert_eq!(app.mode, Mode::View);
        assert_eq!(app.todos.items()[0].text, "wash bowl");
        app.toggle_selected();
        assert!(app.todos.items()[0].done);
        app.delete_selected();
        assert!(app.todos.is_empty());
    }

    #[test]
    fn planning_a_task_is_a_two_step_prompt() {
        let (mut app, store) = app();
        app.select_tab(Tab::Planner);
        app.start_new();
        app.submit_input();
        assert_eq!(app.mode, Mode::Input(InputTarget::TaskTitle));
        assert_eq!(app.status_message.as_deref(), Some("Task name required"));

        type_text(&mut app, "Buy food");
        app.submit_input();
        assert_eq!(app.mode, Mode::Input(InputTarget::TaskDescription));
        type_text(&mut app, "kibble");
        app.submit_input();

        let tasks = app.planner.tasks_for("2025-06-10");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "kibble");
        assert_eq!(TaskPlanner::load(store).tasks_for("2025-06-10").len(), 1);
    }

    #[test]
    fn past_days_refuse_new_tasks_but_allow_browsing() {
        let (mut app, _) = app();
        app.select_tab(Tab::Planner);
        app.shift_selected_date(false);
        assert!(app.selected_date_is_read_only());
        app.start_new();
        assert_eq!(app.mode, Mode::View);
        app.jump_to_today();
        assert!(!app.selected_date_is_read_only());
    }

    #[test]
    fn midnight_makes_yesterday_read_only_and_advances_the_day() {
        let (mut app, _) = app();
        app.select_tab(Tab::Planner);
        assert_eq!(app.current_day, 1);

        app.refresh_today(parse_date("2025-06-11").unwrap());
        assert_eq!(app.selected_date_key(), "2025-06-11");
        assert_eq!(app.current_day, 2);
        assert!(app.planner.is_read_only("2025-06-10", app.today));

        app.shift_selected_date(false);
        assert!(app.selected_date_is_read_only());
        app.start_new();
        assert_eq!(app.mode, Mode::View);
        assert!(app.planner.tasks_for("2025-06-10").is_empty());
    }

    #[test]
    fn task_prompt_left_open_over_midnight_is_refused() {
        let (mut app, _) = app();
        app.select_tab(Tab::Planner);
        app.start_new();
        type_text(&mut app, "Walk");
        app.submit_input();

        app.refresh_today(parse_date("2025-06-11").unwrap());
        assert_eq!(app.selected_date_key(), "2025-06-10");
        app.submit_input();
        assert!(app.status_message.is_some());
        assert!(app.planner.tasks_for("2025-06-10").is_empty());
        assert!(app.planner.tasks_for("2025-06-11").is_empty());
    }

    #[test]
    fn scrolling_near_the_end_extends_the_path() {
        let (mut app, _) = app();
        app.select_tab(Tab::Milestones);
        assert_eq!(app.path.len(), 30);
        app.move_selection(24);
        assert_eq!(app.path.len(), 30);
        app.move_selection(1);
        assert_eq!(app.path.len(), 50);
    }

    #[test]
    fn completing_today_unlocks_rewards() {
        let mut config = Config::default();
        config.current_day_override = Some(5);
        let (mut app, _) = app_with(config);
        app.select_tab(Tab::Milestones);

        app.activate_selected();
        assert_eq!(app.mode, Mode::View);

        app.complete_today();
        assert_eq!(app.progress.last_completed_day(), 5);
        assert!(app.path.nodes()[4].unlocked);
        assert!(!app.path.nodes()[5].unlocked);

        app.activate_selected();
        assert_eq!(app.mode, Mode::Reward);
        app.collect_reward();
        assert_eq!(app.mode, Mode::View);
        assert_eq!(app.path.selected(), None);
    }

    #[test]
    fn profile_fields_write_on_every_keystroke() {
        let (mut app, store) = app();
        app.select_tab(Tab::Settings);
        app.activate_selected();
        assert_eq!(app.mode, Mode::Input(InputTarget::Username));

        type_text(&mut app, "mi");
        assert_eq!(ProfileStore::new(store.clone()).load().username, "mi");
        app.input_backspace();
        assert_eq!(ProfileStore::new(store).load().username, "m");
    }

    #[test]
    fn verify_then_edit_email_drops_verification() {
        let (mut app, store) = app();
        app.select_tab(Tab::Settings);
        app.move_selection(3);
        app.activate_selected();
        assert_eq!(app.mode, Mode::Input(InputTarget::Otp));
        type_text(&mut app, "123456");
        app.submit_input();
        assert!(ProfileStore::new(store.clone()).load().verified);

        app.move_selection(-2);
        app.activate_selected();
        type_text(&mut app, "x");
        app.cancel_input();
        let stored = ProfileStore::new(store).load();
        assert_eq!(stored.email, "x");
        assert!(!stored.verified);
    }

    #[test]
    fn avatar_cycles_and_logout_resets() {
        let (mut app, store) = app();
        app.select_tab(Tab::Settings);
        app.move_selection(4);
        app.activate_selected();
        assert_eq!(app.profile.record().avatar_index, 0);

        app.move_selection(100);
        app.activate_selected();
        assert_eq!(app.mode, Mode::ConfirmLogout);
        app.confirm_logout();
        assert_eq!(app.profile.record(), &ProfileRecord::default());
        assert_eq!(ProfileStore::new(store).load(), ProfileRecord::default());
    }

    #[test]
    fn volume_keys_only_touch_the_selected_slider() {
        let (mut app, _) = app();
        app.select_tab(Tab::Settings);
        app.move_selection(6);
        app.adjust_volume(true);
        assert_eq!(app.sounds.music, 60);
        assert_eq!(app.sounds.sound, 50);
    }

    #[test]
    fn shop_shelves_clamp_and_clear_preview() {
        let (mut app, _) = app();
        app.select_tab(Tab::PetShop);
        app.activate_selected();
        assert_eq!(app.preview_pet, Some(0));
        app.shift_shop_tab(false);
        assert_eq!(app.shop_tab, ShopTab::Pets);
        app.shift_shop_tab(true);
        assert_eq!(app.shop_tab, ShopTab::Skins);
        assert_eq!(app.preview_pet, None);
    }

    #[test]
    fn short_drags_do_not_switch_shelves() {
        let (mut app, _) = app();
        app.select_tab(Tab::PetShop);
        app.begin_drag(60);
        app.end_drag(30);
        assert_eq!(app.shop_tab, ShopTab::Pets);
        app.begin_drag(80);
        app.end_drag(20);
        assert_eq!(app.shop_tab, ShopTab::Skins);
        app.begin_drag(10);
        app.end_drag(70);
        assert_eq!(app.shop_tab, ShopTab::Pets);
    }

    #[test]
    fn bad_key_binding_is_reported() {
        let mut config = Config::default();
        config.key_bindings.quit = "Hyper+q".to_string();
        let store: SharedStore = MemoryStore::shared();
        assert!(matches!(
            App::new(config, store),
            Err(TuiError::KeyBindingError(_))
        ));
    }
}
