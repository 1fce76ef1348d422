use clap::{Parser, Subcommand};
use thiserror::Error;

use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::error::ModelError;
use crate::milestone::{MilestoneProgress, current_journey_day};
use crate::planner::{TaskPlanner, format_display_date};
use crate::profile::{ProfileSession, ProfileStore, SavePolicy};
use crate::settings::{AVATARS, BACKGROUNDS, DEFAULT_AVATAR, DEFAULT_BACKGROUND, catalog_name};
use crate::store::{SharedStore, StoreError};
use crate::utils::{get_current_date_string, parse_date, today};

#[derive(Parser)]
#[command(name = "zenpets")]
#[command(about = "ZenPets - todos, a day planner and a milestone path with pets")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Show milestone progress
    Progress {
        /// How many day-nodes to list
        #[arg(long, default_value_t = 10)]
        nodes: usize,
    },
    /// Mark today's task done and advance the milestone path
    CompleteDay {
        /// Journey day to advance to (defaults to today's journey day)
        #[arg(long)]
        day: Option<u32>,
    },
    /// Plan a task for a date
    AddTask {
        /// Task title
        title: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List the tasks planned for a date
    ListTasks {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a planned task
    DeleteTask {
        /// Task id as shown by list-tasks
        id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the stored profile
    Profile,
    /// Update profile fields
    SetProfile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        /// Avatar index (-1 for the default avatar)
        #[arg(long, allow_hyphen_values = true)]
        avatar: Option<i32>,
        /// Background index (-1 for the default background)
        #[arg(long, allow_hyphen_values = true)]
        background: Option<i32>,
    },
    /// Confirm contact details with a one-time code
    Verify {
        code: String,
    },
    /// Log out and forget the stored profile
    Logout,
    /// List color themes, or switch to one
    Theme {
        /// Theme to make active
        name: Option<String>,
    },
    /// Erase every stored value (profile, progress, planner)
    Reset {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Model(#[from] ModelError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Refusing to reset without --yes")]
    ResetNotConfirmed,
}

fn resolve_date(date: Option<String>) -> Result<String, CliError> {
    match date {
        Some(date_str) => {
            let date = parse_date(&date_str).map_err(|e| {
                CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e))
            })?;
            Ok(date.format("%Y-%m-%d").to_string())
        }
        None => Ok(get_current_date_string()),
    }
}

/// Handle the progress command
pub fn handle_progress(
    nodes: usize,
    day_override: Option<u32>,
    store: SharedStore,
) -> Result<(), CliError> {
    let current_day = current_journey_day(&store, day_override, today());
    let progress = MilestoneProgress::load(store);
    println!(
        "Journey day {} - last completed day {}",
        current_day,
        progress.last_completed_day()
    );
    for node in progress.generate_page(1, nodes) {
        let mark = if node.unlocked { "*" } else { " " };
        println!("  [{}] Day {}", mark, node.day);
    }
    Ok(())
}

/// Handle the complete-day command
pub fn handle_complete_day(
    day: Option<u32>,
    day_override: Option<u32>,
    store: SharedStore,
) -> Result<(), CliError> {
    let target = day.unwrap_or_else(|| current_journey_day(&store, day_override, today()));
    let mut progress = MilestoneProgress::load(store);
    let before = progress.last_completed_day();
    let after = progress.advance_to(target);
    if after > before {
        println!("Unlocked up to day {}", after);
    } else {
        println!("Already completed through day {}", after);
    }
    Ok(())
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    date: Option<String>,
    description: String,
    store: SharedStore,
) -> Result<(), CliError> {
    let date_key = resolve_date(date)?;
    let mut planner = TaskPlanner::load(store);
    let task = planner.add_task(&date_key, &title, &description, today())?;
    println!(
        "Task planned for {} (ID: {})",
        format_display_date(&date_key),
        task.id
    );
    Ok(())
}

/// Handle the list-tasks command
pub fn handle_list_tasks(date: Option<String>, store: SharedStore) -> Result<(), CliError> {
    let date_key = resolve_date(date)?;
    let planner = TaskPlanner::load(store);
    let tasks = planner.tasks_for(&date_key);
    println!("{}", format_display_date(&date_key));
    if tasks.is_empty() {
        println!("  No tasks");
    }
    for task in tasks {
        println!("  {}  {}", task.id, task.title);
        if !task.description.is_empty() {
            println!("      {}", task.description);
        }
    }
    Ok(())
}

/// Handle the delete-task command
pub fn handle_delete_task(
    id: String,
    date: Option<String>,
    store: SharedStore,
) -> Result<(), CliError> {
    let date_key = resolve_date(date)?;
    let mut planner = TaskPlanner::load(store);
    planner.delete_task(&date_key, &id);
    println!("Task {} removed from {}", id, format_display_date(&date_key));
    Ok(())
}

/// Handle the profile command
pub fn handle_show_profile(store: SharedStore) -> Result<(), CliError> {
    let record = ProfileStore::new(store).load();
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    println!("Username:   {}", or_dash(&record.username));
    println!("Email:      {}", or_dash(&record.email));
    println!("Mobile:     {}", or_dash(&record.mobile));
    println!("Verified:   {}", if record.verified { "yes" } else { "no" });
    println!(
        "Avatar:     {}",
        catalog_name(&AVATARS, record.avatar_index, DEFAULT_AVATAR)
    );
    println!(
        "Background: {}",
        catalog_name(&BACKGROUNDS, record.background_index, DEFAULT_BACKGROUND)
    );
    Ok(())
}

/// Handle the set-profile command. All edits land in a single write.
pub fn handle_set_profile(
    username: Option<String>,
    email: Option<String>,
    mobile: Option<String>,
    avatar: Option<i32>,
    background: Option<i32>,
    store: SharedStore,
) -> Result<(), CliError> {
    let mut session = ProfileSession::mount(ProfileStore::new(store), SavePolicy::OnCommit);
    if let Some(username) = username {
        session.set_username(&username);
    }
    if let Some(email) = email {
        session.set_email(&email);
    }
    if let Some(mobile) = mobile {
        session.set_mobile(&mobile);
    }
    if let Some(avatar) = avatar {
        session.set_avatar(avatar)?;
    }
    if let Some(background) = background {
        session.set_background(background)?;
    }
    if session.commit() {
        println!("Profile saved");
    } else {
        println!("Profile could not be saved; see the log for details");
    }
    Ok(())
}

/// Handle the verify command
pub fn handle_verify(code: String, store: SharedStore) -> Result<(), CliError> {
    let mut session = ProfileSession::mount(ProfileStore::new(store), SavePolicy::Immediate);
    session.confirm_otp(&code)?;
    println!("Verified");
    Ok(())
}

/// Handle the logout command
pub fn handle_logout(store: SharedStore) -> Result<(), CliError> {
    let mut session = ProfileSession::mount(ProfileStore::new(store), SavePolicy::Immediate);
    session.logout();
    println!("Logged out");
    Ok(())
}

/// Handle the theme command. Switching writes the choice back to `config_path`.
pub fn handle_theme(
    name: Option<String>,
    config: &mut Config,
    config_path: &Path,
) -> Result<(), CliError> {
    match name {
        Some(name) => {
            config.set_theme(&name)?;
            config.save_to_path(config_path)?;
            println!("Theme set to {}", name);
        }
        None => {
            for theme in config.get_available_themes() {
                let mark = if theme == config.current_theme { "*" } else { " " };
                println!("{} {}", mark, theme);
            }
        }
    }
    Ok(())
}

/// Handle the reset command
pub fn handle_reset(yes: bool, store: SharedStore) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::ResetNotConfirmed);
    }
    store.clear()?;
    tracing::info!("store cleared");
    println!("All ZenPets data erased");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestone::MILESTONE_KEY;
    use crate::store::MemoryStore;

    #[test]
    fn parses_subcommands_and_global_flags() {
        let cli = Cli::try_parse_from([
            "zenpets",
            "--ephemeral",
            "set-profile",
            "--username",
            "miso",
            "--avatar",
            "-1",
        ])
        .unwrap();
        assert!(cli.ephemeral);
        match cli.command {
            Some(Commands::SetProfile { username, avatar, .. }) => {
                assert_eq!(username.as_deref(), Some("miso"));
                assert_eq!(avatar, Some(-1));
            }
            _ => panic!("expected set-profile"),
        }
        assert!(Cli::try_parse_from(["zenpets"]).unwrap().command.is_none());
    }

    #[test]
    fn add_task_rejects_bad_date() {
        let store: SharedStore = MemoryStore::shared();
        let err = handle_add_task("Walk".into(), Some("tomorrow".into()), String::new(), store)
            .unwrap_err();
        assert!(matches!(err, CliError::DateParseError(_)));
    }

    #[test]
    fn add_task_on_past_date_is_a_model_error() {
        let store: SharedStore = MemoryStore::shared();
        let err = handle_add_task("Walk".into(), Some("2000-01-01".into()), String::new(), store)
            .unwrap_err();
        assert!(matches!(err, CliError::Model(ModelError::PastDate { .. })));
    }

    #[test]
    fn unpadded_date_lists_under_the_padded_key() {
        let store: SharedStore = MemoryStore::shared();
        assert_eq!(resolve_date(Some("2099-1-5".into())).unwrap(), "2099-01-05");
        handle_add_task("Vet".into(), Some("2099-1-5".into()), String::new(), store.clone())
            .unwrap();
        let planner = TaskPlanner::load(store);
        assert_eq!(planner.tasks_for("2099-01-05").len(), 1);
        assert_eq!(planner.dates_with_tasks().collect::<Vec<_>>(), vec!["2099-01-05"]);
    }

    #[test]
    fn complete_day_uses_override() {
        let store: SharedStore = MemoryStore::shared();
        handle_complete_day(None, Some(5), store.clone()).unwrap();
        assert_eq!(store.get(MILESTONE_KEY).unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn theme_switch_is_saved() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        handle_theme(Some("sunset".into()), &mut config, &path).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap().current_theme, "sunset");

        let err = handle_theme(Some("neon".into()), &mut config, &path).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::ThemeNotFound(_))));
    }

    #[test]
    fn reset_requires_confirmation() {
        let store: SharedStore = MemoryStore::shared();
        store.set(MILESTONE_KEY, "3").unwrap();
        assert!(matches!(
            handle_reset(false, store.clone()),
            Err(CliError::ResetNotConfirmed)
        ));
        handle_reset(true, store.clone()).unwrap();
        assert_eq!(store.get(MILESTONE_KEY).unwrap(), None);
    }
}
