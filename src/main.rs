use clap::Parser;
use color_eyre::Result;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use zenpets::{
    Config, Database, MemoryStore, RunMode, SharedStore,
    cli::{self, Cli, Commands},
    logging,
};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps config, database and log apart from real data
    let mode = if cli.dev { RunMode::Dev } else { RunMode::Prod };

    let config_path = match cli.config.as_deref() {
        Some(path) => PathBuf::from(path),
        None => Config::get_config_path(mode)?,
    };
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(Path::new(path))?,
        None => Config::load_with_mode(mode)?,
    };

    if let Some(log_file) = logging::log_path(mode) {
        logging::init(&log_file, &config.log_filter)?;
    }

    let store: SharedStore = if cli.ephemeral {
        tracing::info!("using in-memory store");
        MemoryStore::shared()
    } else {
        let db_path = config.get_database_path();
        let db = Database::new(
            db_path
                .to_str()
                .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
        )?;
        Rc::new(db)
    };

    let day_override = config.current_day_override;
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = zenpets::tui::App::new(config, store)?;
            zenpets::tui::run_event_loop(app)?;
        }
        Commands::Progress { nodes } => cli::handle_progress(nodes, day_override, store)?,
        Commands::CompleteDay { day } => cli::handle_complete_day(day, day_override, store)?,
        Commands::AddTask {
            title,
            date,
            description,
        } => cli::handle_add_task(title, date, description, store)?,
        Commands::ListTasks { date } => cli::handle_list_tasks(date, store)?,
        Commands::DeleteTask { id, date } => cli::handle_delete_task(id, date, store)?,
        Commands::Profile => cli::handle_show_profile(store)?,
        Commands::SetProfile {
            username,
            email,
            mobile,
            avatar,
            background,
        } => cli::handle_set_profile(username, email, mobile, avatar, background, store)?,
        Commands::Verify { code } => cli::handle_verify(code, store)?,
        Commands::Logout => cli::handle_logout(store)?,
        Commands::Theme { name } => cli::handle_theme(name, &mut config, &config_path)?,
        Commands::Reset { yes } => cli::handle_reset(yes, store)?,
    }

    Ok(())
}
