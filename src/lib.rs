pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod ids;
pub mod logging;
pub mod milestone;
pub mod models;
pub mod petshop;
pub mod planner;
pub mod profile;
pub mod settings;
pub mod store;
pub mod todo;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use error::ModelError;
pub use models::{DayNode, ProfileRecord, TaskRecord, TodoRecord};
pub use store::{KeyValueStore, MemoryStore, SharedStore, StoreError};
pub use utils::RunMode;
