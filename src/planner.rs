//! Calendar planner: tasks grouped by date-key (`YYYY-MM-DD`).
//!
//! The whole map is persisted under [`PLANNER_KEY`] after each change, so
//! planned tasks survive a restart just like milestone and profile state.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::ids::new_task_id;
use crate::models::TaskRecord;
use crate::store::{self, SharedStore};
use crate::utils::parse_date;

pub const PLANNER_KEY: &str = "PLANNER_TASKS";

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub struct TaskPlanner {
    store: SharedStore,
    tasks: BTreeMap<String, Vec<TaskRecord>>,
}

impl TaskPlanner {
    /// Load the stored map. Corrupt data is logged and treated as empty.
    pub fn load(store: SharedStore) -> Self {
        let tasks = store::read_or_absent(store.as_ref(), PLANNER_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(map) => Some(map),
                Err(e) => {
                    tracing::warn!(error = %e, "stored planner map is malformed, starting empty");
                    None
                }
            })
            .unwrap_or_default();
        let planner = Self { store, tasks };
        tracing::info!(dates = planner.tasks.len(), "planner loaded");
        planner
    }

    /// Tasks for one date in insertion order; empty for unknown dates.
    pub fn tasks_for(&self, date_key: &str) -> &[TaskRecord] {
        let key = canonical_key(date_key);
        self.tasks.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a task to `date_key`. Titles must be non-blank and the date must
    /// not be before `today`.
    pub fn add_task(
        &mut self,
        date_key: &str,
        title: &str,
        description: &str,
        today: NaiveDate,
    ) -> Result<TaskRecord, ModelError> {
        if title.trim().is_empty() {
            return Err(ModelError::Validation("Task name required".to_string()));
        }
        let date = parse_date(date_key).map_err(|_| ModelError::InvalidDate(date_key.to_string()))?;
        if date < today {
            return Err(ModelError::PastDate {
                date: date.format(DATE_KEY_FORMAT).to_string(),
                today: today.format(DATE_KEY_FORMAT).to_string(),
            });
        }

        let key = date.format(DATE_KEY_FORMAT).to_string();
        let record = TaskRecord {
            id: new_task_id(),
            title: title.to_string(),
            description: description.to_string(),
        };
        tracing::debug!(date = %key, id = %record.id, "task added");
        self.tasks.entry(key).or_default().push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Remove a task from `date_key`. Unknown ids are ignored.
    pub fn delete_task(&mut self, date_key: &str, id: &str) {
        let key = canonical_key(date_key);
        let Some(list) = self.tasks.get_mut(&key) else {
            return;
        };
        let before = list.len();
        list.retain(|task| task.id != id);
        if list.len() == before {
            return;
        }
        if list.is_empty() {
            self.tasks.remove(&key);
        }
        tracing::debug!(date = %key, id, "task deleted");
        self.persist();
    }

    /// Past dates accept no new tasks. Unparsable keys are read-only too.
    pub fn is_read_only(&self, date_key: &str, today: NaiveDate) -> bool {
        parse_date(date_key).map_or(true, |date| date < today)
    }

    /// Date-keys that currently hold at least one task, in calendar order.
    pub fn dates_with_tasks(&self) -> impl Iterator<Item = &str> {
        self.tasks
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(date, _)| date.as_str())
    }

    fn persist(&self) {
        match serde_json::to_string(&self.tasks) {
            Ok(raw) => {
                store::write_or_log(self.store.as_ref(), PLANNER_KEY, &raw);
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode planner map"),
        }
    }
}

/// Zero-padded `YYYY-MM-DD` for anything `parse_date` accepts, so `2025-6-12`
/// and `2025-06-12` share one entry. Unparsable keys are left alone.
pub fn canonical_key(date_key: &str) -> String {
    parse_date(date_key)
        .map(|date| date.format(DATE_KEY_FORMAT).to_string())
        .unwrap_or_else(|_| date_key.to_string())
}

/// `YYYY-MM-DD` -> `DD-MM-YYYY` for display. Anything else is returned as-is.
pub fn format_display_date(date_key: &str) -> String {
    let parts: Vec<&str> = date_key.split('-').collect();
    match parts.as_slice() {
        [y, m, d] => format!("{}-{}-{}", d, m, y),
        _ => date_key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};

    fn today() -> NaiveDate {
        parse_date("2025-06-10").unwrap()
    }

    #[test]
    fn add_on_today_succeeds_and_past_date_is_rejected() {
        let mut planner = TaskPlanner::load(MemoryStore::shared());
        let task = planner.add_task("2025-06-10", "Buy food", "", today()).unwrap();
        assert_eq!(task.title, "Buy food");
        assert_eq!(planner.tasks_for("2025-06-10"), &[task]);

        let err = planner.add_task("2025-06-09", "x", "", today()).unwrap_err();
        assert!(matches!(err, ModelError::PastDate { .. }));
        assert!(planner.tasks_for("2025-06-09").is_empty());
    }

    #[test]
    fn blank_title_and_bad_date_are_rejected() {
        let mut planner = TaskPlanner::load(MemoryStore::shared());
        assert!(matches!(
            planner.add_task("2025-06-11", "   ", "desc", today()),
            Err(ModelError::Validation(_))
        ));
        assert!(matches!(
            planner.add_task("June 11", "Walk", "", today()),
            Err(ModelError::InvalidDate(_))
        ));
        assert_eq!(planner.dates_with_tasks().count(), 0);
    }

    #[test]
    fn tasks_keep_insertion_order_and_unique_ids() {
        let mut planner = TaskPlanner::load(MemoryStore::shared());
        for title in ["Brush", "Feed", "Walk"] {
            planner.add_task("2025-06-12", title, "", today()).unwrap();
        }
        let tasks = planner.tasks_for("2025-06-12");
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Brush", "Feed", "Walk"]);
        assert_ne!(tasks[0].id, tasks[1].id);
        assert_ne!(tasks[1].id, tasks[2].id);
    }

    #[test]
    fn unknown_date_is_empty_not_an_error() {
        let planner = TaskPlanner::load(MemoryStore::shared());
        assert!(planner.tasks_for("2031-01-01").is_empty());
    }

    #[test]
    fn delete_is_scoped_to_date_and_idempotent() {
        let mut planner = TaskPlanner::load(MemoryStore::shared());
        let a = planner.add_task("2025-06-10", "A", "", today()).unwrap();
        let b = planner.add_task("2025-06-11", "B", "", today()).unwrap();

        planner.delete_task("2025-06-10", &b.id);
        assert_eq!(planner.tasks_for("2025-06-11").len(), 1);

        planner.delete_task("2025-06-10", &a.id);
        planner.delete_task("2025-06-10", &a.id);
        assert!(planner.tasks_for("2025-06-10").is_empty());
        assert_eq!(planner.dates_with_tasks().collect::<Vec<_>>(), vec!["2025-06-11"]);
    }

    #[test]
    fn map_survives_reload() {
        let store = MemoryStore::shared();
        let mut planner = TaskPlanner::load(store.clone());
        let task = planner.add_task("2025-06-20", "Vet visit", "10am", today()).unwrap();

        let reloaded = TaskPlanner::load(store);
        assert_eq!(reloaded.tasks_for("2025-06-20"), &[task]);
    }

    #[test]
    fn corrupt_map_loads_empty() {
        let store = MemoryStore::shared();
        store.set(PLANNER_KEY, "[1,2,3]").unwrap();
        let planner = TaskPlanner::load(store);
        assert_eq!(planner.dates_with_tasks().count(), 0);
    }

    #[test]
    fn read_only_dates() {
        let planner = TaskPlanner::load(MemoryStore::shared());
        assert!(planner.is_read_only("2025-06-09", today()));
        assert!(!planner.is_read_only("2025-06-10", today()));
        assert!(!planner.is_read_only("2026-01-01", today()));
        assert!(planner.is_read_only("garbage", today()));
    }

    #[test]
    fn display_date_reorders_to_day_month_year() {
        assert_eq!(format_display_date("2025-06-10"), "10-06-2025");
        assert_eq!(format_display_date("today"), "today");
    }

    #[test]
    fn unpadded_and_spaced_dates_share_the_canonical_key() {
        let mut planner = TaskPlanner::load(MemoryStore::shared());
        let vet = planner.add_task("2025-6-12", "Vet", "", today()).unwrap();
        let walk = planner.add_task(" 2025-06-12", "Walk", "", today()).unwrap();
        planner.add_task("2025-06-12", "Feed", "", today()).unwrap();

        assert_eq!(planner.tasks_for("2025-06-12").len(), 3);
        assert_eq!(planner.tasks_for("2025-6-12").len(), 3);
        let dates: Vec<&str> = planner.dates_with_tasks().collect();
        assert_eq!(dates, vec!["2025-06-12"]);
        assert_eq!(format_display_date(dates[0]), "12-06-2025");

        planner.delete_task("2025-6-12", &walk.id);
        planner.delete_task("2025-06-12", &vet.id);
        let titles: Vec<&str> = planner
            .tasks_for("2025-06-12")
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Feed"]);
    }

    #[test]
    fn canonical_key_pads_and_leaves_garbage_alone() {
        assert_eq!(canonical_key("2025-6-2"), "2025-06-02");
        assert_eq!(canonical_key("2025-06-02"), "2025-06-02");
        assert_eq!(canonical_key("garbage"), "garbage");
    }
}
