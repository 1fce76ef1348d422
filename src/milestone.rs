//! Milestone path: a single "last completed day" counter and the day-nodes
//! derived from it.

use chrono::NaiveDate;

use crate::models::DayNode;
use crate::store::{self, SharedStore};
use crate::utils::parse_date;

pub const MILESTONE_KEY: &str = "TASK_DONE_DAY";
pub const JOURNEY_START_KEY: &str = "JOURNEY_START";

pub const DEFAULT_INITIAL_NODES: usize = 30;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// `count` consecutive nodes from `start_day`, unlocked up to `last_completed_day`.
///
/// Pure: the same arguments always give the same page.
pub fn generate_page(start_day: u32, count: usize, last_completed_day: u32) -> Vec<DayNode> {
    (0..count)
        .map_while(|offset| u32::try_from(offset).ok().and_then(|o| start_day.checked_add(o)))
        .map(|day| DayNode {
            day,
            unlocked: day <= last_completed_day,
        })
        .collect()
}

/// Persisted progress counter. Only ever moves forward.
pub struct MilestoneProgress {
    store: SharedStore,
    last_completed_day: u32,
}

impl MilestoneProgress {
    /// Read the stored counter; absent, unreadable or garbage values count as 0.
    pub fn load(store: SharedStore) -> Self {
        let last_completed_day = match store::read_or_absent(store.as_ref(), MILESTONE_KEY) {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "stored milestone counter unparsable, starting at 0");
                0
            }),
            None => 0,
        };
        tracing::info!(last_completed_day, "milestone progress loaded");
        Self {
            store,
            last_completed_day,
        }
    }

    pub fn last_completed_day(&self) -> u32 {
        self.last_completed_day
    }

    /// Raise the counter to `target_day` if that is further along, then persist.
    pub fn advance_to(&mut self, target_day: u32) -> u32 {
        let next = self.last_completed_day.max(target_day);
        if next != self.last_completed_day {
            tracing::debug!(from = self.last_completed_day, to = next, "milestone advanced");
        }
        self.last_completed_day = next;
        store::write_or_log(self.store.as_ref(), MILESTONE_KEY, &next.to_string());
        next
    }

    pub fn is_unlocked(&self, day: i64) -> bool {
        day <= i64::from(self.last_completed_day)
    }

    pub fn generate_page(&self, start_day: u32, count: usize) -> Vec<DayNode> {
        generate_page(start_day, count, self.last_completed_day)
    }
}

/// The rendered, lazily extended slice of the path, plus the open reward.
#[derive(Debug, Clone)]
pub struct MilestonePath {
    nodes: Vec<DayNode>,
    page_size: usize,
    selected: Option<u32>,
}

impl MilestonePath {
    pub fn new(progress: &MilestoneProgress, initial_nodes: usize, page_size: usize) -> Self {
        Self {
            nodes: progress.generate_page(1, initial_nodes),
            page_size: page_size.max(1),
            selected: None,
        }
    }

    pub fn nodes(&self) -> &[DayNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append the next page after the last rendered node.
    pub fn load_more(&mut self, progress: &MilestoneProgress) {
        let next_day = self.nodes.last().map_or(1, |node| node.day.saturating_add(1));
        let page = progress.generate_page(next_day, self.page_size);
        self.nodes.extend(page);
    }

    /// Re-derive every rendered node against the current counter.
    pub fn refresh(&mut self, progress: &MilestoneProgress) {
        self.nodes = progress.generate_page(1, self.nodes.len());
    }

    /// Open the reward for `day`. Locked or unrendered nodes do nothing.
    pub fn select(&mut self, day: u32) -> bool {
        let unlocked = self
            .nodes
            .iter()
            .any(|node| node.day == day && node.unlocked);
        if unlocked {
            self.selected = Some(day);
        }
        unlocked
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn collect_reward(&mut self) -> Option<u32> {
        self.selected.take()
    }

    /// Mark today's task done. Returns whether the counter moved.
    pub fn complete_today(&mut self, progress: &mut MilestoneProgress, current_day: u32) -> bool {
        if current_day <= progress.last_completed_day() {
            return false;
        }
        progress.advance_to(current_day);
        self.refresh(progress);
        true
    }
}

/// Maps calendar dates onto journey days. Day 1 is the day the journey started.
#[derive(Debug, Clone, Copy)]
pub struct JourneyClock {
    start: NaiveDate,
}

impl JourneyClock {
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// Use the stored start date, recording `today` as the start on first launch.
    pub fn load_or_start(store: &SharedStore, today: NaiveDate) -> Self {
        let stored = store::read_or_absent(store.as_ref(), JOURNEY_START_KEY)
            .and_then(|raw| parse_date(raw.trim()).ok());
        match stored {
            Some(start) => Self::new(start),
            None => {
                store::write_or_log(
                    store.as_ref(),
                    JOURNEY_START_KEY,
                    &today.format("%Y-%m-%d").to_string(),
                );
                tracing::info!(%today, "journey started");
                Self::new(today)
            }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn current_day(&self, today: NaiveDate) -> u32 {
        let elapsed = (today - self.start).num_days().max(0);
        u32::try_from(elapsed + 1).unwrap_or(u32::MAX)
    }
}

/// Journey day for `today`: the configured override if any, else counted from the stored start.
pub fn current_journey_day(store: &SharedStore, day_override: Option<u32>, today: NaiveDate) -> u32 {
    day_override.unwrap_or_else(|| JourneyClock::load_or_start(store, today).current_day(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::FlakyStore;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn fresh_progress_has_every_node_locked() {
        let progress = MilestoneProgress::load(MemoryStore::shared());
        assert_eq!(progress.last_completed_day(), 0);
        let page = progress.generate_page(1, 5);
        assert_eq!(page.len(), 5);
        assert_eq!(page.iter().map(|n| n.day).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(page.iter().all(|n| !n.unlocked));
    }

    #[test]
    fn unlock_boundary_sits_on_last_completed_day() {
        let mut progress = MilestoneProgress::load(MemoryStore::shared());
        progress.advance_to(5);
        assert!(progress.is_unlocked(5));
        assert!(!progress.is_unlocked(6));
        assert!(progress.is_unlocked(0));
        assert!(progress.is_unlocked(-3));
    }

    #[test]
    fn zero_progress_still_unlocks_non_positive_days() {
        let progress = MilestoneProgress::load(MemoryStore::shared());
        assert!(progress.is_unlocked(0));
        assert!(progress.is_unlocked(-1));
        assert!(!progress.is_unlocked(1));
    }

    #[test]
    fn advance_is_monotonic_and_ends_at_max_target() {
        let mut progress = MilestoneProgress::load(MemoryStore::shared());
        let targets = [3, 1, 9, 9, 4, 0, 7];
        let mut previous = progress.last_completed_day();
        for target in targets {
            let now = progress.advance_to(target);
            assert!(now >= previous);
            previous = now;
        }
        assert_eq!(progress.last_completed_day(), 9);
    }

    #[test]
    fn advance_persists_and_reloads() {
        let store = MemoryStore::shared();
        let mut progress = MilestoneProgress::load(store.clone());
        progress.advance_to(12);
        progress.advance_to(4);
        assert_eq!(store.get(MILESTONE_KEY).unwrap().as_deref(), Some("12"));
        assert_eq!(MilestoneProgress::load(store).last_completed_day(), 12);
    }

    #[test]
    fn garbage_counter_loads_as_zero() {
        let store = MemoryStore::shared();
        store.set(MILESTONE_KEY, "five").unwrap();
        assert_eq!(MilestoneProgress::load(store.clone()).last_completed_day(), 0);
        store.set(MILESTONE_KEY, "-4").unwrap();
        assert_eq!(MilestoneProgress::load(store).last_completed_day(), 0);
    }

    #[test]
    fn failed_write_keeps_in_memory_progress() {
        let store = Rc::new(FlakyStore::default());
        let mut progress = MilestoneProgress::load(store.clone());
        store.fail_writes.set(true);
        assert_eq!(progress.advance_to(3), 3);
        assert!(progress.is_unlocked(3));
        assert_eq!(store.inner.get(MILESTONE_KEY).unwrap(), None);
    }

    #[test]
    fn generate_page_is_restartable() {
        let mut progress = MilestoneProgress::load(MemoryStore::shared());
        progress.advance_to(8);
        assert_eq!(progress.generate_page(5, 10), progress.generate_page(5, 10));
        assert_eq!(generate_page(5, 10, 8), progress.generate_page(5, 10));
        assert!(generate_page(1, 0, 8).is_empty());
        assert_eq!(generate_page(u32::MAX, 3, 0).len(), 1);
    }

    #[test]
    fn path_loads_more_pages_in_order() {
        let progress = MilestoneProgress::load(MemoryStore::shared());
        let mut path = MilestonePath::new(&progress, DEFAULT_INITIAL_NODES, DEFAULT_PAGE_SIZE);
        assert_eq!(path.len(), 30);
        path.load_more(&progress);
        path.load_more(&progress);
        assert_eq!(path.len(), 70);
        assert!(path.nodes().iter().enumerate().all(|(i, n)| n.day as usize == i + 1));
    }

    #[test]
    fn completing_today_re_derives_the_whole_rendered_range() {
        let mut progress = MilestoneProgress::load(MemoryStore::shared());
        let mut path = MilestonePath::new(&progress, 30, 20);
        path.load_more(&progress);

        assert!(path.complete_today(&mut progress, 45));
        assert_eq!(path.len(), 50);
        for node in path.nodes() {
            assert_eq!(node.unlocked, node.day <= 45, "day {}", node.day);
        }
        assert!(!path.complete_today(&mut progress, 45));
        assert!(!path.complete_today(&mut progress, 10));
        assert_eq!(progress.last_completed_day(), 45);
    }

    #[test]
    fn only_unlocked_nodes_open_a_reward() {
        let mut progress = MilestoneProgress::load(MemoryStore::shared());
        progress.advance_to(2);
        let mut path = MilestonePath::new(&progress, 5, 5);

        assert!(!path.select(3));
        assert_eq!(path.selected(), None);
        assert!(path.select(2));
        assert_eq!(path.collect_reward(), Some(2));
        assert_eq!(path.selected(), None);
    }

    #[test]
    fn journey_clock_counts_days_from_first_launch() {
        let store: SharedStore = MemoryStore::shared();
        let clock = JourneyClock::load_or_start(&store, date("2025-06-10"));
        assert_eq!(clock.current_day(date("2025-06-10")), 1);
        assert_eq!(clock.current_day(date("2025-06-14")), 5);
        assert_eq!(clock.current_day(date("2025-06-01")), 1);

        let reopened = JourneyClock::load_or_start(&store, date("2025-07-01"));
        assert_eq!(reopened.start(), date("2025-06-10"));
    }

    #[test]
    fn override_pins_the_journey_day() {
        let store: SharedStore = MemoryStore::shared();
        assert_eq!(current_journey_day(&store, Some(5), date("2025-06-10")), 5);
        assert_eq!(current_journey_day(&store, None, date("2025-06-10")), 1);
        assert_eq!(current_journey_day(&store, None, date("2025-06-12")), 3);
    }
}
