/// Millisecond-based ids that never repeat within a generator, even when
/// several are requested inside the same millisecond.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last + 1);
        self.last = id;
        id
    }
}

/// Opaque token for planner tasks. UUIDv7 keeps them time-ordered and unique
/// across reloads of the persisted map.
pub fn new_task_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_strictly_increase_within_one_millisecond() {
        let mut ids = IdGenerator::new();
        let batch: Vec<u64> = (0..1000).map(|_| ids.next_id()).collect();
        assert!(batch.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn task_ids_do_not_collide() {
        let batch: HashSet<String> = (0..1000).map(|_| new_task_id()).collect();
        assert_eq!(batch.len(), 1000);
    }
}
