use crate::model::{User, UserId};

/// Clock-seeded, strictly increasing id source for locally added records.
///
/// Two adds within the same millisecond still get distinct ids, and an id already
/// present in the record list is never handed out.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: UserId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id given the current clock reading (milliseconds) and the records in use.
    pub fn next(&mut self, now_ms: u64, existing: &[User]) -> UserId {
        let mut candidate = now_ms.max(self.last.saturating_add(1));
        while existing.iter().any(|u| u.id == candidate) {
            candidate = candidate.saturating_add(1);
        }
        self.last = candidate;
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_clock_tick_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let a = ids.next(1_000, &[]);
        let b = ids.next(1_000, &[]);
        let c = ids.next(999, &[]);
        assert_eq!((a, b, c), (1_000, 1_001, 1_002));
        assert_eq!(ids.next(0, &[]), 1_003);
    }

    #[test]
    fn skips_ids_already_in_use() {
        let taken = vec![
            User { id: 500, ..Default::default() },
            User { id: 501, ..Default::default() },
        ];
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(500, &taken), 502);
    }
}
