use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::models::RecordId;

/// Hands out millisecond timestamps, bumped past the previous id when two
/// records are created within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn starting_after(last: RecordId) -> Self {
        IdGenerator {
            last: AtomicI64::new(last),
        }
    }

    pub fn next(&self) -> RecordId {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}
