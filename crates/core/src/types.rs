use serde::{Deserialize, Serialize};

/// Wardrobe item identifier (millisecond-derived, strictly increasing).
pub type ItemId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifies one in-flight gateway effect.
///
/// Completions carry the ticket they were issued with; a completion whose
/// ticket is no longer the pending one is stale and gets discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(pub u64);

/// Monotonic ticket source owned by the application state.
#[derive(Debug, Default)]
pub struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}
