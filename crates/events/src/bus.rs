//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`WardrobeEvent`]s. It is
//! shared via `Arc<EventBus>` between the HTTP layer and its subscribers.

use chrono::{DateTime, Utc};
use khizana_core::app::Change;
use khizana_core::types::ItemId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// WardrobeEvent
// ---------------------------------------------------------------------------

/// A state change in the wardrobe session.
///
/// Constructed via [`WardrobeEvent::new`] (or [`WardrobeEvent::from_change`])
/// and enriched with [`with_item`](WardrobeEvent::with_item) and
/// [`with_payload`](WardrobeEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeEvent {
    /// Dot-separated event name, e.g. `"item.added"`.
    pub event_type: String,

    /// The wardrobe item the event concerns, if any.
    pub item_id: Option<ItemId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl WardrobeEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            item_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Build the event announcing a dispatched [`Change`].
    pub fn from_change(change: &Change) -> Self {
        let event = Self::new(change.event_type());
        let event = match change.item_id() {
            Some(id) => event.with_item(id),
            None => event,
        };
        match change {
            Change::ViewChanged(view) => {
                event.with_payload(serde_json::json!({ "view": view }))
            }
            Change::SuggestionsReplaced { count } => {
                event.with_payload(serde_json::json!({ "count": count }))
            }
            _ => event,
        }
    }

    pub fn with_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Attach a user-visible failure message to the payload.
    pub fn with_message(mut self, message: &str) -> Self {
        if let serde_json::Value::Object(map) = &mut self.payload {
            map.insert("message".into(), message.into());
        }
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// ```rust
/// use khizana_events::bus::{EventBus, WardrobeEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(WardrobeEvent::new("item.added").with_item(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<WardrobeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no active subscribers the event is dropped.
    pub fn publish(&self, event: WardrobeEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WardrobeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
