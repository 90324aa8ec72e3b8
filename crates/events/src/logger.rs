//! Background subscriber that writes every [`WardrobeEvent`] to the log.

use tokio::sync::broadcast;

use crate::bus::WardrobeEvent;

pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop until the bus is dropped.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<WardrobeEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::log(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn log(event: &WardrobeEvent) {
        match event.payload.get("message").and_then(|m| m.as_str()) {
            Some(reason) => tracing::warn!(
                event_type = %event.event_type,
                item_id = ?event.item_id,
                reason,
                "Wardrobe event"
            ),
            None => tracing::info!(
                event_type = %event.event_type,
                item_id = ?event.item_id,
                payload = %event.payload,
                "Wardrobe event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn logger_drains_bus_and_stops_when_closed() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EventLogger::run(bus.subscribe()));

        bus.publish(WardrobeEvent::new("item.added").with_item(1));
        bus.publish(WardrobeEvent::new("outfit.generation_failed").with_message("failed"));
        drop(bus);

        assert_eq!(handle.await.unwrap(), 2);
    }
}
