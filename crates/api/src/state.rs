use std::sync::Arc;

use khizana_core::app::{Action, Dispatched, Wardrobe};
use khizana_core::error::CoreError;
use khizana_core::gateway::StylistGateway;
use khizana_events::{EventBus, WardrobeEvent};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The single wardrobe session. The lock is only held for synchronous
    /// reducer work, never across a gateway call.
    pub wardrobe: Arc<RwLock<Wardrobe>>,
    /// Generative backend used to perform effects.
    pub gateway: Arc<dyn StylistGateway>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing wardrobe changes.
    pub event_bus: Arc<EventBus>,
    /// Cancelled when the server begins shutting down; long-lived
    /// responses such as the event stream end on it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        wardrobe: Wardrobe,
        gateway: Arc<dyn StylistGateway>,
        config: ServerConfig,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            wardrobe: Arc::new(RwLock::new(wardrobe)),
            gateway,
            config: Arc::new(config),
            event_bus,
            shutdown: CancellationToken::new(),
        }
    }

    /// Apply one action and publish its changes.
    pub async fn dispatch(&self, action: Action) -> Result<Dispatched, CoreError> {
        let dispatched = self.wardrobe.write().await.dispatch(action)?;
        self.publish(&dispatched);
        Ok(dispatched)
    }

    /// Apply an action and, if it requests gateway work, perform it and
    /// apply the completion.
    ///
    /// The effect runs on its own task so that a dropped request cannot
    /// leave the session waiting on a completion that never arrives. A
    /// completion that records a failure is reported as
    /// [`AppError::Gateway`].
    pub async fn run(&self, action: Action) -> AppResult<Dispatched> {
        let mut dispatched = self.dispatch(action).await?;
        let Some(effect) = dispatched.effect.take() else {
            return Ok(dispatched);
        };

        let ticket = effect.ticket();
        tracing::debug!(ticket = ticket.0, "Performing gateway effect");

        let state = self.clone();
        let completed = tokio::spawn(async move {
            let completion = effect.perform(state.gateway.as_ref()).await;
            state.dispatch(completion).await
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Gateway task failed: {e}")))??;

        match completed.failure {
            Some(message) => Err(AppError::Gateway(message)),
            None => Ok(completed),
        }
    }

    fn publish(&self, dispatched: &Dispatched) {
        for change in &dispatched.changes {
            let event = WardrobeEvent::from_change(change);
            let event = match &dispatched.failure {
                Some(message) => event.with_message(message),
                None => event,
            };
            self.event_bus.publish(event);
        }
    }
}
