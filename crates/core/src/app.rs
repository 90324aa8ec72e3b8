//! Application state and the action reducer (view controller).
//!
//! [`Wardrobe`] is the whole session state. User input and gateway
//! completions are expressed as [`Action`]s and applied with
//! [`Wardrobe::dispatch`]. Dispatch never awaits: when an action needs the
//! stylist gateway, it returns an [`Effect`] which the caller performs
//! (outside any lock) and whose completion is dispatched back as a new
//! action.
//!
//! Every dispatch reports the [`Change`]s it made so dependent views can be
//! notified.

use serde::{Deserialize, Serialize};

use crate::category::Categorizer;
use crate::composer::{GenerationOutcome, OutfitComposer};
use crate::error::CoreError;
use crate::gateway::{GatewayError, StylistGateway};
use crate::intake::{IntakeSession, ProcessedUpload, ProcessingOutcome};
use crate::item::DraftEdit;
use crate::media::ImageData;
use crate::profile::{ProfileUpdate, UserProfile};
use crate::store::ItemStore;
use crate::suggestion::{OutfitSuggestion, SuggestionBoard, SuggestionOutcome, SuggestionQuery};
use crate::types::{ItemId, Ticket, TicketCounter};

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Top-level navigation target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Wardrobe,
    OutfitCreator,
    Suggestions,
}

// ---------------------------------------------------------------------------
// Actions, effects, changes
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Action {
    Navigate(View),

    // -- add-item flow --
    OpenIntake,
    CloseIntake,
    UploadImage(ImageData),
    UploadProcessed {
        ticket: Ticket,
        result: Result<ProcessedUpload, GatewayError>,
    },
    EditDraft(DraftEdit),
    DiscardDraft,
    SaveDraft,

    // -- wardrobe --
    RemoveItem(ItemId),

    // -- outfit composer --
    ToggleSelection(ItemId),
    ClearOutfit,
    GenerateOutfit,
    OutfitGenerated {
        ticket: Ticket,
        result: Result<ImageData, GatewayError>,
    },
    UpdateProfile(ProfileUpdate),

    // -- suggestions --
    RequestSuggestions {
        occasion: String,
    },
    SuggestionsReceived {
        ticket: Ticket,
        result: Result<Vec<OutfitSuggestion>, GatewayError>,
    },
}

/// Gateway work requested by a dispatch.
#[derive(Debug)]
pub enum Effect {
    ProcessUpload {
        ticket: Ticket,
        image: ImageData,
    },
    ComposeOutfit {
        ticket: Ticket,
        garments: Vec<ImageData>,
        profile: UserProfile,
    },
    FetchSuggestions {
        ticket: Ticket,
        query: SuggestionQuery,
    },
}

impl Effect {
    /// Run the gateway call(s) and wrap the result as the completion action.
    ///
    /// Analysis and professionalization run concurrently; the upload only
    /// succeeds if both do.
    pub async fn perform(self, gateway: &dyn StylistGateway) -> Action {
        match self {
            Effect::ProcessUpload { ticket, image } => {
                let joined =
                    tokio::try_join!(gateway.analyze(&image), gateway.professionalize(&image));
                let result = joined.map(|(info, processed_image)| ProcessedUpload {
                    info,
                    processed_image,
                });
                Action::UploadProcessed { ticket, result }
            }
            Effect::ComposeOutfit {
                ticket,
                garments,
                profile,
            } => {
                let result = gateway.compose_outfit(&garments, &profile).await;
                Action::OutfitGenerated { ticket, result }
            }
            Effect::FetchSuggestions { ticket, query } => {
                let result = gateway.suggest(&query.descriptors, &query.occasion).await;
                Action::SuggestionsReceived { ticket, result }
            }
        }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            Effect::ProcessUpload { ticket, .. }
            | Effect::ComposeOutfit { ticket, .. }
            | Effect::FetchSuggestions { ticket, .. } => *ticket,
        }
    }
}

/// Observable state change produced by a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    ViewChanged(View),
    IntakeOpened,
    IntakeClosed,
    IntakeProcessing,
    IntakeReady,
    IntakeFailed,
    IntakeDraftEdited,
    ItemAdded(ItemId),
    ItemRemoved(ItemId),
    SelectionChanged,
    OutfitCleared,
    OutfitGenerating,
    OutfitGenerated,
    OutfitGenerationFailed,
    ProfileUpdated,
    SuggestionsRequested,
    SuggestionsReplaced { count: usize },
    SuggestionsFailed,
}

impl Change {
    /// Dot-separated event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Change::ViewChanged(_) => "view.changed",
            Change::IntakeOpened => "intake.opened",
            Change::IntakeClosed => "intake.closed",
            Change::IntakeProcessing => "intake.processing",
            Change::IntakeReady => "intake.ready",
            Change::IntakeFailed => "intake.failed",
            Change::IntakeDraftEdited => "intake.draft_edited",
            Change::ItemAdded(_) => "item.added",
            Change::ItemRemoved(_) => "item.removed",
            Change::SelectionChanged => "outfit.selection_changed",
            Change::OutfitCleared => "outfit.cleared",
            Change::OutfitGenerating => "outfit.generating",
            Change::OutfitGenerated => "outfit.generated",
            Change::OutfitGenerationFailed => "outfit.generation_failed",
            Change::ProfileUpdated => "profile.updated",
            Change::SuggestionsRequested => "suggestions.requested",
            Change::SuggestionsReplaced { .. } => "suggestions.replaced",
            Change::SuggestionsFailed => "suggestions.failed",
        }
    }

    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Change::ItemAdded(id) | Change::ItemRemoved(id) => Some(*id),
            _ => None,
        }
    }
}

/// What a dispatch did.
#[derive(Debug, Default)]
pub struct Dispatched {
    /// Gateway work to perform next, if any.
    pub effect: Option<Effect>,
    pub changes: Vec<Change>,
    /// User-visible failure message recorded by a gateway completion.
    pub failure: Option<String>,
}

impl Dispatched {
    fn change(change: Change) -> Self {
        Self {
            changes: vec![change],
            ..Default::default()
        }
    }

    /// Id of the item saved by this dispatch.
    pub fn added_item(&self) -> Option<ItemId> {
        self.changes.iter().find_map(|c| match c {
            Change::ItemAdded(id) => Some(*id),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Wardrobe (application state)
// ---------------------------------------------------------------------------

/// The complete session state.
#[derive(Debug, Default)]
pub struct Wardrobe {
    view: View,
    store: ItemStore,
    categorizer: Categorizer,
    composer: OutfitComposer,
    profile: UserProfile,
    suggestions: SuggestionBoard,
    intake: Option<IntakeSession>,
    tickets: TicketCounter,
}

impl Wardrobe {
    pub fn new(categorizer: Categorizer) -> Self {
        Self {
            categorizer,
            ..Default::default()
        }
    }

    /// Apply one action. Errors leave the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<Dispatched, CoreError> {
        match action {
            Action::Navigate(view) => {
                if self.view == view {
                    return Ok(Dispatched::default());
                }
                self.view = view;
                Ok(Dispatched::change(Change::ViewChanged(view)))
            }

            Action::OpenIntake => {
                self.intake = Some(IntakeSession::new());
                Ok(Dispatched::change(Change::IntakeOpened))
            }
            Action::CloseIntake => match self.intake.take() {
                Some(_) => Ok(Dispatched::change(Change::IntakeClosed)),
                None => Ok(Dispatched::default()),
            },
            Action::UploadImage(image) => {
                let ticket = self.tickets.issue();
                let image = self.open_intake()?.begin_processing(ticket, image)?;
                Ok(Dispatched {
                    effect: Some(Effect::ProcessUpload { ticket, image }),
                    changes: vec![Change::IntakeProcessing],
                    failure: None,
                })
            }
            Action::UploadProcessed { ticket, result } => {
                let session = self.intake.as_mut().ok_or_else(|| {
                    CoreError::Conflict(
                        "The add-item flow was closed before processing finished".into(),
                    )
                })?;
                match session.finish_processing(ticket, result)? {
                    ProcessingOutcome::Ready => Ok(Dispatched::change(Change::IntakeReady)),
                    ProcessingOutcome::Failed { message } => Ok(Dispatched {
                        changes: vec![Change::IntakeFailed],
                        failure: Some(message),
                        ..Default::default()
                    }),
                }
            }
            Action::EditDraft(edit) => {
                self.open_intake()?.edit(edit)?;
                Ok(Dispatched::change(Change::IntakeDraftEdited))
            }
            Action::DiscardDraft => {
                self.open_intake()?.discard_draft()?;
                Ok(Dispatched::default())
            }
            Action::SaveDraft => {
                let candidate = self.open_intake()?.ready_item()?;
                let id = self.store.add(candidate).id;
                self.intake = None;
                Ok(Dispatched {
                    changes: vec![Change::ItemAdded(id), Change::IntakeClosed],
                    ..Default::default()
                })
            }

            Action::RemoveItem(id) => {
                if !self.store.remove(id) {
                    return Ok(Dispatched::default());
                }
                let mut changes = vec![Change::ItemRemoved(id)];
                if !self.composer.retain_existing(&self.store).is_empty() {
                    changes.push(Change::SelectionChanged);
                }
                Ok(Dispatched {
                    changes,
                    ..Default::default()
                })
            }

            Action::ToggleSelection(id) => {
                let item = self.store.get(id).ok_or(CoreError::NotFound {
                    entity: "ClothingItem",
                    id,
                })?;
                self.composer.toggle(item, &self.categorizer)?;
                Ok(Dispatched::change(Change::SelectionChanged))
            }
            Action::ClearOutfit => {
                self.composer.clear();
                Ok(Dispatched::change(Change::OutfitCleared))
            }
            Action::GenerateOutfit => {
                let ticket = self.tickets.issue();
                let garments = self
                    .composer
                    .begin_generation(ticket, &self.store, &self.profile)?;
                Ok(Dispatched {
                    effect: Some(Effect::ComposeOutfit {
                        ticket,
                        garments,
                        profile: self.profile.clone(),
                    }),
                    changes: vec![Change::OutfitGenerating],
                    failure: None,
                })
            }
            Action::OutfitGenerated { ticket, result } => {
                match self.composer.finish_generation(ticket, result)? {
                    GenerationOutcome::Generated => {
                        Ok(Dispatched::change(Change::OutfitGenerated))
                    }
                    GenerationOutcome::Failed { message } => Ok(Dispatched {
                        changes: vec![Change::OutfitGenerationFailed],
                        failure: Some(message),
                        ..Default::default()
                    }),
                }
            }
            Action::UpdateProfile(update) => {
                self.profile.apply(update)?;
                Ok(Dispatched::change(Change::ProfileUpdated))
            }

            Action::RequestSuggestions { occasion } => {
                let ticket = self.tickets.issue();
                let query = self
                    .suggestions
                    .begin_request(ticket, self.store.list(), &occasion)?;
                Ok(Dispatched {
                    effect: Some(Effect::FetchSuggestions { ticket, query }),
                    changes: vec![Change::SuggestionsRequested],
                    failure: None,
                })
            }
            Action::SuggestionsReceived { ticket, result } => {
                match self.suggestions.finish_request(ticket, result)? {
                    SuggestionOutcome::Replaced { count } => {
                        Ok(Dispatched::change(Change::SuggestionsReplaced { count }))
                    }
                    SuggestionOutcome::Failed { message } => Ok(Dispatched {
                        changes: vec![Change::SuggestionsFailed],
                        failure: Some(message),
                        ..Default::default()
                    }),
                }
            }
        }
    }

    fn open_intake(&mut self) -> Result<&mut IntakeSession, CoreError> {
        self.intake
            .as_mut()
            .ok_or_else(|| CoreError::Conflict("The add-item flow is not open".into()))
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub fn composer(&self) -> &OutfitComposer {
        &self.composer
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn suggestions(&self) -> &SuggestionBoard {
        &self.suggestions
    }

    pub fn intake(&self) -> Option<&IntakeSession> {
        self.intake.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
