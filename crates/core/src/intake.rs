//! Add-item flow: upload, analysis + professionalization, review, save.
//!
//! ```text
//! AwaitingImage --upload--> Processing --ok--> Reviewing --save--> (closed)
//!       ^                       |                  |
//!       +-------failure---------+      discard ----+
//! ```
//!
//! The session only produces a [`NewClothingItem`]; adding it to the store
//! is the caller's job.

use serde::Serialize;

use crate::error::CoreError;
use crate::gateway::GatewayError;
use crate::item::{ClothingInfo, DraftEdit, NewClothingItem};
use crate::media::ImageData;
use crate::types::Ticket;

/// Shown when analysis or professionalization fails.
pub const PROCESSING_FAILED_MESSAGE: &str =
    "An error occurred while processing the image. Please try again.";

/// Output of a successful analyze + professionalize round trip.
#[derive(Debug, Clone)]
pub struct ProcessedUpload {
    pub info: ClothingInfo,
    pub processed_image: ImageData,
}

/// A processed item under review; text fields stay editable until save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDraft {
    #[serde(flatten)]
    pub info: ClothingInfo,
    pub original_image: ImageData,
    pub processed_image: ImageData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeStage {
    AwaitingImage,
    Processing { ticket: Ticket, original: ImageData },
    Reviewing(ItemDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Ready,
    Failed { message: String },
}

/// Read model of an open add-item flow.
#[derive(Debug, Serialize)]
pub struct IntakeSnapshot<'a> {
    pub stage: &'static str,
    pub draft: Option<&'a ItemDraft>,
    pub error: Option<&'a str>,
}

/// One open add-item dialog.
#[derive(Debug)]
pub struct IntakeSession {
    stage: IntakeStage,
    error: Option<String>,
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeSession {
    pub fn new() -> Self {
        Self {
            stage: IntakeStage::AwaitingImage,
            error: None,
        }
    }

    /// Accept an upload and start processing it under `ticket`.
    ///
    /// Returns the validated image to send to the gateway. Uploading again
    /// while processing supersedes the earlier upload; a draft under review
    /// must be discarded first.
    pub fn begin_processing(
        &mut self,
        ticket: Ticket,
        upload: ImageData,
    ) -> Result<ImageData, CoreError> {
        if let IntakeStage::Reviewing(_) = self.stage {
            return Err(CoreError::Conflict(
                "A processed draft is under review. Save or discard it first".into(),
            ));
        }
        let original = upload.validate_upload()?;

        self.stage = IntakeStage::Processing {
            ticket,
            original: original.clone(),
        };
        self.error = None;
        Ok(original)
    }

    /// Apply the analyze + professionalize result. Both halves must have
    /// succeeded; any failure sends the flow back to image selection.
    pub fn finish_processing(
        &mut self,
        ticket: Ticket,
        result: Result<ProcessedUpload, GatewayError>,
    ) -> Result<ProcessingOutcome, CoreError> {
        let original = match &self.stage {
            IntakeStage::Processing {
                ticket: pending,
                original,
            } if *pending == ticket => original.clone(),
            _ => {
                return Err(CoreError::Conflict(
                    "Image processing result is stale and was discarded".into(),
                ))
            }
        };

        match result {
            Ok(processed) => {
                self.stage = IntakeStage::Reviewing(ItemDraft {
                    info: processed.info,
                    original_image: original,
                    processed_image: processed.processed_image,
                });
                self.error = None;
                Ok(ProcessingOutcome::Ready)
            }
            Err(_) => {
                self.stage = IntakeStage::AwaitingImage;
                self.error = Some(PROCESSING_FAILED_MESSAGE.to_string());
                Ok(ProcessingOutcome::Failed {
                    message: PROCESSING_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Edit the draft's text fields.
    pub fn edit(&mut self, edit: DraftEdit) -> Result<&ItemDraft, CoreError> {
        match &mut self.stage {
            IntakeStage::Reviewing(draft) => {
                edit.apply_to(&mut draft.info);
                Ok(draft)
            }
            _ => Err(CoreError::Conflict("There is no draft to edit".into())),
        }
    }

    /// Throw the draft away and return to image selection.
    pub fn discard_draft(&mut self) -> Result<(), CoreError> {
        match self.stage {
            IntakeStage::Reviewing(_) => {
                self.stage = IntakeStage::AwaitingImage;
                Ok(())
            }
            _ => Err(CoreError::Conflict("There is no draft to discard".into())),
        }
    }

    /// The candidate to store. Only a reviewed draft, which always carries
    /// a processed image, can be saved.
    pub fn ready_item(&self) -> Result<NewClothingItem, CoreError> {
        match &self.stage {
            IntakeStage::Reviewing(draft) => Ok(NewClothingItem {
                info: draft.info.clone(),
                original_image: draft.original_image.clone(),
                processed_image: draft.processed_image.clone(),
            }),
            IntakeStage::Processing { .. } => Err(CoreError::Conflict(
                "The image is still being processed".into(),
            )),
            IntakeStage::AwaitingImage => Err(CoreError::Validation(
                "Upload and process an image before saving".into(),
            )),
        }
    }

    pub fn stage(&self) -> &IntakeStage {
        &self.stage
    }

    pub fn stage_name(&self) -> &'static str {
        match self.stage {
            IntakeStage::AwaitingImage => "awaiting_image",
            IntakeStage::Processing { .. } => "processing",
            IntakeStage::Reviewing(_) => "reviewing",
        }
    }

    pub fn draft(&self) -> Option<&ItemDraft> {
        match &self.stage {
            IntakeStage::Reviewing(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> IntakeSnapshot<'_> {
        IntakeSnapshot {
            stage: self.stage_name(),
            draft: self.draft(),
            error: self.error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::item::fixtures::info;
    use crate::media::fixtures::png;

    fn processed() -> ProcessedUpload {
        ProcessedUpload {
            info: info("قميص", "أبيض", "كاجوال"),
            processed_image: ImageData::new("image/png", vec![4, 2]),
        }
    }

    fn reviewing() -> IntakeSession {
        let mut session = IntakeSession::new();
        session.begin_processing(Ticket(1), png()).unwrap();
        session.finish_processing(Ticket(1), Ok(processed())).unwrap();
        session
    }

    #[test]
    fn new_session_awaits_image() {
        let session = IntakeSession::new();
        assert_eq!(session.stage(), &IntakeStage::AwaitingImage);
        assert_matches!(session.ready_item(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_upload_is_rejected_before_processing() {
        let mut session = IntakeSession::new();
        let empty = ImageData::new("image/png", Vec::new());

        assert_matches!(
            session.begin_processing(Ticket(1), empty),
            Err(CoreError::Validation(_))
        );
        assert_eq!(session.stage_name(), "awaiting_image");
    }

    #[test]
    fn successful_processing_produces_draft_with_both_images() {
        let session = reviewing();

        let draft = session.draft().unwrap();
        assert_eq!(draft.info.kind, "قميص");
        assert_eq!(draft.original_image, png());
        assert_eq!(draft.processed_image.bytes(), &[4, 2]);
    }

    #[test]
    fn failed_processing_returns_to_image_selection_with_error() {
        let mut session = IntakeSession::new();
        session.begin_processing(Ticket(1), png()).unwrap();

        let outcome = session
            .finish_processing(Ticket(1), Err(GatewayError::MissingImage))
            .unwrap();

        assert_matches!(outcome, ProcessingOutcome::Failed { .. });
        assert_eq!(session.stage(), &IntakeStage::AwaitingImage);
        assert_eq!(session.error(), Some(PROCESSING_FAILED_MESSAGE));
        assert_matches!(session.ready_item(), Err(_));
    }

    #[test]
    fn stale_processing_result_is_discarded() {
        let mut session = IntakeSession::new();
        session.begin_processing(Ticket(1), png()).unwrap();
        session.begin_processing(Ticket(2), png()).unwrap();

        assert_matches!(
            session.finish_processing(Ticket(1), Ok(processed())),
            Err(CoreError::Conflict(_))
        );
        assert_eq!(session.stage_name(), "processing");
    }

    #[test]
    fn cannot_save_while_processing() {
        let mut session = IntakeSession::new();
        session.begin_processing(Ticket(1), png()).unwrap();
        assert_matches!(session.ready_item(), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn edits_change_the_draft_before_save() {
        let mut session = reviewing();
        session
            .edit(DraftEdit {
                kind: Some("بلوزة".into()),
                description: Some("بلوزة قطنية".into()),
                ..Default::default()
            })
            .unwrap();

        let item = session.ready_item().unwrap();
        assert_eq!(item.info.kind, "بلوزة");
        assert_eq!(item.info.color, "أبيض");
        assert_eq!(item.info.description, "بلوزة قطنية");
    }

    #[test]
    fn edit_without_draft_is_rejected() {
        let mut session = IntakeSession::new();
        assert_matches!(
            session.edit(DraftEdit::default()),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn upload_during_review_requires_discard() {
        let mut session = reviewing();
        assert_matches!(
            session.begin_processing(Ticket(2), png()),
            Err(CoreError::Conflict(_))
        );

        session.discard_draft().unwrap();
        assert!(session.begin_processing(Ticket(2), png()).is_ok());
    }

    #[test]
    fn snapshot_reports_stage_and_draft() {
        let session = reviewing();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.stage, "reviewing");
        assert!(snapshot.draft.is_some());
        assert!(snapshot.error.is_none());
    }
}
