//! Typed access to the backend's admin lesson-draft surface.

mod client;
pub use client::ApiClient;

mod error;
pub use error::{ApiError, ApiResult, AuthRedirect, ResourceType};

mod wire;

use crate::model::RejectionReason;
use crate::model::entity::{
    CodeLessonDetails, DraftStatus, LessonDraft, ReviewState, VideoLessonDetails,
};

/// Full draft list as returned by the backend.
#[derive(Debug, Clone, Default)]
pub struct DraftPage {
    pub drafts: Vec<LessonDraft>,
    pub total_elements: u64,
}

/// Outcome of a confirmed state transition.
///
/// `record` is the authoritative draft when the backend echoes it back.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionReceipt {
    pub id: i64,
    pub review: ReviewState,
    pub record: Option<LessonDraft>,
}

impl TransitionReceipt {
    pub fn approved(id: i64) -> Self {
        Self {
            id,
            review: ReviewState::Approved,
            record: None,
        }
    }

    pub fn rejected(id: i64, reason: &RejectionReason) -> Self {
        Self {
            id,
            review: ReviewState::Rejected {
                reason: reason.as_str().to_string(),
            },
            record: None,
        }
    }

    /// Attaches the backend's echoed draft when it confirms this transition.
    ///
    /// A record for another draft, or one whose review state contradicts the
    /// transition, is dropped and the local transition applies instead.
    pub fn with_record(mut self, record: Option<LessonDraft>) -> Self {
        self.record = record.filter(|r| {
            let confirms = r.id() == self.id && *r.review() == self.review;
            if !confirms {
                tracing::warn!(
                    draft_id = self.id,
                    echoed_id = r.id(),
                    expected = %self.review.status(),
                    echoed = %r.status(),
                    "echoed draft does not confirm the transition, ignoring it"
                );
            }
            confirms
        });
        self
    }

    pub fn status(&self) -> DraftStatus {
        self.review.status()
    }
}

/// Backend operations the review workflow depends on.
#[async_trait::async_trait]
pub trait LessonDraftApi: Send + Sync {
    async fn list_drafts(&self) -> ApiResult<DraftPage>;

    async fn video_details(&self, lesson_draft_id: i64) -> ApiResult<VideoLessonDetails>;

    async fn code_details(&self, lesson_draft_id: i64) -> ApiResult<CodeLessonDetails>;

    async fn approve(&self, lesson_draft_id: i64) -> ApiResult<TransitionReceipt>;

    async fn reject(
        &self,
        lesson_draft_id: i64,
        reason: &RejectionReason,
    ) -> ApiResult<TransitionReceipt>;
}
