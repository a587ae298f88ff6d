//! Per-draft review modal: detail loading, the reject form and the single-flight guard.
//!
//! ```text
//! Loading ──► Loaded ──► Idle ◄──► Rejecting
//!    │                    │            │
//!    ▼                    ▼            ▼
//! LoadFailed          Submitting ◄─────┘ ──► closed (success)
//!                         └──► Idle / Rejecting (failure)
//! ```

use tokio_util::sync::CancellationToken;

use crate::api::{LessonDraftApi, TransitionReceipt};
use crate::model::entity::{LessonDetails, LessonDraft};
use crate::model::{RejectionReason, ReviewDecision};
use crate::notify::{Notifier, messages};
use crate::review::error::{FetchError, ReviewError, ReviewResult};
use crate::review::fetcher::fetch_details;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(LessonDetails),
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewPhase {
    Idle,
    /// Reject form open, holding the text typed so far.
    Rejecting { reason: String },
    Submitting(ReviewDecision),
}

/// A transition the view has committed to. Produced only by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub draft_id: i64,
    pub decision: ReviewDecision,
}

#[derive(Debug)]
pub struct QuickView {
    draft: LessonDraft,
    load: LoadState,
    phase: ReviewPhase,
    closed: bool,
    cancel: CancellationToken,
}

impl QuickView {
    /// A view in `Loading` state. Use [`QuickView::open`] to also fetch the details.
    pub fn new(draft: LessonDraft) -> Self {
        Self {
            draft,
            load: LoadState::Loading,
            phase: ReviewPhase::Idle,
            closed: false,
            cancel: CancellationToken::new(),
        }
    }

    pub async fn open<A, N>(api: &A, draft: LessonDraft, notifier: &N) -> Self
    where
        A: LessonDraftApi + ?Sized,
        N: Notifier + ?Sized,
    {
        let mut view = Self::new(draft);
        view.load(api, notifier).await;
        view
    }

    /// Runs the detail fetch once. No retry: the admin closes and reopens the view.
    pub async fn load<A, N>(&mut self, api: &A, notifier: &N)
    where
        A: LessonDraftApi + ?Sized,
        N: Notifier + ?Sized,
    {
        if self.load != LoadState::Loading || self.closed {
            return;
        }

        let cancel = self.cancel.clone();
        match fetch_details(api, &self.draft, &cancel).await {
            Ok(details) => {
                if details == LessonDetails::Quiz {
                    notifier.info(messages::QUIZ_NOT_IMPLEMENTED);
                }
                self.load = LoadState::Loaded(details);
            }
            Err(FetchError::Cancelled) => {
                tracing::debug!(draft_id = self.draft.id(), "detail fetch dropped, view closed");
            }
            Err(FetchError::Api(e)) => {
                crate::error::log_error(&e);
                notifier.error(messages::LOAD_DETAILS_FAILED);
                self.load = LoadState::LoadFailed(e.to_string());
            }
        }
    }

    pub fn draft(&self) -> &LessonDraft {
        &self.draft
    }

    pub fn draft_id(&self) -> i64 {
        self.draft.id()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn details(&self) -> Option<&LessonDetails> {
        match &self.load {
            LoadState::Loaded(details) => Some(details),
            _ => None,
        }
    }

    pub fn phase(&self) -> &ReviewPhase {
        &self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, ReviewPhase::Submitting(_))
    }

    pub fn is_rejecting(&self) -> bool {
        matches!(self.phase, ReviewPhase::Rejecting { .. })
    }

    /// Token cancelled when the view closes or is dropped.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the Approve/Reject panel is rendered and enabled.
    pub fn actions_available(&self) -> bool {
        self.check_reviewable().is_ok() && !self.is_submitting()
    }

    /// Reason block shown instead of the action panel for rejected drafts.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.draft.rejected_reason()
    }

    fn check_reviewable(&self) -> ReviewResult<()> {
        let draft_id = self.draft.id();
        if self.closed {
            return Err(ReviewError::ViewClosed { draft_id });
        }
        if !self.draft.review().is_pending() {
            return Err(ReviewError::NotReviewable {
                draft_id,
                status: self.draft.status(),
            });
        }
        match &self.load {
            LoadState::Loaded(LessonDetails::Quiz) => {
                Err(ReviewError::QuizReviewUnsupported { draft_id })
            }
            LoadState::Loaded(_) => Ok(()),
            LoadState::Loading | LoadState::LoadFailed(_) => {
                Err(ReviewError::DetailsNotLoaded { draft_id })
            }
        }
    }

    fn check_idle(&self) -> ReviewResult<()> {
        if self.is_submitting() {
            return Err(ReviewError::SubmissionInFlight {
                draft_id: self.draft.id(),
            });
        }
        self.check_reviewable()
    }

    pub fn start_reject(&mut self) -> ReviewResult<()> {
        self.check_idle()?;
        if !self.is_rejecting() {
            self.phase = ReviewPhase::Rejecting {
                reason: String::new(),
            };
        }
        Ok(())
    }

    pub fn set_reason(&mut self, text: impl Into<String>) -> ReviewResult<()> {
        match &mut self.phase {
            ReviewPhase::Rejecting { reason } => {
                *reason = text.into();
                Ok(())
            }
            ReviewPhase::Submitting(_) => Err(ReviewError::SubmissionInFlight {
                draft_id: self.draft.id(),
            }),
            ReviewPhase::Idle => Err(ReviewError::RejectFormClosed {
                draft_id: self.draft.id(),
            }),
        }
    }

    pub fn cancel_reject(&mut self) {
        if self.is_rejecting() {
            self.phase = ReviewPhase::Idle;
        }
    }

    /// Single-flight guard for approve: `Idle` or `Rejecting` to `Submitting`.
    pub fn begin_approve(&mut self) -> ReviewResult<Submission> {
        self.check_idle()?;
        self.submit(ReviewDecision::Approve)
    }

    /// Single-flight guard for reject. A blank reason opens (or keeps) the form
    /// with the typed text and fails with [`ReviewError::EmptyReason`].
    pub fn begin_reject(&mut self, reason: &str) -> ReviewResult<Submission> {
        self.check_idle()?;

        let Some(reason) = RejectionReason::new(reason) else {
            self.phase = ReviewPhase::Rejecting {
                reason: reason.to_string(),
            };
            return Err(ReviewError::EmptyReason);
        };
        self.submit(ReviewDecision::Reject(reason))
    }

    /// Confirms the reason currently typed into the reject form.
    pub fn confirm_reject(&mut self) -> ReviewResult<Submission> {
        let reason = match &self.phase {
            ReviewPhase::Rejecting { reason } => reason.clone(),
            ReviewPhase::Submitting(_) => {
                return Err(ReviewError::SubmissionInFlight {
                    draft_id: self.draft.id(),
                });
            }
            ReviewPhase::Idle => {
                return Err(ReviewError::RejectFormClosed {
                    draft_id: self.draft.id(),
                });
            }
        };
        self.begin_reject(&reason)
    }

    fn submit(&mut self, decision: ReviewDecision) -> ReviewResult<Submission> {
        self.phase = ReviewPhase::Submitting(decision.clone());
        Ok(Submission {
            draft_id: self.draft.id(),
            decision,
        })
    }

    /// Leaves `Submitting` after a failed request. A failed reject reopens the form with its reason.
    pub fn finish_failed(&mut self) {
        self.phase = match std::mem::replace(&mut self.phase, ReviewPhase::Idle) {
            ReviewPhase::Submitting(ReviewDecision::Reject(reason)) => ReviewPhase::Rejecting {
                reason: reason.into_inner(),
            },
            ReviewPhase::Submitting(ReviewDecision::Approve) => ReviewPhase::Idle,
            other => other,
        };
    }

    /// Applies the confirmed transition to the snapshot and closes the view.
    pub fn finish_succeeded(&mut self, receipt: &TransitionReceipt) {
        if receipt.id == self.draft.id() {
            match &receipt.record {
                Some(record) => self.draft = record.clone(),
                None => self.draft.set_review(receipt.review.clone()),
            }
        }
        self.close();
    }

    pub fn close(&mut self) {
        if !self.closed {
            tracing::trace!(draft_id = self.draft.id(), "quick view closed");
        }
        self.closed = true;
        self.phase = ReviewPhase::Idle;
        self.cancel.cancel();
    }
}

impl Drop for QuickView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
