use crate::api::{ApiError, LessonDraftApi};
use crate::error::log_error;
use crate::model::entity::DraftStatus;
use crate::model::{DraftStore, ReviewDecision};
use crate::notify::{Notifier, messages};
use crate::review::error::ReviewError;
use crate::review::quick_view::{QuickView, Submission};

#[derive(Debug)]
pub enum ReviewOutcome {
    /// Backend confirmed the transition, the store is reconciled and the view closed.
    Applied(DraftStatus),
    /// Backend call failed; nothing changed and the view stays open.
    Failed(ApiError),
    /// Refused before any request, e.g. blank reason.
    Invalid(ReviewError),
    /// Nothing to do: a submission is in flight or the draft is not reviewable.
    Ignored(ReviewError),
}

impl ReviewOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Performs the approve/reject transitions and keeps the page's store in line with the backend.
pub struct ApprovalCoordinator<'a, A: ?Sized, N: ?Sized> {
    api: &'a A,
    store: &'a mut DraftStore,
    notifier: &'a N,
}

impl<'a, A, N> ApprovalCoordinator<'a, A, N>
where
    A: LessonDraftApi + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(api: &'a A, store: &'a mut DraftStore, notifier: &'a N) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &DraftStore {
        &*self.store
    }

    #[tracing::instrument(skip_all, fields(draft_id = view.draft_id()))]
    pub async fn approve(&mut self, view: &mut QuickView) -> ReviewOutcome {
        match view.begin_approve() {
            Ok(submission) => self.submit(view, submission).await,
            Err(e) => self.refuse(e),
        }
    }

    #[tracing::instrument(skip_all, fields(draft_id = view.draft_id()))]
    pub async fn reject(&mut self, view: &mut QuickView, reason: &str) -> ReviewOutcome {
        match view.begin_reject(reason) {
            Ok(submission) => self.submit(view, submission).await,
            Err(e) => self.refuse(e),
        }
    }

    /// Submits whatever is typed in the view's reject form.
    #[tracing::instrument(skip_all, fields(draft_id = view.draft_id()))]
    pub async fn confirm_reject(&mut self, view: &mut QuickView) -> ReviewOutcome {
        match view.confirm_reject() {
            Ok(submission) => self.submit(view, submission).await,
            Err(e) => self.refuse(e),
        }
    }

    /// Reloads the whole list. Failures are notified and leave the store empty.
    pub async fn reload(&mut self) -> bool {
        match self.store.load(self.api).await {
            Ok(()) => true,
            Err(e) => {
                log_error(&e);
                self.notifier.error(messages::LOAD_DRAFTS_FAILED);
                false
            }
        }
    }

    fn refuse(&self, error: ReviewError) -> ReviewOutcome {
        match error {
            ReviewError::EmptyReason => {
                self.notifier.error(messages::EMPTY_REASON);
                ReviewOutcome::Invalid(error)
            }
            other => {
                tracing::debug!(error = %other, "review action ignored");
                ReviewOutcome::Ignored(other)
            }
        }
    }

    async fn submit(&mut self, view: &mut QuickView, submission: Submission) -> ReviewOutcome {
        let id = submission.draft_id;
        let (result, success, failure) = match &submission.decision {
            ReviewDecision::Approve => (
                self.api.approve(id).await,
                messages::APPROVE_SUCCESS,
                messages::APPROVE_FAILED,
            ),
            ReviewDecision::Reject(reason) => (
                self.api.reject(id, reason).await,
                messages::REJECT_SUCCESS,
                messages::REJECT_FAILED,
            ),
        };

        match result {
            Ok(receipt) => {
                self.store.reconcile(&receipt);
                self.notifier.success(success);
                view.finish_succeeded(&receipt);

                // drafts may have moved under other admin sessions
                self.reload().await;
                ReviewOutcome::Applied(receipt.status())
            }
            Err(e) => {
                log_error(&e);
                self.notifier.error(failure);
                view.finish_failed();
                ReviewOutcome::Failed(e)
            }
        }
    }
}
