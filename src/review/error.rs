use thiserror::Error;

use crate::api::ApiError;
use crate::model::entity::DraftStatus;

pub type ReviewResult<T> = std::result::Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("EmptyReason, a rejection needs a non-blank reason")]
    EmptyReason,

    #[error("SubmissionInFlight for draft {draft_id}")]
    SubmissionInFlight { draft_id: i64 },

    #[error("NotReviewable, draft {draft_id} is already {status}")]
    NotReviewable { draft_id: i64, status: DraftStatus },

    #[error("DetailsNotLoaded for draft {draft_id}")]
    DetailsNotLoaded { draft_id: i64 },

    #[error("QuizReviewUnsupported for draft {draft_id}")]
    QuizReviewUnsupported { draft_id: i64 },

    #[error("ViewClosed for draft {draft_id}")]
    ViewClosed { draft_id: i64 },

    #[error("RejectFormClosed for draft {draft_id}")]
    RejectFormClosed { draft_id: i64 },

    #[error("DraftNotFound: {draft_id}")]
    DraftNotFound { draft_id: i64 },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch cancelled, the view was closed")]
    Cancelled,
    #[error("{0}")]
    Api(#[from] ApiError),
}
