use tokio_util::sync::CancellationToken;

use crate::api::LessonDraftApi;
use crate::model::entity::{LessonDetails, LessonDraft, LessonType};
use crate::review::error::FetchError;

/// Loads the type-specific payload of `draft`, or gives up once `cancel` fires.
///
/// Quiz drafts have no payload endpoint and resolve without a request.
#[tracing::instrument(skip_all, fields(draft_id = draft.id(), lesson_type = %draft.lesson_type()))]
pub async fn fetch_details<A>(
    api: &A,
    draft: &LessonDraft,
    cancel: &CancellationToken,
) -> Result<LessonDetails, FetchError>
where
    A: LessonDraftApi + ?Sized,
{
    let id = draft.id();
    let request = async {
        match draft.lesson_type() {
            LessonType::Video => api.video_details(id).await.map(LessonDetails::Video),
            LessonType::Code => api.code_details(id).await.map(LessonDetails::Code),
            LessonType::Quiz => Ok(LessonDetails::Quiz),
        }
    };

    let details = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(FetchError::Cancelled),
        result = request => result?,
    };

    if let Some(owner) = details.lesson_draft_id() {
        if owner != id {
            tracing::warn!(owner, "details belong to another draft");
        }
    }

    Ok(details)
}
