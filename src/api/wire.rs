//! Request and response bodies of the admin lesson-draft endpoints.

use serde::{Deserialize, Serialize};

use crate::model::entity::{CodeLessonDetails, LessonDraft, VideoLessonDetails};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DraftListResponse {
    pub lessons: Vec<LessonDraft>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoLessonResponse {
    pub video_lesson: VideoLessonDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodeLessonResponse {
    pub code_lesson_draft: CodeLessonDetails,
}

/// Body of a transition response. Older backends answer with no body at all.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransitionResponse {
    #[serde(default)]
    pub lesson_draft: Option<LessonDraft>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RejectBody<'a> {
    pub rejected_reason: &'a str,
}

/// Application-level failure marker: a 2xx body carrying `"code": 0`.
pub(crate) fn rejection_message(body: &serde_json::Value) -> Option<String> {
    let code = body.get("code")?;
    if code.as_i64() != Some(0) {
        return None;
    }

    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("request rejected")
        .to_string();
    Some(message)
}
