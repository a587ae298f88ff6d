use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::api::error::{ApiError, ApiResult, AuthRedirect, ResourceType};
use crate::api::wire::{
    CodeLessonResponse, DraftListResponse, RejectBody, TransitionResponse, VideoLessonResponse,
    rejection_message,
};
use crate::api::{DraftPage, LessonDraftApi, TransitionReceipt};
use crate::config::Api;
use crate::model::RejectionReason;
use crate::model::entity::{CodeLessonDetails, VideoLessonDetails};

/// Bearer-authenticated JSON client for the admin endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client, // cloning is cheap, the client is an Arc<> inside
    base_url: Url,
}

impl ApiClient {
    pub fn new(api: &Api) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = api.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            tracing::warn!("no api token configured, requests will be anonymous");
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(api.timeout())
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: api.base_url().clone(),
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Sends a request and applies the shared response policy.
    ///
    /// Returns `None` for a 2xx response without a body.
    async fn send(
        &self,
        resource: ResourceType,
        request: RequestBuilder,
    ) -> ApiResult<Option<serde_json::Value>> {
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Transport { resource, error })?;

        let status = response.status();
        if let Some(redirect) = AuthRedirect::from_status(status) {
            tracing::warn!(%resource, route = redirect.route(), "backend refused the session");
            return Err(ApiError::Redirect { resource, redirect });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| ApiError::Transport { resource, error })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<serde_json::Value>(&bytes)
                .ok()
                .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).trim().to_string());

            return Err(ApiError::Status {
                resource,
                status: status.as_u16(),
                message,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let body: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|error| ApiError::Decode { resource, error })?;

        if let Some(message) = rejection_message(&body) {
            return Err(ApiError::Rejected { resource, message });
        }

        Ok(Some(body))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: ResourceType,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self
            .send(resource, request)
            .await?
            .ok_or(ApiError::EmptyBody { resource })?;

        serde_json::from_value(body).map_err(|error| ApiError::Decode { resource, error })
    }

    async fn transition(
        &self,
        resource: ResourceType,
        request: RequestBuilder,
    ) -> ApiResult<TransitionResponse> {
        match self.send(resource, request).await? {
            Some(body) => {
                serde_json::from_value(body).map_err(|error| ApiError::Decode { resource, error })
            }
            None => Ok(TransitionResponse::default()),
        }
    }
}

#[async_trait::async_trait]
impl LessonDraftApi for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn list_drafts(&self) -> ApiResult<DraftPage> {
        let url = self.endpoint("admin/lesson-drafts")?;
        let response: DraftListResponse = self
            .fetch(ResourceType::LessonDrafts, self.http.get(url))
            .await?;

        let total_elements = response
            .total_elements
            .unwrap_or(response.lessons.len() as u64);
        tracing::debug!(count = response.lessons.len(), total_elements, "drafts fetched");

        Ok(DraftPage {
            drafts: response.lessons,
            total_elements,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn video_details(&self, lesson_draft_id: i64) -> ApiResult<VideoLessonDetails> {
        let url = self.endpoint("admin/video-lessons-draft")?;
        let request = self
            .http
            .get(url)
            .query(&[("lessonDraftId", lesson_draft_id)]);

        let response: VideoLessonResponse =
            self.fetch(ResourceType::VideoLesson, request).await?;
        Ok(response.video_lesson)
    }

    #[tracing::instrument(skip(self))]
    async fn code_details(&self, lesson_draft_id: i64) -> ApiResult<CodeLessonDetails> {
        let url = self.endpoint("admin/code-lessons-draft")?;
        let request = self
            .http
            .get(url)
            .query(&[("lessonDraftId", lesson_draft_id)]);

        let response: CodeLessonResponse = self.fetch(ResourceType::CodeLesson, request).await?;
        Ok(response.code_lesson_draft)
    }

    #[tracing::instrument(skip(self))]
    async fn approve(&self, lesson_draft_id: i64) -> ApiResult<TransitionReceipt> {
        let url = self.endpoint(&format!("admin/lesson-drafts/{lesson_draft_id}/approve"))?;
        let response = self
            .transition(ResourceType::Approve, self.http.patch(url))
            .await?;

        tracing::info!(lesson_draft_id, "draft approved");
        Ok(TransitionReceipt::approved(lesson_draft_id).with_record(response.lesson_draft))
    }

    #[tracing::instrument(skip(self, reason))]
    async fn reject(
        &self,
        lesson_draft_id: i64,
        reason: &RejectionReason,
    ) -> ApiResult<TransitionReceipt> {
        let url = self.endpoint(&format!("admin/lesson-drafts/{lesson_draft_id}/reject"))?;
        let request = self.http.patch(url).json(&RejectBody {
            rejected_reason: reason.as_str(),
        });
        let response = self.transition(ResourceType::Reject, request).await?;

        tracing::info!(lesson_draft_id, "draft rejected");
        Ok(TransitionReceipt::rejected(lesson_draft_id, reason).with_record(response.lesson_draft))
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    fn client(base: &str, token: Option<&str>) -> ApiResult<ApiClient> {
        let api = Api::new(
            Url::parse(base).unwrap(),
            token.map(String::from),
            Duration::from_secs(5),
        );
        ApiClient::new(&api)
    }

    #[test]
    fn endpoint_join_test() {
        let client = client("https://lms.example.com/api/", Some("t0ken")).unwrap();
        assert_eq!(
            client.endpoint("admin/lesson-drafts/5/approve").unwrap().as_str(),
            "https://lms.example.com/api/admin/lesson-drafts/5/approve"
        );
    }

    #[test]
    fn invalid_token_test() {
        let result = client("https://lms.example.com/api/", Some("bad\ntoken"));
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }
}
