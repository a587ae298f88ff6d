use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Backend resource a request was made for. Used for error context and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    LessonDrafts,
    VideoLesson,
    CodeLesson,
    Approve,
    Reject,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LessonDrafts => write!(f, "lesson drafts"),
            Self::VideoLesson => write!(f, "video lesson draft"),
            Self::CodeLesson => write!(f, "code lesson draft"),
            Self::Approve => write!(f, "draft approval"),
            Self::Reject => write!(f, "draft rejection"),
        }
    }
}

/// Front-end route the session is sent to when the backend refuses the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRedirect {
    Login,
    Forbidden,
    NotFound,
}

impl AuthRedirect {
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::UNAUTHORIZED => Some(Self::Login),
            StatusCode::FORBIDDEN => Some(Self::Forbidden),
            StatusCode::NOT_FOUND => Some(Self::NotFound),
            _ => None,
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Forbidden => "/403",
            Self::NotFound => "/404",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("TransportError on {resource}. Error: {error}")]
    Transport {
        resource: ResourceType,
        error: reqwest::Error,
    },

    #[error("Redirect on {resource} to {}", .redirect.route())]
    Redirect {
        resource: ResourceType,
        redirect: AuthRedirect,
    },

    #[error("UnexpectedStatus {status} on {resource}: {message}")]
    Status {
        resource: ResourceType,
        status: u16,
        message: String,
    },

    #[error("Rejected by backend on {resource}: {message}")]
    Rejected {
        resource: ResourceType,
        message: String,
    },

    #[error("DecodeError on {resource}. Error: {error}")]
    Decode {
        resource: ResourceType,
        error: serde_json::Error,
    },

    #[error("EmptyBody on {resource}")]
    EmptyBody { resource: ResourceType },

    #[error("InvalidEndpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("InvalidToken, api token contains characters not allowed in a header")]
    InvalidToken,

    #[error("ClientBuildError: {0}")]
    ClientBuild(reqwest::Error),
}

impl ApiError {
    pub fn redirect(&self) -> Option<AuthRedirect> {
        match self {
            Self::Redirect { redirect, .. } => Some(*redirect),
            _ => None,
        }
    }
}
