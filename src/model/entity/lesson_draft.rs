use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content a lesson carries. Selects the detail endpoint and the quick view variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Code,
    Quiz,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Code => "code",
            Self::Quiz => "quiz",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "code" => Ok(Self::Code),
            "quiz" => Ok(Self::Quiz),
            other => Err(format!("unknown lesson type `{other}`")),
        }
    }
}

/// Status of a draft without its payload, as sent in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    New,
    Approved,
    Rejected,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown draft status `{other}`")),
        }
    }
}

/// Review state of a draft. The rejection reason only exists on `Rejected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    New,
    Approved,
    Rejected { reason: String },
}

impl ReviewState {
    pub fn status(&self) -> DraftStatus {
        match self {
            Self::New => DraftStatus::New,
            Self::Approved => DraftStatus::Approved,
            Self::Rejected { .. } => DraftStatus::Rejected,
        }
    }

    pub fn rejected_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::New)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub email: String,
}

/// Lesson authored by an instructor and waiting for (or past) admin review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LessonDraftRow", into = "LessonDraftRow")]
pub struct LessonDraft {
    id: i64,
    title: String,
    lesson_type: LessonType,
    order_index: i32,
    is_publish: bool,
    review: ReviewState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    chapter_id: i64,
    instructor: Instructor,
}

/// Wire shape of a draft: flat `status` plus nullable `rejectedReason`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LessonDraftRow {
    id: i64,
    title: String,
    #[serde(rename = "type")]
    lesson_type: LessonType,
    #[serde(default)]
    order_index: i32,
    #[serde(default)]
    is_publish: bool,
    status: DraftStatus,
    #[serde(default)]
    rejected_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    chapter_id: i64,
    instructor: Instructor,
}

impl From<LessonDraftRow> for LessonDraft {
    fn from(row: LessonDraftRow) -> Self {
        let review = match row.status {
            DraftStatus::New => ReviewState::New,
            DraftStatus::Approved => ReviewState::Approved,
            DraftStatus::Rejected => {
                let reason = row.rejected_reason.unwrap_or_default();
                if reason.trim().is_empty() {
                    tracing::warn!(draft_id = row.id, "rejected draft arrived without a reason");
                }
                ReviewState::Rejected { reason }
            }
        };

        Self {
            id: row.id,
            title: row.title,
            lesson_type: row.lesson_type,
            order_index: row.order_index,
            is_publish: row.is_publish,
            review,
            created_at: row.created_at,
            updated_at: row.updated_at,
            chapter_id: row.chapter_id,
            instructor: row.instructor,
        }
    }
}

impl From<LessonDraft> for LessonDraftRow {
    fn from(draft: LessonDraft) -> Self {
        let status = draft.review.status();
        let rejected_reason = match draft.review {
            ReviewState::Rejected { reason } => Some(reason),
            _ => None,
        };

        Self {
            id: draft.id,
            title: draft.title,
            lesson_type: draft.lesson_type,
            order_index: draft.order_index,
            is_publish: draft.is_publish,
            status,
            rejected_reason,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
            chapter_id: draft.chapter_id,
            instructor: draft.instructor,
        }
    }
}

impl LessonDraft {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        lesson_type: LessonType,
        chapter_id: i64,
        instructor: Instructor,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            lesson_type,
            order_index: 0,
            is_publish: false,
            review: ReviewState::New,
            created_at: now,
            updated_at: now,
            chapter_id,
            instructor,
        }
    }

    pub fn with_review(mut self, review: ReviewState) -> Self {
        self.review = review;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lesson_type(&self) -> LessonType {
        self.lesson_type
    }

    pub fn order_index(&self) -> i32 {
        self.order_index
    }

    pub fn is_publish(&self) -> bool {
        self.is_publish
    }

    pub fn review(&self) -> &ReviewState {
        &self.review
    }

    pub fn status(&self) -> DraftStatus {
        self.review.status()
    }

    pub fn rejected_reason(&self) -> Option<&str> {
        self.review.rejected_reason()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn chapter_id(&self) -> i64 {
        self.chapter_id
    }

    pub fn instructor(&self) -> &Instructor {
        &self.instructor
    }

    /// Moves the draft into `review`. Only the Draft Store calls this, after a confirmed transition.
    pub(crate) fn set_review(&mut self, review: ReviewState) {
        self.review = review;
        self.updated_at = Utc::now();
    }
}
