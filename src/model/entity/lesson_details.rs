use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "EASY"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Hard => write!(f, "HARD"),
        }
    }
}

/// Video payload of a draft.
///
/// `content` and `response_from_ai` are filled by a backend job and may
/// still be empty when the draft is reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLessonDetails {
    pub id: i64,
    pub lesson_draft_id: i64,
    pub video_url: String,
    /// Seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "responseFromAI", alias = "responseFromAi")]
    pub response_from_ai: Option<String>,
}

impl VideoLessonDetails {
    pub fn content(&self) -> Option<&str> {
        non_blank(self.content.as_deref())
    }

    pub fn response_from_ai(&self) -> Option<&str> {
        non_blank(self.response_from_ai.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLessonDetails {
    pub id: i64,
    pub lesson_draft_id: i64,
    pub language: String,
    /// Problem statement.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub initial_code: String,
    #[serde(default)]
    pub solution_code: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub hints: String,
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub test_case_input: String,
    #[serde(default)]
    pub test_case_output: String,
    #[serde(default)]
    pub test_case_description: String,
}

/// Type-specific payload shown in the quick view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonDetails {
    Video(VideoLessonDetails),
    Code(CodeLessonDetails),
    /// Quiz review has no payload yet.
    Quiz,
}

impl LessonDetails {
    pub fn lesson_draft_id(&self) -> Option<i64> {
        match self {
            Self::Video(v) => Some(v.lesson_draft_id),
            Self::Code(c) => Some(c.lesson_draft_id),
            Self::Quiz => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
