use std::str::FromStr;

use crate::model::entity::{DraftStatus, LessonDraft, LessonType};

/// Either no constraint or equality with one value. Parsed from `"all"` or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = String>,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Search and filter controls of the draft list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFilter {
    pub search: String,
    pub status: Filter<DraftStatus>,
    pub lesson_type: Filter<LessonType>,
}

impl DraftFilter {
    pub fn new(
        search: impl Into<String>,
        status: Filter<DraftStatus>,
        lesson_type: Filter<LessonType>,
    ) -> Self {
        Self {
            search: search.into(),
            status,
            lesson_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_all() && self.lesson_type.is_all()
    }

    pub fn matches(&self, draft: &LessonDraft) -> bool {
        self.matches_search(draft)
            && self.status.accepts(&draft.status())
            && self.lesson_type.accepts(&draft.lesson_type())
    }

    fn matches_search(&self, draft: &LessonDraft) -> bool {
        if self.search.is_empty() {
            return true;
        }

        // matched as typed; whitespace is part of the term
        let needle = self.search.to_lowercase();

        draft.title().to_lowercase().contains(&needle)
            || draft.instructor().name.to_lowercase().contains(&needle)
    }

    /// Drafts passing every active predicate, in their original order.
    pub fn visible<'a>(&self, drafts: &'a [LessonDraft]) -> Vec<&'a LessonDraft> {
        drafts.iter().filter(|d| self.matches(d)).collect()
    }
}
