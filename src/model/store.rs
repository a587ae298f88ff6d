use crate::api::{ApiResult, LessonDraftApi, TransitionReceipt};
use crate::model::entity::{DraftStatus, LessonDraft};
use crate::model::filter::DraftFilter;

/// Page-scoped list of drafts. Changed only by a full load or a confirmed transition.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    drafts: Vec<LessonDraft>,
    total_elements: u64,
}

/// Number of drafts per review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub new: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.new + self.approved + self.rejected
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_drafts(drafts: Vec<LessonDraft>) -> Self {
        let total_elements = drafts.len() as u64;
        Self {
            drafts,
            total_elements,
        }
    }

    /// Replaces the list with the backend's. On failure the store is left empty.
    #[tracing::instrument(skip_all)]
    pub async fn load<A>(&mut self, api: &A) -> ApiResult<()>
    where
        A: LessonDraftApi + ?Sized,
    {
        match api.list_drafts().await {
            Ok(page) => {
                tracing::debug!(count = page.drafts.len(), "draft store loaded");
                self.drafts = page.drafts;
                self.total_elements = page.total_elements;
                Ok(())
            }
            Err(e) => {
                self.drafts.clear();
                self.total_elements = 0;
                Err(e)
            }
        }
    }

    /// Applies a confirmed transition to the matching draft.
    ///
    /// The echoed record wins over the local transition. Returns `false` when
    /// the draft is not in the store.
    pub fn reconcile(&mut self, receipt: &TransitionReceipt) -> bool {
        let Some(draft) = self.drafts.iter_mut().find(|d| d.id() == receipt.id) else {
            tracing::debug!(draft_id = receipt.id, "transition for a draft outside the store");
            return false;
        };

        match &receipt.record {
            Some(record) => *draft = record.clone(),
            None => draft.set_review(receipt.review.clone()),
        }
        true
    }

    pub fn get(&self, id: i64) -> Option<&LessonDraft> {
        self.drafts.iter().find(|d| d.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn visible(&self, filter: &DraftFilter) -> Vec<&LessonDraft> {
        filter.visible(&self.drafts)
    }

    pub fn counts(&self) -> StatusCounts {
        self.drafts
            .iter()
            .fold(StatusCounts::default(), |mut acc, d| {
                match d.status() {
                    DraftStatus::New => acc.new += 1,
                    DraftStatus::Approved => acc.approved += 1,
                    DraftStatus::Rejected => acc.rejected += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::RejectionReason;
    use crate::model::entity::{Instructor, LessonType, ReviewState};

    fn draft(id: i64) -> LessonDraft {
        LessonDraft::new(
            id,
            format!("Lesson {id}"),
            LessonType::Video,
            1,
            Instructor {
                name: "Hoang E".into(),
                email: "e@example.com".into(),
            },
        )
    }

    #[test]
    fn reconcile_local_transition_test() {
        let mut store = DraftStore::from_drafts(vec![draft(1), draft(2)]);
        let reason = RejectionReason::new("Wrong chapter").unwrap();

        assert!(store.reconcile(&TransitionReceipt::approved(1)));
        assert!(store.reconcile(&TransitionReceipt::rejected(2, &reason)));

        assert_eq!(store.get(1).unwrap().status(), DraftStatus::Approved);
        assert_eq!(store.get(2).unwrap().rejected_reason(), Some("Wrong chapter"));
        assert_eq!(
            store.counts(),
            StatusCounts {
                new: 0,
                approved: 1,
                rejected: 1
            }
        );
    }

    #[test]
    fn reconcile_prefers_record_test() {
        let mut store = DraftStore::from_drafts(vec![draft(5)]);
        let echoed = LessonDraft::new(
            5,
            "Lesson 5 (edited upstream)",
            LessonType::Video,
            1,
            Instructor {
                name: "Hoang E".into(),
                email: "e@example.com".into(),
            },
        )
        .with_review(ReviewState::Approved);
        let receipt = TransitionReceipt::approved(5).with_record(Some(echoed.clone()));

        assert!(store.reconcile(&receipt));
        assert_eq!(store.get(5), Some(&echoed));
        assert_eq!(store.get(5).unwrap().title(), "Lesson 5 (edited upstream)");
    }

    #[test]
    fn contradicting_record_ignored_test() {
        let mut store = DraftStore::from_drafts(vec![draft(42), draft(43)]);

        // backend confirms the approve but echoes the draft as still new
        let stale = TransitionReceipt::approved(42).with_record(Some(draft(42)));
        assert_eq!(stale.record, None);
        assert!(store.reconcile(&stale));
        assert_eq!(store.get(42).unwrap().status(), stale.status());
        assert_eq!(store.get(42).unwrap().status(), DraftStatus::Approved);

        // a rejected echo carrying another reason does not confirm this reject
        let reason = RejectionReason::new("Audio out of sync").unwrap();
        let other_reason = draft(43).with_review(ReviewState::Rejected {
            reason: "Something else".into(),
        });
        let receipt = TransitionReceipt::rejected(43, &reason).with_record(Some(other_reason));
        assert_eq!(receipt.record, None);
        assert!(store.reconcile(&receipt));
        assert_eq!(store.get(43).unwrap().rejected_reason(), Some("Audio out of sync"));
    }

    #[test]
    fn reconcile_unknown_draft_test() {
        let mut store = DraftStore::from_drafts(vec![draft(1)]);
        assert!(!store.reconcile(&TransitionReceipt::approved(99)));
        assert_eq!(store.get(1).unwrap().status(), DraftStatus::New);
    }

    #[test]
    fn foreign_record_ignored_test() {
        let receipt = TransitionReceipt::approved(1).with_record(Some(draft(2)));
        assert_eq!(receipt.record, None);
    }
}
