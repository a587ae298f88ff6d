mod lesson_draft;
pub use lesson_draft::{DraftStatus, Instructor, LessonDraft, LessonType, ReviewState};

mod lesson_details;
pub use lesson_details::{CodeLessonDetails, Difficulty, LessonDetails, VideoLessonDetails};
