//! Lesson draft review: detail fetching, the quick view and the approval coordinator.

mod coordinator;
pub use coordinator::{ApprovalCoordinator, ReviewOutcome};

mod error;
pub use error::{FetchError, ReviewError, ReviewResult};

mod fetcher;
pub use fetcher::fetch_details;

mod quick_view;
pub use quick_view::{LoadState, QuickView, ReviewPhase, Submission};
