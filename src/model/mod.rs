pub mod entity;

mod decision;
pub use decision::{RejectionReason, ReviewDecision};

mod filter;
pub use filter::{DraftFilter, Filter};

mod store;
pub use store::{DraftStore, StatusCounts};
