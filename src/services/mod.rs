pub mod generation;
pub mod issue_tracker;

pub use generation::{GenerationService, ShareRequest};
pub use issue_tracker::IssueTrackerService;
