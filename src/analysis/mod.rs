pub mod html_review;
pub mod topics;

pub use html_review::{analyze_markup, review_editor_context, Finding, FindingStatus};
pub use topics::extract_topics;
