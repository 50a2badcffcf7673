//! HTML rendering for stock analysis reports.
//!
//! [`render_markdown`] turns free-form model prose into a safe HTML fragment,
//! resolving numeric citation markers against the report's source list.
//! The remaining modules assemble a complete report around it.

pub mod escape;
pub mod markdown;
pub mod page;
pub mod report;
pub mod sources;
pub mod style;

pub use escape::escape_html;
pub use markdown::render_markdown;
pub use page::render_report_html;
pub use report::{build_report, NO_RECOMMENDATION_DETAILS};
pub use sources::render_sources_list;
pub use style::RecommendationStyle;
