//! Aggregation engine.
//!
//! Every view is a pure function over an immutable [`Dataset`](crate::dataset::Dataset):
//! filter the table, reduce the matches, return labelled values and a title.
//! [`dashboard`] renders all views for one selection with per-view failure isolation.

pub mod dashboard;
pub mod profile;
pub mod types;
pub mod utility;
pub mod views;

pub use dashboard::{Dashboard, DashboardViews, ViewOutcome};
pub use profile::{subject_profile, subject_trends};
pub use types::{Comparison, Selection, Series, SubjectProfile};
pub use views::{
    grade_comparison, overall_comparison, student_trend, subject_breakdown, subject_comparison,
};
