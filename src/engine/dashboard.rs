//! Presentation boundary: renders every view for one selection and keeps a
//! failure in one view from affecting the others.

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::engine::types::{Comparison, Selection, Series};
use crate::engine::views::{
    grade_comparison, overall_comparison, student_trend, subject_breakdown, subject_comparison,
};
use crate::error::{EngineError, Result};

/// Result of one view, ready to chart or replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    Ready { view: T },
    Unavailable { reason: String },
}

impl<T> ViewOutcome<T> {
    fn capture(name: &str, result: Result<T>) -> Self {
        match result {
            Ok(view) => ViewOutcome::Ready { view },
            Err(e) => {
                debug!(view = name, error = %e, "View unavailable");
                ViewOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewOutcome::Ready { .. })
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewOutcome::Ready { view } => Some(view),
            ViewOutcome::Unavailable { .. } => None,
        }
    }
}

/// All five views for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub selection: Selection,
    pub student_trend: ViewOutcome<Series<u32>>,
    pub subject_breakdown: ViewOutcome<Series<String>>,
    pub subject_comparison: ViewOutcome<Comparison>,
    pub overall_comparison: ViewOutcome<Comparison>,
    pub grade_comparison: ViewOutcome<Series<u32>>,
}

/// Read-only handle over a dataset; cheap to copy and share across threads.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
}

impl<'a> Dashboard<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn render(&self, selection: &Selection) -> DashboardViews {
        let ds = self.dataset;
        let student = require(selection.student_id, "student");
        let grade = require(selection.grade, "grade");
        let subject = require(selection.subject.as_deref(), "subject");

        DashboardViews {
            selection: selection.clone(),
            student_trend: ViewOutcome::capture(
                "student_trend",
                student.clone().and_then(|s| student_trend(ds, s)),
            ),
            subject_breakdown: ViewOutcome::capture(
                "subject_breakdown",
                pair(&student, &grade).and_then(|(s, g)| subject_breakdown(ds, s, g)),
            ),
            subject_comparison: ViewOutcome::capture(
                "subject_comparison",
                pair(&student, &grade)
                    .and_then(|(s, g)| subject.clone().map(|subj| (s, g, subj)))
                    .and_then(|(s, g, subj)| subject_comparison(ds, s, g, subj)),
            ),
            overall_comparison: ViewOutcome::capture(
                "overall_comparison",
                pair(&student, &grade).and_then(|(s, g)| overall_comparison(ds, s, g)),
            ),
            grade_comparison: ViewOutcome::capture(
                "grade_comparison",
                pair(&student, &subject).and_then(|(s, subj)| grade_comparison(ds, s, subj)),
            ),
        }
    }
}

fn require<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| EngineError::Selection(format!("no {what} selected")))
}

fn pair<A: Clone, B: Clone>(a: &Result<A>, b: &Result<B>) -> Result<(A, B)> {
    Ok((a.clone()?, b.clone()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dataset::RawRow;

    fn dataset() -> Dataset {
        let cfg = EngineConfig::default().with_subjects(["Math", "Science"]);
        Dataset::construct(
            vec![
                RawRow::new(1, 1, "Math", 50.0),
                RawRow::new(1, 1, "Science", 70.0),
                RawRow::new(1, 2, "Math", 60.0),
                RawRow::new(1, 2, "Science", 80.0),
                RawRow::new(2, 2, "Math", 40.0),
            ],
            &cfg,
        )
        .unwrap()
    }

    #[test]
    fn test_render_full_selection() {
        let ds = dataset();
        let views = Dashboard::new(&ds).render(&Selection::new(1, 1, "Math"));

        assert!(views.student_trend.is_ready());
        assert!(views.subject_breakdown.is_ready());
        assert!(views.overall_comparison.is_ready());
        assert!(views.grade_comparison.is_ready());
        let cmp = views.subject_comparison.ready().unwrap();
        assert_eq!(cmp.student, 50.0);
        assert_eq!(cmp.class_average, 50.0);
    }

    #[test]
    fn test_one_failure_does_not_spread() {
        let ds = dataset();
        // student 2 has no grade 1 records at all
        let views = Dashboard::new(&ds).render(&Selection::new(2, 1, "Math"));

        assert!(!views.subject_comparison.is_ready());
        assert!(!views.overall_comparison.is_ready());
        assert!(views.student_trend.is_ready());
        assert!(views.grade_comparison.is_ready());
        assert!(views.subject_breakdown.ready().unwrap().is_empty());
    }

    #[test]
    fn test_partial_selection() {
        let ds = dataset();
        let selection = Selection {
            student_id: Some(1),
            grade: None,
            subject: None,
        };
        let views = Dashboard::new(&ds).render(&selection);

        assert!(views.student_trend.is_ready());
        assert_eq!(
            views.subject_breakdown,
            ViewOutcome::Unavailable {
                reason: "Selection error: no grade selected".to_string()
            }
        );
        assert!(!views.grade_comparison.is_ready());
    }

    #[test]
    fn test_unknown_student_renders_placeholders() {
        let ds = dataset();
        let views = Dashboard::new(&ds).render(&Selection::new(99, 1, "Math"));

        assert!(!views.student_trend.is_ready());
        assert!(!views.subject_comparison.is_ready());
    }

    #[test]
    fn test_serializes_status_tag() {
        let ds = dataset();
        let views = Dashboard::new(&ds).render(&Selection::new(1, 2, "Science"));
        let json = serde_json::to_value(&views).unwrap();

        assert_eq!(json["student_trend"]["status"], "ready");
        assert_eq!(json["subject_comparison"]["view"]["student"], 80.0);
        assert_eq!(json["subject_comparison"]["view"]["class_average"], 80.0);
    }
}
