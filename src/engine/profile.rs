//! Whole-history views for one student: the per-subject radar profile and
//! the per-subject mark history across grades.

use tracing::debug;

use crate::dataset::{Dataset, RecordFilter};
use crate::engine::types::{Series, SubjectProfile};
use crate::engine::utility::{max, mean, min};
use crate::engine::views::grade_comparison;
use crate::error::Result;

/// The student's mean mark per subject over all grades, with the class top
/// and bottom score for each of those subjects.
///
/// Subjects the student has no record for are left out of all three series.
pub fn subject_profile(ds: &Dataset, student_id: u32) -> Result<SubjectProfile> {
    ds.check_student(student_id)?;

    let mut student = Vec::new();
    let mut top = Vec::new();
    let mut bottom = Vec::new();

    for subject in ds.subjects() {
        let own: Vec<f64> = ds
            .filter(RecordFilter::default().student(student_id).subject(subject))
            .map(|r| r.marks)
            .collect();
        let Some(own_mean) = mean(&own) else {
            continue;
        };

        let class: Vec<f64> = ds
            .filter(RecordFilter::default().subject(subject))
            .map(|r| r.marks)
            .collect();

        // class is a superset of own, so both are present here
        if let (Some(hi), Some(lo)) = (max(&class), min(&class)) {
            student.push((subject.clone(), own_mean));
            top.push((subject.clone(), hi));
            bottom.push((subject.clone(), lo));
        }
    }

    debug!(student_id, subjects = student.len(), "Computed subject profile");
    Ok(SubjectProfile {
        title: "Overall Performance Comparison".to_string(),
        student,
        top,
        bottom,
    })
}

/// One grade-by-grade series per subject, skipping subjects with no records.
pub fn subject_trends(ds: &Dataset, student_id: u32) -> Result<Vec<Series<u32>>> {
    ds.check_student(student_id)?;

    let mut trends = Vec::new();
    for subject in ds.subjects() {
        let mut series = grade_comparison(ds, student_id, subject)?;
        if series.is_empty() {
            continue;
        }
        series.title = subject.clone();
        trends.push(series);
    }

    Ok(trends)
}
