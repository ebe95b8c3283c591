//! The five chart views. Each is a pure function of the dataset and its
//! arguments: filter the table, then reduce.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dataset::{Dataset, RecordFilter};
use crate::engine::types::{Comparison, Series};
use crate::engine::utility::mean;
use crate::error::{DataIntegrityWarning, EngineError, Result};

/// Mean marks per grade for one student, ascending by grade.
///
/// Grades with no records for the student are absent, never zero-filled.
pub fn student_trend(ds: &Dataset, student_id: u32) -> Result<Series<u32>> {
    ds.check_student(student_id)?;

    let mut by_grade: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for r in ds.filter(RecordFilter::default().student(student_id)) {
        by_grade.entry(r.grade).or_default().push(r.marks);
    }

    let points: Vec<(u32, f64)> = by_grade
        .into_iter()
        .filter_map(|(grade, marks)| mean(&marks).map(|m| (grade, m)))
        .collect();

    debug!(student_id, grades = points.len(), "Computed student trend");
    Ok(Series::new("Performance Shift by Year", points))
}

/// A student's mark in each subject for one grade, in canonical subject order.
///
/// Subjects without a record are omitted.
pub fn subject_breakdown(ds: &Dataset, student_id: u32, grade: u32) -> Result<Series<String>> {
    ds.check_student(student_id)?;
    ds.check_grade(grade)?;

    let mut points = Vec::new();
    let mut warnings = Vec::new();

    for subject in ds.subjects() {
        if let Some(hit) = first_match(ds, student_id, grade, subject) {
            points.push((subject.clone(), hit.marks));
            warnings.extend(hit.warning);
        }
    }

    debug!(student_id, grade, subjects = points.len(), "Computed subject breakdown");
    Ok(Series::new(
        format!("Student {student_id} Performance in Grade {grade}"),
        points,
    )
    .with_warnings(warnings))
}

/// The student's mark for `(grade, subject)` next to the class average for
/// the same pair, the student's own record included.
///
/// # Errors
///
/// [`EngineError::Selection`] when the student has no record for the pair,
/// [`EngineError::InsufficientData`] when no record exists for the pair at all.
pub fn subject_comparison(
    ds: &Dataset,
    student_id: u32,
    grade: u32,
    subject: &str,
) -> Result<Comparison> {
    ds.check_student(student_id)?;
    ds.check_grade(grade)?;
    ds.check_subject(subject)?;

    let class: Vec<f64> = ds
        .filter(RecordFilter::default().grade(grade).subject(subject))
        .map(|r| r.marks)
        .collect();

    let hit = first_match(ds, student_id, grade, subject).ok_or_else(|| {
        EngineError::Selection(format!(
            "no record for student {student_id} in {subject} (grade {grade})"
        ))
    })?;

    let class_average = mean(&class).ok_or_else(|| {
        EngineError::InsufficientData(format!("no records for {subject} in grade {grade}"))
    })?;

    debug!(student_id, grade, subject, class_size = class.len(), "Computed subject comparison");
    Ok(Comparison {
        title: format!(
            "Comparison: Student {student_id} vs. Class Average in {subject} (Grade {grade})"
        ),
        student: hit.marks,
        class_average,
        warnings: hit.warning.into_iter().collect(),
    })
}

/// The student's mean over every subject in `grade` next to the mean over
/// every record in `grade`.
///
/// # Errors
///
/// [`EngineError::InsufficientData`] when either group is empty.
pub fn overall_comparison(ds: &Dataset, student_id: u32, grade: u32) -> Result<Comparison> {
    ds.check_student(student_id)?;
    ds.check_grade(grade)?;

    let own: Vec<f64> = ds
        .filter(RecordFilter::default().student(student_id).grade(grade))
        .map(|r| r.marks)
        .collect();
    let class: Vec<f64> = ds
        .filter(RecordFilter::default().grade(grade))
        .map(|r| r.marks)
        .collect();

    let student = mean(&own).ok_or_else(|| {
        EngineError::InsufficientData(format!(
            "student {student_id} has no records in grade {grade}"
        ))
    })?;
    let class_average = mean(&class)
        .ok_or_else(|| EngineError::InsufficientData(format!("no records in grade {grade}")))?;

    debug!(student_id, grade, class_size = class.len(), "Computed overall comparison");
    Ok(Comparison {
        title: format!("Overall Comparison: Student {student_id} vs. Class Average (Grade {grade})"),
        student,
        class_average,
        warnings: Vec::new(),
    })
}

/// A student's mark in one subject for each grade, ascending by grade.
///
/// Grades without a record are omitted.
pub fn grade_comparison(ds: &Dataset, student_id: u32, subject: &str) -> Result<Series<u32>> {
    ds.check_student(student_id)?;
    ds.check_subject(subject)?;

    let mut points = Vec::new();
    let mut warnings = Vec::new();

    for &grade in ds.grades() {
        if let Some(hit) = first_match(ds, student_id, grade, subject) {
            points.push((grade, hit.marks));
            warnings.extend(hit.warning);
        }
    }

    debug!(student_id, subject, grades = points.len(), "Computed grade comparison");
    Ok(Series::new(
        format!("Student {student_id} {subject} Marks Across Grades"),
        points,
    )
    .with_warnings(warnings))
}

pub(crate) struct Hit {
    pub(crate) marks: f64,
    pub(crate) warning: Option<DataIntegrityWarning>,
}

/// First record for the full key. Extra matches raise an integrity warning.
pub(crate) fn first_match(ds: &Dataset, student_id: u32, grade: u32, subject: &str) -> Option<Hit> {
    let mut hits = ds.filter(
        RecordFilter::default()
            .student(student_id)
            .grade(grade)
            .subject(subject),
    );
    let first = hits.next()?;
    let extra = hits.count();

    Some(Hit {
        marks: first.marks,
        warning: (extra > 0)
            .then(|| DataIntegrityWarning::emit(student_id, grade, subject, extra + 1)),
    })
}
