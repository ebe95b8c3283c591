//! Selection input and view result types.

use serde::{Deserialize, Serialize};

use crate::error::DataIntegrityWarning;

/// The (student, grade, subject) triple driving a query. Any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub student_id: Option<u32>,
    pub grade: Option<u32>,
    pub subject: Option<String>,
}

impl Selection {
    pub fn new(student_id: u32, grade: u32, subject: &str) -> Self {
        Self {
            student_id: Some(student_id),
            grade: Some(grade),
            subject: Some(subject.to_string()),
        }
    }
}

/// An ordered `(label, value)` sequence with a chart title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<L> {
    pub title: String,
    pub points: Vec<(L, f64)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataIntegrityWarning>,
}

impl<L> Series<L> {
    pub(crate) fn new(title: impl Into<String>, points: Vec<(L, f64)>) -> Self {
        Self {
            title: title.into(),
            points,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_warnings(mut self, warnings: Vec<DataIntegrityWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.points.iter().map(|(l, _)| l)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A student's value next to the class average for the same scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub title: String,
    pub student: f64,
    pub class_average: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Comparison {
    /// The two bars, labelled as they are charted.
    pub fn points(&self) -> [(&'static str, f64); 2] {
        [("Student", self.student), ("Class Average", self.class_average)]
    }
}

/// Per-subject radar data: the student's mean mark against the class
/// top and bottom scores. The three series are aligned by subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectProfile {
    pub title: String,
    pub student: Vec<(String, f64)>,
    pub top: Vec<(String, f64)>,
    pub bottom: Vec<(String, f64)>,
}
