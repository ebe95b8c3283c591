//! Process-wide engine configuration: the closed subject list and the valid
//! marks range. Read once at startup from the environment.

use anyhow::{Context, Result, bail};

pub const DEFAULT_SUBJECTS: &[&str] = &["Math", "Science", "English", "History", "Hindi", "Marathi"];
pub const DEFAULT_MIN_MARKS: f64 = 30.0;
pub const DEFAULT_MAX_MARKS: f64 = 100.0;

const SUBJECTS_VAR: &str = "STUDENT_PERF_SUBJECTS";
const MIN_MARKS_VAR: &str = "STUDENT_PERF_MIN_MARKS";
const MAX_MARKS_VAR: &str = "STUDENT_PERF_MAX_MARKS";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Canonical subject order. Records with any other subject are rejected.
    pub subjects: Vec<String>,
    pub min_marks: f64,
    pub max_marks: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            min_marks: DEFAULT_MIN_MARKS,
            max_marks: DEFAULT_MAX_MARKS,
        }
    }
}

impl EngineConfig {
    /// Builds a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(SUBJECTS_VAR) {
            cfg.subjects = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(raw) = lookup(MIN_MARKS_VAR) {
            cfg.min_marks = raw
                .trim()
                .parse()
                .with_context(|| format!("{MIN_MARKS_VAR} is not a number: '{raw}'"))?;
        }
        if let Some(raw) = lookup(MAX_MARKS_VAR) {
            cfg.max_marks = raw
                .trim()
                .parse()
                .with_context(|| format!("{MAX_MARKS_VAR} is not a number: '{raw}'"))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Overrides the subject list, keeping the marks range.
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.subjects.is_empty() {
            bail!("subject list must not be empty");
        }
        if !self.min_marks.is_finite() || !self.max_marks.is_finite() {
            bail!("marks range must be finite");
        }
        if self.min_marks > self.max_marks {
            bail!(
                "min marks {} is greater than max marks {}",
                self.min_marks,
                self.max_marks
            );
        }
        Ok(())
    }

    pub fn is_known_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn marks_in_range(&self, marks: f64) -> bool {
        marks >= self.min_marks && marks <= self.max_marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = EngineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.subjects.len(), 6);
        assert_eq!(cfg.min_marks, 30.0);
        assert_eq!(cfg.max_marks, 100.0);
    }

    #[test]
    fn test_overrides() {
        let cfg = EngineConfig::from_lookup(lookup_from(&[
            ("STUDENT_PERF_SUBJECTS", "Math, Science ,,Art"),
            ("STUDENT_PERF_MIN_MARKS", "0"),
            ("STUDENT_PERF_MAX_MARKS", "50"),
        ]))
        .unwrap();
        assert_eq!(cfg.subjects, vec!["Math", "Science", "Art"]);
        assert_eq!(cfg.min_marks, 0.0);
        assert_eq!(cfg.max_marks, 50.0);
    }

    #[test]
    fn test_rejects_bad_number() {
        let err = EngineConfig::from_lookup(lookup_from(&[("STUDENT_PERF_MIN_MARKS", "ten")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = EngineConfig::from_lookup(lookup_from(&[
            ("STUDENT_PERF_MIN_MARKS", "80"),
            ("STUDENT_PERF_MAX_MARKS", "20"),
        ]));
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_empty_subjects() {
        let err = EngineConfig::from_lookup(lookup_from(&[("STUDENT_PERF_SUBJECTS", " , ")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_marks_range_is_inclusive() {
        let cfg = EngineConfig::default();
        assert!(cfg.marks_in_range(30.0));
        assert!(cfg.marks_in_range(100.0));
        assert!(!cfg.marks_in_range(29.0));
        assert!(!cfg.marks_in_range(101.0));
        assert!(!cfg.marks_in_range(f64::NAN));
    }
}
