//! Reproducible synthetic assessment table for demos and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::dataset::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub students: u32,
    pub grades: u32,
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            students: 30,
            grades: 5,
            seed: 42,
        }
    }
}

/// One record per student, grade and configured subject, with a uniformly
/// random whole-number mark inside the configured range.
pub fn generate(opts: &GenerateOptions, config: &EngineConfig) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let lo = config.min_marks.ceil() as i64;
    let hi = config.max_marks.floor() as i64;

    let capacity = (opts.students * opts.grades) as usize * config.subjects.len();
    let mut records = Vec::with_capacity(capacity);

    for student_id in 1..=opts.students {
        for grade in 1..=opts.grades {
            for subject in &config.subjects {
                let marks = if lo <= hi { rng.gen_range(lo..=hi) as f64 } else { config.min_marks };
                records.push(Record {
                    student_id,
                    grade,
                    subject: subject.clone(),
                    marks,
                });
            }
        }
    }

    records
}
