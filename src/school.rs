//! Per-school exam results and the average and trend computed from them.

use std::collections::BTreeMap;

use crate::analyzers::utility::{clip, fit_line, mean};

/// Lowest and highest score a trend prediction may report.
pub const SCORE_RANGE: (f64, f64) = (0.0, 100.0);

/// Exam subjects reported for every school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Polish,
    English,
    Math,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Polish, Subject::English, Subject::Math];

    /// Field prefix used in report columns and CSV headers.
    pub fn key(self) -> &'static str {
        match self {
            Subject::Polish => "polish",
            Subject::English => "english",
            Subject::Math => "math",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Yearly exam averages of a single school, per subject.
#[derive(Debug, Clone, Default)]
pub struct School {
    name: String,
    results: [BTreeMap<i32, f64>; 3],
}

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Year to score mapping recorded for `subject`.
    pub fn results(&self, subject: Subject) -> &BTreeMap<i32, f64> {
        &self.results[subject.index()]
    }

    pub fn has_results(&self, subject: Subject) -> bool {
        !self.results(subject).is_empty()
    }

    /// Records `score` for `(subject, year)`, replacing any earlier value.
    ///
    /// Neither the score range nor the year is validated.
    pub fn add_result(&mut self, subject: Subject, year: i32, score: f64) {
        self.results[subject.index()].insert(year, score);
    }

    /// Mean of every recorded score for `subject`, or 0.0 without results.
    pub fn calculate_average(&self, subject: Subject) -> f64 {
        let scores: Vec<f64> = self.results(subject).values().copied().collect();
        mean(&scores)
    }

    /// Predicts the `subject` score for `target_year` from a least-squares
    /// line over the recorded years, clipped to [`SCORE_RANGE`].
    ///
    /// Returns 0.0 when nothing is recorded. A single result predicts itself.
    pub fn calculate_trend(&self, subject: Subject, target_year: i32) -> f64 {
        let points: Vec<(f64, f64)> = self
            .results(subject)
            .iter()
            .map(|(&year, &score)| (f64::from(year), score))
            .collect();

        match fit_line(&points) {
            Some(fit) => clip(
                fit.predict(f64::from(target_year)),
                SCORE_RANGE.0,
                SCORE_RANGE.1,
            ),
            None => 0.0,
        }
    }
}
