//! Data types produced by the report pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

/// Column names of a [`ReportRow`], `school` first.
pub const FIELD_NAMES: [&str; 9] = [
    "school",
    "polish_average",
    "polish_trend",
    "english_average",
    "english_trend",
    "math_average",
    "math_trend",
    "all_average",
    "all_trend",
];

/// One school's historical averages and predicted trends.
///
/// Every metric is always populated; a subject without data reports 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct ReportRow {
    pub school: String,
    #[tabled(display_with = "display_score")]
    pub polish_average: f64,
    #[tabled(display_with = "display_score")]
    pub polish_trend: f64,
    #[tabled(display_with = "display_score")]
    pub english_average: f64,
    #[tabled(display_with = "display_score")]
    pub english_trend: f64,
    #[tabled(display_with = "display_score")]
    pub math_average: f64,
    #[tabled(display_with = "display_score")]
    pub math_trend: f64,
    #[tabled(display_with = "display_score")]
    pub all_average: f64,
    #[tabled(display_with = "display_score")]
    pub all_trend: f64,
}

impl ReportRow {
    /// Looks up a numeric column by name. `school` and unknown names yield `None`.
    pub fn field(&self, name: &str) -> Option<f64> {
        let value = match name {
            "polish_average" => self.polish_average,
            "polish_trend" => self.polish_trend,
            "english_average" => self.english_average,
            "english_trend" => self.english_trend,
            "math_average" => self.math_average,
            "math_trend" => self.math_trend,
            "all_average" => self.all_average,
            "all_trend" => self.all_trend,
            _ => return None,
        };
        Some(value)
    }
}

fn display_score(value: &f64) -> String {
    format!("{:.2}", value)
}

/// A ranked report for one city, exported as JSON.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub city: String,
    pub order_by: String,
    pub target_year: i32,
    pub years: Vec<i32>,
    pub rows: Vec<ReportRow>,
}
