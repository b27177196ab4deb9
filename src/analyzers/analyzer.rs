use chrono::Utc;
use tracing::{debug, info};

use crate::analyzers::aggregate::convert_to_dict;
use crate::analyzers::ranking::rank;
use crate::analyzers::types::{Report, ReportRow};
use crate::error::Result;
use crate::school::School;

/// Converts every school into a report row predicted for `target_year`,
/// then ranks the rows by `field`.
#[tracing::instrument(skip(schools), fields(school_count = schools.len()))]
pub fn build_report(schools: &[School], target_year: i32, field: &str) -> Result<Vec<ReportRow>> {
    let rows: Vec<ReportRow> = schools
        .iter()
        .map(|school| convert_to_dict(school, target_year))
        .collect();
    debug!(rows = rows.len(), "Report rows built");

    let ranked = rank(rows, field)?;
    if let Some(top) = ranked.first() {
        info!(school = %top.school, field, "Top ranked school");
    }
    Ok(ranked)
}

impl Report {
    /// Wraps ranked rows with the parameters that produced them.
    pub fn new(
        city: &str,
        order_by: &str,
        target_year: i32,
        years: &[i32],
        rows: Vec<ReportRow>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            city: city.to_string(),
            order_by: order_by.to_string(),
            target_year,
            years: years.to_vec(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::school::Subject;

    fn school(name: &str, math: &[(i32, f64)]) -> School {
        let mut school = School::new(name);
        for &(year, score) in math {
            school.add_result(Subject::Math, year, score);
        }
        school
    }

    #[test]
    fn test_build_report_ranks_by_trend() {
        let schools = vec![
            school("steady", &[(2021, 70.0), (2022, 70.0)]),
            school("rising", &[(2021, 40.0), (2022, 60.0)]),
            school("falling", &[(2021, 90.0), (2022, 60.0)]),
        ];

        let rows = build_report(&schools, 2023, "math_trend").unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.school.as_str()).collect();

        assert_eq!(names, vec!["rising", "steady", "falling"]);
    }

    #[test]
    fn test_build_report_ranks_by_average() {
        let schools = vec![
            school("rising", &[(2021, 40.0), (2022, 60.0)]),
            school("falling", &[(2021, 90.0), (2022, 60.0)]),
        ];

        let rows = build_report(&schools, 2023, "math_average").unwrap();

        assert_eq!(rows[0].school, "falling");
        assert_eq!(rows[0].math_average, 75.0);
    }

    #[test]
    fn test_build_report_no_schools() {
        assert!(build_report(&[], 2025, "all_trend").unwrap().is_empty());
    }

    #[test]
    fn test_build_report_bad_field() {
        let schools = vec![school("a", &[(2021, 1.0)])];
        assert!(matches!(
            build_report(&schools, 2025, "school"),
            Err(ReportError::UnknownField(_))
        ));
    }

    #[test]
    fn test_report_envelope() {
        let report = Report::new("Gdańsk", "all_trend", 2025, &[2021, 2022], Vec::new());
        assert_eq!(report.city, "Gdańsk");
        assert_eq!(report.years, vec![2021, 2022]);
        assert!(report.rows.is_empty());
    }
}
