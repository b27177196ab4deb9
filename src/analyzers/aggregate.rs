use crate::analyzers::types::ReportRow;
use crate::analyzers::utility::mean;
use crate::school::{School, Subject};

/// Flattens a [`School`] into a [`ReportRow`] with an average and a
/// `target_year` trend per subject.
///
/// The `all_*` columns are the unweighted mean of the three subject values.
/// Subjects without data contribute 0.0 rather than being left out.
pub fn convert_to_dict(school: &School, target_year: i32) -> ReportRow {
    let [
        (polish_average, polish_trend),
        (english_average, english_trend),
        (math_average, math_trend),
    ] = Subject::ALL.map(|subject| {
        (
            school.calculate_average(subject),
            school.calculate_trend(subject, target_year),
        )
    });

    ReportRow {
        school: school.name().to_string(),
        polish_average,
        polish_trend,
        english_average,
        english_trend,
        math_average,
        math_trend,
        all_average: mean(&[polish_average, english_average, math_average]),
        all_trend: mean(&[polish_trend, english_trend, math_trend]),
    }
}
