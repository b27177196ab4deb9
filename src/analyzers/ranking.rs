use crate::analyzers::types::ReportRow;
use crate::error::{ReportError, Result};

/// Subject codes accepted on input and the column prefix each selects.
pub static SUBJECT_CODES: &[(&str, &str)] = &[
    ("P", "polish"),
    ("E", "english"),
    ("M", "math"),
    ("A", "all"),
];

/// Order codes accepted on input and the column suffix each selects.
pub static ORDER_CODES: &[(&str, &str)] = &[("A", "average"), ("T", "trend")];

static FIELDS: [[&str; 2]; 4] = [
    ["polish_average", "polish_trend"],
    ["english_average", "english_trend"],
    ["math_average", "math_trend"],
    ["all_average", "all_trend"],
];

fn position(codes: &[(&str, &str)], code: &str) -> Option<usize> {
    codes.iter().position(|(c, _)| *c == code)
}

/// Maps a subject code (`P`, `E`, `M`, `A`) and an order code (`A`, `T`) to
/// the report column to rank by. Codes are case-sensitive.
pub fn resolve_field(subject_code: &str, order_code: &str) -> Result<&'static str> {
    let subject = position(SUBJECT_CODES, subject_code).ok_or_else(|| {
        ReportError::InvalidArgument(format!("unknown subject code {subject_code:?}"))
    })?;
    let order = position(ORDER_CODES, order_code).ok_or_else(|| {
        ReportError::InvalidArgument(format!("unknown order code {order_code:?}"))
    })?;
    Ok(FIELDS[subject][order])
}

/// Sorts `rows` by `field`, highest first. Rows with equal values keep
/// their input order.
pub fn rank(mut rows: Vec<ReportRow>, field: &str) -> Result<Vec<ReportRow>> {
    if let Some(row) = rows.iter().find(|row| row.field(field).is_none()) {
        return Err(ReportError::UnknownField(format!(
            "{field} (row {:?})",
            row.school
        )));
    }

    let key = |row: &ReportRow| row.field(field).unwrap_or_default();
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
    Ok(rows)
}
