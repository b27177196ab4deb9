//! CSV ingestion of yearly school exam results.
//!
//! Each year is a separate `;`-delimited file with at least the columns
//! `city`, `school`, `polish_average`, `english_average` and `math_average`.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ReportError, Result};
use crate::school::{School, Subject};

/// A single row of a yearly results file.
#[derive(Debug, Deserialize)]
pub struct ResultRow {
    pub city: String,
    pub school: String,
    pub polish_average: String,
    pub english_average: String,
    pub math_average: String,
}

impl ResultRow {
    fn score(&self, subject: Subject) -> &str {
        match subject {
            Subject::Polish => &self.polish_average,
            Subject::English => &self.english_average,
            Subject::Math => &self.math_average,
        }
    }
}

/// Schools collected across yearly files, kept in first-seen order.
#[derive(Debug, Default)]
pub struct SchoolSet {
    schools: Vec<School>,
    by_name: HashMap<String, usize>,
}

impl SchoolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the school called `name`, creating it on first sight.
    pub fn get_or_insert(&mut self, name: &str) -> &mut School {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                self.schools.push(School::new(name));
                self.by_name.insert(name.to_string(), self.schools.len() - 1);
                self.schools.len() - 1
            }
        };
        &mut self.schools[index]
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    pub fn into_schools(self) -> Vec<School> {
        self.schools
    }
}

/// Parses a score cell. Empty cells mean "no result" and yield `None`.
///
/// A decimal comma is accepted in place of the dot.
pub fn parse_score(text: &str) -> Result<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ReportError::InvalidNumber {
            value: text.to_string(),
        })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

/// Reads one year of results, adding rows for `city` into `schools`.
///
/// Returns the number of matching rows.
pub fn read_schools_from_reader<R: Read>(
    reader: R,
    year: i32,
    city: &str,
    schools: &mut SchoolSet,
) -> Result<usize> {
    let mut rdr = csv_reader(reader);
    let mut matched = 0;

    for result in rdr.deserialize() {
        let row: ResultRow = result?;
        if row.city != city {
            continue;
        }
        matched += 1;

        let school = schools.get_or_insert(&row.school);
        for subject in Subject::ALL {
            if let Some(score) = parse_score(row.score(subject))? {
                school.add_result(subject, year, score);
            }
        }
    }

    Ok(matched)
}

/// Path of the results file for `year`.
pub fn year_file(data_dir: &Path, file_prefix: &str, year: i32) -> PathBuf {
    data_dir.join(format!("{file_prefix}{year}.csv"))
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| ReportError::io(path, e))
}

/// Loads every school of `city` from the files of the given `years`.
#[tracing::instrument(skip(data_dir, file_prefix), fields(data_dir = %data_dir.display()))]
pub fn read_schools(
    data_dir: &Path,
    file_prefix: &str,
    years: &[i32],
    city: &str,
) -> Result<Vec<School>> {
    let mut schools = SchoolSet::new();

    for &year in years {
        let path = year_file(data_dir, file_prefix, year);
        let matched = read_schools_from_reader(open(&path)?, year, city, &mut schools)?;
        debug!(path = %path.display(), year, matched, "Results file read");
    }

    if schools.is_empty() {
        warn!(city, "No schools found for city");
    } else {
        info!(city, schools = schools.len(), "Schools loaded");
    }
    Ok(schools.into_schools())
}

/// Distinct city names found across the files of the given `years`, sorted.
pub fn list_cities(data_dir: &Path, file_prefix: &str, years: &[i32]) -> Result<Vec<String>> {
    let mut cities = BTreeSet::new();

    for &year in years {
        let path = year_file(data_dir, file_prefix, year);
        let mut rdr = csv_reader(open(&path)?);
        for result in rdr.deserialize() {
            let row: ResultRow = result?;
            cities.insert(row.city);
        }
    }

    Ok(cities.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_2021: &str = "\
city;school;polish_average;english_average;math_average
Gdynia;SP 1;60,5;70;40
Gdynia;SP 2;;55,25;
Sopot;SP 3;80;80;80
";

    const CSV_2022: &str = "\
city;school;polish_average;english_average;math_average;extra
Gdynia;SP 2;50;;45;x
Gdynia;SP 1;62,5;;;y
";

    fn load(files: &[(i32, &str)], city: &str) -> Result<Vec<School>> {
        let mut schools = SchoolSet::new();
        for &(year, data) in files {
            read_schools_from_reader(data.as_bytes(), year, city, &mut schools)?;
        }
        Ok(schools.into_schools())
    }

    #[test]
    fn test_parse_score_integers_and_floats() {
        assert_eq!(parse_score("1").unwrap(), Some(1.0));
        assert_eq!(parse_score("0").unwrap(), Some(0.0));
        assert_eq!(parse_score("0.57").unwrap(), Some(0.57));
        assert_eq!(parse_score("123.123").unwrap(), Some(123.123));
    }

    #[test]
    fn test_parse_score_decimal_comma() {
        assert_eq!(parse_score("60,5").unwrap(), Some(60.5));
        assert_eq!(parse_score(" 7,25 ").unwrap(), Some(7.25));
    }

    #[test]
    fn test_parse_score_empty_is_none() {
        assert_eq!(parse_score("").unwrap(), None);
        assert_eq!(parse_score("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_score_non_number() {
        assert!(matches!(
            parse_score("A"),
            Err(ReportError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_read_filters_city_and_skips_empty_cells() {
        let schools = load(&[(2021, CSV_2021)], "Gdynia").unwrap();

        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0].name(), "SP 1");
        assert_eq!(schools[0].results(Subject::Polish).get(&2021), Some(&60.5));

        let sp2 = &schools[1];
        assert!(!sp2.has_results(Subject::Polish));
        assert!(!sp2.has_results(Subject::Math));
        assert_eq!(sp2.results(Subject::English).get(&2021), Some(&55.25));
    }

    #[test]
    fn test_read_merges_years_in_first_seen_order() {
        let schools = load(&[(2021, CSV_2021), (2022, CSV_2022)], "Gdynia").unwrap();

        let names: Vec<_> = schools.iter().map(School::name).collect();
        assert_eq!(names, vec!["SP 1", "SP 2"]);
        assert_eq!(schools[0].results(Subject::Polish).len(), 2);
        assert_eq!(schools[1].results(Subject::Math).get(&2022), Some(&45.0));
    }

    #[test]
    fn test_read_unknown_city() {
        assert!(load(&[(2021, CSV_2021)], "Gdansk").unwrap().is_empty());
    }

    #[test]
    fn test_read_aborts_on_bad_number() {
        let data = "city;school;polish_average;english_average;math_average\nGdynia;SP 1;abc;;\n";
        assert!(matches!(
            load(&[(2021, data)], "Gdynia"),
            Err(ReportError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_read_missing_score_column_fails() {
        let data = "city;school;polish_average;english_average\nGdynia;SP 1;50;60\n";
        assert!(matches!(
            load(&[(2021, data)], "Gdynia"),
            Err(ReportError::Csv(_))
        ));
    }

    #[test]
    fn test_read_bad_number_in_other_city_is_ignored() {
        let data = "city;school;polish_average;english_average;math_average\nSopot;SP 1;abc;;\n";
        assert!(load(&[(2021, data)], "Gdynia").unwrap().is_empty());
    }

    #[test]
    fn test_read_schools_missing_file() {
        let dir = std::env::temp_dir().join("school_trends_missing_dir");
        let result = read_schools(&dir, "e8-schools-", &[2021], "Gdynia");
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }

    #[test]
    fn test_year_file() {
        let path = year_file(Path::new("resources"), "e8-schools-", 2024);
        assert_eq!(path, Path::new("resources/e8-schools-2024.csv"));
    }
}
