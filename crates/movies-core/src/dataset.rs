//! CSV dataset parsing.
//!
//! The dataset is header-delimited text with the columns `year`, `month`,
//! `date`, `Title`, `Director`, `Cast`, `Music Director` and
//! `Production House`. Extra columns are ignored and short rows read as
//! missing fields.

use chrono::{Month, NaiveDate};
use serde::Deserialize;

use crate::error::DataError;
use crate::movie::MovieRecord;

#[derive(Debug, Deserialize)]
struct RawMovieRow {
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    month: Option<String>,
    #[serde(default, rename = "date")]
    day: Option<String>,
    #[serde(default, rename = "Title")]
    title: Option<String>,
    #[serde(default, rename = "Director")]
    director: Option<String>,
    #[serde(default, rename = "Cast")]
    cast: Option<String>,
    #[serde(default, rename = "Music Director")]
    music_director: Option<String>,
    #[serde(default, rename = "Production House")]
    production_house: Option<String>,
}

/// Movies read from a dataset, plus counts of the rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub movies: Vec<MovieRecord>,
    /// Rows missing a year, month, day or title.
    pub skipped_incomplete: usize,
    /// Rows whose date fields do not name a real calendar day.
    pub skipped_invalid_dates: usize,
}

/// Parse dataset text into movie records, in source order.
pub fn parse_movies(text: &str) -> Result<ParsedDataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedDataset::default();

    for (line, row) in reader.deserialize::<RawMovieRow>().enumerate() {
        let row = row?;

        let (Some(year), Some(month), Some(day), Some(title)) =
            (non_empty(row.year), non_empty(row.month), non_empty(row.day), non_empty(row.title))
        else {
            parsed.skipped_incomplete += 1;
            continue;
        };

        let Some(release_date) = parse_release_date(&year, &month, &day) else {
            tracing::warn!(
                row = line + 1,
                title = %title,
                "Skipping movie with invalid release date {}-{}-{}",
                year,
                month,
                day
            );
            parsed.skipped_invalid_dates += 1;
            continue;
        };

        parsed.movies.push(MovieRecord {
            title,
            release_date,
            director: row.director.unwrap_or_default(),
            cast: row.cast.unwrap_or_default(),
            music_director: row.music_director.unwrap_or_default(),
            production_house: row.production_house.unwrap_or_default(),
        });
    }

    tracing::debug!(
        movies = parsed.movies.len(),
        incomplete = parsed.skipped_incomplete,
        invalid_dates = parsed.skipped_invalid_dates,
        "Parsed movie dataset"
    );

    Ok(parsed)
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Build a date from separate year, month and day fields.
/// The month may be numeric (`3`, `03`) or an English name (`March`, `Mar`).
fn parse_release_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month = match month.parse::<u32>() {
        Ok(m) => m,
        Err(_) => month.parse::<Month>().ok()?.number_from_month(),
    };
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
