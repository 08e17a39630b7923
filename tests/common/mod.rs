#![allow(dead_code)]

use std::io::Write;
use std::time::Duration;

use chrono::NaiveDate;
use movies_core::{MemoryStore, MovieRecord, Rules};
use order_of_movies::clients::{DatasetClient, DatasetSource};
use order_of_movies::runtime::{GameRuntime, RuntimeEvent};
use tempfile::NamedTempFile;
use tokio::sync::mpsc::UnboundedReceiver;

pub const HEADER: &str = "year,month,date,Title,Director,Cast,Music Director,Production House";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn movie(title: &str, y: i32, m: u32, d: u32) -> MovieRecord {
    MovieRecord::new(title, date(y, m, d))
}

/// `n` movies released one year apart, in chronological order.
pub fn dataset(n: usize) -> Vec<MovieRecord> {
    (0..n)
        .map(|i| movie(&format!("Movie {i}"), 1980 + i as i32, 3, 14))
        .collect()
}

/// CSV text with one row per (title, year, month, day).
pub fn csv(rows: &[(&str, i32, u32, u32)]) -> String {
    let mut text = String::from(HEADER);
    for (title, y, m, d) in rows {
        text.push_str(&format!("\n{y},{m},{d},{title},,,,"));
    }
    text.push('\n');
    text
}

pub fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

/// Runtime reading its dataset from `file` and keeping the cursor in memory.
pub fn runtime(file: &NamedTempFile, store: MemoryStore) -> (GameRuntime, UnboundedReceiver<RuntimeEvent>) {
    let client = DatasetClient::with_source(
        DatasetSource::File(file.path().to_path_buf()),
        Duration::from_secs(5),
    )
    .unwrap();
    GameRuntime::new(Rules::default(), client, Box::new(store))
}
