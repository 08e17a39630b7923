//! Round selection with a persisted cursor.
//!
//! Rounds walk the dataset in order, three movies at a time, and wrap back
//! to the start once fewer than three remain. The cursor survives restarts
//! through a [`KeyValueStore`].

use crate::error::StoreError;
use crate::movie::MovieRecord;
use crate::store::KeyValueStore;

/// Store key holding the cursor as a decimal string.
pub const CURSOR_KEY: &str = "movieIndex";

/// Movies per round.
pub const ROUND_SIZE: usize = 3;

pub struct RoundSelector<S> {
    store: S,
}

impl<S: KeyValueStore> RoundSelector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current cursor. Missing, non-numeric or negative values read as 0.
    pub fn cursor(&self) -> Result<usize, StoreError> {
        let cursor = self
            .store
            .get(CURSOR_KEY)?
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0);
        Ok(cursor)
    }

    /// Slice the next round out of `all` and advance the cursor.
    ///
    /// Datasets shorter than a full round produce a shorter slice.
    pub fn select_round(&mut self, all: &[MovieRecord]) -> Result<Vec<MovieRecord>, StoreError> {
        let mut cursor = self.cursor()?;

        if cursor.saturating_add(2) >= all.len() {
            tracing::debug!(cursor, total = all.len(), "Round cursor wrapped to start");
            cursor = 0;
        }

        let end = (cursor + ROUND_SIZE).min(all.len());
        let round = all[cursor..end].to_vec();

        self.store.set(CURSOR_KEY, &(cursor + ROUND_SIZE).to_string())?;
        tracing::info!(cursor, selected = round.len(), "Selected round");

        Ok(round)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn movies(n: usize) -> Vec<MovieRecord> {
        (0..n)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(1990 + i as i32, 1, 1).unwrap();
                MovieRecord::new(format!("Movie {i}"), date)
            })
            .collect()
    }

    fn titles(round: &[MovieRecord]) -> Vec<&str> {
        round.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_default_cursor_is_zero() {
        let selector = RoundSelector::new(MemoryStore::new());
        assert_eq!(selector.cursor().unwrap(), 0);

        let selector = RoundSelector::new(MemoryStore::with_entry(CURSOR_KEY, "abc"));
        assert_eq!(selector.cursor().unwrap(), 0);

        let selector = RoundSelector::new(MemoryStore::with_entry(CURSOR_KEY, "-4"));
        assert_eq!(selector.cursor().unwrap(), 0);
    }

    #[test]
    fn test_select_advances_cursor() {
        let all = movies(9);
        let mut selector = RoundSelector::new(MemoryStore::new());

        let round = selector.select_round(&all).unwrap();
        assert_eq!(titles(&round), vec!["Movie 0", "Movie 1", "Movie 2"]);
        assert_eq!(selector.store().get(CURSOR_KEY).unwrap().as_deref(), Some("3"));

        let round = selector.select_round(&all).unwrap();
        assert_eq!(titles(&round), vec!["Movie 3", "Movie 4", "Movie 5"]);
        assert_eq!(selector.cursor().unwrap(), 6);
    }

    #[test]
    fn test_cursor_near_end_resets() {
        // 8 >= 9 - 2, so the round starts over from the beginning.
        let all = movies(9);
        let mut selector = RoundSelector::new(MemoryStore::with_entry(CURSOR_KEY, "8"));

        let round = selector.select_round(&all).unwrap();
        assert_eq!(titles(&round), vec!["Movie 0", "Movie 1", "Movie 2"]);
        assert_eq!(selector.cursor().unwrap(), 3);
    }

    #[test]
    fn test_last_full_window_is_used() {
        // 7 < 10 - 2, so movies 7..10 still form a round.
        let all = movies(10);
        let mut selector = RoundSelector::new(MemoryStore::with_entry(CURSOR_KEY, "7"));

        let round = selector.select_round(&all).unwrap();
        assert_eq!(titles(&round), vec!["Movie 7", "Movie 8", "Movie 9"]);
        assert_eq!(selector.cursor().unwrap(), 10);
    }

    #[test]
    fn test_short_dataset_yields_short_round() {
        let all = movies(2);
        let mut selector = RoundSelector::new(MemoryStore::new());

        let round = selector.select_round(&all).unwrap();
        assert_eq!(round.len(), 2);

        let round = selector.select_round(&[]).unwrap();
        assert!(round.is_empty());
    }
}
