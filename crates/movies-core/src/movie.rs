use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies a movie within the current round (its index in the round).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub usize);

impl MovieId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub release_date: NaiveDate,
    // Display-only fields
    pub director: String,
    pub cast: String,
    pub music_director: String,
    pub production_house: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, release_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            release_date,
            director: String::new(),
            cast: String::new(),
            music_director: String::new(),
            production_house: String::new(),
        }
    }

    #[must_use]
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    #[must_use]
    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = cast.into();
        self
    }

    #[must_use]
    pub fn with_music_director(mut self, music_director: impl Into<String>) -> Self {
        self.music_director = music_director.into();
        self
    }

    #[must_use]
    pub fn with_production_house(mut self, production_house: impl Into<String>) -> Self {
        self.production_house = production_house.into();
        self
    }
}

/// Sort movies ascending by release date.
/// The sort is stable: movies released on the same day keep their source order.
pub fn sort_by_release(movies: &[MovieRecord]) -> Vec<&MovieRecord> {
    let mut sorted: Vec<&MovieRecord> = movies.iter().collect();
    sorted.sort_by_key(|m| m.release_date);
    sorted
}
