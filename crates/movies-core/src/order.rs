//! The player's guessed ordering: three slots, each empty or holding a movie.

use crate::error::MoveError;
use crate::movie::MovieId;

pub const SLOT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerOrder {
    slots: [Option<MovieId>; SLOT_COUNT],
}

impl PlayerOrder {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[Option<MovieId>; SLOT_COUNT] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<MovieId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn position_of(&self, movie: MovieId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(movie))
    }

    /// Place `movie` in `slot`.
    ///
    /// A movie holds at most one slot: if it was already placed elsewhere,
    /// that slot is vacated first. Returns the movie previously in `slot`,
    /// which is now unplaced.
    pub fn assign(&mut self, movie: MovieId, slot: usize) -> Result<Option<MovieId>, MoveError> {
        if slot >= SLOT_COUNT {
            return Err(MoveError::SlotOutOfRange(slot));
        }

        if let Some(existing) = self.position_of(movie) {
            self.slots[existing] = None;
        }

        let displaced = self.slots[slot].replace(movie);
        Ok(displaced.filter(|d| *d != movie))
    }

    /// Empty a slot, returning what was in it.
    pub fn vacate(&mut self, slot: usize) -> Result<Option<MovieId>, MoveError> {
        let entry = self.slots.get_mut(slot).ok_or(MoveError::SlotOutOfRange(slot))?;
        Ok(entry.take())
    }

    pub fn clear(&mut self) {
        self.slots = [None; SLOT_COUNT];
    }

    pub fn placed(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.slots.iter().flatten().copied()
    }
}
