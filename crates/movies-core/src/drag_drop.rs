//! Drag-and-drop interaction model.
//!
//! A drag carries one movie as its payload, picked up either from the
//! available pool or from an occupied slot. Dropping it on a slot assigns
//! it there through [`GameSession::assign_to_slot`], so relocating and
//! swapping follow the same at-most-one-slot rule as any other placement.

use crate::error::{MoveError, SessionError};
use crate::movie::MovieId;
use crate::order::SLOT_COUNT;
use crate::session::GameSession;

/// What a drop target shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotView {
    /// Nothing placed; shows a "Drop here" placeholder.
    Empty,
    /// Holds a movie that can be dragged again.
    Occupied(MovieId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed { movie: MovieId, slot: usize },
    /// Nothing was being dragged.
    NoPayload,
}

#[derive(Debug, Clone, Default)]
pub struct DragDropSurface {
    payload: Option<MovieId>,
}

impl DragDropSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Option<MovieId> {
        self.payload
    }

    /// Tag `movie` as the thing being dragged.
    pub fn drag_start(&mut self, movie: MovieId) {
        self.payload = Some(movie);
    }

    /// Pick up whatever sits in `slot`. Returns the movie, or `None` when
    /// the slot is empty (the drag does not start).
    pub fn drag_start_from_slot(&mut self, session: &GameSession, slot: usize) -> Result<Option<MovieId>, MoveError> {
        if slot >= SLOT_COUNT {
            return Err(MoveError::SlotOutOfRange(slot));
        }
        let movie = session.order().slot(slot);
        if let Some(movie) = movie {
            self.payload = Some(movie);
        }
        Ok(movie)
    }

    /// Abandon the current drag without placing anything.
    pub fn cancel(&mut self) {
        self.payload = None;
    }

    /// Drop the payload on `slot`. The payload is consumed whether or not
    /// the placement succeeds.
    pub fn drop_on(&mut self, session: &mut GameSession, slot: usize) -> Result<DropOutcome, SessionError> {
        let Some(movie) = self.payload.take() else {
            return Ok(DropOutcome::NoPayload);
        };
        session.assign_to_slot(movie, slot)?;
        Ok(DropOutcome::Placed { movie, slot })
    }

    pub fn slot_views(&self, session: &GameSession) -> [SlotView; SLOT_COUNT] {
        let mut views = [SlotView::Empty; SLOT_COUNT];
        for (view, entry) in views.iter_mut().zip(session.order().slots()) {
            if let Some(movie) = entry {
                *view = SlotView::Occupied(*movie);
            }
        }
        views
    }
}
