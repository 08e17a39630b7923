//! Game session state machine.
//!
//! ```text
//! Start --start_game--> Playing --(correct submit | timer hits 0)--> Result
//!                          ^                                           |
//!                          +---------------- start_game ---------------+
//! ```
//!
//! The session never schedules anything itself. Whoever drives it calls
//! [`GameSession::tick`] once per second while the phase is `Playing`, and
//! [`GameSession::clear_feedback`] once a feedback message has been shown
//! long enough.

use std::collections::HashSet;

use crate::error::{SessionError, ValidationError};
use crate::movie::{sort_by_release, MovieId, MovieRecord};
use crate::order::PlayerOrder;

pub const INCOMPLETE_ORDER_MESSAGE: &str = "Please place all three movies in different positions!";
pub const WRONG_ORDER_MESSAGE: &str = "Wrong order! Try again!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Start,
    Playing,
    Result,
}

/// Timing and scoring parameters for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub round_seconds: u32,
    pub starting_score: u32,
    /// Points lost for every elapsed second.
    pub penalty_per_second: u32,
    /// How long a feedback message stays on screen.
    pub feedback_seconds: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            round_seconds: 30,
            starting_score: 1000,
            penalty_per_second: 33,
            feedback_seconds: 2,
        }
    }
}

/// A transient message shown to the player.
///
/// `token` identifies this particular message so that a delayed clear
/// scheduled for an older message leaves a newer one alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Ignored,
    Running { remaining: u32 },
    /// The clock ran out and the round is over.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct { score: u32 },
    /// Valid but out of order. The slots were emptied for another try.
    Wrong { feedback: u64 },
    /// Not evaluated. The slots are left as they were.
    Rejected { reason: ValidationError, feedback: u64 },
}

impl SubmitOutcome {
    /// Token of the feedback message this submission produced, if any.
    pub fn feedback_token(&self) -> Option<u64> {
        match self {
            SubmitOutcome::Correct { .. } => None,
            SubmitOutcome::Wrong { feedback } | SubmitOutcome::Rejected { feedback, .. } => Some(*feedback),
        }
    }
}

/// How a finished round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Solved { score: u32 },
    TimedOut { correct_order: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    rules: Rules,
    phase: Phase,
    movies: Vec<MovieRecord>,
    order: PlayerOrder,
    timer: u32,
    score: u32,
    last_attempt_correct: Option<bool>,
    feedback: Option<Feedback>,
    next_feedback_token: u64,
    round_number: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl GameSession {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            phase: Phase::Start,
            movies: Vec::new(),
            order: PlayerOrder::empty(),
            timer: rules.round_seconds,
            score: rules.starting_score,
            last_attempt_correct: None,
            feedback: None,
            next_feedback_token: 0,
            round_number: 0,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn movie(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.get(id.index())
    }

    pub fn order(&self) -> &PlayerOrder {
        &self.order
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_attempt_correct(&self) -> Option<bool> {
        self.last_attempt_correct
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Increments on every `start_game`.
    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    /// Begin a new round with `movies`, resetting everything the previous
    /// round left behind. Allowed from any phase.
    pub fn start_game(&mut self, movies: Vec<MovieRecord>) {
        self.movies = movies;
        self.order.clear();
        self.timer = self.rules.round_seconds;
        self.score = self.rules.starting_score;
        self.last_attempt_correct = None;
        self.feedback = None;
        self.round_number += 1;
        self.phase = Phase::Playing;

        tracing::info!(
            round = self.round_number,
            movies = self.movies.len(),
            "Round started"
        );
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Ignored;
        }

        self.timer = self.timer.saturating_sub(1);
        self.score = self.score.saturating_sub(self.rules.penalty_per_second);

        if self.timer == 0 {
            self.phase = Phase::Result;
            tracing::info!(round = self.round_number, "Round timed out");
            TickOutcome::TimedOut
        } else {
            TickOutcome::Running { remaining: self.timer }
        }
    }

    /// Place a movie of this round into a slot.
    pub fn assign_to_slot(&mut self, movie: MovieId, slot: usize) -> Result<(), SessionError> {
        if self.phase != Phase::Playing {
            return Err(SessionError::NotPlaying);
        }
        if movie.index() >= self.movies.len() {
            return Err(SessionError::UnknownMovie(movie.index()));
        }

        self.order.assign(movie, slot)?;
        Ok(())
    }

    /// Whether every slot holds a movie.
    pub fn can_submit(&self) -> bool {
        self.order.is_complete()
    }

    /// Check the player's ordering against the release dates.
    pub fn submit_order(&mut self) -> Result<SubmitOutcome, SessionError> {
        if self.phase != Phase::Playing {
            return Err(SessionError::NotPlaying);
        }

        let guess = match self.validate_order() {
            Ok(guess) => guess,
            Err(reason) => {
                let feedback = self.set_feedback(INCOMPLETE_ORDER_MESSAGE);
                return Ok(SubmitOutcome::Rejected { reason, feedback });
            }
        };

        let correct = guess == self.correct_order();
        self.last_attempt_correct = Some(correct);

        if correct {
            self.phase = Phase::Result;
            tracing::info!(round = self.round_number, score = self.score, "Round solved");
            Ok(SubmitOutcome::Correct { score: self.score })
        } else {
            self.order.clear();
            let feedback = self.set_feedback(WRONG_ORDER_MESSAGE);
            tracing::debug!(round = self.round_number, "Wrong order submitted");
            Ok(SubmitOutcome::Wrong { feedback })
        }
    }

    /// Titles of the player's ordering if it can be evaluated.
    fn validate_order(&self) -> Result<Vec<String>, ValidationError> {
        let mut titles = Vec::with_capacity(self.order.slots().len());
        for (slot, entry) in self.order.slots().iter().enumerate() {
            let movie = entry
                .and_then(|id| self.movie(id))
                .ok_or(ValidationError::EmptySlot(slot))?;
            titles.push(movie.title.clone());
        }

        let distinct: HashSet<&str> = titles.iter().map(String::as_str).collect();
        if distinct.len() != titles.len() {
            return Err(ValidationError::DuplicateMovie);
        }

        Ok(titles)
    }

    /// Titles of this round's movies, earliest release first.
    pub fn correct_order(&self) -> Vec<String> {
        sort_by_release(&self.movies)
            .into_iter()
            .map(|m| m.title.clone())
            .collect()
    }

    /// Movies not currently placed in any slot, in round order.
    pub fn available_movies(&self) -> Vec<(MovieId, &MovieRecord)> {
        self.movies
            .iter()
            .enumerate()
            .map(|(i, m)| (MovieId(i), m))
            .filter(|(id, _)| self.order.position_of(*id).is_none())
            .collect()
    }

    /// Clear the feedback message if it is still the one `token` refers to.
    /// Returns whether anything was cleared.
    pub fn clear_feedback(&mut self, token: u64) -> bool {
        match &self.feedback {
            Some(current) if current.token == token => {
                self.feedback = None;
                true
            }
            _ => false,
        }
    }

    fn set_feedback(&mut self, message: &str) -> u64 {
        self.next_feedback_token += 1;
        let token = self.next_feedback_token;
        self.feedback = Some(Feedback {
            message: message.to_string(),
            token,
        });
        token
    }

    /// How the round ended, once it has.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        if self.phase != Phase::Result {
            return None;
        }
        if self.last_attempt_correct == Some(true) {
            Some(RoundOutcome::Solved { score: self.score })
        } else {
            Some(RoundOutcome::TimedOut {
                correct_order: self.correct_order(),
            })
        }
    }

    /// Abandon whatever is on screen and go back to the title screen.
    pub fn leave(&mut self) {
        self.phase = Phase::Start;
        self.movies.clear();
        self.order.clear();
        self.feedback = None;
        self.last_attempt_correct = None;
        self.timer = self.rules.round_seconds;
        self.score = self.rules.starting_score;
    }
}
