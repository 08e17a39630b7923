//! Async driver for a [`GameSession`].
//!
//! Owns the two timers the game needs: the one-second round ticker and the
//! delayed clear of feedback messages. The ticker only exists while a round
//! is being played; every path out of `Playing` aborts it.

use std::sync::Arc;
use std::time::Duration;

use movies_core::{
    DragDropSurface, DropOutcome, GameSession, KeyValueStore, MovieId, Phase, RoundSelector, Rules,
    SessionError, SubmitOutcome, TickOutcome,
};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::clients::DatasetClient;
use crate::error::AppError;

pub const FETCH_FAILED_ALERT: &str = "Failed to load movie data";

/// Notifications for whoever renders the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Session state changed without user input (tick, feedback cleared).
    Redraw,
    /// Blocking message the player must see.
    Alert(String),
}

pub type BoxedStore = Box<dyn KeyValueStore + Send>;

pub struct GameRuntime {
    session: Arc<Mutex<GameSession>>,
    surface: DragDropSurface,
    selector: RoundSelector<BoxedStore>,
    source: DatasetClient,
    ticker: Option<JoinHandle<()>>,
    events: mpsc::UnboundedSender<RuntimeEvent>,
}

impl GameRuntime {
    pub fn new(
        rules: Rules,
        source: DatasetClient,
        store: BoxedStore,
    ) -> (Self, mpsc::UnboundedReceiver<RuntimeEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let runtime = Self {
            session: Arc::new(Mutex::new(GameSession::new(rules))),
            surface: DragDropSurface::new(),
            selector: RoundSelector::new(store),
            source,
            ticker: None,
            events,
        };
        (runtime, receiver)
    }

    pub fn session(&self) -> Arc<Mutex<GameSession>> {
        self.session.clone()
    }

    pub fn surface(&self) -> &DragDropSurface {
        &self.surface
    }

    pub fn cursor(&self) -> Result<usize, AppError> {
        Ok(self.selector.cursor()?)
    }

    /// Whether a round ticker is currently scheduled.
    pub fn ticker_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Load the dataset, pick the next round and start playing it.
    ///
    /// A failed download is reported through an alert and the round starts
    /// with no movies. Malformed data is returned as an error and no round
    /// starts. On any error the current round, if one is running, carries on
    /// with its ticker.
    pub async fn start_game(&mut self) -> Result<(), AppError> {
        let all = match self.source.fetch_movies().await {
            Ok(movies) => movies,
            Err(AppError::Data(e)) => {
                tracing::error!("Movie data could not be parsed: {e}");
                self.alert(e.to_string());
                return Err(AppError::Data(e));
            }
            Err(e) => {
                tracing::warn!("Error loading movies: {e}");
                self.alert(FETCH_FAILED_ALERT.to_string());
                Vec::new()
            }
        };

        let round = self.selector.select_round(&all)?;

        self.cancel_ticker();
        self.surface.cancel();
        self.session.lock().await.start_game(round);
        self.spawn_ticker();
        Ok(())
    }

    /// Id of the movie shown at `position` in the available pool.
    pub async fn pool_movie(&self, position: usize) -> Option<MovieId> {
        let session = self.session.lock().await;
        session.available_movies().get(position).map(|(id, _)| *id)
    }

    pub async fn drag_start(&mut self, movie: MovieId) -> Result<(), AppError> {
        let session = self.session.lock().await;
        if session.phase() != Phase::Playing {
            return Err(SessionError::NotPlaying.into());
        }
        if session.movie(movie).is_none() {
            return Err(SessionError::UnknownMovie(movie.index()).into());
        }
        self.surface.drag_start(movie);
        Ok(())
    }

    pub async fn drag_from_slot(&mut self, slot: usize) -> Result<Option<MovieId>, AppError> {
        let session = self.session.lock().await;
        if session.phase() != Phase::Playing {
            return Err(SessionError::NotPlaying.into());
        }
        Ok(self
            .surface
            .drag_start_from_slot(&session, slot)
            .map_err(SessionError::from)?)
    }

    pub async fn drop_on(&mut self, slot: usize) -> Result<DropOutcome, AppError> {
        let mut session = self.session.lock().await;
        Ok(self.surface.drop_on(&mut session, slot)?)
    }

    /// Drag a movie and drop it on a slot in one step.
    pub async fn place(&mut self, movie: MovieId, slot: usize) -> Result<DropOutcome, AppError> {
        self.drag_start(movie).await?;
        self.drop_on(slot).await
    }

    pub async fn submit_order(&mut self) -> Result<SubmitOutcome, AppError> {
        let (outcome, phase) = {
            let mut session = self.session.lock().await;
            let outcome = session.submit_order()?;
            (outcome, session.phase())
        };

        if let Some(token) = outcome.feedback_token() {
            self.schedule_feedback_clear(token).await;
        }
        if phase != Phase::Playing {
            self.cancel_ticker();
        }

        Ok(outcome)
    }

    /// Leave the round (or result screen) and return to the title screen.
    pub async fn leave(&mut self) {
        self.cancel_ticker();
        self.surface.cancel();
        self.session.lock().await.leave();
    }

    fn spawn_ticker(&mut self) {
        self.cancel_ticker();

        let session = self.session.clone();
        let events = self.events.clone();

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                let outcome = session.lock().await.tick();
                let _ = events.send(RuntimeEvent::Redraw);

                match outcome {
                    TickOutcome::Running { remaining } => {
                        tracing::debug!(remaining, "Tick");
                    }
                    TickOutcome::TimedOut | TickOutcome::Ignored => break,
                }
            }
        }));
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    async fn schedule_feedback_clear(&self, token: u64) {
        let seconds = self.session.lock().await.rules().feedback_seconds;
        let session = self.session.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(u64::from(seconds))).await;
            if session.lock().await.clear_feedback(token) {
                let _ = events.send(RuntimeEvent::Redraw);
            }
        });
    }

    fn alert(&self, message: String) {
        let _ = self.events.send(RuntimeEvent::Alert(message));
    }
}

impl Drop for GameRuntime {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
