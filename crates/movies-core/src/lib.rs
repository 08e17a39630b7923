//! Game logic for "Order of Movies": arrange three movies by release date
//! before the clock runs out.
//!
//! Everything here is synchronous and deterministic. Timers, network access
//! and durable storage are driven from the outside (see the `order-of-movies`
//! crate); this crate only exposes the operations they call.

pub mod dataset;
pub mod drag_drop;
pub mod error;
pub mod movie;
pub mod order;
pub mod selector;
pub mod session;
pub mod store;

pub use dataset::{parse_movies, ParsedDataset};
pub use drag_drop::{DragDropSurface, DropOutcome, SlotView};
pub use error::{DataError, MoveError, SessionError, StoreError, ValidationError};
pub use movie::{sort_by_release, MovieId, MovieRecord};
pub use order::{PlayerOrder, SLOT_COUNT};
pub use selector::{RoundSelector, CURSOR_KEY, ROUND_SIZE};
pub use session::{
    Feedback, GameSession, Phase, RoundOutcome, Rules, SubmitOutcome, TickOutcome, INCOMPLETE_ORDER_MESSAGE,
    WRONG_ORDER_MESSAGE,
};
pub use store::{KeyValueStore, MemoryStore};
