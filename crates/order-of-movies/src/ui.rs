//! Terminal front-end: screen rendering and player commands.
//!
//! Slots and pool entries are numbered from 1 on screen and from 0 in the
//! core.

use std::fmt::Write;

use movies_core::{DragDropSurface, DropOutcome, GameSession, Phase, RoundOutcome, SlotView};

use crate::error::AppError;
use crate::runtime::GameRuntime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    /// Pick up the pool movie at this position.
    Drag(usize),
    /// Pick up the movie sitting in this slot.
    Lift(usize),
    Drop(usize),
    /// Drag a pool movie straight onto a slot.
    Place { movie: usize, slot: usize },
    Submit,
    Again,
    Home,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command, AppError> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(AppError::InvalidCommand("Type a command (or `help`)".into()));
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
        ("start", []) => Command::Start,
        ("drag", [n]) => Command::Drag(position(n)?),
        ("lift", [n]) => Command::Lift(position(n)?),
        ("drop", [n]) => Command::Drop(position(n)?),
        ("place", [movie, slot]) => Command::Place {
            movie: position(movie)?,
            slot: position(slot)?,
        },
        ("submit", []) => Command::Submit,
        ("again", []) => Command::Again,
        ("home", []) => Command::Home,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(AppError::InvalidCommand(format!("Unknown command: {}", input.trim()))),
    };
    Ok(command)
}

/// Parse a 1-based number from the screen into a 0-based index.
fn position(word: &str) -> Result<usize, AppError> {
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(AppError::InvalidCommand(format!("Not a valid position: {word}"))),
    }
}

/// Apply a player command to the runtime. `Quit` is left to the caller.
pub async fn dispatch(runtime: &mut GameRuntime, command: Command) -> Result<(), AppError> {
    let phase = runtime.session().lock().await.phase();

    match command {
        Command::Start | Command::Again => {
            if phase == Phase::Playing {
                return Err(AppError::InvalidCommand("A round is already in progress".into()));
            }
            runtime.start_game().await
        }
        Command::Drag(n) => {
            let movie = runtime
                .pool_movie(n)
                .await
                .ok_or_else(|| AppError::InvalidCommand(format!("No movie {} in the pool", n + 1)))?;
            runtime.drag_start(movie).await
        }
        Command::Lift(slot) => match runtime.drag_from_slot(slot).await? {
            Some(_) => Ok(()),
            None => Err(AppError::InvalidCommand(format!("Slot {} is empty", slot + 1))),
        },
        Command::Drop(slot) => match runtime.drop_on(slot).await? {
            DropOutcome::Placed { .. } => Ok(()),
            DropOutcome::NoPayload => Err(AppError::InvalidCommand(
                "Pick a movie up first with `drag` or `lift`".into(),
            )),
        },
        Command::Place { movie, slot } => {
            let id = runtime
                .pool_movie(movie)
                .await
                .ok_or_else(|| AppError::InvalidCommand(format!("No movie {} in the pool", movie + 1)))?;
            runtime.place(id, slot).await.map(|_| ())
        }
        Command::Submit => {
            let ready = runtime.session().lock().await.can_submit();
            if phase == Phase::Playing && !ready {
                return Err(AppError::InvalidCommand(
                    "Place all three movies before submitting".into(),
                ));
            }
            runtime.submit_order().await.map(|_| ())
        }
        Command::Home => {
            runtime.leave().await;
            Ok(())
        }
        Command::Help | Command::Quit => Ok(()),
    }
}

pub async fn screen(runtime: &GameRuntime) -> String {
    let session = runtime.session();
    let session = session.lock().await;
    render(&session, runtime.surface())
}

pub fn render(session: &GameSession, surface: &DragDropSurface) -> String {
    match session.phase() {
        Phase::Start => render_start(),
        Phase::Playing => render_playing(session, surface),
        Phase::Result => render_result(session),
    }
}

fn render_start() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order of Movies");
    let _ = writeln!(out, "Arrange movies by their release date.");
    let _ = writeln!(out);
    let _ = writeln!(out, "  start  Start Game");
    let _ = writeln!(out, "  quit   Quit");
    out
}

fn render_playing(session: &GameSession, surface: &DragDropSurface) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Time: {}s    Score: {}", session.timer(), session.score());
    let _ = writeln!(out);

    let _ = writeln!(out, "Your order (earliest first):");
    for (i, view) in surface.slot_views(session).iter().enumerate() {
        let label = match view {
            SlotView::Empty => "Drop here".to_string(),
            SlotView::Occupied(id) => session.movie(*id).map(|m| m.title.clone()).unwrap_or_default(),
        };
        let _ = writeln!(out, "  {}. [ {} ]", i + 1, label);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Movies:");
    for (i, (_, movie)) in session.available_movies().iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", i + 1, movie.title);
    }

    if let Some(movie) = surface.payload().and_then(|id| session.movie(id)) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Dragging: {}", movie.title);
    }
    if let Some(feedback) = session.feedback() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", feedback.message);
    }

    let _ = writeln!(out);
    let submit = if session.can_submit() {
        "submit"
    } else {
        "submit (place all three first)"
    };
    let _ = writeln!(out, "  place <movie> <slot> | drag <movie> | lift <slot> | drop <slot>");
    let _ = writeln!(out, "  {submit} | home");
    out
}

fn render_result(session: &GameSession) -> String {
    let mut out = String::new();
    match session.outcome() {
        Some(RoundOutcome::Solved { score }) => {
            let _ = writeln!(out, "Congratulations!");
            let _ = writeln!(out, "Your score: {score}");
        }
        Some(RoundOutcome::TimedOut { correct_order }) => {
            let _ = writeln!(out, "Time's Up!");
            let _ = writeln!(out, "Correct order: {}", correct_order.join(" → "));
        }
        None => {}
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  again  Play Again");
    let _ = writeln!(out, "  home   Back to Home");
    out
}

pub fn help() -> &'static str {
    "start | again        start a round\n\
     drag <n>             pick up movie n from the pool\n\
     lift <slot>          pick up the movie in a slot\n\
     drop <slot>          drop what you are holding on a slot\n\
     place <n> <slot>     drag movie n straight onto a slot\n\
     submit               check your order\n\
     home                 back to the title screen\n\
     quit                 exit"
}
