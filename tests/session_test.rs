//! Session scenarios and ordering properties.

mod common;

use movies_core::{
    sort_by_release, DragDropSurface, GameSession, MovieId, MovieRecord, Phase, RoundOutcome, SubmitOutcome,
    ValidationError,
};
use proptest::prelude::*;

#[test]
fn test_three_movie_scenario() {
    let mut session = GameSession::default();
    session.start_game(vec![
        common::movie("2000-01-01 movie", 2000, 1, 1),
        common::movie("1999-06-15 movie", 1999, 6, 15),
        common::movie("2001-12-31 movie", 2001, 12, 31),
    ]);

    assert_eq!(
        session.correct_order(),
        vec!["1999-06-15 movie", "2000-01-01 movie", "2001-12-31 movie"]
    );
}

#[test]
fn test_full_round_with_retry() {
    let mut session = GameSession::default();
    let mut surface = DragDropSurface::new();
    session.start_game(vec![
        common::movie("Middle", 2005, 5, 5),
        common::movie("Oldest", 1995, 1, 1),
        common::movie("Newest", 2015, 9, 9),
    ]);

    // First attempt: source order, which is wrong.
    for slot in 0..3 {
        surface.drag_start(MovieId(slot));
        surface.drop_on(&mut session, slot).unwrap();
    }
    for _ in 0..5 {
        session.tick();
    }
    assert!(matches!(session.submit_order().unwrap(), SubmitOutcome::Wrong { .. }));
    assert_eq!(session.available_movies().len(), 3);

    // Second attempt, relocating one movie on the way.
    surface.drag_start(MovieId(1));
    surface.drop_on(&mut session, 2).unwrap();
    surface.drag_start_from_slot(&session, 2).unwrap();
    surface.drop_on(&mut session, 0).unwrap();
    surface.drag_start(MovieId(0));
    surface.drop_on(&mut session, 1).unwrap();
    surface.drag_start(MovieId(2));
    surface.drop_on(&mut session, 2).unwrap();

    assert_eq!(session.submit_order().unwrap(), SubmitOutcome::Correct { score: 835 });
    assert_eq!(session.outcome(), Some(RoundOutcome::Solved { score: 835 }));
}

#[test]
fn test_ten_ticks_scenario() {
    let mut session = GameSession::default();
    session.start_game(common::dataset(3));
    for _ in 0..10 {
        session.tick();
    }
    assert_eq!(session.score(), 670);
    assert_eq!(session.timer(), 20);
}

#[test]
fn test_timeout_with_incomplete_order() {
    let mut session = GameSession::default();
    session.start_game(common::dataset(3));
    session.assign_to_slot(MovieId(2), 0).unwrap();

    for _ in 0..30 {
        session.tick();
    }

    assert_eq!(session.phase(), Phase::Result);
    assert_eq!(session.last_attempt_correct(), None);
    assert_eq!(
        session.outcome(),
        Some(RoundOutcome::TimedOut {
            correct_order: vec!["Movie 0".into(), "Movie 1".into(), "Movie 2".into()],
        })
    );
}

fn arb_round() -> impl Strategy<Value = Vec<MovieRecord>> {
    prop::collection::vec((1950i32..2030, 1u32..=12, 1u32..=28), 3).prop_map(|dates| {
        dates
            .into_iter()
            .enumerate()
            .map(|(i, (y, m, d))| common::movie(&format!("Title {i}"), y, m, d))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_correct_order_is_sorted_permutation(round in arb_round()) {
        let mut session = GameSession::default();
        session.start_game(round.clone());
        let order = session.correct_order();

        let mut expected: Vec<String> = round.iter().map(|m| m.title.clone()).collect();
        let mut actual = order.clone();
        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);

        let dates: Vec<_> = order
            .iter()
            .map(|t| round.iter().find(|m| &m.title == t).unwrap().release_date)
            .collect();
        prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));

        let sorted: Vec<String> = sort_by_release(&round).into_iter().map(|m| m.title.clone()).collect();
        prop_assert_eq!(order, sorted);
    }

    #[test]
    fn prop_incomplete_submission_rejected(round in arb_round(), placed in prop::collection::vec((0usize..3, 0usize..3), 0..3)) {
        let mut session = GameSession::default();
        session.start_game(round);
        for (movie, slot) in placed {
            session.assign_to_slot(MovieId(movie), slot).unwrap();
        }
        prop_assume!(!session.order().is_complete());

        let before = *session.order();
        let outcome = session.submit_order().unwrap();
        let rejected = matches!(
            outcome,
            SubmitOutcome::Rejected { reason: ValidationError::EmptySlot(_), .. }
        );
        prop_assert!(rejected);
        prop_assert_eq!(session.phase(), Phase::Playing);
        prop_assert_eq!(*session.order(), before);
    }

    #[test]
    fn prop_gestures_keep_one_slot_per_movie(gestures in prop::collection::vec((any::<bool>(), 0usize..3, 0usize..3), 0..50)) {
        let mut session = GameSession::default();
        let mut surface = DragDropSurface::new();
        session.start_game(common::dataset(3));

        for (from_slot, source, target) in gestures {
            if from_slot {
                surface.drag_start_from_slot(&session, source).unwrap();
            } else {
                surface.drag_start(MovieId(source));
            }
            surface.drop_on(&mut session, target).unwrap();

            let placed: Vec<MovieId> = session.order().placed().collect();
            let mut deduped = placed.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(placed.len(), deduped.len());

            // The pool is exactly the round minus what is placed.
            prop_assert_eq!(session.available_movies().len() + placed.len(), 3);
            prop_assert_eq!(session.available_movies(), session.available_movies());
        }
    }
}
