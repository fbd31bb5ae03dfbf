use super::*;
use chessai_core::Color;
use std::time::{Duration, Instant};

#[test]
fn test_worker_returns_selector_and_result() {
    let state = GameState::new_game(Color::White);
    let worker = SearchWorker::spawn(
        MoveSelector::with_defaults(Color::White),
        state,
        SearchLimits::depth(2),
    );
    let (selector, result) = worker.join().unwrap();
    assert!(result.best_move.is_some());
    assert_eq!(result.depth, 2);
    assert_eq!(selector.best_moves()[0], result.best_move);
}

#[test]
fn test_stop_ends_an_unbounded_search() {
    let state = GameState::new_game(Color::White);
    let limits = SearchLimits {
        depth: 40,
        move_time: None,
        time_control: TimeControl::new(None).with_check_interval(32),
    };
    let started = Instant::now();
    let worker = SearchWorker::spawn(MoveSelector::with_defaults(Color::White), state, limits);
    std::thread::sleep(Duration::from_millis(20));
    worker.stop();
    let (_, result) = worker.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(result.stopped);
    assert!(result.best_move.is_some());
    assert!(result.depth < 40);
}

#[test]
fn test_stop_right_after_spawn_is_honoured() {
    let state = GameState::new_game(Color::White);
    let limits = SearchLimits::depth(40);
    let worker = SearchWorker::spawn(MoveSelector::with_defaults(Color::White), state, limits);
    worker.stop();
    let (_, result) = worker.join().unwrap();
    assert!(result.stopped);
    assert_eq!(result.depth, 1);
}

#[test]
fn test_time_limit_finishes_on_its_own() {
    let state = GameState::new_game(Color::White);
    let limits = SearchLimits::time(Duration::from_millis(30));
    let worker = SearchWorker::spawn(MoveSelector::with_defaults(Color::White), state, limits);
    let (_, result) = worker.join().unwrap();
    assert!(result.stopped);
    assert!(result.best_move.is_some());
}

#[test]
fn test_is_finished_turns_true() {
    let worker = SearchWorker::spawn(
        MoveSelector::with_defaults(Color::Black),
        GameState::new_game(Color::Black),
        SearchLimits::depth(1),
    );
    while !worker.is_finished() {
        std::thread::sleep(Duration::from_millis(1));
    }
    let (selector, _) = worker.join().unwrap();
    // The search plays the side to move.
    assert_eq!(selector.engine_color(), Color::White);
}
