//! Tests for the timed arena driver. All run on tokio's paused clock.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::time::sleep;
use xo_arena::{Arena, ArenaConfig, Timings, run_session};
use xo_engine::{GameMode, InMemoryLedger, Mark, Phase, Position, Rejection, SessionConfig, Square, Tier};

fn arena(mode: GameMode, tier: Tier) -> Arena<InMemoryLedger> {
    Arena::with_rng(
        SessionConfig::new(mode, tier),
        InMemoryLedger::default(),
        Timings::default(),
        StdRng::seed_from_u64(7),
    )
}

#[tokio::test(start_paused = true)]
async fn test_ai_reply_lands_after_delay() {
    let arena = arena(GameMode::PlayerVsAi, Tier::Grandmaster);
    arena.apply_move(Position::Center).await.unwrap();
    assert!(arena.snapshot().await.ai_thinking);

    sleep(Duration::from_millis(799)).await;
    assert!(arena.snapshot().await.ai_thinking);

    sleep(Duration::from_millis(2)).await;
    let snapshot = arena.snapshot().await;
    assert!(!snapshot.ai_thinking);
    assert_eq!(snapshot.phase, Phase::AwaitingHuman);
    assert_eq!(snapshot.active, Mark::X);
    // Corners are the only non-losing answers to a centre opening.
    assert_eq!(snapshot.board.get(Position::TopLeft), Square::Occupied(Mark::O));
}

#[tokio::test(start_paused = true)]
async fn test_move_while_ai_pending_is_rejected() {
    let arena = arena(GameMode::PlayerVsAi, Tier::Grandmaster);
    arena.apply_move(Position::Center).await.unwrap();
    assert_eq!(arena.apply_move(Position::TopLeft).await, Err(Rejection::NotYourTurn));
    assert_eq!(arena.undo().await, Err(Rejection::Locked));
    assert_eq!(arena.hint().await, Err(Rejection::Locked));
    assert_eq!(arena.snapshot().await.board.count(Mark::X), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_ai_move() {
    let arena = arena(GameMode::PlayerVsAi, Tier::Grandmaster);
    arena.apply_move(Position::Center).await.unwrap();
    arena.reset().await;

    sleep(Duration::from_secs(5)).await;
    let snapshot = arena.snapshot().await;
    assert_eq!(snapshot.board.empty_positions().len(), 9);
    assert_eq!(snapshot.phase, Phase::AwaitingHuman);
    assert_eq!(snapshot.active, Mark::X);
}

#[tokio::test(start_paused = true)]
async fn test_settle_applies_reply_and_undo_reverts_both_plies() {
    let arena = arena(GameMode::PlayerVsAi, Tier::Grandmaster);
    arena.apply_move(Position::Center).await.unwrap();
    arena.settle().await;
    assert_eq!(arena.snapshot().await.board.count(Mark::O), 1);

    assert_eq!(arena.undo().await, Ok(2));
    let snapshot = arena.snapshot().await;
    assert_eq!(snapshot.board.empty_positions().len(), 9);
    assert_eq!(arena.with_ledger(|ledger| ledger.undos()).await, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_hint_expires_after_display_duration() {
    let arena = arena(GameMode::PlayerVsAi, Tier::Rookie);
    let hint = arena.hint().await.unwrap();
    assert_eq!(hint, Position::TopLeft);
    assert_eq!(arena.snapshot().await.hint, Some(hint));
    assert_eq!(arena.with_ledger(|ledger| ledger.hints()).await, Some(2));

    sleep(Duration::from_millis(2_999)).await;
    assert_eq!(arena.snapshot().await.hint, Some(hint));

    sleep(Duration::from_millis(2)).await;
    assert_eq!(arena.snapshot().await.hint, None);
}

#[tokio::test(start_paused = true)]
async fn test_old_hint_timer_does_not_clear_new_hint() {
    let arena = Arena::with_rng(
        SessionConfig::new(GameMode::PlayerVsPlayer, Tier::Grandmaster),
        InMemoryLedger::unlimited(),
        Timings::default(),
        StdRng::seed_from_u64(1),
    );
    arena.hint().await.unwrap();
    sleep(Duration::from_secs(2)).await;
    arena.apply_move(Position::Center).await.unwrap();
    let second = arena.hint().await.unwrap();

    sleep(Duration::from_secs(2)).await;
    assert_eq!(arena.snapshot().await.hint, Some(second));
    sleep(Duration::from_secs(2)).await;
    assert_eq!(arena.snapshot().await.hint, None);
}

#[tokio::test(start_paused = true)]
async fn test_finished_games_reach_stats() {
    let arena = arena(GameMode::PlayerVsAi, Tier::Grandmaster);
    for _ in 0..2 {
        loop {
            let snapshot = arena.snapshot().await;
            if snapshot.outcome.is_terminal() {
                break;
            }
            let first_open = snapshot.board.empty_positions()[0];
            arena.apply_move(first_open).await.unwrap();
            arena.settle().await;
        }
        arena.reset().await;
    }

    let stats = arena.snapshot().await.stats;
    assert_eq!(stats.games(), 2);
    assert_eq!(stats.wins, 0);
    assert_eq!(stats.win_streak, 0);
}

#[tokio::test(start_paused = true)]
async fn test_hot_seat_needs_no_ai_and_keeps_no_stats() {
    let arena = arena(GameMode::PlayerVsPlayer, Tier::Grandmaster);
    for cell in [0, 3, 1, 4, 2] {
        arena.apply_move(Position::ALL[cell]).await.unwrap();
        assert!(!arena.snapshot().await.ai_thinking);
    }
    let snapshot = arena.snapshot().await;
    assert_eq!(snapshot.outcome.winner(), Some(Mark::X));
    assert_eq!(snapshot.stats.games(), 0);
    assert_eq!(arena.apply_move(Position::BottomRight).await, Err(Rejection::GameOver));
}

#[tokio::test(start_paused = true)]
async fn test_text_session_plays_and_quits() {
    let config = ArenaConfig::default();
    let arena = Arena::with_rng(
        config.session_config(),
        config.ledger(),
        config.timings(),
        StdRng::seed_from_u64(3),
    );
    let input: &[u8] = b"5\nbogus\n5\nhint\nquit\n9\n";
    let mut output = Vec::new();
    run_session(&arena, input, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("AI (Grandmaster) is thinking..."));
    assert!(text.contains("Unrecognized command: bogus") || text.contains("Not a square: bogus"));
    assert!(text.contains("Rejected: "));
    assert!(text.contains("Hint: square"));
    assert!(text.contains("Hints: 2  Undos: 2"));

    // Input after quit is never read.
    let snapshot = arena.snapshot().await;
    assert_eq!(snapshot.board.count(Mark::X), 1);
    assert_eq!(snapshot.board.count(Mark::O), 1);
}
