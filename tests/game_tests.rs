//! Game tests - drop steps, lock-in, scoring and lifecycle

use falling_blocks::core::{Game, LockEvent, ScriptedSource, TickOutcome};
use falling_blocks::types::{Direction, Phase, ShapeKind, EMPTY};

fn scripted(kind: ShapeKind) -> Game<ScriptedSource> {
    let mut game = Game::with_source(ScriptedSource::repeat(kind));
    assert!(game.start());
    game
}

fn fill_row_except(game: &mut Game<ScriptedSource>, row: usize, gaps: &[usize], tag: u8) {
    for col in 1..=10 {
        if !gaps.contains(&col) {
            game.set_settled(row, col, tag);
        }
    }
}

fn drop_until_locked<S: falling_blocks::core::PieceSource>(game: &mut Game<S>) -> TickOutcome {
    loop {
        match game.step() {
            TickOutcome::Descended => continue,
            other => return other,
        }
    }
}

#[test]
fn test_six_drop_steps_on_empty_board() {
    let mut game = Game::new(2024);
    assert!(game.start());
    assert_eq!(game.position(), (4, -1));

    for _ in 0..6 {
        assert_eq!(game.step(), TickOutcome::Descended);
    }
    assert_eq!(game.position(), (4, 5));
    assert!(game.piece_movable());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_completing_row_18_by_lock_in() {
    let mut game = scripted(ShapeKind::Bar);
    fill_row_except(&mut game, 18, &[4, 5, 6], 1);
    fill_row_except(&mut game, 19, &[10], 2);
    fill_row_except(&mut game, 20, &[10], 2);
    game.set_settled(17, 2, 5);

    let outcome = drop_until_locked(&mut game);
    assert_eq!(
        outcome,
        TickOutcome::Locked(LockEvent {
            rows: 1,
            points: 1,
            sped_up: false
        })
    );
    assert_eq!(game.position(), (4, 17));
    assert_eq!(game.score(), 1);
    assert_eq!(game.lines_cleared(), 1);
    assert!(!game.piece_movable());

    let settled = game.grid().settled();
    // The marker from row 17 moved into row 18.
    assert_eq!(settled[18][2], 5);
    assert_eq!(settled[17][2], EMPTY);
    assert!(settled[18][3..11].iter().all(|&c| c == EMPTY));
    assert_eq!(settled[19][10], EMPTY);
    assert_eq!(settled[19][1], 2);
}

#[test]
fn test_next_piece_is_promoted_one_step_after_lock() {
    let mut game = Game::with_source(ScriptedSource::new(vec![
        ShapeKind::Bar,
        ShapeKind::T,
        ShapeKind::Square,
    ]));
    game.start();
    assert_eq!(game.current().map(|p| p.kind()), Some(ShapeKind::Bar));
    assert_eq!(game.next_piece().map(|p| p.kind()), Some(ShapeKind::T));

    assert!(matches!(drop_until_locked(&mut game), TickOutcome::Locked(_)));
    assert!(!game.apply_input(Direction::Left));

    assert_eq!(game.step(), TickOutcome::Spawned);
    assert_eq!(game.current().map(|p| p.kind()), Some(ShapeKind::T));
    assert_eq!(game.next_piece().map(|p| p.kind()), Some(ShapeKind::Square));
    assert_eq!(game.position(), (4, -1));
    assert!(game.piece_movable());
    assert_eq!(
        Some(game.snapshot().next),
        game.next_piece().map(|p| *p.cells())
    );
}

#[test]
fn test_blocked_horizontal_move_is_rejected_without_bounce_back() {
    let mut game = scripted(ShapeKind::Bar);
    game.set_settled(0, 7, 3);
    let before = *game.grid().overlay();

    assert!(!game.apply_input(Direction::Right));
    assert_eq!(game.position(), (4, -1));
    assert_eq!(*game.grid().overlay(), before);

    // Against the wall the piece stops at the last legal column.
    for _ in 0..10 {
        game.apply_input(Direction::Left);
    }
    assert_eq!(game.position(), (1, -1));
    assert_eq!(&game.grid().overlay()[0][1..4], &[7, 7, 7]);
}

#[test]
fn test_rotation_checked_before_commit() {
    let mut game = scripted(ShapeKind::Bar);
    for _ in 0..3 {
        game.apply_input(Direction::Left);
    }
    assert!(game.apply_input(Direction::RotateRight));
    let vertical = *game.current().map(|p| p.cells()).unwrap();
    // Vertical bar has an empty left column, so it can reach x = 0.
    assert!(game.apply_input(Direction::Left));
    assert_eq!(game.position(), (0, -1));
    assert!(game.apply_input(Direction::Down));

    assert!(!game.apply_input(Direction::RotateLeft));
    assert!(!game.apply_input(Direction::RotateRight));
    assert_eq!(*game.current().map(|p| p.cells()).unwrap(), vertical);
}

#[test]
fn test_blocked_down_input_leaves_lock_to_timer() {
    let mut game = scripted(ShapeKind::Bar);
    let mut moves = 0;
    while game.apply_input(Direction::Down) {
        moves += 1;
    }
    assert_eq!(moves, 20);
    assert_eq!(game.position(), (4, 19));
    assert!(game.piece_movable());

    assert_eq!(game.tick(899), TickOutcome::Waiting);
    assert!(matches!(game.tick(1), TickOutcome::Locked(_)));
    assert!(!game.piece_movable());
}

#[test]
fn test_multi_row_clear_scores_square_and_speeds_up() {
    let mut game = scripted(ShapeKind::Bar);

    for round in 0..2 {
        for row in 18..=20 {
            fill_row_except(&mut game, row, &[5], 6);
        }
        assert!(game.apply_input(Direction::RotateRight));
        let outcome = drop_until_locked(&mut game);
        assert_eq!(
            outcome,
            TickOutcome::Locked(LockEvent {
                rows: 3,
                points: 9,
                sped_up: round == 1
            })
        );
        assert_eq!(game.step(), TickOutcome::Spawned);
    }

    assert_eq!(game.score(), 18);
    assert_eq!(game.lines_cleared(), 6);
    assert_eq!(game.drop_interval_ms(), 750);
}

#[test]
fn test_pause_freezes_timer() {
    let mut game = scripted(ShapeKind::T);
    assert_eq!(game.tick(600), TickOutcome::Waiting);
    assert!(game.set_paused(true));
    assert_eq!(game.phase(), Phase::Paused);
    assert_eq!(game.tick(5_000), TickOutcome::Inactive);
    assert_eq!(game.position(), (4, -1));

    assert!(game.set_paused(false));
    assert_eq!(game.tick(299), TickOutcome::Waiting);
    assert_eq!(game.tick(1), TickOutcome::Descended);
}

#[test]
fn test_game_over_at_spawn_collision_then_restart() {
    let mut game = scripted(ShapeKind::Square);
    fill_row_except(&mut game, 1, &[10], 2);

    let outcome = game.step();
    assert!(matches!(outcome, TickOutcome::GameOver(_)));
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.snapshot().game_over());
    assert!(!game.apply_input(Direction::Left));
    assert_eq!(game.step(), TickOutcome::Inactive);

    assert!(game.start());
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.drop_interval_ms(), 900);
    assert_eq!(game.grid().settled()[1][1], EMPTY);
    assert_eq!(game.step(), TickOutcome::Descended);
}

#[test]
fn test_start_ignored_while_running_or_paused() {
    let mut game = scripted(ShapeKind::L);
    game.step();
    assert!(!game.start());
    assert_eq!(game.position(), (4, 0));
    game.toggle_pause();
    assert!(!game.start());
    assert!(game.paused());
}

#[test]
fn test_snapshot_reflects_state() {
    let mut game = scripted(ShapeKind::Bar);
    game.step();
    game.step();
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::Running);
    assert_eq!(snap.position, (4, 1));
    assert!(snap.piece_movable);
    assert_eq!(snap.drop_interval_ms, 900);
    assert_eq!(&snap.grid[2][4..7], &[7, 7, 7]);
    assert!(snap.playable());

    let mut reused = falling_blocks::core::GameSnapshot::default();
    game.snapshot_into(&mut reused);
    assert_eq!(reused, snap);
}
