//! Integration tests for the game loop

use tinyboy::core::{Session, SessionSnapshot};
use tinyboy::display::{sprite_code, Framebuffer};
use tinyboy::engine::{Console, HeadlessPeripheral};
use tinyboy::input::{InputMode, InputScript, TickScheduler};
use tinyboy::types::{
    Buttons, GameAction, PieceKind, ProbeResult, SessionState, ARENA_BOTTOM, ARENA_MAX_X,
    ARENA_MIN_X, ARENA_TOP, FRAME_BITS, TICK_MS,
};

fn playing(first: PieceKind) -> (Session, Framebuffer) {
    let mut fb = Framebuffer::new();
    let mut session = Session::starting_with(first);
    session.advance(&mut fb);
    (session, fb)
}

#[test]
fn test_hard_drop_i_onto_empty_floor() {
    let (mut session, mut fb) = playing(PieceKind::I);

    let report = session.tick(&mut fb, Buttons::DOWN);
    assert_eq!(report.action, Some(GameAction::HardDrop));
    assert_eq!(report.probe, ProbeResult::Landed);
    assert_eq!(session.state(), SessionState::Landed);

    for x in ARENA_MIN_X..=ARENA_MAX_X {
        let expected = if (4..=7).contains(&x) { sprite_code(0) } else { 0 };
        assert_eq!(fb.get(x, ARENA_BOTTOM), Some(expected), "x={x}");
        assert_eq!(fb.get(x, ARENA_BOTTOM - 1), Some(0), "x={x}");
    }

    session.advance(&mut fb);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.kind(), PieceKind::J);
}

#[test]
fn test_line_clear_end_to_end() {
    let (mut session, mut fb) = playing(PieceKind::J);

    // Bottom row full except the last column, plus one marker cell above.
    for x in ARENA_MIN_X..ARENA_MAX_X {
        fb.set(x, ARENA_BOTTOM, sprite_code(3));
    }
    fb.set(ARENA_MIN_X, 12, sprite_code(2));

    for _ in 0..4 {
        let report = session.tick(&mut fb, Buttons::RIGHT);
        assert_eq!(report.action, Some(GameAction::MoveRight));
    }
    assert_eq!(session.position(), (9, 6));

    // J's hook drops into the gap at column 10.
    let report = session.tick(&mut fb, Buttons::DOWN);
    assert!(report.landed);
    assert_eq!(fb.get(ARENA_MAX_X, ARENA_BOTTOM), Some(sprite_code(0)));

    session.advance(&mut fb);
    assert_eq!(session.score(), 10);
    assert_eq!(session.lines(), 1);

    // The J's top row moved down into the cleared row.
    for x in ARENA_MIN_X..=ARENA_MAX_X {
        let expected = if x >= 8 { sprite_code(0) } else { 0 };
        assert_eq!(fb.get(x, ARENA_BOTTOM), Some(expected), "x={x}");
    }
    assert_eq!(fb.get(ARENA_MIN_X, 13), Some(sprite_code(2)));
    assert_eq!(fb.get(ARENA_MIN_X, 12), Some(0));
}

#[test]
fn test_multi_row_clear_scores_once_per_pass() {
    for (rows, points) in [(2, 100), (3, 300), (4, 1200)] {
        let (mut session, mut fb) = playing(PieceKind::I);
        for y in (ARENA_BOTTOM - rows + 1)..=ARENA_BOTTOM {
            for x in ARENA_MIN_X..=ARENA_MAX_X {
                fb.set(x, y, sprite_code(2));
            }
        }

        let report = session.tick(&mut fb, Buttons::DOWN);
        assert!(report.landed, "rows={rows}");
        session.advance(&mut fb);
        assert_eq!(session.score(), points, "rows={rows}");
        assert_eq!(session.lines(), rows as u32, "rows={rows}");

        // The I that landed on the stack falls to the floor.
        for x in ARENA_MIN_X..=ARENA_MAX_X {
            let expected = if (4..=7).contains(&x) { sprite_code(0) } else { 0 };
            assert_eq!(fb.get(x, ARENA_BOTTOM), Some(expected), "rows={rows} x={x}");
            assert_eq!(fb.get(x, ARENA_BOTTOM - 1), Some(0), "rows={rows} x={x}");
        }
    }
}

#[test]
fn test_full_stack_keeps_spawning() {
    let (mut session, mut fb) = playing(PieceKind::I);
    for y in ARENA_TOP..=ARENA_BOTTOM {
        fb.set(5, y, sprite_code(1));
    }

    let report = session.tick(&mut fb, Buttons::NONE);
    assert_eq!(report.probe, ProbeResult::LandedFull);
    assert!(report.landed);

    session.advance(&mut fb);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.kind(), PieceKind::J);
    assert_eq!(session.games(), 1);
}

#[test]
fn test_priority_picks_one_action() {
    let (mut session, mut fb) = playing(PieceKind::O);
    let report = session.tick(&mut fb, Buttons::DOWN | Buttons::LEFT | Buttons::RIGHT);
    assert_eq!(report.action, Some(GameAction::HardDrop));

    let (mut session, mut fb) = playing(PieceKind::O);
    let report = session.tick(&mut fb, Buttons::LEFT | Buttons::RIGHT);
    assert_eq!(report.action, Some(GameAction::MoveLeft));
    assert_eq!(session.position().0, 4);
}

#[test]
fn test_headless_script_run() {
    let script = InputScript::parse("RR _ D _ _ LL D").unwrap();
    let peripheral = HeadlessPeripheral::new(script);
    let scheduler = TickScheduler::new(TICK_MS, InputMode::SinglePoll);
    let ticks = peripheral.ticks_for_script(scheduler.mode());
    assert_eq!(ticks, 9);

    let mut console = Console::new(peripheral, scheduler);
    console.run_ticks(ticks);

    let screen = console.peripheral().screen();
    assert_eq!(screen.frames(), ticks);
    assert!(screen.aligned());
    assert_eq!(screen.bits_received(), ticks * FRAME_BITS as u64);
    assert_eq!(console.peripheral().clock_ms(), ticks * u64::from(TICK_MS));
    assert!(console.peripheral().script().is_finished());

    // The last tick hard-dropped the second piece; its landing is not yet
    // resolved.
    let snap: SessionSnapshot = console.snapshot();
    assert_eq!(snap.state, "landed");
    assert_eq!(snap.piece_kind(), Some(PieceKind::J));
    assert_eq!(snap.occupied(), 8);

    console.step();
    assert_eq!(console.session().kind(), PieceKind::L);
}

#[test]
fn test_accumulate_mode_catches_short_press() {
    // Each tick window polls four times; a single-poll pulse lands mid-window.
    let script = InputScript::parse("_ _ _ _ _ R _ _").unwrap();
    let peripheral = HeadlessPeripheral::new(script);
    let scheduler = TickScheduler::new(TICK_MS, InputMode::Accumulate { samples: 4 });
    let mut console = Console::new(peripheral, scheduler);

    console.run_ticks(3);
    let moved = console.session().position().0;
    assert_eq!(moved, 6);
}

#[test]
fn test_snapshot_json() {
    let peripheral = HeadlessPeripheral::idle();
    let mut console = Console::new(peripheral, TickScheduler::default());
    console.run_ticks(2);

    let json = serde_json::to_value(console.snapshot()).unwrap();
    assert_eq!(json["state"], "playing");
    assert_eq!(json["piece"], "i");
    assert_eq!(json["next_piece"], "j");
    assert_eq!(json["y"], 4);
}
