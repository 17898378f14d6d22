use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::codec::{faces_to_solver_string, solver_string_to_faces};
use crate::solver::validate_facelets;
use crate::*;

fn moves_strategy(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Vec<Move>> {
    prop::collection::vec(prop::sample::select(Move::ALL.to_vec()), len)
}

fn face_moves_strategy(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Vec<Move>> {
    let face_moves: Vec<Move> = Move::ALL.into_iter().filter(|mv| mv.is_face_turn()).collect();
    prop::collection::vec(prop::sample::select(face_moves), len)
}

fn engine_after(moves: &[Move]) -> MoveEngine {
    let mut engine = MoveEngine::new();
    for &mv in moves {
        engine.apply_move(mv).unwrap();
    }
    engine
}

#[test]
fn test_every_move_has_order_four() {
    for mv in Move::ALL {
        let mut engine = MoveEngine::new();
        for i in 1..=4 {
            engine.apply_move(mv).unwrap();
            assert!(engine.check_invariant());
            assert_eq!(i == 4, engine.is_home(), "{mv} x{i}");
        }
        assert_eq!(MoveEngine::new(), engine);
    }
}

#[test]
fn test_sexy_move_has_order_six() {
    let mut engine = MoveEngine::new();
    for i in 1..=6 {
        for mv in ["R", "U", "R'", "U'"] {
            engine.apply_move(mv.parse().unwrap()).unwrap();
        }
        assert_eq!(i == 6, engine.is_solved(), "after {i} repetitions");
    }
    assert_eq!(MoveEngine::new(), engine);
}

#[test]
fn test_solved_encoding() {
    let s = faces_to_solver_string(&MoveEngine::new().faces());
    let blocks: Vec<&str> = (0..6).map(|i| &s[9 * i..9 * (i + 1)]).collect();
    for block in &blocks {
        assert!(block.chars().all(|c| Some(c) == block.chars().next()));
    }
    let mut letters: Vec<char> = blocks.iter().filter_map(|b| b.chars().next()).collect();
    letters.sort_unstable();
    letters.dedup();
    assert_eq!(6, letters.len());
    assert_eq!(Ok(FaceMatrix::solved()), solver_string_to_faces(&s));
}

#[test]
fn test_busy_until_turn_completes() {
    let mut engine = MoveEngine::new();
    let mut anim = AnimationController::default();
    engine.begin_move("R").unwrap();
    assert!(matches!(engine.begin_move("U"), Err(MoveError::MoveBusy(_))));
    let mut ticks = 0;
    while engine.is_turning() {
        anim.tick(&mut engine);
        ticks += 1;
    }
    assert_eq!((QUARTER_TURN / DEFAULT_SPEED) as usize, ticks);
    assert!(engine.begin_move("U").is_ok());
}

#[test]
fn test_solved_scan_with_one_altered_sticker() {
    let solved = FaceMatrix::solved();
    let mut scan = [Face::D, Face::F, Face::L, Face::B, Face::R, Face::U].map(|f| solved[f]);
    scan[2][1][0] = Color::Orange;
    let mut sim = Simulation::default();
    assert!(matches!(
        sim.load_scan(&mut scan),
        Err(SolveError::InvalidConfiguration(_)),
    ));
    assert!(sim.engine.is_home());
}

proptest! {
    #[test]
    fn proptest_invariant_and_inverse(moves in moves_strategy(0..60)) {
        let mut engine = MoveEngine::new();
        for &mv in &moves {
            engine.apply_move(mv).unwrap();
            prop_assert!(engine.check_invariant());
        }
        for &mv in moves.iter().rev() {
            engine.apply_move(mv.rev()).unwrap();
        }
        prop_assert_eq!(MoveEngine::new(), engine);
    }

    #[test]
    fn proptest_move_then_inverse(moves in moves_strategy(0..30), mv in prop::sample::select(Move::ALL.to_vec())) {
        let before = engine_after(&moves);
        let mut after = before.clone();
        after.apply_move(mv).unwrap();
        after.apply_move(mv.rev()).unwrap();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn proptest_queue_matches_direct_moves(moves in moves_strategy(24), speed in 1.0_f32..120.0) {
        let names: Vec<String> = moves.iter().map(|mv| mv.to_string()).collect();

        let mut queued = MoveEngine::new();
        let mut queued_anim = AnimationController::new(speed);
        queued_anim.play_sequence(&names, None);
        let mut ticks = 0;
        while !queued_anim.is_idle(&queued) {
            queued_anim.tick(&mut queued);
            prop_assert!(queued.check_invariant());
            ticks += 1;
            prop_assert!(ticks < 100_000);
        }

        let mut direct = MoveEngine::new();
        let mut direct_anim = AnimationController::new(speed);
        for name in &names {
            direct.begin_move(name).unwrap();
            while direct.is_turning() {
                direct_anim.tick(&mut direct);
            }
        }

        prop_assert_eq!(engine_after(&moves), direct.clone());
        prop_assert_eq!(direct, queued);
    }

    #[test]
    fn proptest_face_turns_are_solvable(moves in face_moves_strategy(0..40)) {
        let engine = engine_after(&moves);
        let s = faces_to_solver_string(&engine.faces());
        prop_assert_eq!(Ok(()), validate_facelets(&s));
        prop_assert_eq!(Ok(engine.faces()), solver_string_to_faces(&s));
    }

    #[test]
    fn proptest_altered_sticker_is_invalid(
        moves in face_moves_strategy(0..20),
        index in 0..54_usize,
        color in prop::sample::select(vec![
            Color::White, Color::Yellow, Color::Red, Color::Orange, Color::Green, Color::Blue, Color::Unknown,
        ]),
    ) {
        let mut faces = engine_after(&moves).faces();
        let cell = &mut faces.0[index / 9][index % 9 / 3][index % 3];
        prop_assume!(*cell != color);
        *cell = color;
        let s = faces_to_solver_string(&faces);
        prop_assert!(validate_facelets(&s).is_err());
    }
}
