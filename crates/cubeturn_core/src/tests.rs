use cubemath::prelude::*;
use cubeturn_notation::{Modifier, NotatedMove, parse_notation};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::*;

fn apply(model: &mut PuzzleModel, script: &str) {
    let moves = compile_notation(model.size(), script).unwrap();
    model.apply_moves(&moves).unwrap();
}

#[test]
fn test_move_and_inverse() {
    let mut model = PuzzleModel::new(3).unwrap();
    let solved = model.clone();
    apply(&mut model, "R R'");
    assert_eq!(model.pieces(), solved.pieces());
    assert!(model.is_solved());
}

#[test]
fn test_four_quarter_turns() {
    let mut model = PuzzleModel::new(3).unwrap();
    let solved = model.clone();
    apply(&mut model, "U");
    assert!(!model.is_solved());
    apply(&mut model, "U U U");
    assert_eq!(model.pieces(), solved.pieces());
    assert!(model.is_solved());
}

#[test]
fn test_half_turn() {
    let moves = compile_notation(3, "F2").unwrap();
    assert_eq!(moves, compile_notation(3, "F F").unwrap());
    assert_eq!(moves.len(), 2);

    let mut a = PuzzleModel::new(3).unwrap();
    let mut b = a.clone();
    apply(&mut a, "F2");
    apply(&mut b, "F");
    apply(&mut b, "F");
    assert_eq!(a.pieces(), b.pieces());
    assert!(!a.is_solved());

    apply(&mut a, "F2");
    assert!(a.is_solved());
}

#[test]
fn test_compile_table() {
    let q = QUARTER_TURN;
    let expected = [
        ("R", Axis::X, 1, -q),
        ("L", Axis::X, -1, q),
        ("U", Axis::Y, 1, -q),
        ("D", Axis::Y, -1, q),
        ("F", Axis::Z, 1, -q),
        ("B", Axis::Z, -1, q),
        ("R'", Axis::X, 1, q),
        ("B'", Axis::Z, -1, -q),
    ];
    for (script, axis, coordinate, angle) in expected {
        let moves = compile_notation(3, script).unwrap();
        assert_eq!(
            moves,
            vec![Move {
                axis,
                coordinate,
                angle,
            }],
            "{script}",
        );
    }
}

#[test]
fn test_second_layer_move() {
    let moves = compile_notation(4, "r").unwrap();
    assert_eq!(
        moves,
        vec![Move {
            axis: Axis::X,
            coordinate: 1,
            angle: -QUARTER_TURN,
        }],
    );
    assert_eq!(compile_notation(4, "R").unwrap()[0].coordinate, 2);
    assert_eq!(compile_notation(5, "d'").unwrap()[0].coordinate, -1);
    assert_eq!(compile_notation(5, "D'").unwrap()[0].coordinate, -2);
    for mv in compile_notation(4, "R r' U2 u").unwrap() {
        cubemath::assert_approx_eq!(mv.angle.abs(), QUARTER_TURN);
    }

    // On a 4×4×4, the second layer from the right is at grid x = 2.
    let model = PuzzleModel::new(4).unwrap();
    let layer = model.layer_of(Axis::X, moves[0].coordinate).unwrap();
    for id in &layer.pieces {
        assert_eq!(model.piece(*id).unwrap().position()[0], 1);
    }
    let outer = model.layer_of(Axis::X, 2).unwrap();
    assert!(outer.pieces.iter().all(|id| !layer.pieces.contains(id)));

    let mut model = PuzzleModel::new(4).unwrap();
    apply(&mut model, "r");
    assert!(!model.is_solved());
    apply(&mut model, "r'");
    assert!(model.is_solved());
}

#[test]
fn test_compile_errors() {
    assert_eq!(
        compile_notation(3, "R u"),
        Err(CompileError::WideMoveUnsupported {
            token: "u".to_owned(),
            size: 3,
        }),
    );
    assert!(matches!(
        compile_notation(3, "R Q"),
        Err(CompileError::Notation(_)),
    ));
    assert_eq!(
        compile_notation(7, "R"),
        Err(CompileError::UnsupportedSize(UnsupportedSize(7))),
    );
    assert_eq!(compile_notation(3, ""), Ok(vec![]));
}

#[test]
fn test_two_by_two() {
    let mut model = PuzzleModel::new(2).unwrap();
    apply(&mut model, "R U R' U'");
    assert!(!model.is_solved());
    apply(&mut model, "R U R' U' R U R' U' R U R' U' R U R' U' R U R' U'");
    assert!(model.is_solved());
}

#[test]
fn test_whole_puzzle_moves_are_solved() {
    // Turning every layer along an axis rotates the whole puzzle.
    let mut model = PuzzleModel::new(3).unwrap();
    let moves = [-1, 0, 1].map(|coordinate| Move {
        axis: Axis::Y,
        coordinate,
        angle: QUARTER_TURN,
    });
    model.apply_moves(&moves).unwrap();
    assert!(model.is_solved());
    assert_ne!(model.pieces(), PuzzleModel::new(3).unwrap().pieces());
}

#[test]
fn test_checkerboard_preset() {
    let model = Preset::Checkerboard.build(3).unwrap();
    let buckets = sticker_buckets(&model);
    let up = &buckets[&Face::U];
    assert_eq!(up.iter().filter(|&&f| f == Face::U).count(), 5);
    assert_eq!(up.iter().filter(|&&f| f == Face::D).count(), 4);
    assert!(Preset::Solved.build(5).unwrap().is_solved());
    assert_eq!("checkerboard".parse::<Preset>(), Ok(Preset::Checkerboard));
}

#[test]
fn test_snapshot_json() {
    let mut model = PuzzleModel::new(2).unwrap();
    apply(&mut model, "R");
    let snapshot = model.to_snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"pieceIdentity\""));
    assert!(json.contains("\"pieceRotation\""));
    let loaded: PuzzleSnapshot = serde_json::from_str(&json).unwrap();
    let reloaded = PuzzleModel::from_snapshot(&loaded).unwrap();
    assert_eq!(reloaded.pieces(), model.pieces());
}

#[test]
fn test_snapshot_errors() {
    let good = PuzzleModel::new(2).unwrap().to_snapshot();

    let mut s = good.clone();
    s.size = 9;
    assert!(matches!(
        PuzzleModel::from_snapshot(&s),
        Err(SnapshotError::UnsupportedSize(_)),
    ));

    let mut s = good.clone();
    s.piece_rotation.pop();
    assert!(matches!(
        PuzzleModel::from_snapshot(&s),
        Err(SnapshotError::WrongLength { expected: 8, got: 7, .. }),
    ));

    let mut s = good.clone();
    s.piece_identity[0] = 1;
    assert_eq!(PuzzleModel::from_snapshot(&s).unwrap_err(), SnapshotError::NotAPermutation);

    let mut s = good.clone();
    s.piece_identity[3] = 100;
    assert_eq!(PuzzleModel::from_snapshot(&s).unwrap_err(), SnapshotError::NotAPermutation);

    let mut s = good.clone();
    s.piece_rotation[5] = [Float::INFINITY, 0.0, 0.0];
    assert_eq!(
        PuzzleModel::from_snapshot(&s).unwrap_err(),
        SnapshotError::InvalidRotation { slot: 5 },
    );

    // Slightly drifted rotations snap back.
    let mut s = good;
    s.piece_rotation[2] = [0.001, -0.002, QUARTER_TURN * 4.0 + 0.003];
    assert!(PuzzleModel::from_snapshot(&s).unwrap().is_solved());
}

#[test]
fn test_scramble_counts() {
    assert_eq!(scramble_count(2, 0), Ok(7));
    assert_eq!(scramble_count(3, 1), Ok(25));
    assert_eq!(scramble_count(5, 2), Ok(80));
    assert_eq!(scramble_count(3, 3), Err(ScrambleError::InvalidDifficulty(3)));
    assert_eq!(
        scramble_count(6, 0),
        Err(ScrambleError::UnsupportedSize(UnsupportedSize(6))),
    );
}

#[test]
fn test_scramble_is_deterministic() {
    let params = ScrambleParams::with_seed(4, 1, "hello");
    let a = generate_scramble(&params).unwrap();
    let b = generate_scramble(&params).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 40);
    assert!(a.iter().any(|m| m.wide));

    let other = generate_scramble(&ScrambleParams::with_seed(4, 1, "world")).unwrap();
    assert_ne!(a, other);

    let small = generate_scramble(&ScrambleParams::new(3, 0)).unwrap();
    assert!(small.iter().all(|m| !m.wide));
    assert_eq!(small.len(), 20);
}

fn arb_move(size: u8) -> impl Strategy<Value = NotatedMove> {
    (
        proptest::sample::select(Face::ALL.to_vec()),
        any::<bool>(),
        proptest::sample::select(Modifier::ALL.to_vec()),
    )
        .prop_map(move |(face, wide, modifier)| NotatedMove {
            face,
            wide: wide && size >= 4,
            modifier,
        })
}

fn arb_scrambled() -> impl Strategy<Value = PuzzleModel> {
    (MIN_SIZE..=MAX_SIZE)
        .prop_flat_map(|size| (Just(size), proptest::collection::vec(arb_move(size), 0..30)))
        .prop_map(|(size, moves)| {
            let mut model = PuzzleModel::new(size).unwrap();
            model.apply_moves(&compile_moves(size, moves).unwrap()).unwrap();
            model
        })
}

proptest! {
    #[test]
    fn proptest_sticker_labels_invariant(model in arb_scrambled()) {
        let solved = PuzzleModel::new(model.size()).unwrap();
        prop_assert_eq!(model.sticker_label_multiset(), solved.sticker_label_multiset());

        let bucket_sizes: Vec<usize> = sticker_buckets(&model).values().map(|b| b.len()).collect();
        let n = model.size() as usize;
        prop_assert_eq!(bucket_sizes, vec![n * n; 6]);
    }

    #[test]
    fn proptest_snapshot_roundtrip(model in arb_scrambled()) {
        let reloaded = PuzzleModel::from_snapshot(&model.to_snapshot()).unwrap();
        prop_assert_eq!(reloaded.pieces(), model.pieces());
        prop_assert_eq!(reloaded.is_solved(), model.is_solved());
        for axis in Axis::ALL {
            for coordinate in -3..=3 {
                prop_assert_eq!(
                    reloaded.layer_of(axis, coordinate),
                    model.layer_of(axis, coordinate),
                );
            }
        }
    }

    #[test]
    fn proptest_inverse_restores(
        model in arb_scrambled(),
        script in proptest::collection::vec(arb_move(3), 1..10),
    ) {
        let size = model.size();
        let forward = compile_moves(size, script.iter().copied()).unwrap();
        let backward = compile_moves(size, script.iter().rev().map(|m| m.inverse())).unwrap();
        let mut m = model.clone();
        m.apply_moves(&forward).unwrap();
        m.apply_moves(&backward).unwrap();
        prop_assert_eq!(m.pieces(), model.pieces());
    }

    #[test]
    fn proptest_scramble_does_not_cancel(size in MIN_SIZE..=MAX_SIZE, difficulty in 0..3_u8, seed in "[a-z0-9]{0,12}") {
        let params = ScrambleParams::with_seed(size, difficulty, seed);
        let scramble = generate_scramble(&params).unwrap();
        prop_assert_eq!(scramble.len(), scramble_count(size, difficulty).unwrap());
        for (i, mv) in scramble.iter().enumerate() {
            for prev in &scramble[i.saturating_sub(2)..i] {
                prop_assert_ne!(prev.letter(), mv.letter());
            }
        }
        let text = cubeturn_notation::format_notation(scramble.iter().copied());
        prop_assert_eq!(parse_notation(&text), Ok(scramble.clone()));
        prop_assert!(compile_moves(size, scramble).is_ok());
    }
}
