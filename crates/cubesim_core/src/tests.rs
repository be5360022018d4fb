use std::collections::{BTreeSet, HashMap};

use cgmath::Vector3;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::notation::{parse, parse_sequence};
use crate::*;

const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

fn arb_move() -> impl Strategy<Value = Move> {
    let faces = Face::iter().collect::<Vec<_>>();
    let turns = vec![Turns::Clockwise, Turns::CounterClockwise, Turns::Half];
    (prop::sample::select(faces), prop::sample::select(turns))
        .prop_map(|(face, turns)| Move::new(face, turns))
}

fn grid_state(cube: &Cube) -> Vec<(GridPos, GridPos)> {
    cube.pieces().iter().map(|p| (p.home(), p.grid())).collect()
}

fn assert_on_grid(cube: &Cube) {
    let spacing = cube.geometry().spacing();
    for piece in cube.pieces() {
        let expected = piece.grid().to_continuous(spacing);
        let drift = (piece.position() - expected).map(f32::abs);
        for c in [drift.x, drift.y, drift.z] {
            assert!(c <= 1e-6 * spacing, "{piece:?} is off the grid");
        }
        let m = piece.orientation();
        for col in [m.x, m.y, m.z] {
            for c in [col.x, col.y, col.z] {
                assert_eq!(c, c.round(), "{piece:?} has a non-integer orientation");
            }
        }
    }
}

#[test]
fn test_initial_pieces() {
    let cube = Cube::default();
    assert_eq!(cube.pieces().len(), 26);

    let positions: BTreeSet<[i8; 3]> = cube.pieces().iter().map(|p| p.grid().ints()).collect();
    assert_eq!(positions.len(), 26);
    for x in -1..=1 {
        for y in -1..=1 {
            for z in -1..=1 {
                assert_eq!(positions.contains(&[x, y, z]), [x, y, z] != [0, 0, 0]);
            }
        }
    }

    let spacing = cube.geometry().spacing();
    for piece in cube.pieces() {
        assert_eq!(piece.home(), piece.grid());
        assert_eq!(piece.position(), piece.grid().to_continuous(spacing));
    }
    assert!(cube.is_solved());

    let sticker_counts = cube.pieces().iter().map(|p| p.home().sticker_count()).counts();
    assert_eq!(sticker_counts, HashMap::from([(1, 6), (2, 12), (3, 8)]));

    let indices: Vec<usize> = cube.piece_ids().map(PieceId::index).collect();
    assert_eq!(indices, (0..Cube::PIECE_COUNT).collect::<Vec<_>>());
}

#[test]
fn test_face_selection() {
    let cube = Cube::default();
    for face in Face::iter() {
        let pieces = cube.pieces_for_face(face);
        let expected_len = if face.is_slice() { 8 } else { 9 };
        assert_eq!(pieces.len(), expected_len, "{face}");
        for id in pieces {
            assert_eq!(cube[id].grid()[face.axis()], face.layer(), "{face}");
        }
    }

    let u: Vec<PieceId> = cube.pieces_for_face(Face::U);
    let expected: Vec<PieceId> = cube
        .piece_ids()
        .filter(|&id| cube[id].grid().y() == Sign::Pos)
        .collect();
    assert_eq!(u, expected);
}

#[test]
fn test_face_selection_partitions_cube() {
    let cube = Cube::default();
    for [a, b, c] in [
        [Face::U, Face::E, Face::D],
        [Face::L, Face::M, Face::R],
        [Face::F, Face::S, Face::B],
    ] {
        let mut all = cube.pieces_for_face(a);
        all.extend(cube.pieces_for_face(b));
        all.extend(cube.pieces_for_face(c));
        all.sort();
        let unique: BTreeSet<PieceId> = all.iter().copied().collect();
        assert_eq!(all.len(), 26);
        assert_eq!(unique.len(), 26);
    }
}

#[test]
fn test_face_selection_with_custom_spacing() {
    let geometry = CubeGeometry {
        piece_size: 1.9,
        gap: 0.1,
        ..Default::default()
    };
    let mut cube = Cube::new(geometry);
    cube.apply_moves(&parse_sequence("R U F' M2 E S'").unwrap())
        .unwrap();
    for face in Face::iter() {
        let expected_len = if face.is_slice() { 8 } else { 9 };
        assert_eq!(cube.pieces_for_face(face).len(), expected_len);
    }
    assert_on_grid(&cube);
}

#[test]
fn test_rotation_axes() {
    let cube = Cube::default();
    let expected = [
        (Face::U, Vector3::new(0.0, -1.0, 0.0)),
        (Face::D, Vector3::new(0.0, 1.0, 0.0)),
        (Face::E, Vector3::new(0.0, 1.0, 0.0)),
        (Face::R, Vector3::new(-1.0, 0.0, 0.0)),
        (Face::L, Vector3::new(1.0, 0.0, 0.0)),
        (Face::M, Vector3::new(1.0, 0.0, 0.0)),
        (Face::F, Vector3::new(0.0, 0.0, -1.0)),
        (Face::S, Vector3::new(0.0, 0.0, -1.0)),
        (Face::B, Vector3::new(0.0, 0.0, 1.0)),
    ];
    for (face, axis) in expected {
        assert_eq!(cube.axis_for_face(face), axis, "{face}");
    }
}

#[test]
fn test_known_facelets() {
    let mut cube = Cube::default();
    assert_eq!(cube.to_facelets(), SOLVED);

    cube.apply_move(parse("R").unwrap()).unwrap();
    assert_eq!(
        cube.to_facelets(),
        "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB",
    );

    cube.reset();
    cube.apply_move(parse("U").unwrap()).unwrap();
    assert_eq!(
        cube.to_facelets(),
        "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB",
    );

    cube.reset();
    cube.apply_move(parse("F").unwrap()).unwrap();
    assert_eq!(
        cube.to_facelets(),
        "UUUUUULLLURRURRURRFFFFFFFFFRRRDDDDDDLLDLLDLLDBBBBBBBBB",
    );
}

#[test]
fn test_slices_follow_their_faces() {
    // Each of these turns the whole cube, which leaves every face one color.
    for seq in ["R L' M'", "U D' E'", "F B' S", "M2 L2 R2"] {
        let mut cube = Cube::default();
        cube.apply_moves(&parse_sequence(seq).unwrap()).unwrap();
        assert!(cube.is_solved(), "{seq}");
        assert_ne!(grid_state(&cube), grid_state(&Cube::default()), "{seq}");
    }
}

#[test]
fn test_is_solved() {
    let mut cube = Cube::default();
    cube.apply_move(parse("R").unwrap()).unwrap();
    assert!(!cube.is_solved());
    cube.apply_move(parse("R'").unwrap()).unwrap();
    assert!(cube.is_solved());
    assert_eq!(cube, Cube::default());
}

#[test]
fn test_reset() {
    let mut cube = Cube::default();
    cube.apply_moves(&parse_sequence("R U R' U' M E S").unwrap())
        .unwrap();
    cube.reset();
    assert_eq!(cube, Cube::default());
}

#[test]
fn test_drift_check() {
    let mut cube = Cube::default();
    let before = cube.clone();
    let pieces = cube.pieces_for_face(Face::R);
    let err = cube
        .commit_rotation(&pieces, Face::R.rotation_axis(), 0.3)
        .expect_err("rotation is not a multiple of 90 degrees");
    assert!(err.drift > 0.001);
    assert_eq!(cube, before);

    cube.commit_rotation(&pieces, Face::R.rotation_axis(), f32::NAN)
        .expect_err("NaN rotation");
    assert_eq!(cube, before);
}

#[test]
fn test_facelet_errors() {
    let mut cube = Cube::default();
    cube.apply_moves(&parse_sequence("R U").unwrap()).unwrap();
    let before = cube.clone();

    assert_eq!(
        cube.set_facelets(&SOLVED[1..]),
        Err(FaceletError::WrongLength(53)),
    );
    let mut s = SOLVED.to_owned();
    s.replace_range(4..5, "X");
    assert_eq!(
        cube.set_facelets(&s),
        Err(FaceletError::InvalidColor {
            index: 4,
            color: 'X'
        }),
    );
    s.replace_range(4..5, "M");
    assert_eq!(
        cube.set_facelets(&s),
        Err(FaceletError::InvalidColor {
            index: 4,
            color: 'M'
        }),
    );

    // U and D colors on the same piece
    let mut s = SOLVED.to_owned();
    s.replace_range(9..10, "D");
    assert!(matches!(
        cube.set_facelets(&s),
        Err(FaceletError::UnknownPiece { .. }),
    ));

    // mirrored corner: swap U and R stickers of the UFR corner
    let mut s = SOLVED.to_owned();
    s.replace_range(8..9, "R");
    s.replace_range(9..10, "U");
    assert_eq!(
        cube.set_facelets(&s),
        Err(FaceletError::InvalidOrientation {
            slot: GridPos::from_ints([1, 1, 1]).unwrap(),
        }),
    );

    // UFR corner placed (rotated) at UFL as well as at UFR
    let mut s = SOLVED.to_owned();
    s.replace_range(6..7, "R");
    s.replace_range(38..39, "U");
    assert_eq!(
        cube.set_facelets(&s),
        Err(FaceletError::DuplicatePiece {
            colors: "FRU".to_owned(),
        }),
    );

    assert_eq!(cube, before);
}

/// Returns the solved facelet string with some facelets replaced.
fn solved_with(changes: &[(usize, char)]) -> String {
    let mut s: Vec<char> = SOLVED.chars().collect();
    for &(index, c) in changes {
        s[index] = c;
    }
    s.into_iter().collect()
}

#[test]
fn test_unreachable_facelets() {
    let mut cube = Cube::default();
    cube.apply_moves(&parse_sequence("R U").unwrap()).unwrap();
    let before = cube.clone();

    // UFR corner twisted in place
    assert_eq!(
        cube.set_facelets(&solved_with(&[(8, 'F'), (9, 'U'), (20, 'R')])),
        Err(FaceletError::Unsolvable(UnsolvableReason::CornerTwist)),
    );
    // UF edge flipped
    assert_eq!(
        cube.set_facelets(&solved_with(&[(7, 'F'), (19, 'U')])),
        Err(FaceletError::Unsolvable(UnsolvableReason::EdgeFlip)),
    );
    // UF and UR edges swapped
    assert_eq!(
        cube.set_facelets(&solved_with(&[(10, 'F'), (19, 'R')])),
        Err(FaceletError::Unsolvable(UnsolvableReason::Parity)),
    );
    // U and D centers swapped
    assert_eq!(
        cube.set_facelets(&solved_with(&[(4, 'D'), (31, 'U')])),
        Err(FaceletError::Unsolvable(UnsolvableReason::Centers)),
    );
    assert_eq!(cube, before);

    // Two flipped edges and two opposite corner twists are reachable.
    cube.set_facelets(&solved_with(&[(7, 'F'), (19, 'U'), (5, 'R'), (10, 'U')]))
        .unwrap();
    cube.set_facelets(&solved_with(&[
        (8, 'F'),
        (9, 'U'),
        (20, 'R'),
        (6, 'F'),
        (18, 'L'),
        (38, 'U'),
    ]))
    .unwrap();
}

#[test]
fn test_set_facelets_with_moved_centers() {
    let mut expected = Cube::default();
    expected.apply_moves(&parse_sequence("M E S R U'").unwrap()).unwrap();
    let mut cube = Cube::default();
    cube.set_facelets(&expected.to_facelets()).unwrap();
    assert_eq!(cube.to_facelets(), expected.to_facelets());
}

#[test]
fn test_set_facelets() {
    let mut cube = Cube::default();
    let mut expected = Cube::default();
    expected.apply_moves(&parse_sequence("R U R' U'").unwrap())
        .unwrap();
    cube.set_facelets(&expected.to_facelets()).unwrap();
    assert_eq!(cube, expected);

    cube.set_facelets(SOLVED).unwrap();
    assert_eq!(cube, Cube::default());
}

proptest! {
    #[test]
    fn proptest_four_turns_is_identity(mv in arb_move()) {
        let mut cube = Cube::default();
        for _ in 0..4 {
            cube.apply_move(mv).unwrap();
        }
        prop_assert_eq!(cube, Cube::default());
    }

    #[test]
    fn proptest_inverse_is_identity(moves in prop::collection::vec(arb_move(), 0..20)) {
        let mut cube = Cube::default();
        cube.apply_moves(&moves).unwrap();
        assert_on_grid(&cube);
        for &mv in moves.iter().rev() {
            cube.apply_move(mv.inverse()).unwrap();
        }
        prop_assert_eq!(cube, Cube::default());
    }

    #[test]
    fn proptest_half_turn_is_two_quarter_turns(
        setup in prop::collection::vec(arb_move(), 0..10),
        mv in arb_move(),
    ) {
        let mut a = Cube::default();
        a.apply_moves(&setup).unwrap();
        let mut b = a.clone();

        a.apply_move(Move::new(mv.face, Turns::Half)).unwrap();
        b.apply_move(Move::new(mv.face, Turns::Clockwise)).unwrap();
        b.apply_move(Move::new(mv.face, Turns::Clockwise)).unwrap();
        prop_assert_eq!(grid_state(&a), grid_state(&b));
        prop_assert_eq!(a.to_facelets(), b.to_facelets());
    }

    #[test]
    fn proptest_facelets_roundtrip(moves in prop::collection::vec(arb_move(), 0..30)) {
        let mut original = Cube::default();
        original.apply_moves(&moves).unwrap();

        let mut imported = Cube::default();
        imported.set_facelets(&original.to_facelets()).unwrap();
        prop_assert_eq!(imported.to_facelets(), original.to_facelets());
        prop_assert_eq!(grid_state(&imported), grid_state(&original));
        assert_on_grid(&imported);
    }
}
