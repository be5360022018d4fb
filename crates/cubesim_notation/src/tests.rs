use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::*;

#[test]
fn test_parse_moves() {
    assert_eq!(parse("R2"), Ok(Move::new(Face::R, Turns::Half)));
    assert_eq!(parse("F'"), Ok(Move::new(Face::F, Turns::CounterClockwise)));
    assert_eq!(parse("L"), Ok(Move::new(Face::L, Turns::Clockwise)));
    assert_eq!(parse("M'"), Ok(Move::new(Face::M, Turns::CounterClockwise)));

    assert_eq!(parse("R2").unwrap().turns.quarter_turns(), 2);
    assert_eq!(parse("F'").unwrap().turns.quarter_turns(), -1);
    assert_eq!(parse("L").unwrap().turns.quarter_turns(), 1);
}

#[test]
fn test_every_face_parses() {
    for face in Face::iter() {
        let s = face.symbol().to_string();
        assert_eq!(parse(&s), Ok(Move::new(face, Turns::Clockwise)));
        assert_eq!(Face::from_char(face.symbol()), Some(face));
        assert_eq!(face.to_string(), s);
    }
}

#[test]
fn test_notation_errors() {
    assert_eq!(parse("X"), Err(NotationError::UnknownFace('X')));
    assert_eq!(parse("x"), Err(NotationError::UnknownFace('x')));
    assert_eq!(parse("u"), Err(NotationError::UnknownFace('u')));
    assert_eq!(parse(""), Err(NotationError::Empty));

    parse("R3").expect_err("only half turns take a number");
    parse("R2'").expect_err("suffixes do not combine");
    parse("R''").expect_err("double prime");
    parse("R ").expect_err("trailing space");
    parse(" R").expect_err("leading space");
    parse("Rw").expect_err("wide moves");

    assert_eq!(
        parse("U3"),
        Err(NotationError::InvalidSuffix {
            notation: "U3".to_owned(),
            suffix: "3".to_owned(),
        }),
    );
}

#[test]
fn test_parse_sequence() {
    assert_eq!(
        parse_sequence("U R  U'\tM2"),
        Ok(vec![
            Move::new(Face::U, Turns::Clockwise),
            Move::new(Face::R, Turns::Clockwise),
            Move::new(Face::U, Turns::CounterClockwise),
            Move::new(Face::M, Turns::Half),
        ]),
    );
    assert_eq!(parse_sequence(""), Ok(vec![]));
    assert_eq!(parse_sequence("U X R"), Err(NotationError::UnknownFace('X')));
}

#[test]
fn test_inverse() {
    assert_eq!(parse("U").unwrap().inverse(), parse("U'").unwrap());
    assert_eq!(parse("U'").unwrap().inverse(), parse("U").unwrap());
    assert_eq!(parse("U2").unwrap().inverse(), parse("U2").unwrap());
}

#[test]
fn test_format_sequence() {
    let moves = parse_sequence("R U R' U' S2").unwrap();
    assert_eq!(format_sequence(&moves), "R U R' U' S2");
    assert_eq!(format_sequence(&[]), "");
}

proptest! {
    #[test]
    fn proptest_notation_roundtrip(mv: Move) {
        prop_assert_eq!(parse(&mv.to_string()), Ok(mv));
    }

    #[test]
    fn proptest_inverse_is_involution(mv: Move) {
        prop_assert_eq!(mv.inverse().inverse(), mv);
        let total = mv.turns.quarter_turns() + mv.inverse().turns.quarter_turns();
        prop_assert_eq!(total.rem_euclid(4), 0);
    }
}
