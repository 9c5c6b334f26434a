use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::*;

#[test]
fn test_simple_moves() {
    assert_eq!(parse_move("R"), Ok(Move::new(Face::R)));
    assert_eq!(
        parse_move("U'"),
        Ok(Move::new(Face::U).with_modifier(Modifier::Prime)),
    );
    assert_eq!(
        parse_move("F2"),
        Ok(Move::new(Face::F).with_modifier(Modifier::Double)),
    );
    // face letters are case-insensitive
    assert_eq!(parse_move("b"), Ok(Move::new(Face::B)));
    assert_eq!(parse_move("  d2 "), parse_move("D2"));
}

#[test]
fn test_wide_moves() {
    let rw = parse_move("Rw").unwrap();
    assert_eq!(rw, Move::wide(Face::R, 2));
    assert_eq!(rw.depth_range(4), 0..=1);

    let three_rw_prime = parse_move("3Rw'").unwrap();
    assert_eq!(
        three_rw_prime,
        Move::wide(Face::R, 3).with_modifier(Modifier::Prime),
    );
    assert_eq!(three_rw_prime.depth_range(7), 0..=2);
    assert_eq!(three_rw_prime.quarter_turns(), 3);

    // clamped to the turnable layers of a small cube
    assert_eq!(three_rw_prime.depth_range(3), 0..=1);
    assert_eq!(three_rw_prime.depth_range(2), 0..=0);

    // a width digit without `w` is ignored
    let three_r = parse_move("3R").unwrap();
    assert_eq!(three_r, Move::new(Face::R));
    assert_eq!(three_r.depth_range(5), 0..=0);

    assert_eq!(parse_move("1Lw2").unwrap().depth_range(5), 0..=0);

    // a zero width is the default width
    assert_eq!(parse_move("0Rw"), Ok(Move::wide(Face::R, 2)));
    assert_eq!(parse_move("0Fw'"), parse_move("Fw'"));
}

#[test]
fn test_move_errors() {
    assert_eq!(parse_move(""), Err(ParseError::Empty));
    assert_eq!(parse_move("   "), Err(ParseError::Empty));
    assert_eq!(parse_move("X"), Err(ParseError::BadMove("X".to_owned())));

    parse_move("R3").expect_err("bad modifier");
    parse_move("R'2").expect_err("two modifiers");
    parse_move("Rw w").expect_err("space inside token");
    parse_move("12Rw").expect_err("two width digits");
    parse_move("RW").expect_err("uppercase wide marker");
    parse_move("M").expect_err("slice moves are not supported");
    parse_move("x").expect_err("rotations are not supported");
}

#[test]
fn test_axes() {
    assert_eq!(Move::new(Face::R).axis(), Axis::X);
    assert_eq!(Move::new(Face::L).axis(), Axis::X);
    assert_eq!(Move::new(Face::U).axis(), Axis::Y);
    assert_eq!(Move::new(Face::D).axis(), Axis::Y);
    assert_eq!(parse_move("3Fw'").unwrap().axis(), Axis::Z);
    assert_eq!(parse_move("b2").unwrap().axis(), Axis::Z);

    for face in Face::ALL {
        assert_eq!(face.axis(), face.opposite().axis());
        assert_ne!(face, face.opposite());
        assert_eq!(Face::ALL[face.index()], face);
        assert_eq!(Face::from_letter(face.letter()), Some(face));
    }
}

#[test]
fn test_inverse() {
    let m = parse_move("2Uw'").unwrap();
    assert_eq!(m.inverse().to_string(), "Uw");
    assert_eq!(m.inverse().inverse(), m);
    let half = parse_move("F2").unwrap();
    assert_eq!(half.inverse(), half);
}

#[test]
fn test_sequence() {
    let moves: Result<Vec<Move>, _> = parse_moves("R U2  R'\tU' 4Lw2").collect();
    let moves = moves.unwrap();
    assert_eq!(moves.len(), 5);
    assert_eq!(format_moves(moves), "R U2 R' U' 4Lw2");

    let results: Vec<_> = parse_moves("R Q U").collect();
    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(ParseError::BadMove("Q".to_owned())));
    assert!(results[2].is_ok());
}

#[test]
fn test_serde() {
    let m = parse_move("3Bw2").unwrap();
    assert_eq!(serde_json::to_string(&m).unwrap(), "\"3Bw2\"");
    assert_eq!(serde_json::from_str::<Move>("\"u'\"").unwrap().to_string(), "U'");
    serde_json::from_str::<Move>("\"Q\"").expect_err("bad move");
    assert_eq!(serde_json::to_string(&Face::F).unwrap(), "\"f\"");
}

fn arbitrary_move() -> impl Strategy<Value = Move> {
    (
        0..6_usize,
        prop_oneof![Just(None), (1..=9_u8).prop_map(Some)],
        prop_oneof![
            Just(Modifier::None),
            Just(Modifier::Double),
            Just(Modifier::Prime),
        ],
    )
        .prop_map(|(face, width, modifier)| Move {
            face: Face::ALL[face],
            width,
            modifier,
        })
}

proptest! {
    #[test]
    fn proptest_move_display_parse(m in arbitrary_move()) {
        assert_eq!(parse_move(&m.to_string()), Ok(m));
    }

    #[test]
    fn proptest_sequence_display_parse(moves in prop::collection::vec(arbitrary_move(), 0..20)) {
        let s = format_moves(moves.iter().copied());
        let parsed: Result<Vec<Move>, _> = parse_moves(&s).collect();
        assert_eq!(parsed, Ok(moves));
    }
}
