use std::collections::HashSet;

use cubetimer_notation::{Face, Move, parse_moves};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;

use crate::{
    ConfigError, CubeConfig, CubeState, CubeType, Scramble, ScrambleParams, ValidatedCubeConfig,
    apply_move, apply_scramble, generate_scramble,
};

#[test]
fn test_scramble_lengths_and_moves() {
    for ty in CubeType::ALL {
        let config = ValidatedCubeConfig::builtin(ty);
        let legal: HashSet<Move> = config.moves().iter().copied().collect();
        for seed in 0..10 {
            let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
            let moves = generate_scramble(&config, &mut rng);
            assert_eq!(moves.len(), config.scramble_length(), "{ty}");
            assert_eq!(config.validate_scramble(&moves), Ok(()), "{ty}");
            for pair in moves.windows(2) {
                assert_ne!(pair[0].axis(), pair[1].axis(), "{ty}: {} {}", pair[0], pair[1]);
            }
            for mv in moves {
                assert!(legal.contains(&mv.base()), "{ty}: {mv}");
            }
        }
    }
}

#[test]
fn test_scramble_uses_every_modifier() {
    let config = ValidatedCubeConfig::builtin(CubeType::Cube7);
    let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(7);
    let modifiers: HashSet<_> = generate_scramble(&config, &mut rng)
        .into_iter()
        .map(|mv| mv.modifier)
        .collect();
    assert_eq!(modifiers.len(), 3);
}

#[test]
fn test_two_axis_config_terminates() {
    let config = CubeConfig {
        label: "RU".to_owned(),
        scramble_length: 25,
        inspection_seconds: 15,
        moves: vec!["R".to_owned(), "U".to_owned()],
    }
    .validate(CubeType::Cube3)
    .unwrap();
    let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(0);
    let moves = generate_scramble(&config, &mut rng);
    assert_eq!(moves.len(), 25);
    // with only two axes the faces must alternate
    for pair in moves.windows(2) {
        assert_ne!(pair[0].face, pair[1].face);
    }
}

#[test]
fn test_validate_scramble() {
    let moves = |s: &str| parse_moves(s).collect::<Result<Vec<_>, _>>().unwrap();

    let cube2 = ValidatedCubeConfig::builtin(CubeType::Cube2);
    assert_eq!(
        cube2.validate_scramble(&moves("R U F")),
        Err(ConfigError::ShortScramble {
            cube_type: CubeType::Cube2,
            len: 3,
            expected: 11,
        }),
    );
    assert_eq!(
        cube2.validate_scramble(&[]),
        Err(ConfigError::ShortScramble {
            cube_type: CubeType::Cube2,
            len: 0,
            expected: 11,
        }),
    );
    cube2
        .validate_scramble(&moves("R U2 F' R' U F2 R U' F R2 U"))
        .expect("every modifier is allowed");
    // L is a legal turn on 2x2 but not a configured scramble move
    assert_eq!(
        cube2.validate_scramble(&moves("R U F R U F R U F R L")),
        Err(ConfigError::IllegalMove {
            cube_type: CubeType::Cube2,
            token: "L".to_owned(),
        }),
    );
    assert!(!cube2.is_legal_move(Move::wide(Face::R, 3)));

    let cube3 = ValidatedCubeConfig::builtin(CubeType::Cube3);
    assert!(cube3.is_legal_move(Move::new(Face::B).inverse()));
    assert!(!cube3.is_legal_move(Move::wide(Face::R, 2)));
    let mut scramble = moves("R U F L D B R U F L D B R U F L D B R");
    scramble.push(Move::wide(Face::R, 2));
    assert_eq!(
        cube3.validate_scramble(&scramble),
        Err(ConfigError::IllegalMove {
            cube_type: CubeType::Cube3,
            token: "Rw".to_owned(),
        }),
    );
    scramble.pop();
    scramble.push(Move::new(Face::D));
    assert_eq!(cube3.validate_scramble(&scramble), Ok(()));

    let cube6 = ValidatedCubeConfig::builtin(CubeType::Cube6);
    assert!(cube6.is_legal_move(Move::wide(Face::F, 3).inverse()));
    assert!(!cube6.is_legal_move(Move::wide(Face::F, 4)));
}

#[test]
fn test_scramble_is_deterministic() {
    let config = ValidatedCubeConfig::builtin(CubeType::Cube4);
    let params = ScrambleParams::from_seed("2025-01-31T18:04:05.123Z_12345");
    let a = Scramble::new(&config, params.clone());
    let b = Scramble::new(&config, params);
    assert_eq!(a, b);

    let c = Scramble::new(&config, ScrambleParams::from_seed("something else"));
    assert_ne!(a.moves, c.moves);

    let fresh = ScrambleParams::new();
    assert!(fresh.seed.starts_with(&fresh.time.to_string()));
}

#[test]
fn test_scramble_display() {
    let config = ValidatedCubeConfig::builtin(CubeType::Cube3);
    let scramble = Scramble::new(&config, ScrambleParams::from_seed("display"));
    let text = scramble.to_string();
    assert_eq!(text.split(' ').count(), 20);
    let reparsed: Vec<Move> = parse_moves(&text).collect::<Result<_, _>>().unwrap();
    assert_eq!(reparsed, scramble.moves);
}

#[test]
fn test_apply_scramble_resets_first() {
    let moves: Vec<Move> = parse_moves("R U' Fw2 3Lw").collect::<Result<_, _>>().unwrap();

    let mut expected = CubeState::new_solved(6);
    for &mv in &moves {
        apply_move(&mut expected, mv);
    }

    let mut state = CubeState::new_solved(6);
    apply_move(&mut state, Move::new(Face::D));
    apply_scramble(&mut state, &moves);
    assert_eq!(state, expected);

    apply_scramble(&mut state, &[]);
    assert!(state.is_solved());
}

#[test]
fn test_scrambled_state() {
    let config = ValidatedCubeConfig::builtin(CubeType::Cube2);
    let scramble = Scramble::new(&config, ScrambleParams::from_seed("state"));
    let state = scramble.scrambled_state();
    assert_eq!(state.size(), 2);

    let mut undo = state.clone();
    for &mv in scramble.moves.iter().rev() {
        apply_move(&mut undo, mv.inverse());
    }
    assert!(undo.is_solved());
}

proptest! {
    #[test]
    fn proptest_scramble_axis_constraint(size in 2..=7_usize, seed in any::<u64>()) {
        let ty = CubeType::from_size(size).unwrap();
        let config = ValidatedCubeConfig::builtin(ty);
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
        let moves = generate_scramble(&config, &mut rng);
        prop_assert_eq!(moves.len(), config.scramble_length());
        prop_assert!(moves.windows(2).all(|pair| pair[0].axis() != pair[1].axis()));
        prop_assert_eq!(config.validate_scramble(&moves), Ok(()));
    }
}
