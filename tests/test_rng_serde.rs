//! Serialization fidelity for RNG state and the move history
//!
//! A saved session has to resume with the same shuffle stream and the same
//! undo/redo stacks it was saved with.

use klondike_engine::{
    board::Board,
    config::GameConfig,
    game::{BoardSnapshot, RandomPlayer, Solitaire},
    undo::ActionManager,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use similar_asserts::assert_eq;

#[test]
fn test_shuffle_rng_serialize_deserialize_fidelity() {
    let mut rng1 = ChaCha12Rng::seed_from_u64(42);
    for _ in 0..10 {
        rng1.gen::<u64>();
    }

    let json = serde_json::to_string(&rng1).expect("Failed to serialize RNG");
    let mut rng2: ChaCha12Rng = serde_json::from_str(&json).expect("Failed to deserialize RNG");

    for i in 0..100 {
        let val1 = rng1.gen::<u64>();
        let val2 = rng2.gen::<u64>();
        assert_eq!(val1, val2, "RNG divergence at iteration {i}");
    }
}

#[test]
fn test_player_rng_serialize_deserialize_with_choices() {
    let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(12345);
    let _before: Vec<usize> = (0..5).map(|_| rng1.gen_range(0..10)).collect();

    let json = serde_json::to_string(&rng1).expect("Failed to serialize");
    let mut rng2: Xoshiro256PlusPlus = serde_json::from_str(&json).expect("Failed to deserialize");

    let after1: Vec<usize> = (0..10).map(|_| rng1.gen_range(0..10)).collect();
    let after2: Vec<usize> = (0..10).map(|_| rng2.gen_range(0..10)).collect();
    assert_eq!(after1, after2, "RNG choices diverged after serialization");
}

#[test]
fn test_history_survives_json_round_trip() {
    let mut game = Solitaire::new(GameConfig::default().with_seed(17)).unwrap();
    RandomPlayer::with_seed(17).play_out(&mut game, 80);
    for _ in 0..5 {
        game.undo();
    }
    let history: &ActionManager = game.actions();
    assert!(history.can_redo());

    let board_json = serde_json::to_string(game.board()).expect("Failed to serialize board");
    let history_json = serde_json::to_string(history).expect("Failed to serialize history");
    let mut board: Board = serde_json::from_str(&board_json).expect("Failed to deserialize board");
    let mut restored: ActionManager =
        serde_json::from_str(&history_json).expect("Failed to deserialize history");

    assert_eq!(restored.history(), history.history());
    assert_eq!(restored.redo_len(), history.redo_len());

    // replaying the restored history must track the live game exactly
    while restored.redo(&mut board).is_some() {
        game.redo();
        assert_eq!(BoardSnapshot::of(&board), game.snapshot());
    }
    while restored.undo(&mut board).is_some() {
        game.undo();
        assert_eq!(BoardSnapshot::of(&board), game.snapshot());
    }
    assert!(!game.actions().can_undo());
}
