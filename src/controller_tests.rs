// src/controller_tests.rs
// GameController のテスト！ラウンドの流れをタイマー込みで確かめるよ。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen_test::*;

use crate::components::card::CardFace;
use crate::components::game_state::RoundPhase;
use crate::components::timer::{TimerCommand, TimerKind, TimerToken};
use crate::config::GameConfig;
use crate::controller::GameController;
use crate::logic::deck::is_paired_deck;

// --- テスト用ヘルパー関数 ---

fn faces(names: &[&str]) -> Vec<CardFace> {
    names.iter().map(|n| CardFace::new(*n)).collect()
}

/// 予約されたタイマーの札を取り出す。
fn scheduled(commands: &[TimerCommand], kind: TimerKind) -> Option<TimerToken> {
    commands.iter().find_map(|command| match command {
        TimerCommand::Schedule { token, .. } if token.kind == kind => Some(*token),
        _ => None,
    })
}

/// 決まった並びのデッキでプレビューまで済ませたコントローラーを作る。
fn playing_with_deck(names: &[&str]) -> GameController {
    let mut controller = GameController::new(GameConfig::default());
    controller.start_round();
    let commands = controller.install_deck(faces(names));
    let preview = scheduled(&commands, TimerKind::PreviewEnd).expect("preview timer");
    assert!(controller.on_timer(preview));
    controller
}

/// 2枚めくって、判定タイマーを発火させる。
fn flip_pair(controller: &mut GameController, first: usize, second: usize) {
    controller.flip(first);
    let commands = controller.flip(second);
    let token = scheduled(&commands, TimerKind::Evaluation).expect("evaluation timer");
    assert!(controller.on_timer(token));
}

// A..H のペアが並んだ16枚のデッキ。0 と 2 が A、1 が B。
const SCENARIO_DECK: [&str; 16] = [
    "A", "B", "A", "C", "B", "D", "C", "E", "D", "F", "E", "G", "F", "H", "G", "H",
];

// --- シナリオ ---

#[test]
fn matching_pair_is_solved() {
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    flip_pair(&mut controller, 0, 2);

    let round = controller.round();
    assert_eq!(round.solved.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    assert!(round.flipped.is_empty());
    assert_eq!(controller.moves(), 2);
    assert_eq!(controller.phase(), RoundPhase::Playing);
}

#[test]
fn mismatched_pair_flips_back() {
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    flip_pair(&mut controller, 0, 1);

    let round = controller.round();
    assert!(round.solved.is_empty());
    assert!(round.flipped.is_empty());
    assert_eq!(controller.moves(), 2);
}

#[test]
fn degraded_deck_from_six_faces() {
    let mut controller = GameController::new(GameConfig::default());
    let (round_id, _) = controller.start_round();
    let commands = controller.finish_loading(
        round_id,
        faces(&["a", "b", "c", "d", "e", "f"]),
        &mut StdRng::seed_from_u64(3),
    );
    assert!(scheduled(&commands, TimerKind::PreviewEnd).is_some());
    assert_eq!(controller.round().deck.len(), 12);

    // 12枚全部揃えればゲームオーバーになるはず
    let deck = controller.round().deck.clone();
    for face in faces(&["a", "b", "c", "d", "e", "f"]) {
        let positions: Vec<usize> =
            deck.iter().enumerate().filter(|(_, f)| **f == face).map(|(i, _)| i).collect();
        flip_pair(&mut controller, positions[0], positions[1]);
    }
    assert_eq!(controller.round().solved.len(), 12);
    assert!(controller.is_game_over());
    assert_eq!(controller.phase(), RoundPhase::GameOver);
}

// --- 性質 ---

#[test]
fn loaded_decks_are_always_paired() {
    for seed in 0..20 {
        let mut controller = GameController::new(GameConfig::default());
        let (round_id, _) = controller.start_round();
        controller.finish_loading(
            round_id,
            faces(&["a", "b", "c", "d", "e", "f", "g", "h"]),
            &mut StdRng::seed_from_u64(seed),
        );
        let deck = &controller.round().deck;
        assert_eq!(deck.len(), 16);
        assert!(is_paired_deck(deck), "seed {} produced an unpaired deck", seed);
    }
}

#[test]
fn solved_never_shrinks_and_moves_count_eligible_clicks() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    let mut last_solved = 0;
    let mut expected_moves = 0;

    for _ in 0..300 {
        let position = rng.gen_range(0..16);
        if !controller.round().solved.contains(&position) {
            expected_moves += 1;
        }
        let commands = controller.flip(position);
        if let Some(token) = scheduled(&commands, TimerKind::Evaluation) {
            // 半分くらいは発火前にもう1枚めくってみる
            if rng.gen_bool(0.5) {
                controller.on_timer(token);
            }
        }
        let solved = controller.round().solved.len();
        assert!(solved >= last_solved, "solved set shrank");
        assert_eq!(solved % 2, 0);
        last_solved = solved;
        assert_eq!(controller.moves(), expected_moves);
        assert_eq!(controller.is_game_over(), solved == 16);
    }
}

#[test]
fn solved_cards_cannot_be_flipped() {
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    flip_pair(&mut controller, 0, 2);

    assert!(controller.flip(0).is_empty());
    assert!(controller.flip(2).is_empty());
    assert_eq!(controller.moves(), 2);
    assert!(controller.round().flipped.is_empty());
}

#[test]
fn match_iff_same_reference() {
    let deck = ["x", "y", "x", "y"];
    for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 0)] {
        let mut controller = playing_with_deck(&deck);
        flip_pair(&mut controller, a, b);
        let matched = controller.round().solved.contains(&a);
        assert_eq!(matched, deck[a] == deck[b], "pair ({}, {})", a, b);
    }
}

#[test]
fn reset_from_game_over_starts_fresh_loading_round() {
    let mut controller = playing_with_deck(&["a", "a"]);
    flip_pair(&mut controller, 0, 1);
    assert!(controller.is_game_over());
    let old_round = controller.round_id();

    let (new_round, commands) = controller.reset();
    assert_ne!(new_round, old_round);
    assert!(commands.contains(&TimerCommand::Cancel(TimerKind::PreviewEnd)));
    assert!(commands.contains(&TimerCommand::Cancel(TimerKind::Evaluation)));

    let round = controller.round();
    assert_eq!(controller.phase(), RoundPhase::Loading);
    assert!(round.deck.is_empty());
    assert!(round.flipped.is_empty());
    assert!(round.solved.is_empty());
    assert_eq!(round.moves, 0);
    assert!(!controller.is_game_over());
}

// --- タイマーまわり ---

#[test]
fn preview_lasts_until_its_timer_fires() {
    let mut controller = GameController::new(GameConfig::default());
    let (round_id, _) = controller.start_round();
    let commands = controller.finish_loading(round_id, faces(&["a", "b"]), &mut StdRng::seed_from_u64(0));

    assert_eq!(
        commands,
        vec![TimerCommand::Schedule {
            token: TimerToken { kind: TimerKind::PreviewEnd, round_id, seq: 0 },
            delay_ms: 2000,
        }]
    );
    assert_eq!(controller.phase(), RoundPhase::Previewing);
    assert!(controller.view().cards.iter().all(|c| c.face_up));

    let token = scheduled(&commands, TimerKind::PreviewEnd).unwrap();
    assert!(controller.on_timer(token));
    assert_eq!(controller.phase(), RoundPhase::Playing);
    assert!(controller.view().cards.iter().all(|c| !c.face_up));
    assert!(!controller.on_timer(token), "2回目の発火は何もしない");
}

#[test]
fn stale_timers_after_reset_are_ignored() {
    let mut controller = GameController::new(GameConfig::default());
    let (round_id, _) = controller.start_round();
    let commands = controller.finish_loading(round_id, faces(&["a", "b"]), &mut StdRng::seed_from_u64(0));
    let preview = scheduled(&commands, TimerKind::PreviewEnd).unwrap();

    controller.flip(0);
    let eval = scheduled(&controller.flip(1), TimerKind::Evaluation).unwrap();

    let (new_round, _) = controller.reset();
    let commands = controller.finish_loading(new_round, faces(&["c", "d"]), &mut StdRng::seed_from_u64(0));
    assert!(!commands.is_empty());

    assert!(!controller.on_timer(preview));
    assert!(!controller.on_timer(eval));
    assert_eq!(controller.phase(), RoundPhase::Previewing);
    assert!(controller.round().flipped.is_empty());
}

#[test]
fn evaluation_waits_for_second_card() {
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    assert!(controller.flip(0).is_empty());
    assert_eq!(controller.phase(), RoundPhase::Playing);

    let commands = controller.flip(2);
    assert_eq!(
        commands,
        vec![TimerCommand::Schedule {
            token: TimerToken {
                kind: TimerKind::Evaluation,
                round_id: controller.round_id(),
                seq: controller.round().flip_version,
            },
            delay_ms: 800,
        }]
    );
    assert_eq!(controller.phase(), RoundPhase::Evaluating);
}

#[test]
fn flipping_the_same_card_twice_counts_but_does_not_duplicate() {
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    controller.flip(0);
    let commands = controller.flip(0);

    assert!(commands.is_empty(), "同じカードでは判定しない");
    assert_eq!(controller.round().flipped, vec![0]);
    assert_eq!(controller.moves(), 2);
}

#[test]
fn third_card_restarts_evaluation_and_compares_first_two() {
    let mut controller = playing_with_deck(&SCENARIO_DECK);
    controller.flip(0);
    let first = scheduled(&controller.flip(2), TimerKind::Evaluation).unwrap();
    let second = scheduled(&controller.flip(1), TimerKind::Evaluation).unwrap();

    assert_ne!(first, second);
    assert!(!controller.on_timer(first), "古い判定タイマーは無効");
    assert_eq!(controller.round().flipped, vec![0, 2, 1]);

    assert!(controller.on_timer(second));
    assert_eq!(controller.round().solved.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    assert!(controller.round().flipped.is_empty());
    assert_eq!(controller.moves(), 3);
}

#[test]
fn flips_during_preview_are_counted() {
    let mut controller = GameController::new(GameConfig::default());
    controller.start_round();
    controller.install_deck(faces(&SCENARIO_DECK));

    controller.flip(0);
    let token = scheduled(&controller.flip(2), TimerKind::Evaluation).unwrap();
    assert_eq!(controller.phase(), RoundPhase::Previewing);
    assert!(controller.on_timer(token));
    assert_eq!(controller.round().solved.len(), 2);
    assert_eq!(controller.moves(), 2);
}

// --- 読み込みまわり ---

#[test]
fn flips_while_loading_are_ignored() {
    let mut controller = GameController::new(GameConfig::default());
    controller.start_round();
    assert!(controller.flip(0).is_empty());
    assert_eq!(controller.moves(), 0);
    assert_eq!(controller.phase(), RoundPhase::Loading);
    assert!(!controller.is_game_over());
}

#[test]
fn empty_batch_fails_the_round() {
    let mut controller = GameController::new(GameConfig::default());
    let (round_id, _) = controller.start_round();
    let commands = controller.finish_loading(round_id, Vec::new(), &mut StdRng::seed_from_u64(0));

    assert!(commands.is_empty());
    assert_eq!(controller.phase(), RoundPhase::Failed);
    assert!(!controller.is_game_over());
    assert!(controller.view().show_restart);

    let (_, _) = controller.reset();
    assert_eq!(controller.phase(), RoundPhase::Loading);
}

#[test]
fn late_load_from_superseded_round_is_dropped() {
    let mut controller = GameController::new(GameConfig::default());
    let (first_round, _) = controller.start_round();
    let (second_round, _) = controller.reset();

    let stale = controller.finish_loading(first_round, faces(&["a"]), &mut StdRng::seed_from_u64(0));
    assert!(stale.is_empty());
    assert_eq!(controller.phase(), RoundPhase::Loading);

    let fresh = controller.finish_loading(second_round, faces(&["b"]), &mut StdRng::seed_from_u64(0));
    assert!(scheduled(&fresh, TimerKind::PreviewEnd).is_some());
    assert_eq!(controller.round().deck, faces(&["b", "b"]));
}

#[test]
fn custom_timings_come_from_config() {
    let config = GameConfig { preview_ms: 10, evaluation_delay_ms: 5, ..GameConfig::default() };
    let mut controller = GameController::new(config);
    controller.start_round();
    let commands = controller.install_deck(faces(&["a", "a"]));
    assert!(matches!(commands[0], TimerCommand::Schedule { delay_ms: 10, .. }));

    controller.flip(0);
    let commands = controller.flip(1);
    assert!(matches!(commands[0], TimerCommand::Schedule { delay_ms: 5, .. }));
}

// --- ブラウザ (wasm-pack test) でも同じシナリオを回す ---

#[wasm_bindgen_test]
fn wasm_matching_pair_is_solved() {
    matching_pair_is_solved();
}

#[wasm_bindgen_test]
fn wasm_mismatched_pair_flips_back() {
    mismatched_pair_flips_back();
}

#[wasm_bindgen_test]
fn wasm_preview_lasts_until_its_timer_fires() {
    preview_lasts_until_its_timer_fires();
}
