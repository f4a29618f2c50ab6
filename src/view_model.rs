// src/view_model.rs
//! ラウンドの状態から「画面に何を出すか」を組み立てるモジュール。
//! DOM には触らないので、表示ルールをネイティブでテストできるよ。

use serde::Serialize;

use crate::components::game_state::RoundPhase;
use crate::components::round::RoundContext;
use crate::logic::rules;

pub const TITLE: &str = "Memory Game";
pub const VICTORY_MESSAGE: &str = "YOU WON! Congrats!";
pub const LOAD_FAILED_MESSAGE: &str = "Could not load card images.";

/// 1枚のカードの表示内容。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub position: usize,
    pub face_up: bool,
    pub solved: bool,
    /// 表向きのときだけ画像の URL が入る
    pub image: Option<String>,
}

/// 画面全体のスナップショット。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    pub round_id: u64,
    pub phase: RoundPhase,
    pub moves: u32,
    pub cards: Vec<CardView>,
    pub game_over: bool,
    pub show_restart: bool,
    /// 見出しの下に出すメッセージ (勝利 or 読み込み失敗)
    pub message: Option<&'static str>,
}

impl GameView {
    pub fn from_round(round: &RoundContext, phase: RoundPhase) -> Self {
        let cards = round
            .deck
            .iter()
            .enumerate()
            .map(|(position, face)| {
                let face_up = rules::is_face_up(round, position);
                CardView {
                    position,
                    face_up,
                    solved: round.solved.contains(&position),
                    image: face_up.then(|| face.reference.clone()),
                }
            })
            .collect();

        let message = match phase {
            RoundPhase::GameOver => Some(VICTORY_MESSAGE),
            RoundPhase::Failed => Some(LOAD_FAILED_MESSAGE),
            _ => None,
        };

        Self {
            round_id: round.round_id.0,
            phase,
            moves: round.moves,
            cards,
            game_over: phase == RoundPhase::GameOver,
            show_restart: phase.allows_restart(),
            message,
        }
    }

    /// 勝利時に出す手数の表示。ゲーム中は None。
    pub fn moves_label(&self) -> Option<String> {
        self.game_over.then(|| format!("Total Moves : {}", self.moves))
    }
}
