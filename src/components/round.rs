// src/components/round.rs

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::card::CardFace;
use crate::components::game_state::LoadState;

/// ラウンドごとに振られる通し番号。リセットするたびに増えるよ。
///
/// タイマーや画像取得の完了通知はこの番号を持っていて、
/// 今のラウンドと番号が違ったら何もしない決まり！
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> Self {
        RoundId(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 1ラウンド分の状態を全部まとめたもの (Round Context)。
///
/// グローバル変数は使わず、`GameController` がこれを1つだけ持つ。
/// リセットすると丸ごと新しいものに取り替えるよ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundContext {
    pub round_id: RoundId,
    pub load_state: LoadState,
    /// シャッフル済みのデッキ。長さは常に偶数
    pub deck: Vec<CardFace>,
    /// 表になっていて判定待ちの位置。めくった順に並んでて、重複はしない
    pub flipped: Vec<usize>,
    /// ペアが揃って表のままの位置。ラウンド中は増えるだけ
    pub solved: BTreeSet<usize>,
    pub moves: u32,
    /// ラウンド開始直後の「全部見せる」フラグ
    pub preview: bool,
    /// `flipped` が変わるたびに増える。判定タイマーの有効性チェックに使う
    pub flip_version: u64,
}

impl RoundContext {
    pub fn new(round_id: RoundId) -> Self {
        Self {
            round_id,
            load_state: LoadState::Loading,
            deck: Vec::new(),
            flipped: Vec::new(),
            solved: BTreeSet::new(),
            moves: 0,
            preview: true,
            flip_version: 0,
        }
    }
}
