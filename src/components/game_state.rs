// src/components/game_state.rs

use serde::{Deserialize, Serialize};

/// ラウンドの読み込み状況だよ。画像の取得が終わったかどうかだけを持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// 画像を取得中
    Loading,
    /// デッキができてプレイできる
    Ready,
    /// 使える画像がひとつも取れなかった
    Failed,
}

/// ラウンドの今の段階を表す列挙型だよ！
///
/// `Loading → Previewing → Playing ⇄ Evaluating → GameOver` の順に進む。
/// 保存はしないで、`RoundContext` の中身から毎回計算するよ (controller.rs の `phase()`)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Loading,
    /// 最初の数秒、全部のカードを表向きで見せてる
    Previewing,
    Playing,
    /// 2枚めくられていて、判定待ち
    Evaluating,
    GameOver,
    /// 画像の取得に全部失敗した。Restart で抜けられる
    Failed,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Loading => "loading",
            RoundPhase::Previewing => "previewing",
            RoundPhase::Playing => "playing",
            RoundPhase::Evaluating => "evaluating",
            RoundPhase::GameOver => "game_over",
            RoundPhase::Failed => "failed",
        }
    }

    /// Restart ボタンを出していい段階か？
    pub fn allows_restart(&self) -> bool {
        matches!(self, RoundPhase::GameOver | RoundPhase::Failed)
    }
}
