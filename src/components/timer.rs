// src/components/timer.rs
//! タイマーに関するデータ型。
//!
//! コントローラーは自分で setTimeout を呼ばないで、`TimerCommand` を返すだけ。
//! 実際にタイマーを動かすのはブラウザ側の `app::timer_manager` だよ。

use serde::{Deserialize, Serialize};

use crate::components::round::RoundId;

/// タイマーの種類。それぞれ同時に1個しか動かない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// ラウンド開始時の全カード表示を終わらせる
    PreviewEnd,
    /// めくった2枚の一致判定
    Evaluation,
}

/// 発火したタイマーがどのラウンドのどの状態に向けたものかを示す札。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub round_id: RoundId,
    /// Evaluation のときは予約した時点の flip_version。PreviewEnd は 0
    pub seq: u64,
}

/// コントローラーからホストへのお願い。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// 同じ種類のタイマーがあれば先に止めてから、新しく予約する
    Schedule { token: TimerToken, delay_ms: u32 },
    Cancel(TimerKind),
}
