// src/logic/rules.rs
//! 神経衰弱のルール関数をまとめるよ！どれも状態を変えない純粋な関数。

use crate::components::game_state::LoadState;
use crate::components::round::RoundContext;

/// デッキの2つの位置が同じ絵柄かどうか。範囲外の位置は一致しない扱い。
pub fn faces_match(round: &RoundContext, first: usize, second: usize) -> bool {
    match (round.deck.get(first), round.deck.get(second)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// その位置のカードを表向きで描くかどうか。
///
/// めくり中・ペア成立済み・プレビュー中のどれかなら表！
pub fn is_face_up(round: &RoundContext, position: usize) -> bool {
    round.preview || round.flipped.contains(&position) || round.solved.contains(&position)
}

/// 全部のペアが揃ったか？ 読み込み中や空のデッキでは false。
pub fn is_round_complete(round: &RoundContext) -> bool {
    round.load_state == LoadState::Ready
        && !round.deck.is_empty()
        && round.solved.len() == round.deck.len()
}

/// プレイヤーがその位置をめくれるか？ (デッキ内で、まだ揃ってない)
pub fn can_flip(round: &RoundContext, position: usize) -> bool {
    round.load_state == LoadState::Ready
        && position < round.deck.len()
        && !round.solved.contains(&position)
}
