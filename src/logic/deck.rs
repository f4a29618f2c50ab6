// src/logic/deck.rs

use itertools::Itertools;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::card::{CardFace, ImageResponse};
use crate::image_source::ImageSourceError;

/// 画像取得の結果 (候補プール) から、デッキに使う絵柄を選ぶ関数だよ！🐶
///
/// - 失敗したリクエストと `status != success` のレスポンスは捨てる
/// - 同じ URL が2回来たら1つにまとめる (ペアの不変条件を守るため)
/// - 先頭から `unique_faces` 個だけ取る
///
/// 足りなくてもエラーにはしない。取れた分だけで小さいデッキになるよ。
pub fn select_faces(
    results: Vec<Result<ImageResponse, ImageSourceError>>,
    unique_faces: usize,
) -> Vec<CardFace> {
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(response) if response.is_success() => Some(CardFace::from(response)),
            Ok(response) => {
                warn!("Image source returned a failed slot: {:?}", response.message);
                None
            }
            Err(e) => {
                warn!("Image request failed: {}", e);
                None
            }
        })
        .unique()
        .take(unique_faces)
        .collect()
}

/// 絵柄を2枚ずつに増やして、シャッフルしたデッキを作るよ！🃏
///
/// 並べ替えは `SliceRandom::shuffle` (Fisher-Yates) なので一様ランダム。
pub fn build_deck<R: Rng + ?Sized>(faces: &[CardFace], rng: &mut R) -> Vec<CardFace> {
    let mut deck: Vec<CardFace> = faces.iter().chain(faces.iter()).cloned().collect();
    shuffle_deck(&mut deck, rng);
    deck
}

pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [CardFace], rng: &mut R) {
    deck.shuffle(rng);
}

/// デッキの長さが偶数で、どの絵柄もちょうど2回ずつ出てくるかチェック。
pub fn is_paired_deck(deck: &[CardFace]) -> bool {
    deck.len() % 2 == 0 && deck.iter().counts().values().all(|&count| count == 2)
}
