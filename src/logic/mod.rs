// src/logic/mod.rs
//! ゲームの純粋なロジック (デッキ作りとルール判定)。

pub mod deck;
pub mod rules;

pub use deck::{build_deck, is_paired_deck, select_faces, shuffle_deck};
pub use rules::{can_flip, faces_match, is_face_up, is_round_complete};
