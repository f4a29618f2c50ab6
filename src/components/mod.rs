// src/components/mod.rs

// ゲームで使うデータ型たち！ロジックは logic/ と controller.rs に置くよ。
pub mod card;
pub mod game_state;
pub mod round;
pub mod timer;

pub use card::{CardFace, FetchStatus, ImageResponse};
pub use game_state::{LoadState, RoundPhase};
pub use round::{RoundContext, RoundId};
pub use timer::{TimerCommand, TimerKind, TimerToken};
