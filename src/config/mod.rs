// src/config/mod.rs
//! 設定まわりのモジュール！

pub mod game;

pub use game::{ConfigError, GameConfig};
