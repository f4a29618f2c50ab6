// src/config/game.rs
//! ゲームの進行に関する定数と、JS から上書きできる設定 (`GameConfig`) を定義するよ！
//! 画像の枚数、タイマーの長さ、画像 API の URL など。

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNIQUE_FACES: usize = 8; // 1ラウンドで使うユニークな絵柄の数
pub const CANDIDATE_POOL: usize = 10; // 失敗を見越して多めに投げるリクエスト数
pub const PREVIEW_MS: u32 = 2000; // ラウンド開始時に全カードを見せる時間
pub const EVALUATION_DELAY_MS: u32 = 800; // 2枚めくってから判定するまでの待ち時間
pub const IMAGE_API_URL: &str = "https://dog.ceo/api/breeds/image/random";

pub const PLACEHOLDER_GLYPH: &str = "?"; // 裏向きカードに表示する文字
pub const GRID_COLUMNS: usize = 4;

/// 設定値の読み込み・検証で起きるエラー。
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    InvalidJson(String),
    #[error("unique_faces must be at least 1")]
    NoFaces,
    #[error("candidate_pool ({pool}) must be >= unique_faces ({unique})")]
    PoolTooSmall { pool: usize, unique: usize },
}

/// ゲーム全体の設定だよ。
///
/// JSON で一部のフィールドだけ渡しても、残りは定数のデフォルト値で埋まるようにしてある！
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub unique_faces: usize,
    pub candidate_pool: usize,
    pub preview_ms: u32,
    pub evaluation_delay_ms: u32,
    pub image_api_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            unique_faces: UNIQUE_FACES,
            candidate_pool: CANDIDATE_POOL,
            preview_ms: PREVIEW_MS,
            evaluation_delay_ms: EVALUATION_DELAY_MS,
            image_api_url: IMAGE_API_URL.to_string(),
        }
    }
}

impl GameConfig {
    /// JSON 文字列から設定を読み込んで、そのまま検証まで済ませる。
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unique_faces == 0 {
            return Err(ConfigError::NoFaces);
        }
        if self.candidate_pool < self.unique_faces {
            return Err(ConfigError::PoolTooSmall {
                pool: self.candidate_pool,
                unique: self.unique_faces,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.unique_faces, 8);
        assert_eq!(config.candidate_pool, 10);
        assert_eq!(config.preview_ms, 2000);
        assert_eq!(config.evaluation_delay_ms, 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "preview_ms": 500 }"#).unwrap();
        assert_eq!(config.preview_ms, 500);
        assert_eq!(config.unique_faces, UNIQUE_FACES);
        assert_eq!(config.image_api_url, IMAGE_API_URL);
    }

    #[test]
    fn rejects_inconsistent_values() {
        assert_eq!(
            GameConfig::from_json(r#"{ "unique_faces": 0 }"#),
            Err(ConfigError::NoFaces)
        );
        assert_eq!(
            GameConfig::from_json(r#"{ "unique_faces": 12, "candidate_pool": 10 }"#),
            Err(ConfigError::PoolTooSmall { pool: 10, unique: 12 })
        );
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::InvalidJson(_))
        ));
    }
}
