// src/components/card.rs

// serde を使う宣言！画像 API のレスポンスを読んだり、画面の状態を JSON にしたりするよ！
use serde::{Deserialize, Serialize};

/// 画像 API の1回分のレスポンスに入ってる `status` だよ。
///
/// dog.ceo は成功時に `"success"` を返す。それ以外の文字列は全部失敗扱い！
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    #[serde(other)]
    Failure,
}

/// 画像 API のレスポンスそのもの。`message` に画像の URL が入ってる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub message: String,
    pub status: FetchStatus,
}

impl ImageResponse {
    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }
}

/// カードの絵柄 (Card Face) を表す構造体だよ！🐶
///
/// 中身は画像への参照 (URL) だけ。2枚のカードが「同じ」かどうかは
/// この参照が等しいかどうかだけで決まるよ！
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub reference: String,
}

impl CardFace {
    pub fn new(reference: impl Into<String>) -> Self {
        Self { reference: reference.into() }
    }
}

impl From<ImageResponse> for CardFace {
    fn from(response: ImageResponse) -> Self {
        CardFace::new(response.message)
    }
}
