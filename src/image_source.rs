// src/image_source.rs

// このファイルは、カードの絵柄になる画像を取ってくる担当だよ！📡
// ブラウザの fetch API を `web_sys` と `wasm-bindgen-futures` で呼び出して、
// 1回のリクエストで1枚のランダム画像 (の URL) をもらう。
use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use log::{debug, info};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::components::card::ImageResponse;

/// 画像取得1回分で起こりうるエラー。
///
/// どれも候補プールの中で「失敗した枠」として捨てられるだけで、
/// ラウンド自体を止めることはないよ。
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImageSourceError {
    #[error("no browser window available")]
    NoWindow,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("could not parse image response: {0}")]
    Parse(String),
}

/// 絵柄の供給元 (Image Source) を抽象化したトレイト。
///
/// 1回呼ぶごとに独立したリクエストを1つ作る。テストでは偽物を差し込むよ。
pub trait ImageSource {
    fn fetch_image(&self) -> LocalBoxFuture<'static, Result<ImageResponse, ImageSourceError>>;
}

/// dog.ceo のランダム画像 API を叩く本物の Image Source 🐕
pub struct DogApiSource {
    url: String,
}

impl DogApiSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ImageSource for DogApiSource {
    fn fetch_image(&self) -> LocalBoxFuture<'static, Result<ImageResponse, ImageSourceError>> {
        let url = self.url.clone();
        async move { fetch_image_response(&url).await }.boxed_local()
    }
}

async fn fetch_image_response(url: &str) -> Result<ImageResponse, ImageSourceError> {
    let window = web_sys::window().ok_or(ImageSourceError::NoWindow)?;

    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| ImageSourceError::Network(format!("{:?}", e)))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| ImageSourceError::Parse("fetch did not resolve to a Response".to_string()))?;

    if !response.ok() {
        return Err(ImageSourceError::HttpStatus(response.status()));
    }

    let json_promise = response
        .json()
        .map_err(|e| ImageSourceError::Parse(format!("{:?}", e)))?;
    let json_value = JsFuture::from(json_promise)
        .await
        .map_err(|e| ImageSourceError::Parse(format!("{:?}", e)))?;

    // JS のオブジェクトを一度 JSON 文字列に戻して、serde_json で型に入れる
    let text: String = js_sys::JSON::stringify(&json_value)
        .map_err(|e| ImageSourceError::Parse(format!("{:?}", e)))?
        .into();
    serde_json::from_str::<ImageResponse>(&text).map_err(|e| ImageSourceError::Parse(e.to_string()))
}

/// 候補プール分のリクエストを同時に投げて、全部終わるまで待つよ (join-all)。
///
/// 失敗したリクエストもそのまま結果に入る。選別は `logic::deck::select_faces` の仕事。
pub async fn fetch_candidate_pool(
    source: &dyn ImageSource,
    pool_size: usize,
) -> Vec<Result<ImageResponse, ImageSourceError>> {
    info!("ImageSource: requesting {} candidate images", pool_size);
    let requests = (0..pool_size).map(|_| source.fetch_image());
    let results = join_all(requests).await;
    debug!(
        "ImageSource: batch settled, {} of {} succeeded",
        results.iter().filter(|r| matches!(r, Ok(resp) if resp.is_success())).count(),
        pool_size
    );
    results
}
