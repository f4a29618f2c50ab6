// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app; // ブラウザ側 (DOM・イベント・タイマー)
pub mod components; // データ型
pub mod config;
pub mod controller; // ゲームの状態遷移
pub mod image_source; // 画像 API
pub mod logger;
pub mod logic; // デッキ作りとルール
pub mod view_model;

#[cfg(test)]
mod controller_tests;

pub use app::GameApp;
pub use controller::GameController;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    log::info!("Panic hook set!");
}
