// src/app/game_app.rs

use log::{info, warn};
use wasm_bindgen::prelude::*;

use crate::app::event_handler::ClickListener;
use crate::app::state_handler::{self, lock, AppHandles};
use crate::app::{event_handler, init_handler, state_getter};
use crate::components::timer::TimerKind;
use crate::config::GameConfig;
use crate::logger;

// --- ゲーム全体のアプリケーション状態を管理する構造体 ---
#[wasm_bindgen]
pub struct GameApp {
    handles: AppHandles,
    // グリッドと Restart ボタンのリスナー。GameApp と一緒に外れる
    listeners: Vec<ClickListener>,
}

#[wasm_bindgen]
impl GameApp {
    /// `root_id` の要素の中にゲームを作る。デフォルト設定で。
    #[wasm_bindgen(constructor)]
    pub fn new(root_id: &str) -> Result<GameApp, JsValue> {
        Self::build(root_id, GameConfig::default())
    }

    /// JSON で設定を一部上書きして作る。例: `{"preview_ms": 1000}`
    pub fn with_config(root_id: &str, config_json: &str) -> Result<GameApp, JsValue> {
        let config = GameConfig::from_json(config_json)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        Self::build(root_id, config)
    }

    fn build(root_id: &str, config: GameConfig) -> Result<GameApp, JsValue> {
        let handles = init_handler::initialize(root_id, config)?;
        let listeners = event_handler::attach_click_listeners(&handles)?;
        info!("GameApp: ready");
        Ok(GameApp { handles, listeners })
    }

    /// 最初のラウンドを始める (画像の取得が始まる)。
    pub fn start(&self) {
        state_handler::begin_round(&self.handles);
    }

    /// JS から直接カードをめくる。グリッドのクリックと同じ処理。
    pub fn flip(&self, position: usize) {
        state_handler::handle_flip(&self.handles, position);
    }

    pub fn restart(&self) {
        state_handler::restart(&self.handles);
    }

    #[wasm_bindgen]
    pub fn get_state_json(&self) -> Result<JsValue, JsValue> {
        state_getter::get_state_json(&self.handles.controller)
    }

    pub fn moves(&self) -> u32 {
        lock(&self.handles.controller).moves()
    }

    pub fn is_game_over(&self) -> bool {
        lock(&self.handles.controller).is_game_over()
    }

    pub fn phase(&self) -> String {
        lock(&self.handles.controller).phase().as_str().to_string()
    }

    // デバッグ用: 判定タイマーが動いてるか
    pub fn is_evaluation_pending(&self) -> bool {
        lock(&self.handles.timers).is_pending(TimerKind::Evaluation)
    }

    /// ログレベルを変える ("debug", "info" など)。読めない名前なら false。
    pub fn set_log_level(&self, level: &str) -> bool {
        match logger::parse_level(level) {
            Some(filter) => {
                log::set_max_level(filter);
                true
            }
            None => {
                warn!("GameApp: unknown log level {:?}", level);
                false
            }
        }
    }
}

// GameApp が不要になった時にタイマーとリスナーを片付ける (Drop トレイト)
impl Drop for GameApp {
    fn drop(&mut self) {
        info!("GameApp: dropping, clearing timers");
        lock(&self.handles.timers).clear();
        self.listeners.clear();
    }
}
