// src/app/state_getter.rs
//! Gets the current game view from the controller and converts it to JSON.

use std::sync::Mutex;

use log::error;
use wasm_bindgen::JsValue;

use crate::app::state_handler::lock;
use crate::controller::GameController;

/// 今の画面の状態 (GameView) を JSON 文字列にして返します。
pub fn get_state_json(controller: &Mutex<GameController>) -> Result<JsValue, JsValue> {
    let view = lock(controller).view();
    match serde_json::to_string(&view) {
        Ok(json_string) => Ok(JsValue::from_str(&json_string)),
        Err(e) => {
            let error_msg = format!("Failed to serialize game view: {}", e);
            error!("{}", error_msg);
            Err(JsValue::from_str(&error_msg))
        }
    }
}
