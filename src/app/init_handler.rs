// src/app/init_handler.rs
//! GameApp の初期化に関するロジック。DOM の準備と共有ハンドルの組み立て。

use std::sync::{Arc, Mutex};

use log::{info, warn};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::app::renderer::DomView;
use crate::app::state_handler::AppHandles;
use crate::app::timer_manager::TimerManager;
use crate::config::GameConfig;
use crate::controller::GameController;
use crate::image_source::DogApiSource;

/// `root_id` の要素を探す。見つからなければ body に描く。
fn find_root(root_id: &str) -> Result<(web_sys::Document, Element), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let root = match document.get_element_by_id(root_id) {
        Some(element) => element,
        None => {
            warn!("App::Init: #{} not found, rendering into <body>", root_id);
            let body = document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?;
            body.into()
        }
    };
    Ok((document, root))
}

/// DOM を作って、コントローラー・タイマー・画像取得を1つにまとめる。
pub(crate) fn initialize(root_id: &str, config: GameConfig) -> Result<AppHandles, JsValue> {
    info!("App::Init: initializing memory game in #{}", root_id);
    let (document, root) = find_root(root_id)?;
    let dom = DomView::build(document, root)?;

    let source = DogApiSource::new(config.image_api_url.clone());
    let controller = GameController::new(config);

    Ok(AppHandles {
        controller: Arc::new(Mutex::new(controller)),
        timers: Arc::new(Mutex::new(TimerManager::new())),
        dom: Arc::new(dom),
        source: Arc::new(source),
    })
}
