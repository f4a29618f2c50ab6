// src/app/event_handler.rs
//! クリックイベントを受け取って state_handler に流すよ。
//!
//! カード1枚ずつにリスナーを付けるんじゃなくて、グリッドに1個だけ付けて
//! `data-index` からどのカードか調べる (イベント委譲)。

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event};

use crate::app::renderer::INDEX_ATTR;
use crate::app::state_handler::{self, AppHandles};

/// 要素に付けたクリックリスナー。drop するとリスナーも外れる。
pub(crate) struct ClickListener {
    target: Element,
    closure: Closure<dyn FnMut(Event)>,
}

impl ClickListener {
    fn attach(target: &Element, closure: Closure<dyn FnMut(Event)>) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), closure })
    }
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref())
        {
            warn!("App::Event: failed to detach click listener: {:?}", e);
        }
    }
}

/// グリッドと Restart ボタンにクリックリスナーを付ける。
/// 返したリスナーは GameApp が持っておくこと。
pub(crate) fn attach_click_listeners(handles: &AppHandles) -> Result<Vec<ClickListener>, JsValue> {
    let grid_handles = handles.clone();
    let grid_closure = Closure::wrap(Box::new(move |event: Event| {
        match clicked_position(&event) {
            Some(position) => state_handler::handle_flip(&grid_handles, position),
            None => debug!("App::Event: click outside of any card"),
        }
    }) as Box<dyn FnMut(Event)>);

    let restart_handles = handles.clone();
    let restart_closure = Closure::wrap(Box::new(move |_event: Event| {
        state_handler::restart(&restart_handles);
    }) as Box<dyn FnMut(Event)>);

    Ok(vec![
        ClickListener::attach(handles.dom.grid(), grid_closure)?,
        ClickListener::attach(handles.dom.restart_button(), restart_closure)?,
    ])
}

/// クリックされた要素から一番近いカードのタイルを探して、その位置を返す。
fn clicked_position(event: &Event) -> Option<usize> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let tile = target.closest(&format!("[{}]", INDEX_ATTR)).ok()??;
    parse_position(&tile.get_attribute(INDEX_ATTR)?)
}

pub(crate) fn parse_position(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}
