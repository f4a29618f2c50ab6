// src/app/timer_manager.rs
//! `setTimeout` / `clearTimeout` でコントローラーのタイマーを動かす係だよ！⏰
//!
//! タイマーの種類ごとに同時に動くのは1個だけ。新しく予約するときは、
//! 先に古いのを必ず止める (cancel-before-reschedule)。

use std::collections::HashMap;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::components::timer::{TimerKind, TimerToken};

#[derive(Default)]
struct TimerSlot {
    handle: Option<i32>,
    token: Option<TimerToken>,
    // JS 側から呼ばれる関数。タイマーが生きてる間は手放せない
    callback: Option<Closure<dyn FnMut()>>,
}

#[derive(Default)]
pub struct TimerManager {
    slots: HashMap<TimerKind, TimerSlot>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// タイマーを予約する。同じ種類が動いていたら先に止めるよ。
    ///
    /// 発火中のコールバックの中から同じ種類を予約し直すと、実行中のクロージャを
    /// drop してしまうので、それはやらないこと。
    pub fn schedule(
        &mut self,
        token: TimerToken,
        delay_ms: u32,
        callback: Closure<dyn FnMut()>,
    ) -> Result<(), JsValue> {
        self.cancel(token.kind);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        )?;
        debug!("TimerManager: scheduled {:?} (handle {}) in {} ms", token.kind, handle, delay_ms);

        let slot = self.slots.entry(token.kind).or_default();
        slot.handle = Some(handle);
        slot.token = Some(token);
        slot.callback = Some(callback);
        Ok(())
    }

    /// 動いてるタイマーを止める。何も動いてなければ何もしない。
    pub fn cancel(&mut self, kind: TimerKind) {
        let Some(slot) = self.slots.get_mut(&kind) else {
            return;
        };
        if let Some(handle) = slot.handle.take() {
            match web_sys::window() {
                Some(window) => {
                    window.clear_timeout_with_handle(handle);
                    debug!("TimerManager: cancelled {:?} (handle {})", kind, handle);
                }
                None => warn!("TimerManager: no window to cancel {:?}", kind),
            }
        }
        slot.token = None;
    }

    /// コールバックから呼ばれる。もう clearTimeout しなくていいことを記録するだけ。
    pub fn mark_fired(&mut self, token: TimerToken) {
        if let Some(slot) = self.slots.get_mut(&token.kind) {
            if slot.token == Some(token) {
                slot.handle = None;
                slot.token = None;
            }
        }
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.slots.get(&kind).is_some_and(|slot| slot.handle.is_some())
    }

    /// 全部止めて、クロージャも手放す。GameApp を捨てるとき用。
    pub fn clear(&mut self) {
        let kinds: Vec<TimerKind> = self.slots.keys().copied().collect();
        for kind in kinds {
            self.cancel(kind);
        }
        self.slots.clear();
    }
}
