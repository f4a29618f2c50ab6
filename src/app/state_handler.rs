// src/app/state_handler.rs
//! コントローラーの状態を動かす入口をまとめたよ。
//! クリック・タイマー発火・画像取得完了、どこから来ても最後は再描画する。

use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};
use wasm_bindgen::closure::Closure;

use crate::app::renderer::{self, DomView};
use crate::app::timer_manager::TimerManager;
use crate::components::round::RoundId;
use crate::components::timer::{TimerCommand, TimerToken};
use crate::controller::GameController;
use crate::image_source::{fetch_candidate_pool, ImageSource};
use crate::logic::deck;

/// GameApp・イベントリスナー・タイマーのクロージャが共有するハンドルたち。
/// Clone しても中身は同じものを指すよ (Arc だからね)。
#[derive(Clone)]
pub(crate) struct AppHandles {
    pub controller: Arc<Mutex<GameController>>,
    pub timers: Arc<Mutex<TimerManager>>,
    pub dom: Arc<DomView>,
    pub source: Arc<dyn ImageSource>,
}

/// Mutex をロックする。poisoned でも中身を取り出して続行する。
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("App::State: mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// 最初のラウンドを開始する。
pub(crate) fn begin_round(handles: &AppHandles) {
    let (round_id, commands) = lock(&handles.controller).start_round();
    launch_round(handles, round_id, commands);
}

/// Restart ボタン。どの段階で押されても新しいラウンドになる。
pub(crate) fn restart(handles: &AppHandles) {
    let (round_id, commands) = lock(&handles.controller).reset();
    launch_round(handles, round_id, commands);
}

fn launch_round(handles: &AppHandles, round_id: RoundId, commands: Vec<TimerCommand>) {
    apply_timer_commands(handles, commands);
    render(handles);

    let handles_for_load = handles.clone();
    wasm_bindgen_futures::spawn_local(async move {
        load_round(handles_for_load, round_id).await;
    });
}

/// 候補プールを取りに行って、終わったらデッキを作る。
async fn load_round(handles: AppHandles, round_id: RoundId) {
    let (pool_size, unique_faces) = {
        let controller = lock(&handles.controller);
        (controller.config().candidate_pool, controller.config().unique_faces)
    };

    let results = fetch_candidate_pool(handles.source.as_ref(), pool_size).await;
    let faces = deck::select_faces(results, unique_faces);
    info!("App::State: round {} received {} usable faces", round_id, faces.len());

    let commands = lock(&handles.controller).finish_loading(round_id, faces, &mut rand::thread_rng());
    apply_timer_commands(&handles, commands);
    render(&handles);
}

/// カードがクリックされた。
pub(crate) fn handle_flip(handles: &AppHandles, position: usize) {
    let commands = lock(&handles.controller).flip(position);
    apply_timer_commands(handles, commands);
    render(handles);
}

/// タイマーが発火した。古いタイマーならコントローラーが無視してくれる。
pub(crate) fn handle_timer(handles: &AppHandles, token: TimerToken) {
    lock(&handles.timers).mark_fired(token);
    let changed = lock(&handles.controller).on_timer(token);
    if changed {
        render(handles);
    }
}

/// コントローラーから返ってきたタイマー指示を実行する。
pub(crate) fn apply_timer_commands(handles: &AppHandles, commands: Vec<TimerCommand>) {
    for command in commands {
        match command {
            TimerCommand::Cancel(kind) => lock(&handles.timers).cancel(kind),
            TimerCommand::Schedule { token, delay_ms } => {
                let handles_for_timer = handles.clone();
                let callback = Closure::wrap(Box::new(move || {
                    handle_timer(&handles_for_timer, token);
                }) as Box<dyn FnMut()>);
                if let Err(e) = lock(&handles.timers).schedule(token, delay_ms, callback) {
                    error!("App::State: failed to schedule {:?}: {:?}", token.kind, e);
                }
            }
        }
    }
}

/// 今の状態を DOM に反映する。ロックは描画の前に外す。
pub(crate) fn render(handles: &AppHandles) {
    let view = lock(&handles.controller).view();
    if let Err(e) = renderer::render(&handles.dom, &view) {
        error!("App::State: render failed: {:?}", e);
    }
}
