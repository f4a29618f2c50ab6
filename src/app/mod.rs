// src/app/mod.rs
//! GameApp のブラウザ側の処理を役割ごとに分割して置くモジュールだよ！

pub mod event_handler;
pub mod game_app;
pub mod init_handler;
pub mod renderer;
pub mod state_getter;
pub mod state_handler;
pub mod timer_manager;

pub use game_app::GameApp;
