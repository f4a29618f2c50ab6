// src/controller.rs
//! ゲームコントローラー！ラウンドの状態を全部持って、プレイヤーの操作と
//! タイマーの発火に応じて状態を進めるよ。
//!
//! ブラウザの API はここでは一切使わない。タイマーが必要なときは
//! `TimerCommand` を返して、ホスト (app/) に実行してもらう。
//! だからネイティブの `cargo test` でそのままテストできる！✨

use log::{debug, error, info, warn};
use rand::Rng;

use crate::components::card::CardFace;
use crate::components::game_state::{LoadState, RoundPhase};
use crate::components::round::{RoundContext, RoundId};
use crate::components::timer::{TimerCommand, TimerKind, TimerToken};
use crate::config::GameConfig;
use crate::logic::{deck, rules};
use crate::view_model::GameView;

pub struct GameController {
    config: GameConfig,
    round: RoundContext,
}

impl GameController {
    /// 新しいコントローラーを作るよ。最初はラウンド #0 の読み込み中。
    pub fn new(config: GameConfig) -> Self {
        Self { config, round: RoundContext::new(RoundId(0)) }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundContext {
        &self.round
    }

    pub fn round_id(&self) -> RoundId {
        self.round.round_id
    }

    pub fn moves(&self) -> u32 {
        self.round.moves
    }

    /// 新しいラウンドを始める (startRound)。
    ///
    /// 前のラウンドの状態は全部捨てて、読み込み中に戻す。返り値のラウンド ID を
    /// 画像取得の完了時に `finish_loading` へ渡してね。
    /// 動いてるタイマーは全部止めてもらう。
    pub fn start_round(&mut self) -> (RoundId, Vec<TimerCommand>) {
        let round_id = self.round.round_id.next();
        info!("GameController: starting round {}", round_id);
        self.round = RoundContext::new(round_id);
        (
            round_id,
            vec![
                TimerCommand::Cancel(TimerKind::PreviewEnd),
                TimerCommand::Cancel(TimerKind::Evaluation),
            ],
        )
    }

    /// リセット。今の状態がどの段階でも、新しいラウンドを始め直すだけ。
    pub fn reset(&mut self) -> (RoundId, Vec<TimerCommand>) {
        info!(
            "GameController: reset requested in phase {:?} after {} moves",
            self.phase(),
            self.round.moves
        );
        self.start_round()
    }

    /// 画像の取得が終わったときに呼ばれるよ。デッキを作ってプレビューを始める。
    ///
    /// `round_id` が今のラウンドと違ったら (途中でリセットされた)、結果は捨てる。
    pub fn finish_loading<R: Rng + ?Sized>(
        &mut self,
        round_id: RoundId,
        faces: Vec<CardFace>,
        rng: &mut R,
    ) -> Vec<TimerCommand> {
        if round_id != self.round.round_id || self.round.load_state != LoadState::Loading {
            debug!(
                "GameController: ignoring stale load result for round {} (current {})",
                round_id, self.round.round_id
            );
            return Vec::new();
        }

        if faces.is_empty() {
            error!("GameController: no card faces available for round {}", round_id);
            self.round.load_state = LoadState::Failed;
            self.round.preview = false;
            return Vec::new();
        }
        if faces.len() < self.config.unique_faces {
            warn!(
                "GameController: only {} of {} faces loaded, building a smaller deck",
                faces.len(),
                self.config.unique_faces
            );
        }

        let deck = deck::build_deck(&faces, rng);
        self.install_deck(deck)
    }

    /// シャッフル済みのデッキをそのまま入れて、プレビューを開始する。
    pub(crate) fn install_deck(&mut self, deck: Vec<CardFace>) -> Vec<TimerCommand> {
        debug_assert!(deck::is_paired_deck(&deck), "deck must hold every face exactly twice");
        info!("GameController: round {} ready with {} cards", self.round.round_id, deck.len());
        self.round.deck = deck;
        self.round.load_state = LoadState::Ready;
        self.round.preview = true;
        vec![TimerCommand::Schedule {
            token: TimerToken {
                kind: TimerKind::PreviewEnd,
                round_id: self.round.round_id,
                seq: 0,
            },
            delay_ms: self.config.preview_ms,
        }]
    }

    /// プレイヤーがカードをクリックした (flip)。
    ///
    /// - 揃ってるカード、範囲外、読み込み中は何もしない (手数も増えない)
    /// - それ以外は手数 +1
    /// - めくり中のカードをもう一度押しても位置は重複させない
    /// - めくり中が2枚以上になったら判定タイマーを予約し直す
    pub fn flip(&mut self, position: usize) -> Vec<TimerCommand> {
        if !rules::can_flip(&self.round, position) {
            debug!("GameController: flip({}) ignored in phase {:?}", position, self.phase());
            return Vec::new();
        }

        self.round.moves += 1;
        if self.round.flipped.contains(&position) {
            debug!("GameController: position {} is already face up", position);
            return Vec::new();
        }

        self.round.flipped.push(position);
        self.round.flip_version += 1;
        debug!(
            "GameController: flipped {} (flipped={:?}, moves={})",
            position, self.round.flipped, self.round.moves
        );

        if self.round.flipped.len() >= 2 {
            vec![TimerCommand::Schedule {
                token: TimerToken {
                    kind: TimerKind::Evaluation,
                    round_id: self.round.round_id,
                    seq: self.round.flip_version,
                },
                delay_ms: self.config.evaluation_delay_ms,
            }]
        } else {
            Vec::new()
        }
    }

    /// タイマーが発火した。古いラウンドや古い状態向けのタイマーなら何もしないで false。
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if token.round_id != self.round.round_id {
            debug!(
                "GameController: stale {:?} timer from round {} dropped",
                token.kind, token.round_id
            );
            return false;
        }
        match token.kind {
            TimerKind::PreviewEnd => self.end_preview(),
            TimerKind::Evaluation => self.evaluate(token.seq),
        }
    }

    fn end_preview(&mut self) -> bool {
        if self.round.load_state != LoadState::Ready || !self.round.preview {
            return false;
        }
        self.round.preview = false;
        debug!("GameController: preview finished for round {}", self.round.round_id);
        true
    }

    /// めくった最初の2枚を比べる。一致なら solved へ。flipped はどっちにしても空にする。
    fn evaluate(&mut self, seq: u64) -> bool {
        if seq != self.round.flip_version || self.round.flipped.len() < 2 {
            debug!("GameController: evaluation token {} is outdated", seq);
            return false;
        }

        let (first, second) = (self.round.flipped[0], self.round.flipped[1]);
        if rules::faces_match(&self.round, first, second) {
            self.round.solved.insert(first);
            self.round.solved.insert(second);
            info!("GameController: matched {} and {}", first, second);
        } else {
            debug!("GameController: {} and {} do not match", first, second);
        }
        self.round.flipped.clear();
        self.round.flip_version += 1;

        if self.is_game_over() {
            info!("GameController: round {} cleared in {} moves", self.round.round_id, self.round.moves);
        }
        true
    }

    /// 全ペアが揃ったか (isGameOver)。
    pub fn is_game_over(&self) -> bool {
        rules::is_round_complete(&self.round)
    }

    /// 今の段階を状態から計算するよ。
    pub fn phase(&self) -> RoundPhase {
        match self.round.load_state {
            LoadState::Loading => RoundPhase::Loading,
            LoadState::Failed => RoundPhase::Failed,
            LoadState::Ready if self.is_game_over() => RoundPhase::GameOver,
            LoadState::Ready if self.round.preview => RoundPhase::Previewing,
            LoadState::Ready if self.round.flipped.len() >= 2 => RoundPhase::Evaluating,
            LoadState::Ready => RoundPhase::Playing,
        }
    }

    /// 描画用のスナップショット。
    pub fn view(&self) -> GameView {
        GameView::from_round(&self.round, self.phase())
    }
}
