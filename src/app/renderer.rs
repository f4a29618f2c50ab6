// src/app/renderer.rs
//! GameView を DOM に描く係。
//!
//! カードのタイルは毎回作り直さないで、枚数が変わったときだけ作り直す。
//! 各タイルの `data-state` に前回の表示を覚えておいて、変わったタイルだけ書き換えるよ。

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::config::game::{GRID_COLUMNS, PLACEHOLDER_GLYPH};
use crate::view_model::{CardView, GameView, TITLE};

pub const INDEX_ATTR: &str = "data-index";
const STATE_ATTR: &str = "data-state";

/// 描画に使う DOM 要素たち。init_handler で一度だけ作る。
pub struct DomView {
    document: Document,
    root: Element,
    status: Element,
    moves: Element,
    grid: Element,
    restart: Element,
}

impl DomView {
    /// `root` の中に見出し・メッセージ・グリッド・Restart ボタンを作る。
    pub fn build(document: Document, root: Element) -> Result<Self, JsValue> {
        root.class_list().add_1("memory-game")?;

        let title = create(&document, "h1", "title")?;
        title.set_text_content(Some(TITLE));
        let status = create(&document, "h2", "status")?;
        let moves = create(&document, "p", "moves")?;
        let grid = create(&document, "div", "grid")?;
        grid.set_attribute(
            "style",
            &format!("display:grid;grid-template-columns:repeat({}, 1fr);", GRID_COLUMNS),
        )?;
        let restart = create(&document, "button", "restart")?;
        restart.set_text_content(Some("Restart"));

        for element in [&title, &status, &moves, &grid, &restart] {
            root.append_child(element)?;
        }

        Ok(Self { document, root, status, moves, grid, restart })
    }

    /// クリックを受け取る要素 (イベントリスナーを付ける先)。
    pub fn grid(&self) -> &Element {
        &self.grid
    }

    pub fn restart_button(&self) -> &Element {
        &self.restart
    }
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn set_hidden(element: &Element, hidden: bool) -> Result<(), JsValue> {
    element.toggle_attribute_with_force("hidden", hidden)?;
    Ok(())
}

/// タイルの中身を表す文字列。これが前回と同じなら書き換えない。
fn tile_state(card: &CardView) -> String {
    match &card.image {
        Some(url) if card.face_up => format!("up:{}", url),
        _ => "down".to_string(),
    }
}

pub fn render(dom: &DomView, view: &GameView) -> Result<(), JsValue> {
    dom.root.set_attribute("data-phase", view.phase.as_str())?;

    dom.status.set_text_content(view.message);
    set_hidden(&dom.status, view.message.is_none())?;

    let moves_label = view.moves_label();
    dom.moves.set_text_content(moves_label.as_deref());
    set_hidden(&dom.moves, moves_label.is_none())?;

    set_hidden(&dom.restart, !view.show_restart)?;

    render_grid(dom, &view.cards)
}

fn render_grid(dom: &DomView, cards: &[CardView]) -> Result<(), JsValue> {
    if dom.grid.child_element_count() as usize != cards.len() {
        dom.grid.set_inner_html("");
        for card in cards {
            let tile = create(&dom.document, "div", "card")?;
            tile.set_attribute(INDEX_ATTR, &card.position.to_string())?;
            dom.grid.append_child(&tile)?;
        }
    }

    let tiles = dom.grid.children();
    for card in cards {
        let Some(tile) = tiles.item(card.position as u32) else {
            continue;
        };
        let classes = tile.class_list();
        classes.toggle_with_force("flipped", card.face_up)?;
        classes.toggle_with_force("solved", card.solved)?;

        let state = tile_state(card);
        if tile.get_attribute(STATE_ATTR).as_deref() == Some(state.as_str()) {
            continue;
        }
        tile.set_attribute(STATE_ATTR, &state)?;
        match &card.image {
            Some(url) if card.face_up => {
                tile.set_text_content(None);
                let img = dom.document.create_element("img")?;
                img.set_attribute("src", url)?;
                img.set_attribute("alt", "Image")?;
                tile.append_child(&img)?;
            }
            _ => tile.set_text_content(Some(PLACEHOLDER_GLYPH)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_state_tracks_face() {
        let down = CardView { position: 0, face_up: false, solved: false, image: None };
        let up = CardView { position: 0, face_up: true, solved: false, image: Some("a.jpg".into()) };
        assert_eq!(tile_state(&down), "down");
        assert_eq!(tile_state(&up), "up:a.jpg");
    }
}
