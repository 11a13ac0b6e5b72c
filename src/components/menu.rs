//! モバイルメニュー
//!
//! `mobile-menu` のクリックで `nav-links` の active クラスを切り替える

use wasm_bindgen::prelude::*;

use crate::utils::log_trace::log_info;

pub const ACTIVE_CLASS: &str = "active";

pub struct MenuController {
    toggle: web_sys::Element,
    nav: web_sys::Element,
}

impl MenuController {
    /// トグルボタンとナビの両方がある場合のみ生成
    pub fn find(document: &web_sys::Document, toggle_id: &str, nav_id: &str) -> Option<Self> {
        let toggle = document.get_element_by_id(toggle_id)?;
        let nav = document.get_element_by_id(nav_id)?;
        Some(Self { toggle, nav })
    }

    /// 開閉を反転し、開いた状態なら true を返す
    pub fn toggle(&self) -> bool {
        self.nav.class_list().toggle(ACTIVE_CLASS).unwrap_or(false)
    }

    pub fn is_open(&self) -> bool {
        self.nav.class_list().contains(ACTIVE_CLASS)
    }

    /// クリックハンドラを登録（ページ表示中は解除しない）
    pub fn bind(self) {
        let toggle = self.toggle.clone();
        let onclick = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let open = self.toggle();
            log_info("menu", if open { "メニューを開きました" } else { "メニューを閉じました" });
        }) as Box<dyn FnMut(_)>);

        let _ = toggle.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
        onclick.forget();
    }
}
