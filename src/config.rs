//! ページスクリプトの設定
//!
//! 既定値はストアフロントのテンプレートに合わせてある。
//! スクリプト読込前に `window.rootreachConfig` を定義すると一部を上書きできる。

use serde::{Deserialize, Serialize};

use crate::utils::log_trace::{log_info, log_warn};

const CONFIG_GLOBAL: &str = "rootreachConfig";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// カートを保存する localStorage のキー
    pub storage_key: String,
    pub menu_toggle_id: String,
    pub nav_links_id: String,
    pub cart_count_id: String,
    /// 同時に表示するトーストの上限
    pub max_toasts: usize,
    /// カート追加時の通知メッセージ
    pub added_message: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: "rootreachCart".to_string(),
            menu_toggle_id: "mobile-menu".to_string(),
            nav_links_id: "nav-links".to_string(),
            cart_count_id: "cart-count".to_string(),
            max_toasts: 5,
            added_message: "Added to cart!".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// window.rootreachConfig を読み込む（未定義・不正なら既定値）
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = match js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value::<StorefrontConfig>(raw) {
            Ok(config) => {
                log_info("config", "rootreachConfig を適用しました");
                config.normalized()
            }
            Err(e) => {
                log_warn("config", &format!("rootreachConfig を無視します: {}", e));
                Self::default()
            }
        }
    }

    // 上限0ではトーストが出せないので最低1件
    fn normalized(mut self) -> Self {
        self.max_toasts = self.max_toasts.max(1);
        self
    }
}
