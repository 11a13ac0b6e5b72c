//! ページ上のカート操作
//!
//! カートの保存、件数バッジの更新、トースト通知をまとめて扱う。
//! ストレージ・表示先・通知先は差し替え可能で、ブラウザ以外でもテストできる。

use crate::cart_store::CartStore;
use crate::components::cart_badge::{BadgeState, CountDisplay};
use crate::components::toast::Notifier;
use crate::config::StorefrontConfig;
use crate::error::StoreError;
use crate::models::{Cart, ToastKind};
use crate::utils::log_trace::log_error;
use crate::utils::storage::KeyValueStore;

const SAVE_FAILED_MESSAGE: &str = "Could not update your cart.";

pub struct Storefront<S, D, N> {
    cart: CartStore<S>,
    display: D,
    notifier: N,
    added_message: String,
}

impl<S, D, N> Storefront<S, D, N>
where
    S: KeyValueStore,
    D: CountDisplay,
    N: Notifier,
{
    pub fn new(storage: S, display: D, notifier: N, config: &StorefrontConfig) -> Self {
        Self {
            cart: CartStore::new(storage, config.storage_key.clone()),
            display,
            notifier,
            added_message: config.added_message.clone(),
        }
    }

    pub fn get_cart(&self) -> Cart {
        self.cart.get_cart()
    }

    pub fn total_quantity(&self) -> u32 {
        self.cart.get_cart().total_quantity()
    }

    /// 件数バッジを保存済みカートに合わせる。表示した件数を返す
    pub fn refresh_count_display(&self) -> usize {
        let count = self.cart.count();
        self.display.render(&BadgeState::for_count(count));
        count
    }

    pub fn show_toast(&self, message: &str, kind: ToastKind) {
        self.notifier.notify(message, kind);
    }

    /// 「カートに追加」ボタンから呼ばれる
    pub fn add_to_cart(&self, id: &str) {
        let result = self.cart.add(id);
        self.refresh_count_display();
        match result {
            Ok(_) => self.notifier.notify(&self.added_message, ToastKind::Success),
            Err(e) => self.report_failure(&e),
        }
    }

    pub fn update_quantity(&self, id: &str, quantity: u32) {
        let result = self.cart.update_quantity(id, quantity);
        self.finish_silent(result);
    }

    pub fn remove_from_cart(&self, id: &str) {
        let result = self.cart.remove(id);
        self.finish_silent(result);
    }

    /// 注文確定後などにカートを空にする
    pub fn clear_cart(&self) {
        let result = self.cart.clear();
        self.finish_silent(result);
    }

    // 成功時は通知なし、失敗時のみエラートースト
    fn finish_silent(&self, result: Result<Cart, StoreError>) {
        self.refresh_count_display();
        if let Err(e) = result {
            self.report_failure(&e);
        }
    }

    fn report_failure(&self, error: &StoreError) {
        log_error("cart", &format!("カートを保存できません: {}", error));
        self.notifier.notify(SAVE_FAILED_MESSAGE, ToastKind::Error);
    }
}
