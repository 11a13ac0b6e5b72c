//! ページへの組み込み
//!
//! DOMの準備ができたらメニュー・件数バッジ・トーストを初期化し、
//! ページ内の他のスクリプトから呼べる関数を window に登録する。

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::components::{HtmlCountDisplay, MenuController, ToastNotifier};
use crate::config::StorefrontConfig;
use crate::models::ToastKind;
use crate::storefront::Storefront;
use crate::utils::log_trace::{download_logs, log_info};
use crate::utils::storage::LocalStorage;

type PageStorefront = Storefront<LocalStorage, Option<HtmlCountDisplay>, ToastNotifier>;

thread_local! {
    static STOREFRONT: RefCell<Option<PageStorefront>> = const { RefCell::new(None) };
}

fn with_storefront<R>(f: impl FnOnce(&PageStorefront) -> R) -> Option<R> {
    STOREFRONT.with(|cell| cell.borrow().as_ref().map(f))
}

/// DOMContentLoaded 後に一度だけ初期化する
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() != "loading" {
        init();
        return;
    }

    let on_ready = Closure::once(init);
    let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
    on_ready.forget();
}

fn init() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = StorefrontConfig::from_window();

    match MenuController::find(&document, &config.menu_toggle_id, &config.nav_links_id) {
        Some(menu) => menu.bind(),
        None => log_info("page", "モバイルメニューがないページです"),
    }

    let display = HtmlCountDisplay::find(&document, &config.cart_count_id);
    if display.is_none() {
        log_info("page", "カート件数の表示先がないページです");
    }

    let notifier = ToastNotifier::mount(config.max_toasts);
    let storefront = Storefront::new(LocalStorage, display, notifier, &config);
    let count = storefront.refresh_count_display();
    STOREFRONT.with(|cell| *cell.borrow_mut() = Some(storefront));

    expose_globals(&window);
    log_info("page", &format!("初期化完了 (カート {} 件)", count));
}

// 商品IDはテンプレートから数値で渡されることもある
fn js_to_text(value: &JsValue) -> Option<String> {
    value
        .as_string()
        .or_else(|| value.as_f64().and_then(id_from_number))
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// 数値IDは安全な整数のみ（JSの String() と表記がずれるため）
fn id_from_number(n: f64) -> Option<String> {
    if n.fract() != 0.0 || n.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    Some((n as i64).to_string())
}

fn js_to_quantity(value: &JsValue) -> Option<u32> {
    let n = value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse::<f64>().ok()))?;
    quantity_from_number(n)
}

// 負数は0（削除）扱い、小数は切り捨て
fn quantity_from_number(n: f64) -> Option<u32> {
    if n.is_nan() {
        return None;
    }
    Some(n.max(0.0).floor() as u32)
}

fn set_global(window: &web_sys::Window, name: &str, function: &JsValue) {
    let _ = js_sys::Reflect::set(window, &JsValue::from_str(name), function);
}

fn expose_globals(window: &web_sys::Window) {
    let show_toast = Closure::wrap(Box::new(|message: JsValue, kind: JsValue| {
        let message = js_to_text(&message).unwrap_or_default();
        let kind = ToastKind::from_type(kind.as_string().as_deref());
        with_storefront(|page| page.show_toast(&message, kind));
    }) as Box<dyn Fn(JsValue, JsValue)>);
    set_global(window, "showToast", show_toast.as_ref());
    show_toast.forget();

    let add_to_cart = Closure::wrap(Box::new(|product_id: JsValue| {
        if let Some(id) = js_to_text(&product_id) {
            with_storefront(|page| page.add_to_cart(&id));
        }
    }) as Box<dyn Fn(JsValue)>);
    set_global(window, "addToCart", add_to_cart.as_ref());
    add_to_cart.forget();

    let update_count = Closure::wrap(Box::new(|| {
        with_storefront(|page| page.refresh_count_display());
    }) as Box<dyn Fn()>);
    set_global(window, "updateCartCount", update_count.as_ref());
    update_count.forget();

    let remove_from_cart = Closure::wrap(Box::new(|product_id: JsValue| {
        if let Some(id) = js_to_text(&product_id) {
            with_storefront(|page| page.remove_from_cart(&id));
        }
    }) as Box<dyn Fn(JsValue)>);
    set_global(window, "removeFromCart", remove_from_cart.as_ref());
    remove_from_cart.forget();

    let update_quantity = Closure::wrap(Box::new(|product_id: JsValue, quantity: JsValue| {
        if let (Some(id), Some(quantity)) = (js_to_text(&product_id), js_to_quantity(&quantity)) {
            with_storefront(|page| page.update_quantity(&id, quantity));
        }
    }) as Box<dyn Fn(JsValue, JsValue)>);
    set_global(window, "updateCartQuantity", update_quantity.as_ref());
    update_quantity.forget();

    let clear_cart = Closure::wrap(Box::new(|| {
        with_storefront(|page| page.clear_cart());
    }) as Box<dyn Fn()>);
    set_global(window, "clearCart", clear_cart.as_ref());
    clear_cart.forget();

    let get_cart = Closure::wrap(Box::new(|| {
        with_storefront(|page| page.get_cart())
            .and_then(|cart| serde_wasm_bindgen::to_value(&cart).ok())
            .unwrap_or_else(|| js_sys::Array::new().into())
    }) as Box<dyn Fn() -> JsValue>);
    set_global(window, "getCart", get_cart.as_ref());
    get_cart.forget();

    let total_quantity = Closure::wrap(Box::new(|| {
        with_storefront(|page| page.total_quantity()).unwrap_or(0)
    }) as Box<dyn Fn() -> u32>);
    set_global(window, "cartTotalQuantity", total_quantity.as_ref());
    total_quantity.forget();

    let download = Closure::wrap(Box::new(download_logs) as Box<dyn Fn()>);
    set_global(window, "downloadLogs", download.as_ref());
    download.forget();
}
