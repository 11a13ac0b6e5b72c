//! UIコンポーネントモジュール

pub mod cart_badge;
pub mod menu;
pub mod toast;

pub use cart_badge::{BadgeState, CountDisplay, HtmlCountDisplay};
pub use menu::MenuController;
pub use toast::{Notifier, ToastNotifier};
