//! RootReach ストアフロント用ページスクリプト
//!
//! モバイルメニューの開閉、トースト通知、localStorage に保存するカートを扱う。

pub mod cart_store;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod page;
pub mod storefront;
pub mod utils;

pub use cart_store::CartStore;
pub use config::StorefrontConfig;
pub use error::StoreError;
pub use models::{Cart, CartItem, ToastKind};
pub use storefront::Storefront;
