//! カートの永続化
//!
//! カートは1つのキーにJSON配列として丸ごと保存する。読込時にデータが無い・壊れている
//! 場合は空のカートとして扱い、呼び出し側にはエラーを返さない。
//! 書き込みは毎回全体の上書きで、別タブとの同時更新は後勝ちになる。

use crate::error::StoreError;
use crate::models::Cart;
use crate::utils::log_trace::{log_info, log_warn_with_data};
use crate::utils::storage::KeyValueStore;

const RAW_PREVIEW_CHARS: usize = 200;

pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 保存済みカートを読み込む
    pub fn get_cart(&self) -> Cart {
        let Some(raw) = self.storage.get(&self.key) else {
            return Cart::new();
        };
        // JSONの null も空カート扱い
        match serde_json::from_str::<Option<Cart>>(&raw) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                let preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
                log_warn_with_data(
                    "cart",
                    &format!("カートデータが壊れているため空として扱います: {}", e),
                    serde_json::json!({ "key": self.key, "raw": preview }),
                );
                Cart::new()
            }
        }
    }

    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let json = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &json)
    }

    /// 商品を1つ追加して保存
    pub fn add(&self, id: &str) -> Result<Cart, StoreError> {
        let mut cart = self.get_cart();
        let quantity = cart.add(id);
        self.save(&cart)?;
        log_info("cart", &format!("追加: {} (数量 {})", id, quantity));
        Ok(cart)
    }

    /// 数量を変更して保存（0なら削除）
    pub fn update_quantity(&self, id: &str, quantity: u32) -> Result<Cart, StoreError> {
        let mut cart = self.get_cart();
        if cart.set_quantity(id, quantity) {
            self.save(&cart)?;
            log_info("cart", &format!("数量変更: {} -> {}", id, quantity));
        }
        Ok(cart)
    }

    pub fn remove(&self, id: &str) -> Result<Cart, StoreError> {
        let mut cart = self.get_cart();
        if cart.remove(id) {
            self.save(&cart)?;
            log_info("cart", &format!("削除: {}", id));
        }
        Ok(cart)
    }

    pub fn clear(&self) -> Result<Cart, StoreError> {
        let cart = Cart::new();
        self.save(&cart)?;
        log_info("cart", "カートを空にしました");
        Ok(cart)
    }

    /// 表示用の件数（商品の種類数）
    pub fn count(&self) -> usize {
        self.get_cart().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartItem;
    use crate::utils::log_trace::{get_logs, LogLevel};
    use crate::utils::storage::MemoryStore;

    const KEY: &str = "rootreachCart";

    fn store_with(raw: &str) -> CartStore<MemoryStore> {
        CartStore::new(MemoryStore::with_entry(KEY, raw), KEY)
    }

    #[test]
    fn add_increments_existing_item() {
        let store = store_with(r#"[{"id":"A","quantity":1}]"#);
        let cart = store.add("A").unwrap();
        assert_eq!(cart.items(), &[CartItem::new("A", 2)]);
        assert_eq!(store.get_cart(), cart);
    }

    #[test]
    fn add_appends_new_item_to_empty_cart() {
        let store = store_with("[]");
        store.add("B").unwrap();
        assert_eq!(store.get_cart().items(), &[CartItem::new("B", 1)]);
    }

    #[test]
    fn missing_key_reads_as_empty_cart() {
        let store = CartStore::new(MemoryStore::new(), KEY);
        assert!(store.get_cart().is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn malformed_data_reads_as_empty_cart() {
        let store = store_with("not-json");
        assert!(store.get_cart().is_empty());

        let logs = get_logs();
        assert!(logs
            .iter()
            .any(|e| e.level == LogLevel::Warn && e.category == "cart"));
    }

    #[test]
    fn json_null_reads_as_empty_cart() {
        assert!(store_with("null").get_cart().is_empty());
    }

    #[test]
    fn wrong_shape_reads_as_empty_cart() {
        assert!(store_with(r#"{"id":"A","quantity":1}"#).get_cart().is_empty());
        assert!(store_with(r#"[{"id":"A","quantity":-1}]"#).get_cart().is_empty());
    }

    #[test]
    fn add_after_malformed_data_starts_fresh() {
        let store = store_with("not-json");
        let cart = store.add("A").unwrap();
        assert_eq!(cart.items(), &[CartItem::new("A", 1)]);
        assert_eq!(
            store.storage.get(KEY).as_deref(),
            Some(r#"[{"id":"A","quantity":1}]"#)
        );
    }

    #[test]
    fn mixed_numeric_and_string_ids_share_one_item() {
        let store = store_with(r#"[{"id":1,"quantity":1},{"id":"1","quantity":1}]"#);
        let cart = store.add("1").unwrap();
        assert_eq!(cart.items(), &[CartItem::new("1", 3)]);
        assert_eq!(store.count(), 1);
        assert_eq!(
            store.storage.get(KEY).as_deref(),
            Some(r#"[{"id":"1","quantity":3}]"#)
        );
    }

    #[test]
    fn update_quantity_and_remove() {
        let store = store_with(r#"[{"id":"A","quantity":1},{"id":"B","quantity":2}]"#);
        store.update_quantity("A", 5).unwrap();
        assert_eq!(store.get_cart().get("A").map(|i| i.quantity), Some(5));

        store.update_quantity("B", 0).unwrap();
        assert_eq!(store.count(), 1);

        store.remove("A").unwrap();
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn unknown_id_leaves_storage_untouched() {
        let raw = r#"[{"id":"A","quantity":1}]"#;
        let store = store_with(raw);
        store.remove("Z").unwrap();
        store.update_quantity("Z", 3).unwrap();
        assert_eq!(store.storage.get(KEY).as_deref(), Some(raw));
    }

    #[test]
    fn clear_persists_empty_array() {
        let store = store_with(r#"[{"id":"A","quantity":4}]"#);
        store.clear().unwrap();
        assert_eq!(store.storage.get(KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn write_failure_is_reported() {
        let store = CartStore::new(MemoryStore::read_only(), KEY);
        assert!(matches!(store.add("A"), Err(StoreError::Write(_))));
        assert!(store.get_cart().is_empty());
    }
}
