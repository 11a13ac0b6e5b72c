//! データ構造体モジュール

use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// カート
// ============================================

/// カート内の商品1件（idで一意）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self { id: id.into(), quantity }
    }
}

// テンプレートから渡される商品IDは数値のこともある
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// カート（挿入順を保持する商品リスト）
///
/// 永続化時は配列全体をJSONとして書き出す。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

// 読込時に同じidの重複（数値idと文字列idの混在など）をまとめる
impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<CartItem>::deserialize(deserializer).map(Cart::from)
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// 商品の種類数（表示用のカート件数）
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 数量の合計
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 既存なら数量+1、なければ数量1で末尾に追加。追加後の数量を返す
    pub fn add(&mut self, id: &str) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            item.quantity
        } else {
            self.items.push(CartItem::new(id, 1));
            1
        }
    }

    /// 数量を上書き（0なら削除）。対象がなければ false
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// 同じidは最初の位置に数量を合算する
impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
        for item in items {
            match merged.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => merged.push(item),
            }
        }
        Self { items: merged }
    }
}

// ============================================
// トースト通知
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

impl ToastKind {
    /// ページ側JSから渡された種別文字列を解釈（不明な値は success 扱い）
    pub fn from_type(value: Option<&str>) -> Self {
        match value {
            Some("error") => ToastKind::Error,
            _ => ToastKind::Success,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    /// 要素に付与するクラス名
    pub fn class_name(&self) -> String {
        format!("toast toast-{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_increments_existing_item() {
        let mut cart = Cart::from(vec![CartItem::new("A", 1)]);
        assert_eq!(cart.add("A"), 2);
        assert_eq!(cart.items(), &[CartItem::new("A", 2)]);
    }

    #[test]
    fn add_appends_new_item_in_order() {
        let mut cart = Cart::new();
        cart.add("B");
        cart.add("A");
        cart.add("B");
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn set_quantity_zero_removes_item() {
        let mut cart = Cart::from(vec![CartItem::new("A", 3), CartItem::new("B", 1)]);
        assert!(cart.set_quantity("A", 0));
        assert_eq!(cart.items(), &[CartItem::new("B", 1)]);
        assert!(!cart.set_quantity("missing", 4));
        assert!(cart.set_quantity("B", 7));
        assert_eq!(cart.get("B").map(|i| i.quantity), Some(7));
    }

    #[test]
    fn numeric_ids_are_read_as_strings() {
        let cart: Cart = serde_json::from_str(r#"[{"id":42,"quantity":2},{"id":"x","quantity":1}]"#)
            .unwrap();
        assert_eq!(cart.items(), &[CartItem::new("42", 2), CartItem::new("x", 1)]);
    }

    #[test]
    fn duplicate_ids_are_merged_on_read() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":1,"quantity":1},{"id":"B","quantity":2},{"id":"1","quantity":3}]"#,
        )
        .unwrap();
        assert_eq!(cart.items(), &[CartItem::new("1", 4), CartItem::new("B", 2)]);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn cart_serializes_as_plain_array() {
        let cart = Cart::from(vec![CartItem::new("A", 2)]);
        assert_eq!(serde_json::to_string(&cart).unwrap(), r#"[{"id":"A","quantity":2}]"#);
    }

    #[test]
    fn unknown_toast_type_falls_back_to_success() {
        assert_eq!(ToastKind::from_type(Some("error")), ToastKind::Error);
        assert_eq!(ToastKind::from_type(Some("warning")), ToastKind::Success);
        assert_eq!(ToastKind::from_type(None), ToastKind::Success);
        assert_eq!(ToastKind::Error.class_name(), "toast toast-error");
    }
}
