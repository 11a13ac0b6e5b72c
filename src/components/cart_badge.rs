//! カート件数バッジ
//!
//! ヘッダーの `cart-count` 要素に件数を書き込む。0件なら非表示。

use wasm_bindgen::JsCast;

/// バッジの表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeState {
    pub text: String,
    pub visible: bool,
}

impl BadgeState {
    pub fn for_count(count: usize) -> Self {
        Self {
            text: count.to_string(),
            visible: count > 0,
        }
    }

    /// style.display に設定する値
    pub fn display_value(&self) -> &'static str {
        if self.visible { "inline" } else { "none" }
    }
}

/// 件数の表示先
pub trait CountDisplay {
    fn render(&self, state: &BadgeState);
}

// 要素がないページでは何もしない
impl<D: CountDisplay> CountDisplay for Option<D> {
    fn render(&self, state: &BadgeState) {
        if let Some(display) = self {
            display.render(state);
        }
    }
}

pub struct HtmlCountDisplay {
    element: web_sys::HtmlElement,
}

impl HtmlCountDisplay {
    pub fn find(document: &web_sys::Document, id: &str) -> Option<Self> {
        let element = document.get_element_by_id(id)?.dyn_into::<web_sys::HtmlElement>().ok()?;
        Some(Self { element })
    }
}

impl CountDisplay for HtmlCountDisplay {
    fn render(&self, state: &BadgeState) {
        self.element.set_text_content(Some(&state.text));
        let _ = self.element.style().set_property("display", state.display_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_hides_badge() {
        let state = BadgeState::for_count(0);
        assert!(!state.visible);
        assert_eq!(state.display_value(), "none");
    }

    #[test]
    fn non_empty_cart_shows_length() {
        for count in [1usize, 3, 27] {
            let state = BadgeState::for_count(count);
            assert!(state.visible);
            assert_eq!(state.display_value(), "inline");
            assert_eq!(state.text, count.to_string());
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn element_text_and_display_follow_count() {
        let document = web_sys::window().unwrap().document().unwrap();
        let badge = document.create_element("span").unwrap();
        badge.set_id("cart-count");
        document.body().unwrap().append_child(&badge).unwrap();

        let display = HtmlCountDisplay::find(&document, "cart-count").unwrap();
        let style = badge.dyn_ref::<web_sys::HtmlElement>().unwrap().style();

        display.render(&BadgeState::for_count(0));
        assert_eq!(badge.text_content().as_deref(), Some("0"));
        assert_eq!(style.get_property_value("display").unwrap(), "none");

        display.render(&BadgeState::for_count(2));
        assert_eq!(badge.text_content().as_deref(), Some("2"));
        assert_eq!(style.get_property_value("display").unwrap(), "inline");
    }

    #[wasm_bindgen_test]
    fn missing_element_is_not_bound() {
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(HtmlCountDisplay::find(&document, "no-such-badge").is_none());
    }
}
