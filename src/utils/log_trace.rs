//! 時系列トレースログ
//! ページ上の操作（カート更新、トースト表示、メニュー操作）を記録し、後から確認できるようにする

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "page", "cart", "toast", "menu", "config"
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Default)]
pub struct LogTrace {
    logs: VecDeque<LogEntry>,
}

impl LogTrace {
    pub fn new() -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = LogEntry {
            timestamp: now_iso(),
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        write_console(&entry);

        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn info(&mut self, category: &str, message: &str) {
        self.log(LogLevel::Info, category, message, None);
    }

    pub fn warn(&mut self, category: &str, message: &str) {
        self.log(LogLevel::Warn, category, message, None);
    }

    pub fn warn_with_data(&mut self, category: &str, message: &str, data: serde_json::Value) {
        self.log(LogLevel::Warn, category, message, Some(data));
    }

    pub fn error(&mut self, category: &str, message: &str) {
        self.log(LogLevel::Error, category, message, None);
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_iso() -> String {
    String::new()
}

// コンソールにも出力
#[cfg(target_arch = "wasm32")]
fn write_console(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from(format!("[{}] {}", entry.category, entry.message));
    match entry.level {
        LogLevel::Error => web_sys::console::error_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Info => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_entry: &LogEntry) {}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().info(category, message);
    });
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().warn(category, message);
    });
}

pub fn log_warn_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().warn_with_data(category, message, data);
    });
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().error(category, message);
    });
}

pub fn get_logs() -> Vec<LogEntry> {
    LOG_TRACE.with(|trace| trace.borrow().get_logs())
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().get_logs_json())
}

/// ログをJSONファイルとしてダウンロード
pub fn download_logs() {
    use wasm_bindgen::{JsCast, JsValue};

    let json_str = get_logs_json();
    let timestamp = now_iso();
    let filename = format!("rootreach_log_{}.json", timestamp.replace([':', '.'], "-"));

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(&json_str));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");

    if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options) {
        if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
            if let Ok(a) = document.create_element("a") {
                let _ = a.set_attribute("href", &url);
                let _ = a.set_attribute("download", &filename);
                if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                    element.click();
                }
            }
            let _ = web_sys::Url::revoke_object_url(&url);
        }
    }
}
