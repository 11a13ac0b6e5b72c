//! ユーティリティモジュール

pub mod log_trace;
pub mod storage;

pub use storage::{KeyValueStore, LocalStorage, MemoryStore};
