//! エラー型

use thiserror::Error;

/// カート保存時のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("localStorageが利用できません")]
    Unavailable,

    #[error("カートのシリアライズ失敗: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("ストレージへの書き込み失敗: {0}")]
    Write(String),
}
