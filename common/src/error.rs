//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Data URL error: {0}")]
    DataUrl(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
