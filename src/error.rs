use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("OCR実行エラー: {0}")]
    Recognition(String),

    #[error("ジオコーディングエラー: {0}")]
    Geocode(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ocr_address_common::Error),
}

pub type Result<T> = std::result::Result<T, AddressMapError>;
