//! Data URL変換
//!
//! 選択された画像は `data:<mime>;base64,<payload>` 形式で保持する。
//! プレビュー表示とOCRへの受け渡しに同じ文字列を使う。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// 選択中の画像（セッション内のみ保持）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    pub data_url: String,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            data_url: data_url.into(),
        }
    }

    pub fn from_bytes(file_name: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        Self::new(file_name, encode_data_url(mime_type, bytes))
    }

    pub fn mime_type(&self) -> &str {
        extract_mime_type(&self.data_url)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_data_url(&self.data_url)
    }
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
}

/// Data URLからMIMEタイプを抽出（不明なら "image/jpeg"）
pub fn extract_mime_type(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or("image/jpeg")
}

pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let payload = extract_base64(data_url)
        .ok_or_else(|| Error::DataUrl("base64形式のData URLではありません".into()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| Error::DataUrl(format!("base64デコード失敗: {}", e)))
}
