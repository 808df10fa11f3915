//! 画像の取り込み
//!
//! ファイルを読み込んでData URLに変換する。CLIにはファイル選択の
//! MIMEフィルタがないため、先頭バイトから画像形式を判定する。

use crate::error::{AddressMapError, Result};
use ocr_address_common::UploadedImage;
use std::path::Path;

pub fn load_image(path: &Path) -> Result<UploadedImage> {
    if !path.is_file() {
        return Err(AddressMapError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes).map_err(|e| {
        AddressMapError::ImageLoad(format!("{}: 画像形式を判定できません ({})", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(UploadedImage::from_bytes(file_name, format.to_mime_type(), &bytes))
}
