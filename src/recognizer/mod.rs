mod tesseract_cli;

pub use tesseract_cli::TesseractCli;

use crate::error::Result;
use async_trait::async_trait;
use ocr_address_common::UploadedImage;

/// 画像からテキストを抽出するOCRエンジン
///
/// 1回の呼び出しで1枚を処理し、終了時にエンジンを解放する。
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image: &UploadedImage) -> Result<String>;
}
