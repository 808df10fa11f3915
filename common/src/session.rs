//! セッション状態
//!
//! 画像・抽出テキスト・処理中フラグの3つをまとめて持つ。
//! OCR中フラグは成功・失敗どちらでも必ず解除する。

use crate::address::extract_address_lines;
use crate::data_url::UploadedImage;
use crate::links::{map_links, MapLink};

#[derive(Debug, Clone, Default)]
pub struct Session {
    image: Option<UploadedImage>,
    text: String,
    busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// 画像を差し替える。未選択（None）なら何もしない
    pub fn select_image(&mut self, image: Option<UploadedImage>) {
        if let Some(image) = image {
            self.image = Some(image);
        }
    }

    /// OCR開始。画像がない・処理中なら None を返して何もしない
    pub fn begin_recognition(&mut self) -> Option<UploadedImage> {
        if self.busy {
            return None;
        }
        let image = self.image.clone()?;
        self.busy = true;
        Some(image)
    }

    /// OCR終了。結果に関わらず処理中フラグを解除し、成功時のみテキストを置き換える
    pub fn finish_recognition<E>(&mut self, result: Result<String, E>) -> Result<(), E> {
        self.busy = false;
        self.text = result?;
        Ok(())
    }

    /// 抽出済みテキストを直接読み込む（保存済みのOCR結果など）
    pub fn load_text(&mut self, text: impl Into<String>) {
        if !self.busy {
            self.text = text.into();
        }
    }

    /// エクスポートはテキスト抽出後のみ
    pub fn can_export(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn address_lines(&self) -> Vec<&str> {
        extract_address_lines(&self.text)
    }

    pub fn map_links(&self, base_url: &str) -> Vec<MapLink> {
        map_links(&self.text, base_url)
    }
}
