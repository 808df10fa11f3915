//! tesseract CLI連携モジュール
//!
//! 画像バイト列を標準入力で渡し、標準出力からテキストを受け取る。
//! `tesseract stdin stdout -l jpn+eng`

use super::Recognizer;
use crate::config::Config;
use crate::error::{AddressMapError, Result};
use async_trait::async_trait;
use ocr_address_common::UploadedImage;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    languages: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, languages: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            languages: languages.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.tesseract_command, &config.ocr_languages)
    }

    pub fn args(&self) -> Vec<&str> {
        vec!["stdin", "stdout", "-l", self.languages.as_str()]
    }
}

#[async_trait]
impl Recognizer for TesseractCli {
    async fn recognize(&self, image: &UploadedImage) -> Result<String> {
        let bytes = image.decode()?;

        tracing::info!(
            file = %image.file_name,
            bytes = bytes.len(),
            languages = %self.languages,
            "OCR開始"
        );

        // 失敗時もプロセスを残さない
        let mut child = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AddressMapError::Recognition(format!(
                    "{} を起動できません（インストールされていますか？）: {}",
                    self.command, e
                ))
            })?;

        // 言語データの読み込みに失敗すると入力を読まずに終了するため、
        // 書き込みエラーは終了コードを確認するまで保留する
        let write_error = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&bytes).await.err(),
            None => None,
        };

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AddressMapError::Recognition(format!("OCR待機エラー: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AddressMapError::Recognition(format!(
                "{} failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        if let Some(e) = write_error {
            return Err(AddressMapError::Recognition(format!("画像の受け渡しに失敗: {}", e)));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        tracing::info!(chars = text.chars().count(), "OCR完了");
        Ok(text)
    }
}
