//! tesseract.js連携
//!
//! `index.html` で読み込んだグローバルの `Tesseract` を呼び出す。
//! ワーカーは1回の認識ごとに作成し、結果に関わらず終了させる。

use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// 日本語+英語
pub const OCR_LANGUAGES: &str = "jpn+eng";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Tesseract, js_name = "createWorker", catch)]
    async fn create_worker_js(langs: &str) -> Result<JsValue, JsValue>;

    /// tesseract.jsのワーカー
    pub type TesseractWorker;

    #[wasm_bindgen(method, catch)]
    async fn recognize(this: &TesseractWorker, image: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    async fn terminate(this: &TesseractWorker) -> Result<JsValue, JsValue>;
}

/// `worker.recognize()` の戻り値（`data.text` のみ使用）
#[derive(Debug, Deserialize)]
struct RecognizeResult {
    data: RecognizeData,
}

#[derive(Debug, Deserialize)]
struct RecognizeData {
    #[serde(default)]
    text: String,
}

/// Data URLの画像からテキストを抽出
pub async fn recognize_text(data_url: &str) -> Result<String, String> {
    let worker: TesseractWorker = create_worker_js(OCR_LANGUAGES)
        .await
        .map_err(|e| format!("OCRエンジンの起動に失敗: {}", js_error_message(&e)))?
        .unchecked_into();

    let result = worker.recognize(data_url).await;

    if let Err(e) = worker.terminate().await {
        gloo::console::warn!("OCRワーカーの終了に失敗:", e);
    }

    let value = result.map_err(|e| format!("文字認識に失敗: {}", js_error_message(&e)))?;
    let parsed: RecognizeResult = serde_wasm_bindgen::from_value(value)
        .map_err(|e| format!("OCR結果の読み取りに失敗: {}", e))?;

    Ok(parsed.data.text)
}

/// JSの例外をメッセージ文字列にする
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
