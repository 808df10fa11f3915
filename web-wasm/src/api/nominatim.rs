//! Nominatim検索（fetch）
//!
//! 住所を1件ずつ問い合わせ、前の応答を待ってから次へ進む。

use ocr_address_common::geocode::{parse_search_response, search_url, NOMINATIM_SEARCH_URL};
use ocr_address_common::{geocode_in_order, GeocodeCandidate, GeocodeOutcome, GeocodeReport};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::tesseract::js_error_message;

/// 1件の住所を検索
async fn search(address: &str) -> Result<Vec<GeocodeCandidate>, JsValue> {
    let url = search_url(NOMINATIM_SEARCH_URL, address);

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(&url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    let body = JsFuture::from(resp.text()?).await?;
    let body = body.as_string().unwrap_or_default();

    parse_search_response(&body).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// 住所を順番にジオコーディング
///
/// 失敗した行はコンソールに記録して次の行へ進む。
pub async fn geocode_addresses(
    addresses: &[String],
    on_progress: impl Fn(usize, usize),
) -> GeocodeReport {
    geocode_in_order(
        addresses,
        |address| async move { search(&address).await.map_err(|e| js_error_message(&e)) },
        |entry, total| {
            if let GeocodeOutcome::Failed { reason } = &entry.outcome {
                gloo::console::error!(
                    "住所のジオコーディング失敗:",
                    entry.address.as_str(),
                    reason.as_str()
                );
            }
            on_progress(entry.index, total);
        },
    )
    .await
}
