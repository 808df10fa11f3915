//! ブラウザでのファイルダウンロード
//!
//! Blobを作ってオブジェクトURLを `<a download>` でクリックする。
//! 結果の確認はしない。

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const GEOJSON_MIME_TYPE: &str = "application/json";

pub fn download_text(file_name: &str, contents: &str, mime_type: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document がありません"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use ocr_address_common::{FeatureCollection, OUTPUT_FILE_NAME};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_download_empty_feature_collection() {
        let json = FeatureCollection::default().to_pretty_json().expect("GeoJSON生成失敗");
        download_text(OUTPUT_FILE_NAME, &json, GEOJSON_MIME_TYPE).expect("ダウンロード失敗");
    }
}
