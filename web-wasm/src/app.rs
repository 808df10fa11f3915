//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use ocr_address_common::{Session, UploadedImage, DEFAULT_LABEL_PREFIX, OUTPUT_FILE_NAME};
use wasm_bindgen_futures::spawn_local;

use crate::api::nominatim::geocode_addresses;
use crate::api::tesseract::{js_error_message, recognize_text};
use crate::components::{
    export_button::ExportButton,
    header::Header,
    map_links::MapLinks,
    ocr_button::OcrButton,
    ocr_result::OcrResult,
    upload_area::UploadArea,
};
use crate::export::download::{download_text, GEOJSON_MIME_TYPE};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 画像・抽出テキスト・処理中フラグ
    let session = RwSignal::new(Session::new());
    let (ocr_error, set_ocr_error) = signal(None::<String>);
    let (export_progress, set_export_progress) = signal(None::<(usize, usize)>);

    let preview = move || session.with(|s| s.image().map(|img| img.data_url.clone()));
    let text = Signal::derive(move || session.with(|s| s.text().to_string()));
    let is_busy = Signal::derive(move || session.with(|s| s.is_busy()));
    let has_text = move || session.with(|s| s.can_export());

    // 画像選択ハンドラ
    let on_image_selected = move |image: UploadedImage| {
        session.update(|s| s.select_image(Some(image)));
    };

    // OCR実行ハンドラ
    let on_ocr = move |_| {
        // 画像なし・処理中なら何もしない
        let Some(image) = session.try_update(|s| s.begin_recognition()).flatten() else {
            return;
        };
        set_ocr_error.set(None);

        spawn_local(async move {
            let result = recognize_text(&image.data_url).await;

            // 成功・失敗どちらでも処理中フラグを解除
            if let Some(Err(e)) = session.try_update(|s| s.finish_recognition(result)) {
                gloo::console::error!("OCR失敗:", e.as_str());
                set_ocr_error.set(Some(e));
            }
        });
    };

    // GeoJSON生成ハンドラ
    let on_export = move |_| {
        let lines: Vec<String> = session.with_untracked(|s| {
            s.address_lines().into_iter().map(String::from).collect()
        });
        set_export_progress.set(Some((0, lines.len())));

        spawn_local(async move {
            let report = geocode_addresses(&lines, |done, total| {
                set_export_progress.set(Some((done, total)));
            })
            .await;

            let collection = report.feature_collection(DEFAULT_LABEL_PREFIX);
            let json = match collection.to_pretty_json() {
                Ok(json) => json,
                Err(e) => {
                    gloo::console::error!("GeoJSON生成に失敗:", e.to_string());
                    return;
                }
            };

            if let Err(e) = download_text(OUTPUT_FILE_NAME, &json, GEOJSON_MIME_TYPE) {
                gloo::console::error!("ダウンロードに失敗:", js_error_message(&e));
            }
        });
    };

    view! {
        <div class="container">
            <Header />

            <UploadArea on_image_selected=on_image_selected />

            <Show when=move || preview().is_some()>
                <img class="preview" src=move || preview().unwrap_or_default() alt="preview" />
            </Show>

            <OcrButton is_busy=is_busy error=ocr_error on_ocr=on_ocr />

            <Show when=has_text>
                <OcrResult text=text />
                <MapLinks text=text />
                <ExportButton progress=export_progress on_export=on_export />
            </Show>
        </div>
    }
}
