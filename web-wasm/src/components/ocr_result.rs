//! OCR結果表示

use leptos::prelude::*;

#[component]
pub fn OcrResult(text: Signal<String>) -> impl IntoView {
    view! {
        <div class="ocr-result">
            <h3>"📄 抽出結果"</h3>
            <p>{move || text.get()}</p>
        </div>
    }
}
