//! OCR実行ボタン

use leptos::prelude::*;

#[component]
pub fn OcrButton<F>(
    is_busy: Signal<bool>,
    error: ReadSignal<Option<String>>,
    on_ocr: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <button
            class="btn btn-primary"
            disabled=move || is_busy.get()
            on:click=move |_| on_ocr(())
        >
            {move || if is_busy.get() { "読み取り中…" } else { "OCR 実行" }}
        </button>

        <Show when=move || error.get().is_some()>
            <p class="error-text">{move || error.get().unwrap_or_default()}</p>
        </Show>
    }
}
