//! GeoJSON生成ボタン

use leptos::prelude::*;

#[component]
pub fn ExportButton<F>(progress: ReadSignal<Option<(usize, usize)>>, on_export: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <button class="btn btn-success" on:click=move |_| on_export(())>
            "🗺 GeoJSONを生成してダウンロード"
        </button>

        <Show when=move || progress.get().is_some()>
            <p class="progress-text">
                {move || progress.get().map(|(done, total)| progress_label(done, total)).unwrap_or_default()}
            </p>
        </Show>
    }
}

pub fn progress_label(done: usize, total: usize) -> String {
    if total == 0 {
        "住所が見つかりません".to_string()
    } else {
        format!("ジオコーディング中... {}/{}", done, total)
    }
}
