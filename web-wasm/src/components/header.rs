//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h2>"📷 OCRで住所読み取り"</h2>
        </header>
    }
}
