//! Googleマップ検索リンク
//!
//! 表示のたびにテキストから住所行を抽出し直す。

use leptos::prelude::*;
use ocr_address_common::{map_links, GOOGLE_MAPS_SEARCH_URL};

#[component]
pub fn MapLinks(text: Signal<String>) -> impl IntoView {
    let links = move || map_links(&text.get(), GOOGLE_MAPS_SEARCH_URL);

    view! {
        <div class="map-links">
            <h3>"📍 Googleマップで表示"</h3>
            <For
                each=move || links().into_iter().enumerate()
                key=|(index, link)| (*index, link.url.clone())
                children=move |(_, link)| {
                    view! {
                        <div class="map-link">
                            <a href=link.url target="_blank" rel="noopener noreferrer">
                                {link.address}
                            </a>
                        </div>
                    }
                }
            />
        </div>
    }
}
