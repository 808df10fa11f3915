//! マップ検索リンク
//!
//! 住所行ごとにGoogleマップの検索URLを作る。毎回テキストから住所行を
//! 抽出し直すので、エクスポートと同じ行が並ぶ。

use crate::address::extract_address_lines;
use serde::{Deserialize, Serialize};

/// Googleマップ検索（`query` に住所を渡す）
pub const GOOGLE_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLink {
    pub address: String,
    pub url: String,
}

pub fn map_search_url(base_url: &str, address: &str) -> String {
    format!("{}{}", base_url, urlencoding::encode(address))
}

/// テキスト中の住所行ごとにリンクを作る
pub fn map_links(text: &str, base_url: &str) -> Vec<MapLink> {
    extract_address_lines(text)
        .into_iter()
        .map(|address| MapLink {
            address: address.to_string(),
            url: map_search_url(base_url, address),
        })
        .collect()
}
