//! ジオコーディング結果の型とレスポンスパーサー
//!
//! 住所1行ごとに結果（座標・候補なし・失敗）を記録し、
//! 座標が得られた行だけをFeatureCollectionに変換する。
//! 通信そのものはCLI（reqwest）とWeb（fetch）がそれぞれ実装する。

use crate::error::{Error, Result};
use crate::geojson::{Coordinate, Feature, FeatureCollection};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Nominatim検索API
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// 検索候補（Nominatimは緯度経度を文字列で返す）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl GeocodeCandidate {
    pub fn coordinate(&self) -> Result<Coordinate> {
        let lat = parse_degree(&self.lat)?;
        let lon = parse_degree(&self.lon)?;
        Ok(Coordinate::new(lat, lon))
    }
}

fn parse_degree(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Parse(format!("座標が数値ではありません: {:?}", value)))
}

/// 検索URLを組み立てる（`format=json&q=<住所>`）
///
/// # Examples
/// ```
/// use ocr_address_common::geocode::{search_url, NOMINATIM_SEARCH_URL};
///
/// let url = search_url(NOMINATIM_SEARCH_URL, "東京都");
/// assert_eq!(
///     url,
///     "https://nominatim.openstreetmap.org/search?format=json&q=%E6%9D%B1%E4%BA%AC%E9%83%BD"
/// );
/// ```
pub fn search_url(base_url: &str, address: &str) -> String {
    format!("{}?format=json&q={}", base_url, urlencoding::encode(address))
}

/// 検索レスポンス（候補の配列）をパース
pub fn parse_search_response(body: &str) -> Result<Vec<GeocodeCandidate>> {
    serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("ジオコーディング応答のパースに失敗: {}", e)))
}

/// 住所1行分の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GeocodeOutcome {
    /// 先頭候補の座標
    Located(Coordinate),
    /// 候補0件（エラーではない）
    NoCandidates,
    /// 通信失敗など
    Failed { reason: String },
}

impl GeocodeOutcome {
    /// 候補一覧から結果を決める（先頭候補のみ使用）
    pub fn from_candidates(candidates: &[GeocodeCandidate]) -> Self {
        match candidates.first() {
            None => GeocodeOutcome::NoCandidates,
            Some(first) => match first.coordinate() {
                Ok(coordinate) => GeocodeOutcome::Located(coordinate),
                Err(e) => GeocodeOutcome::failed(e),
            },
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        GeocodeOutcome::Failed {
            reason: reason.to_string(),
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            GeocodeOutcome::Located(c) => Some(*c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeEntry {
    /// 住所行の位置（1始まり）
    pub index: usize,
    pub address: String,
    pub outcome: GeocodeOutcome,
}

/// 住所行ごとの結果一覧
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeReport {
    pub entries: Vec<GeocodeEntry>,
}

impl GeocodeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 結果を追加。番号は追加順に1から振る
    pub fn push(&mut self, address: &str, outcome: GeocodeOutcome) {
        let index = self.entries.len() + 1;
        self.entries.push(GeocodeEntry {
            index,
            address: address.to_string(),
            outcome,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn located_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, GeocodeOutcome::Located(_)))
            .count()
    }

    pub fn no_candidate_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, GeocodeOutcome::NoCandidates))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, GeocodeOutcome::Failed { .. }))
            .count()
    }

    /// 座標が得られた行だけをフィーチャー化する
    ///
    /// ラベルの番号は出力順ではなく元の行番号（欠番あり）。
    pub fn feature_collection(&self, label_prefix: &str) -> FeatureCollection {
        let features = self
            .entries
            .iter()
            .filter_map(|entry| {
                entry.outcome.coordinate().map(|coordinate| {
                    Feature::destination(label_prefix, entry.index, &entry.address, coordinate)
                })
            })
            .collect();
        FeatureCollection::new(features)
    }
}

/// 住所を1件ずつ問い合わせて結果一覧を作る
///
/// 前の応答を待ってから次の住所へ進む。失敗した行も結果に残して続行する。
///
/// `on_entry` - (追加された結果, 全件数)
pub async fn geocode_in_order<A, S, Fut, E>(
    addresses: &[A],
    mut search: S,
    mut on_entry: impl FnMut(&GeocodeEntry, usize),
) -> GeocodeReport
where
    A: AsRef<str>,
    S: FnMut(String) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<GeocodeCandidate>, E>>,
    E: std::fmt::Display,
{
    let total = addresses.len();
    let mut report = GeocodeReport::new();

    for address in addresses {
        let address = address.as_ref();
        let outcome = match search(address.to_string()).await {
            Ok(candidates) => GeocodeOutcome::from_candidates(&candidates),
            Err(e) => GeocodeOutcome::failed(e),
        };

        report.push(address, outcome);
        if let Some(entry) = report.entries.last() {
            on_entry(entry, total);
        }
    }

    report
}
