mod nominatim;

pub use nominatim::NominatimGeocoder;

use crate::error::Result;
use async_trait::async_trait;
use ocr_address_common::{geocode_in_order, GeocodeCandidate, GeocodeOutcome, GeocodeReport};

/// 住所文字列から候補を検索する
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, address: &str) -> Result<Vec<GeocodeCandidate>>;
}

/// 住所を順番にジオコーディング
///
/// 外部サービスへの問い合わせは常に1件ずつ（前の応答を待ってから次へ）。
/// 失敗した行はログに残して次の行へ進む。
///
/// `on_progress` - (処理済み件数, 全件数, 住所)
pub async fn geocode_addresses<G>(
    geocoder: &G,
    addresses: &[&str],
    on_progress: impl Fn(usize, usize, &str),
) -> GeocodeReport
where
    G: Geocoder + ?Sized,
{
    geocode_in_order(
        addresses,
        move |address| async move { geocoder.search(&address).await },
        |entry, total| {
            let address = entry.address.as_str();
            match &entry.outcome {
                GeocodeOutcome::Located(c) => {
                    tracing::debug!(address = %address, lat = c.lat, lon = c.lon, "座標取得");
                }
                GeocodeOutcome::NoCandidates => {
                    tracing::info!(address = %address, "候補なし");
                }
                GeocodeOutcome::Failed { reason } => {
                    tracing::warn!(address = %address, error = %reason, "住所のジオコーディング失敗");
                }
            }

            on_progress(entry.index, total, address);
        },
    )
    .await
}
