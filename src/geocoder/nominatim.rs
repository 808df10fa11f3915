//! Nominatim検索API
//!
//! `GET <base>?format=json&q=<住所>` を1回送り、候補配列を返す。

use super::Geocoder;
use crate::config::Config;
use crate::error::{AddressMapError, Result};
use async_trait::async_trait;
use ocr_address_common::geocode::{parse_search_response, search_url};
use ocr_address_common::GeocodeCandidate;
use reqwest::Client;
use std::time::Duration;

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AddressMapError::Geocode(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.geocoder_url,
            &config.user_agent,
            config.timeout_seconds.map(Duration::from_secs),
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        let url = search_url(&self.base_url, address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AddressMapError::Geocode(format!("リクエスト失敗: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AddressMapError::Geocode(format!("API error: {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AddressMapError::Geocode(format!("応答の読み込み失敗: {}", e)))?;

        Ok(parse_search_response(&body)?)
    }
}
