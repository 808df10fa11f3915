//! GeoJSON出力モデル
//!
//! 目的地ごとのPointフィーチャーをFeatureCollectionにまとめる。
//! 座標は経度・緯度の順（GeoJSONの規約）。

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// ダウンロード時のファイル名
pub const OUTPUT_FILE_NAME: &str = "destinations.geojson";

/// ラベルの既定プレフィックス（"目的地1", "目的地2", ...）
pub const DEFAULT_LABEL_PREFIX: &str = "目的地";

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
}

impl Geometry {
    /// `[lon, lat]` の順で格納する
    pub fn point(coordinate: Coordinate) -> Self {
        Geometry::Point {
            coordinates: [coordinate.lon, coordinate.lat],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

impl Feature {
    /// `index` は元の住所行の位置（1始まり）
    pub fn destination(label_prefix: &str, index: usize, address: &str, coordinate: Coordinate) -> Self {
        Self {
            properties: FeatureProperties {
                name: destination_label(label_prefix, index),
                address: address.to_string(),
            },
            geometry: Geometry::point(coordinate),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// インデント2のJSON文字列
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn destination_label(label_prefix: &str, index: usize) -> String {
    format!("{}{}", label_prefix, index)
}
