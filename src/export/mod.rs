//! GeoJSON・レポートのファイル出力

use crate::error::Result;
use ocr_address_common::{FeatureCollection, GeocodeReport};
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）ならファイル名を付ける
pub fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// FeatureCollectionを書き出す（空でも正しいGeoJSONになる）
pub fn write_geojson(collection: &FeatureCollection, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, collection.to_pretty_json()?)?;
    Ok(())
}

/// 住所ごとの結果一覧を書き出す
pub fn write_report(report: &GeocodeReport, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
