//! 取り込み → OCR → 住所抽出 → ジオコーディング → 出力
//!
//! セッション状態（画像・テキスト・処理中フラグ）は `Session` が持ち、
//! 各処理はこの構造体経由で読み書きする。

use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::geocoder::{geocode_addresses, Geocoder};
use crate::recognizer::Recognizer;
use ocr_address_common::{FeatureCollection, GeocodeReport, MapLink, Session, UploadedImage};
use std::path::{Path, PathBuf};

pub struct Pipeline<R, G> {
    session: Session,
    recognizer: R,
    geocoder: G,
    config: Config,
}

/// エクスポート結果
#[derive(Debug)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub collection: FeatureCollection,
    pub report: GeocodeReport,
}

impl<R: Recognizer, G: Geocoder> Pipeline<R, G> {
    pub fn new(config: Config, recognizer: R, geocoder: G) -> Self {
        Self {
            session: Session::new(),
            recognizer,
            geocoder,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn select_image(&mut self, image: Option<UploadedImage>) {
        self.session.select_image(image);
    }

    pub fn load_text(&mut self, text: impl Into<String>) {
        self.session.load_text(text);
    }

    /// OCRを実行してテキストを置き換える
    ///
    /// 画像未選択・処理中なら `Ok(None)`。失敗しても処理中フラグは解除され、
    /// 以前のテキストが残る。
    pub async fn recognize(&mut self) -> Result<Option<&str>> {
        let Some(image) = self.session.begin_recognition() else {
            return Ok(None);
        };

        let result = self.recognizer.recognize(&image).await;
        self.session.finish_recognition(result)?;

        Ok(Some(self.session.text()))
    }

    pub fn address_lines(&self) -> Vec<&str> {
        self.session.address_lines()
    }

    pub fn map_links(&self) -> Vec<MapLink> {
        self.session.map_links(&self.config.map_search_url)
    }

    pub async fn geocode(&self, on_progress: impl Fn(usize, usize, &str)) -> GeocodeReport {
        let lines = self.address_lines();
        geocode_addresses(&self.geocoder, &lines, on_progress).await
    }

    /// ジオコーディングしてGeoJSONを書き出す
    ///
    /// `output` がディレクトリなら `destinations.geojson` を作る。
    pub async fn export(
        &self,
        output: &Path,
        on_progress: impl Fn(usize, usize, &str),
    ) -> Result<ExportSummary> {
        let report = self.geocode(on_progress).await;
        let collection = report.feature_collection(&self.config.label_prefix);

        let path = export::output_path(output, &self.config.output_file_name);
        export::write_geojson(&collection, &path)?;

        Ok(ExportSummary {
            path,
            collection,
            report,
        })
    }
}
