//! パイプライン統合テスト
//!
//! OCRとジオコーダをテスト用実装に差し替えて、
//! 住所抽出 → ジオコーディング → GeoJSON出力の流れを検証

use async_trait::async_trait;
use ocr_address_common::{extract_address_lines, GeocodeCandidate, GeocodeOutcome, UploadedImage};
use ocr_address_map::config::Config;
use ocr_address_map::error::{AddressMapError, Result};
use ocr_address_map::geocoder::{geocode_addresses, Geocoder};
use ocr_address_map::pipeline::Pipeline;
use ocr_address_map::recognizer::Recognizer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::tempdir;

/// 固定テキストを返すOCR
struct FixedRecognizer {
    result: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl FixedRecognizer {
    fn text(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Recognizer for FixedRecognizer {
    async fn recognize(&self, _image: &UploadedImage) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(AddressMapError::Recognition)
    }
}

enum Answer {
    Found(&'static str, &'static str),
    Empty,
    NetworkError,
}

/// 住所ごとに決まった応答を返すジオコーダ
///
/// 同時に処理中のリクエスト数の最大値も記録する。
struct TableGeocoder {
    answers: HashMap<&'static str, Answer>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    queried: Mutex<Vec<String>>,
}

impl TableGeocoder {
    fn new(answers: Vec<(&'static str, Answer)>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            queried: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn search(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.queried.lock().unwrap().push(address.to_string());

        tokio::task::yield_now().await;

        let result = match self.answers.get(address) {
            Some(Answer::Found(lat, lon)) => Ok(vec![GeocodeCandidate {
                lat: lat.to_string(),
                lon: lon.to_string(),
                display_name: address.to_string(),
            }]),
            Some(Answer::Empty) | None => Ok(vec![]),
            Some(Answer::NetworkError) => Err(AddressMapError::Geocode("connection reset".into())),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn sample_image() -> UploadedImage {
    UploadedImage::from_bytes("letter.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF])
}

fn config_with_prefix(prefix: &str) -> Config {
    Config {
        label_prefix: prefix.to_string(),
        ..Config::default()
    }
}

/// シナリオA: 住所でない行は除外され、順序は保たれる
#[tokio::test]
async fn test_scenario_a_filters_lines() {
    let text = "東京都千代田区1-1\nHello\n大阪府大阪市北区2-2";
    let mut pipeline = Pipeline::new(
        Config::default(),
        FixedRecognizer::text(text),
        TableGeocoder::new(vec![]),
    );
    pipeline.select_image(Some(sample_image()));

    let recognized = pipeline.recognize().await.unwrap();
    assert_eq!(recognized, Some(text));
    assert_eq!(pipeline.address_lines(), vec!["東京都千代田区1-1", "大阪府大阪市北区2-2"]);
}

/// シナリオB: 2行目が候補なしなら、ラベルは元の行番号（1と3）
#[tokio::test]
async fn test_scenario_b_labels_use_input_position() {
    let dir = tempdir().unwrap();
    let text = "東京都千代田区1-1\n架空県幻市\n大阪府大阪市北区2-2";
    let geocoder = TableGeocoder::new(vec![
        ("東京都千代田区1-1", Answer::Found("35.6938", "139.7535")),
        ("架空県幻市", Answer::Empty),
        ("大阪府大阪市北区2-2", Answer::Found("34.7055", "135.4983")),
    ]);

    let mut pipeline = Pipeline::new(config_with_prefix("destination"), FixedRecognizer::text(text), geocoder);
    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();

    let summary = pipeline.export(dir.path(), |_, _, _| {}).await.unwrap();

    assert_eq!(summary.collection.len(), 2);
    assert_eq!(summary.collection.features[0].properties.name, "destination1");
    assert_eq!(summary.collection.features[1].properties.name, "destination3");
    assert_eq!(summary.report.no_candidate_count(), 1);

    let written = std::fs::read_to_string(dir.path().join("destinations.geojson")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["features"][1]["properties"]["name"], "destination3");
    assert_eq!(value["features"][1]["properties"]["address"], "大阪府大阪市北区2-2");
    assert_eq!(value["features"][0]["geometry"]["coordinates"][0], 139.7535);
    assert_eq!(value["features"][0]["geometry"]["coordinates"][1], 35.6938);
}

/// 既定のラベルは「目的地N」
#[tokio::test]
async fn test_default_label_prefix() {
    let dir = tempdir().unwrap();
    let geocoder = TableGeocoder::new(vec![("京都府京都市", Answer::Found("35.0116", "135.7681"))]);
    let mut pipeline = Pipeline::new(Config::default(), FixedRecognizer::text("京都府京都市"), geocoder);
    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();

    let summary = pipeline.export(dir.path(), |_, _, _| {}).await.unwrap();
    assert_eq!(summary.collection.features[0].properties.name, "目的地1");
}

/// シナリオC: 空テキストでも空のFeatureCollectionが出力される
#[tokio::test]
async fn test_scenario_c_empty_text_exports_empty_collection() {
    let dir = tempdir().unwrap();
    let mut pipeline = Pipeline::new(Config::default(), FixedRecognizer::text(""), TableGeocoder::new(vec![]));
    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();

    let summary = pipeline.export(dir.path(), |_, _, _| {}).await.unwrap();
    assert!(summary.collection.is_empty());
    assert!(summary.report.is_empty());

    let written = std::fs::read_to_string(&summary.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["features"], serde_json::json!([]));
}

/// シナリオD: 住所のない写真ではエクスポート対象が0件
#[tokio::test]
async fn test_scenario_d_no_address_lines() {
    let dir = tempdir().unwrap();
    let geocoder = TableGeocoder::new(vec![]);
    let mut pipeline = Pipeline::new(Config::default(), FixedRecognizer::text("SALE 50% OFF\nOPEN 10:00"), geocoder);

    // テキスト抽出前はエクスポートできない
    assert!(!pipeline.session().can_export());

    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();
    assert!(pipeline.session().can_export());

    let summary = pipeline.export(dir.path(), |_, _, _| {}).await.unwrap();
    assert!(summary.collection.is_empty());
    assert!(pipeline.map_links().is_empty());
}

/// 画像未選択ならOCRは何もしない
#[tokio::test]
async fn test_recognize_without_image_is_noop() {
    let recognizer = FixedRecognizer::text("東京都");
    let mut pipeline = Pipeline::new(Config::default(), recognizer, TableGeocoder::new(vec![]));

    assert_eq!(pipeline.recognize().await.unwrap(), None);
    assert!(!pipeline.session().is_busy());
    assert_eq!(pipeline.session().text(), "");
}

/// OCR失敗時もエラーが返り、処理中フラグは解除される
#[tokio::test]
async fn test_recognition_failure_resets_busy_flag() {
    let mut pipeline = Pipeline::new(
        Config::default(),
        FixedRecognizer::failing("traineddata missing"),
        TableGeocoder::new(vec![]),
    );
    pipeline.select_image(Some(sample_image()));

    let result = pipeline.recognize().await;
    assert!(matches!(result, Err(AddressMapError::Recognition(_))));
    assert!(!pipeline.session().is_busy());

    // 再実行できる（ボタンが押せないままにならない）
    let again = pipeline.recognize().await;
    assert!(again.is_err());
}

/// 通信失敗の行があっても後続の行は処理される
#[tokio::test]
async fn test_network_failure_does_not_stop_export() {
    let dir = tempdir().unwrap();
    let text = "札幌市中央区\n仙台市青葉区\n福岡市博多区";
    let geocoder = TableGeocoder::new(vec![
        ("札幌市中央区", Answer::NetworkError),
        ("仙台市青葉区", Answer::Found("38.2688", "140.8721")),
        ("福岡市博多区", Answer::Found("33.5902", "130.4207")),
    ]);
    let mut pipeline = Pipeline::new(Config::default(), FixedRecognizer::text(text), geocoder);
    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();

    let summary = pipeline.export(dir.path(), |_, _, _| {}).await.unwrap();

    assert_eq!(summary.report.failed_count(), 1);
    assert_eq!(summary.collection.len(), 2);
    assert_eq!(summary.collection.features[0].properties.name, "目的地2");
    assert_eq!(summary.collection.features[1].properties.name, "目的地3");
    assert!(matches!(summary.report.entries[0].outcome, GeocodeOutcome::Failed { .. }));
}

/// 問い合わせは入力順に1件ずつ
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_geocoding_is_sequential_and_ordered() {
    let lines = vec!["北海道札幌市", "青森県青森市", "岩手県盛岡市", "宮城県仙台市", "秋田県秋田市"];
    let geocoder = TableGeocoder::new(vec![]);

    let progress = Mutex::new(Vec::new());
    let report = geocode_addresses(&geocoder, &lines, |done, total, _| {
        progress.lock().unwrap().push((done, total));
    })
    .await;

    assert_eq!(report.len(), 5);
    assert_eq!(geocoder.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(*geocoder.queried.lock().unwrap(), lines);
    assert_eq!(*progress.lock().unwrap(), vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
}

/// フィーチャー数は住所行数以下
#[tokio::test]
async fn test_feature_count_never_exceeds_lines() {
    let dir = tempdir().unwrap();
    let text = "東京都\n神奈川県\n千葉県\n埼玉県";
    let geocoder = TableGeocoder::new(vec![
        ("東京都", Answer::Found("35.68", "139.69")),
        ("神奈川県", Answer::Empty),
        ("千葉県", Answer::NetworkError),
        ("埼玉県", Answer::Found("35.85", "139.64")),
    ]);
    let mut pipeline = Pipeline::new(Config::default(), FixedRecognizer::text(text), geocoder);
    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();

    let summary = pipeline.export(dir.path(), |_, _, _| {}).await.unwrap();
    assert!(summary.collection.len() <= extract_address_lines(text).len());
    assert_eq!(summary.report.len(), 4);
}

/// マップリンクとエクスポートは同じ住所行を使う
#[tokio::test]
async fn test_links_match_export_lines() {
    let text = "広島県広島市中区\nmemo\n愛媛県松山市";
    let mut pipeline = Pipeline::new(Config::default(), FixedRecognizer::text(text), TableGeocoder::new(vec![]));
    pipeline.select_image(Some(sample_image()));
    pipeline.recognize().await.unwrap();

    let link_addresses: Vec<String> = pipeline.map_links().into_iter().map(|l| l.address).collect();
    assert_eq!(link_addresses, pipeline.address_lines());

    let report = pipeline.geocode(|_, _, _| {}).await;
    let report_addresses: Vec<String> = report.entries.into_iter().map(|e| e.address).collect();
    assert_eq!(report_addresses, link_addresses);
}
