use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ocr-address")]
#[command(about = "写真から住所を読み取り、GeoJSONとマップリンクを生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像からテキストを抽出（OCR）
    Ocr {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力テキストファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// テキストから住所行を抽出
    Extract {
        /// OCRテキストファイル（"-" で標準入力）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 住所行ごとにGoogleマップ検索リンクを出力
    Links {
        /// OCRテキストファイル（"-" で標準入力）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 住所行をジオコーディングしてGeoJSONを出力
    Geocode {
        /// OCRテキストファイル（"-" で標準入力）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: ./destinations.geojson）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 住所ごとの結果をJSONで保存
        #[arg(long)]
        report: Option<PathBuf>,

        /// フィーチャー名のプレフィックス（デフォルト: 目的地）
        #[arg(long)]
        label_prefix: Option<String>,
    },

    /// OCRからGeoJSON出力まで一括実行
    Run {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 住所ごとの結果をJSONで保存
        #[arg(long)]
        report: Option<PathBuf>,

        /// フィーチャー名のプレフィックス
        #[arg(long)]
        label_prefix: Option<String>,

        /// マップリンクも表示
        #[arg(long)]
        links: bool,
    },

    /// 設定を表示/編集
    Config {
        /// ジオコーディング時のUser-Agentを設定
        #[arg(long)]
        set_user_agent: Option<String>,

        /// OCR言語を設定（例: jpn+eng）
        #[arg(long)]
        set_languages: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
