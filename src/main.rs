use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ocr_address_common::{extract_address_lines, map_links};
use ocr_address_map::{acquisition, cli, config, export, geocoder, logging, pipeline, recognizer};
use cli::{Cli, Commands};
use config::Config;
use geocoder::NominatimGeocoder;
use pipeline::{ExportSummary, Pipeline};
use recognizer::TesseractCli;
use std::io::Read;
use std::path::{Path, PathBuf};

type CliPipeline = Pipeline<TesseractCli, NominatimGeocoder>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Ocr { image, output } => {
            let mut pipeline = build_pipeline(config)?;
            pipeline.select_image(Some(acquisition::load_image(&image)?));

            let text = pipeline.recognize().await?.unwrap_or_default();

            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("書き込みに失敗: {}", path.display()))?;
                    eprintln!("✔ テキストを保存: {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Extract { input } => {
            let text = read_text_input(&input)?;
            for line in extract_address_lines(&text) {
                println!("{}", line);
            }
        }

        Commands::Links { input } => {
            let text = read_text_input(&input)?;
            for link in map_links(&text, &config.map_search_url) {
                println!("{}\t{}", link.address, link.url);
            }
        }

        Commands::Geocode { input, output, report, label_prefix } => {
            println!("🗺 ocr-address - ジオコーディング\n");

            let text = read_text_input(&input)?;
            let mut pipeline = build_pipeline(with_label_prefix(config, label_prefix))?;
            pipeline.load_text(text);

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let summary = export_with_progress(&pipeline, &output_dir).await?;
            finish_export(&summary, report.as_deref())?;

            println!("\n✅ 完了");
        }

        Commands::Run { image, output, report, label_prefix, links } => {
            println!("🚀 ocr-address - 一括処理\n");

            // 1. 画像読み込み
            println!("[1/3] 画像を読み込み中...");
            let uploaded = acquisition::load_image(&image)?;
            println!("✔ {} ({})\n", uploaded.file_name, uploaded.mime_type());

            let mut pipeline = build_pipeline(with_label_prefix(config, label_prefix))?;
            pipeline.select_image(Some(uploaded));

            // 2. OCR
            println!("[2/3] 文字を読み取り中...");
            pipeline.recognize().await?;
            let lines = pipeline.address_lines();
            println!("✔ 読み取り完了（住所候補 {}行）\n", lines.len());

            if cli.verbose {
                for line in &lines {
                    println!("  - {}", line);
                }
            }

            if links {
                println!("📍 Googleマップで表示");
                for link in pipeline.map_links() {
                    println!("  {}\n    {}", link.address, link.url);
                }
                println!();
            }

            // 3. ジオコーディング・出力
            println!("[3/3] ジオコーディング中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let summary = export_with_progress(&pipeline, &output_dir).await?;
            finish_export(&summary, report.as_deref())?;

            println!("\n✅ 完了");
        }

        Commands::Config { set_user_agent, set_languages, show } => {
            let mut config = config;

            if let Some(user_agent) = set_user_agent {
                config.set_user_agent(user_agent)?;
                println!("✔ User-Agentを設定しました");
            }

            if let Some(languages) = set_languages {
                config.set_languages(languages)?;
                println!("✔ OCR言語を設定しました");
            }

            if show {
                println!("設定:");
                println!("  OCR言語: {}", config.ocr_languages);
                println!("  tesseract: {}", config.tesseract_command);
                println!("  ジオコーダ: {}", config.geocoder_url);
                println!("  マップ検索: {}", config.map_search_url);
                println!("  User-Agent: {}", config.user_agent);
                println!("  ラベル: {}N", config.label_prefix);
                println!("  出力ファイル名: {}", config.output_file_name);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
            }
        }
    }

    Ok(())
}

fn build_pipeline(config: Config) -> anyhow::Result<CliPipeline> {
    let recognizer = TesseractCli::from_config(&config);
    let geocoder = NominatimGeocoder::from_config(&config)?;
    Ok(Pipeline::new(config, recognizer, geocoder))
}

fn with_label_prefix(mut config: Config, label_prefix: Option<String>) -> Config {
    if let Some(prefix) = label_prefix {
        config.label_prefix = prefix;
    }
    config
}

fn read_text_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("標準入力の読み込みに失敗")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("読み込みに失敗: {}", input.display()))
}

async fn export_with_progress(pipeline: &CliPipeline, output: &Path) -> anyhow::Result<ExportSummary> {
    let total = pipeline.address_lines().len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let summary = pipeline
        .export(output, |done, _total, address| {
            pb.set_position(done as u64);
            pb.set_message(address.to_string());
        })
        .await?;
    pb.finish_and_clear();

    Ok(summary)
}

fn finish_export(summary: &ExportSummary, report_path: Option<&Path>) -> anyhow::Result<()> {
    let report = &summary.report;
    println!(
        "✔ {}行中{}行の座標を取得（候補なし{}行・失敗{}行）",
        report.len(),
        report.located_count(),
        report.no_candidate_count(),
        report.failed_count()
    );
    println!("✔ GeoJSON出力: {} ({}件)", summary.path.display(), summary.collection.len());

    if let Some(path) = report_path {
        export::write_report(report, path)?;
        println!("✔ レポート出力: {}", path.display());
    }
    Ok(())
}
