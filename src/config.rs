use crate::error::{AddressMapError, Result};
use ocr_address_common::geocode::NOMINATIM_SEARCH_URL;
use ocr_address_common::{DEFAULT_LABEL_PREFIX, GOOGLE_MAPS_SEARCH_URL, OUTPUT_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tesseractの言語指定
    pub ocr_languages: String,
    pub tesseract_command: String,
    pub geocoder_url: String,
    pub map_search_url: String,
    /// Nominatimは匿名クライアントを拒否する
    pub user_agent: String,
    pub label_prefix: String,
    pub output_file_name: String,
    /// 未設定ならタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr_languages: "jpn+eng".into(),
            tesseract_command: "tesseract".into(),
            geocoder_url: NOMINATIM_SEARCH_URL.into(),
            map_search_url: GOOGLE_MAPS_SEARCH_URL.into(),
            user_agent: concat!("ocr-address-map/", env!("CARGO_PKG_VERSION")).into(),
            label_prefix: DEFAULT_LABEL_PREFIX.into(),
            output_file_name: OUTPUT_FILE_NAME.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AddressMapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ocr-address").join("config.json"))
    }

    pub fn set_user_agent(&mut self, user_agent: String) -> Result<()> {
        if user_agent.trim().is_empty() {
            return Err(AddressMapError::Config("User-Agentが空です".into()));
        }
        self.user_agent = user_agent;
        self.save()
    }

    pub fn set_languages(&mut self, languages: String) -> Result<()> {
        if languages.trim().is_empty() {
            return Err(AddressMapError::Config("OCR言語が空です".into()));
        }
        self.ocr_languages = languages;
        self.save()
    }
}
