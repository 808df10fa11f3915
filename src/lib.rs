//! 写真から住所を読み取り、ジオコーディングしてGeoJSONを出力する

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod geocoder;
pub mod logging;
pub mod pipeline;
pub mod recognizer;
