//! OCR Address Map Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod address;
pub mod data_url;
pub mod error;
pub mod geocode;
pub mod geojson;
pub mod links;
pub mod session;

pub use address::{extract_address_lines, filter_address_lines, is_address_line};
pub use data_url::UploadedImage;
pub use error::{Error, Result};
pub use geocode::{geocode_in_order, GeocodeCandidate, GeocodeEntry, GeocodeOutcome, GeocodeReport};
pub use geojson::{Coordinate, Feature, FeatureCollection, DEFAULT_LABEL_PREFIX, OUTPUT_FILE_NAME};
pub use links::{map_links, MapLink, GOOGLE_MAPS_SEARCH_URL};
pub use session::Session;
