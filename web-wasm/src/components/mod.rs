pub mod export_button;
pub mod header;
pub mod map_links;
pub mod ocr_button;
pub mod ocr_result;
pub mod upload_area;
