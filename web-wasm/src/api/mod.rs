pub mod nominatim;
pub mod tesseract;
