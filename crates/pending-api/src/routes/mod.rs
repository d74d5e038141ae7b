//! Route modules for the API server
//!
//! - upload: upload form, result page and JSON processing
//! - download: stored workbook downloads
//! - settings: configuration display

pub mod download;
pub mod settings;
pub mod upload;
