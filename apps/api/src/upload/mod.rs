//! Résumé upload validation and text extraction.
//!
//! Validation happens before any bytes are persisted: extension, size cap,
//! and PDF magic number. Extraction and AI parsing run afterwards; a failure
//! at any stage leaves the previously stored profile untouched.

pub mod handlers;

use crate::errors::AppError;

/// Upload size cap: 10 MB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Rejects anything that is not a plausible PDF within the size cap.
pub fn validate_upload(file_name: &str, data: &[u8]) -> Result<(), AppError> {
    let is_pdf_name = file_name
        .rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
        && file_name.contains('.');
    if !is_pdf_name {
        return Err(AppError::Validation(
            "Only PDF files are accepted.".to_string(),
        ));
    }

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File exceeds the {} MB upload limit.",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty.".to_string()));
    }

    if !data.starts_with(b"%PDF-") {
        return Err(AppError::Validation(
            "File does not appear to be a valid PDF.".to_string(),
        ));
    }

    Ok(())
}
