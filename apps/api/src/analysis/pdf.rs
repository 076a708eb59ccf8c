use bytes::Bytes;

use crate::errors::AppError;

/// Extracts plain text from an in-memory PDF.
pub fn extract_text(data: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))
}

/// Runs extraction on the blocking pool; parser panics surface as errors.
pub async fn extract_text_blocking(data: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_text(&data))
        .await
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?
}
