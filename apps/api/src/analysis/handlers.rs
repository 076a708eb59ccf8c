//! Axum route handlers for the Analysis API.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::extractor::extract_skills;
use crate::analysis::pdf::extract_text_blocking;
use crate::analysis::structured::{analyze_resume, ResumeAnalysis};
use crate::errors::{AppError, RESUME_TEXT_REQUIRED};
use crate::state::AppState;

/// Multipart field carrying the uploaded resume.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub skills: String,
}

#[derive(Debug, Serialize)]
pub struct UploadAnalyzeResponse {
    pub text: String,
    pub skills: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Extracts a skills summary from `resumeText`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume_text = request.resume_text.unwrap_or_default();

    let skills = extract_skills(&resume_text, state.llm.as_ref()).await?;

    Ok(Json(AnalyzeResponse { skills }))
}

/// POST /analyze/full
///
/// Returns a structured analysis (skills, summary, experience highlights,
/// education, overall impression) of `resumeText`.
pub async fn handle_analyze_full(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume_text = request.resume_text.unwrap_or_default();

    let analysis = analyze_resume(&resume_text, state.llm.as_ref()).await?;

    Ok(Json(analysis))
}

/// POST /analyze/upload
///
/// Accepts a PDF in the `resume` multipart field, extracts its text and runs
/// the same skills extraction. Nothing is written to disk.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadAnalyzeResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let file_name = field.file_name().map(String::from);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            upload = Some((file_name, data));
            break;
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!(
        file_name = file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = data.len(),
        "Resume upload received"
    );

    let text = extract_text_blocking(data).await?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(RESUME_TEXT_REQUIRED.to_string()));
    }

    let skills = extract_skills(&text, state.llm.as_ref()).await?;

    Ok(Json(UploadAnalyzeResponse { text, skills }))
}
