//! Structured resume analysis: one JSON-mode completion parsed into
//! `ResumeAnalysis`. Nothing is stored.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::analysis::prompts::RESUME_ANALYSIS_PROMPT;
use crate::errors::{AppError, RESUME_TEXT_REQUIRED};
use crate::llm_client::{complete_json, ChatMessage, CompletionProvider, LlmError};

/// Fields the model leaves out default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysis {
    pub skills: Vec<String>,
    pub summary: String,
    pub experience_highlights: Vec<String>,
    pub education: Vec<String>,
    pub overall_impression: String,
}

pub fn build_analysis_prompt(resume_text: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(
        RESUME_ANALYSIS_PROMPT.replace("{resume_text}", resume_text),
    )]
}

pub async fn analyze_resume(
    resume_text: &str,
    llm: &dyn CompletionProvider,
) -> Result<ResumeAnalysis, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(RESUME_TEXT_REQUIRED.to_string()));
    }

    let messages = build_analysis_prompt(resume_text);
    let analysis: ResumeAnalysis = complete_json(llm, &messages).await.map_err(|e| {
        error!("Resume analysis failed: {e}");
        AppError::Llm(describe_failure(&e))
    })?;

    info!(
        skills = analysis.skills.len(),
        highlights = analysis.experience_highlights.len(),
        "Resume analyzed"
    );

    Ok(analysis)
}

/// Client-facing message for each failure class. Provider bodies stay in the logs.
fn describe_failure(err: &LlmError) -> String {
    match err {
        LlmError::Api { status, .. } => format!(
            "Error communicating with AI service (Status: {status}). Please try again later."
        ),
        LlmError::Http(_) => {
            "Error communicating with AI service. Please try again later.".to_string()
        }
        LlmError::EmptyContent => "Invalid response structure from AI service.".to_string(),
        LlmError::Parse(_) => {
            "Error processing AI response. Could not parse analysis data.".to_string()
        }
    }
}
